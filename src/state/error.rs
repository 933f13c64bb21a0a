use super::event::NavigationEvent;
use super::model::NavigationState;
use crate::editor::BlurError;
use crate::storage::StorageError;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid state transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: NavigationState,
        event: NavigationEvent,
    },
    #[error("no image is loaded")]
    NoImageLoaded,
    #[error("none of the {count} images could be read")]
    NoReadableImages { count: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Blur(#[from] BlurError),
}
