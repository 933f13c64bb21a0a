use crate::state::StateError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no folder was chosen")]
    StartupCancelled,
    #[error("GTK application exited with {0}")]
    Gtk(String),
    #[error(transparent)]
    State(#[from] StateError),
}
