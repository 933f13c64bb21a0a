pub mod error;
pub mod event;
pub mod machine;
pub mod model;
pub mod navigator;

pub use error::{StateError, StateResult};
pub use event::{NavigationEvent, StateTransition};
pub use machine::StateMachine;
pub use model::{Direction, NavigationCursor, NavigationState};
pub use navigator::Navigator;
