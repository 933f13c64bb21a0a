use super::model::{Direction, NavigationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    Open,
    Advance(Direction),
    Loaded,
    LoadFailed,
    Blur,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: NavigationState,
    pub event: NavigationEvent,
    pub to: NavigationState,
}

impl StateTransition {
    pub const fn new(from: NavigationState, event: NavigationEvent, to: NavigationState) -> Self {
        Self { from, event, to }
    }
}
