use super::error::{StateError, StateResult};
use super::{NavigationEvent, NavigationState, StateTransition};

#[derive(Debug)]
pub struct StateMachine {
    state: NavigationState,
    settled: NavigationState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: NavigationState::default(),
            settled: NavigationState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn next_state(&self, event: NavigationEvent) -> Option<NavigationState> {
        use NavigationEvent::*;
        match (self.state, event) {
            (NavigationState::Empty, Open) => Some(NavigationState::Loading),
            (NavigationState::Viewing, Advance(_)) => Some(NavigationState::Loading),
            (NavigationState::Loading, Loaded) => Some(NavigationState::Viewing),
            // A failed load falls back to whatever was shown before it started.
            (NavigationState::Loading, LoadFailed) => Some(self.settled),
            (NavigationState::Viewing, Blur) => Some(NavigationState::Viewing),
            (NavigationState::Viewing, Save) => Some(NavigationState::Viewing),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: NavigationEvent) -> StateResult<NavigationState> {
        tracing::debug!(from = ?self.state, event = ?event, "request state transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid state transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(self.state, event, next);
        self.state = next;
        if next != NavigationState::Loading {
            self.settled = next;
        }
        self.transition_history.push(record);

        Ok(self.state)
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;

    #[test]
    fn next_state_tracks_valid_and_invalid_events() {
        let mut machine = StateMachine::new();
        assert!(machine.next_state(NavigationEvent::Open).is_some());
        assert!(machine.next_state(NavigationEvent::Save).is_none());
        assert!(machine.next_state(NavigationEvent::Advance(Direction::Next)).is_none());

        machine
            .transition(NavigationEvent::Open)
            .expect("empty -> loading should transition");
        assert!(machine.next_state(NavigationEvent::Loaded).is_some());
        assert!(machine.next_state(NavigationEvent::Blur).is_none());

        machine
            .transition(NavigationEvent::Loaded)
            .expect("loading -> viewing should transition");
        assert!(machine.next_state(NavigationEvent::Blur).is_some());
        assert!(machine.next_state(NavigationEvent::Save).is_some());
        assert!(machine.next_state(NavigationEvent::Open).is_none());
    }

    #[test]
    fn transition_records_history_with_ordered_entries() {
        let mut machine = StateMachine::new();
        for event in [
            NavigationEvent::Open,
            NavigationEvent::Loaded,
            NavigationEvent::Blur,
            NavigationEvent::Advance(Direction::Next),
            NavigationEvent::Loaded,
        ] {
            machine.transition(event).expect("valid transition");
        }

        assert_eq!(machine.state(), NavigationState::Viewing);
        assert_eq!(machine.history().len(), 5);
        assert_eq!(
            machine.history()[0],
            StateTransition::new(
                NavigationState::Empty,
                NavigationEvent::Open,
                NavigationState::Loading
            )
        );
        assert_eq!(
            machine.history()[3],
            StateTransition::new(
                NavigationState::Viewing,
                NavigationEvent::Advance(Direction::Next),
                NavigationState::Loading
            )
        );
    }

    #[test]
    fn failed_load_returns_to_previous_settled_state() {
        let mut machine = StateMachine::new();
        machine.transition(NavigationEvent::Open).expect("open");
        assert_eq!(
            machine.transition(NavigationEvent::LoadFailed).expect("fail"),
            NavigationState::Empty
        );

        machine.transition(NavigationEvent::Open).expect("open");
        machine.transition(NavigationEvent::Loaded).expect("loaded");
        machine
            .transition(NavigationEvent::Advance(Direction::Current))
            .expect("reload");
        assert_eq!(
            machine.transition(NavigationEvent::LoadFailed).expect("fail"),
            NavigationState::Viewing
        );
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_history() {
        let mut machine = StateMachine::new();

        let err = machine
            .transition(NavigationEvent::Save)
            .expect_err("empty -> save should fail");
        assert!(matches!(
            err,
            StateError::InvalidStateTransition {
                from: NavigationState::Empty,
                event: NavigationEvent::Save
            }
        ));
        assert_eq!(machine.state(), NavigationState::Empty);
        assert!(machine.history().is_empty());
    }
}
