use super::types::State;

/// Transitions out of `Initializing` are the only ones allowed. Terminal
/// states are never left or re-entered.
pub fn valid_state_transition(src: &State, dst: &State) -> bool {
    match src {
        State::Initializing => matches!(dst, State::Ready | State::Failed),
        State::Ready | State::Failed => false,
    }
}
