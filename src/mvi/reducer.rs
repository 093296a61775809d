//! Reducer trait.

use super::intent::Intent;
use super::state::MachineState;

/// The only place machine transitions happen. Must be pure.
pub trait Reducer {
    type State: MachineState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Fold a sequence of intents from the idle state.
    fn replay<I>(intents: I) -> Self::State
    where
        I: IntoIterator<Item = Self::Intent>,
    {
        intents
            .into_iter()
            .fold(Self::State::default(), Self::reduce)
    }
}
