//! Dispatcher state machines.
//!
//! [`PhaseReducer`] tracks a single synchronous dispatch:
//!
//! ```text
//! Idle -> Dispatching(kind) -> Navigating | Calling | ShowingDialog
//!                              | Mutating | Resetting | Invoking -> Idle
//! ```
//!
//! [`CallReducer`] tracks one asynchronous call (API or form submit)
//! through `Idle -> Loading -> Succeeded | Failed`, and [`CallKeys`]
//! projects each state onto the store.

use crate::model::Action;
use crate::mvi::{Intent, MachineState, Reducer};
use crate::state::StateStore;

use super::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Navigate,
    ApiCall,
    ShowDialog,
    UpdateState,
    Reset,
    Custom,
}

impl From<&Action> for ActionKind {
    fn from(action: &Action) -> Self {
        match action {
            Action::Navigate { .. } => ActionKind::Navigate,
            Action::ApiCall { .. } => ActionKind::ApiCall,
            Action::ShowDialog { .. } => ActionKind::ShowDialog,
            Action::UpdateState { .. } => ActionKind::UpdateState,
            Action::Reset { .. } => ActionKind::Reset,
            Action::Custom { .. } => ActionKind::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPhase {
    #[default]
    Idle,
    Dispatching(ActionKind),
    Navigating,
    /// An API call has been handed to the concurrency scope.
    Calling,
    ShowingDialog,
    Mutating,
    Resetting,
    Invoking,
}

impl MachineState for DispatchPhase {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseIntent {
    Begin(ActionKind),
    Perform,
    Finish,
}

impl Intent for PhaseIntent {}

pub struct PhaseReducer;

impl Reducer for PhaseReducer {
    type State = DispatchPhase;
    type Intent = PhaseIntent;

    fn reduce(state: DispatchPhase, intent: PhaseIntent) -> DispatchPhase {
        match (state, intent) {
            (DispatchPhase::Idle, PhaseIntent::Begin(kind)) => DispatchPhase::Dispatching(kind),
            (DispatchPhase::Dispatching(kind), PhaseIntent::Perform) => match kind {
                ActionKind::Navigate => DispatchPhase::Navigating,
                ActionKind::ApiCall => DispatchPhase::Calling,
                ActionKind::ShowDialog => DispatchPhase::ShowingDialog,
                ActionKind::UpdateState => DispatchPhase::Mutating,
                ActionKind::Reset => DispatchPhase::Resetting,
                ActionKind::Custom => DispatchPhase::Invoking,
            },
            (_, PhaseIntent::Finish) => DispatchPhase::Idle,
            (state, _) => state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Idle,
    Loading,
    Succeeded {
        body: Option<String>,
    },
    Failed {
        error: String,
    },
}

impl MachineState for CallState {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallIntent {
    Start,
    Succeed(Option<String>),
    Fail(String),
}

impl Intent for CallIntent {}

pub struct CallReducer;

impl Reducer for CallReducer {
    type State = CallState;
    type Intent = CallIntent;

    fn reduce(state: CallState, intent: CallIntent) -> CallState {
        match (state, intent) {
            (_, CallIntent::Start) => CallState::Loading,
            (CallState::Loading, CallIntent::Succeed(body)) => CallState::Succeeded { body },
            (CallState::Loading, CallIntent::Fail(error)) => CallState::Failed { error },
            (state, _) => state,
        }
    }
}

/// Store keys one kind of call writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallKeys {
    pub status: &'static str,
    pub response: Option<&'static str>,
    pub error: &'static str,
}

impl CallKeys {
    pub const API: CallKeys = CallKeys {
        status: keys::API_STATUS,
        response: Some(keys::LAST_API_RESPONSE),
        error: keys::LAST_API_ERROR,
    };

    pub const FORM: CallKeys = CallKeys {
        status: keys::FORM_STATUS,
        response: None,
        error: keys::FORM_ERROR,
    };

    /// Write `state` to the store. Settled states clear the loading flag
    /// before writing their result fields.
    pub fn apply(&self, state: &CallState, store: &StateStore) {
        match state {
            CallState::Idle => {}
            CallState::Loading => store.set(keys::IS_LOADING, true),
            CallState::Succeeded { body } => {
                store.set(keys::IS_LOADING, false);
                store.set(self.status, keys::STATUS_SUCCESS);
                if let Some(response) = self.response {
                    store.set(response, body.clone().unwrap_or_default());
                }
            }
            CallState::Failed { error } => {
                store.set(keys::IS_LOADING, false);
                store.set(self.status, keys::STATUS_ERROR);
                store.set(self.error, error.as_str());
            }
        }
    }
}
