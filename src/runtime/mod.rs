//! Action dispatch runtime.
//!
//! - [`ActionDispatcher`] interprets actions against the state store
//! - [`collaborators`] defines what the host injects
//! - [`chain`] parses `onSuccess` / `onError` strings
//! - [`phase`] holds the dispatch and call state machines
//! - [`keys`] lists the store keys the runtime writes

pub mod chain;
pub mod collaborators;
mod dispatcher;
mod http;
pub mod keys;
pub mod phase;

pub use chain::{ChainError, ChainedAction};
pub use collaborators::{
    ApiClient, ApiRequest, ApiResponse, CollaboratorError, CustomHandler, DialogPresenter,
    FormSubmitter, Navigator,
};
pub use dispatcher::{ActionDispatcher, DispatcherBuilder, Dispatched};
pub use http::HttpApiClient;
pub use phase::{ActionKind, CallState, DispatchPhase};
