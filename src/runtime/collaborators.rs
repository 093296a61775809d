//! Host-provided collaborators the dispatcher calls into.
//!
//! Synchronous collaborators (navigation, dialogs, custom handlers) are
//! plain traits with blanket impls for closures. The network and form
//! collaborators are async.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by (or on behalf of) a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("{0}")]
    Failed(String),

    /// Non-2xx response from the network collaborator.
    #[error("HTTP {status}")]
    Status { status: u16, body: Option<String> },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("collaborator panicked: {0}")]
    Panicked(String),
}

impl CollaboratorError {
    pub fn failed(message: impl Into<String>) -> Self {
        CollaboratorError::Failed(message.into())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(
        &self,
        route: &str,
        payload: Option<&BTreeMap<String, String>>,
    ) -> Result<(), CollaboratorError>;
}

impl<F> Navigator for F
where
    F: Fn(&str, Option<&BTreeMap<String, String>>) -> Result<(), CollaboratorError> + Send + Sync,
{
    fn navigate(
        &self,
        route: &str,
        payload: Option<&BTreeMap<String, String>>,
    ) -> Result<(), CollaboratorError> {
        self(route, payload)
    }
}

pub trait DialogPresenter: Send + Sync {
    fn show_dialog(&self, title: &str, message: &str, kind: &str) -> Result<(), CollaboratorError>;
}

impl<F> DialogPresenter for F
where
    F: Fn(&str, &str, &str) -> Result<(), CollaboratorError> + Send + Sync,
{
    fn show_dialog(&self, title: &str, message: &str, kind: &str) -> Result<(), CollaboratorError> {
        self(title, message, kind)
    }
}

/// Outgoing request handed to an [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl ApiResponse {
    pub fn new(status_code: u16, body: Option<String>) -> Self {
        Self {
            status_code,
            body,
            headers: BTreeMap::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Network collaborator. Transport failures are `Err`; HTTP error statuses
/// may come back as `Ok` and are classified by the dispatcher.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, CollaboratorError>;
}

#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, data: BTreeMap<String, String>) -> Result<(), CollaboratorError>;
}

/// Handler registered under a custom action name.
pub type CustomHandler =
    Arc<dyn Fn(Option<&BTreeMap<String, String>>) -> Result<(), CollaboratorError> + Send + Sync>;

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run a synchronous collaborator, turning a panic into an error.
pub(crate) fn contain<T>(
    call: impl FnOnce() -> Result<T, CollaboratorError>,
) -> Result<T, CollaboratorError> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(CollaboratorError::Panicked(panic_message(payload.as_ref()))),
    }
}
