//! Shared test utilities and fake collaborators.

#![allow(dead_code, unused_imports)]

use async_trait::async_trait;
use parking_lot::Mutex;
use sdui::runtime::{
    ActionDispatcher, ApiClient, ApiRequest, ApiResponse, CollaboratorError, DialogPresenter,
    DispatcherBuilder, FormSubmitter, Navigator,
};
use sdui::state::StateStore;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Read a JSON document from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).expect("Failed to read fixture")
}

// -- Navigation ---------------------------------------------------------------

#[derive(Default, Clone)]
pub struct RecordingNavigator {
    pub calls: Arc<Mutex<Vec<(String, Option<BTreeMap<String, String>>)>>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(r, _)| r.clone()).collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(
        &self,
        route: &str,
        payload: Option<&BTreeMap<String, String>>,
    ) -> Result<(), CollaboratorError> {
        self.calls.lock().push((route.to_string(), payload.cloned()));
        Ok(())
    }
}

pub struct FailingNavigator;

impl Navigator for FailingNavigator {
    fn navigate(
        &self,
        route: &str,
        _payload: Option<&BTreeMap<String, String>>,
    ) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::failed(format!("no screen for {}", route)))
    }
}

// -- Dialogs ------------------------------------------------------------------

#[derive(Default, Clone)]
pub struct RecordingDialogs {
    pub shown: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl DialogPresenter for RecordingDialogs {
    fn show_dialog(&self, title: &str, message: &str, kind: &str) -> Result<(), CollaboratorError> {
        self.shown
            .lock()
            .push((title.to_string(), message.to_string(), kind.to_string()));
        Ok(())
    }
}

pub struct PanickingDialogs;

impl DialogPresenter for PanickingDialogs {
    fn show_dialog(&self, _: &str, _: &str, _: &str) -> Result<(), CollaboratorError> {
        panic!("dialog host is gone")
    }
}

// -- Network ------------------------------------------------------------------

pub enum ApiBehavior {
    Respond(ApiResponse),
    Fail(CollaboratorError),
    Panic,
    Hang,
}

/// Network fake that records requests and answers with a fixed behavior.
pub struct FakeApi {
    pub behavior: ApiBehavior,
    pub requests: Mutex<Vec<ApiRequest>>,
}

impl FakeApi {
    pub fn new(behavior: ApiBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::new(ApiBehavior::Respond(ApiResponse::new(200, Some(body.to_string()))))
    }

    pub fn status(code: u16) -> Arc<Self> {
        Self::new(ApiBehavior::Respond(ApiResponse::new(code, None)))
    }
}

#[async_trait]
impl ApiClient for FakeApi {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, CollaboratorError> {
        self.requests.lock().push(request);
        match &self.behavior {
            ApiBehavior::Respond(response) => Ok(response.clone()),
            ApiBehavior::Fail(err) => Err(err.clone()),
            ApiBehavior::Panic => panic!("network stack crashed"),
            ApiBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(ApiResponse::new(200, None))
            }
        }
    }
}

// -- Forms --------------------------------------------------------------------

pub struct FakeForms {
    pub result: Result<(), CollaboratorError>,
    pub submissions: Mutex<Vec<BTreeMap<String, String>>>,
}

impl FakeForms {
    pub fn new(result: Result<(), CollaboratorError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            submissions: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl FormSubmitter for FakeForms {
    async fn submit(&self, data: BTreeMap<String, String>) -> Result<(), CollaboratorError> {
        self.submissions.lock().push(data);
        self.result.clone()
    }
}

// -- Builders -----------------------------------------------------------------

/// Dispatcher builder bound to the current tokio runtime.
pub fn scoped_builder(store: &StateStore) -> DispatcherBuilder {
    ActionDispatcher::builder().store(store.clone()).current_scope()
}
