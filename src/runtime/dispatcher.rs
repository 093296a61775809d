//! Action dispatcher.
//!
//! Interprets [`Action`] values against the [`StateStore`] and the injected
//! collaborators. `dispatch` never fails or panics outward: collaborator
//! failures are logged and, where a marker key exists, written to the store.
//!
//! API calls and form submissions run on a caller-supplied tokio
//! [`Handle`]. Without one they are skipped. Their store writes follow a
//! fixed order: loading flag, then result fields, then the chained action.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::json;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::RuntimeConfig;
use crate::model::Action;
use crate::mvi::Reducer;
use crate::state::{StateStore, StateValue};

use super::chain::ChainedAction;
use super::collaborators::{
    contain, panic_message, ApiClient, ApiRequest, CollaboratorError, CustomHandler,
    DialogPresenter, FormSubmitter, Navigator,
};
use super::keys;
use super::phase::{
    ActionKind, CallIntent, CallKeys, CallReducer, CallState, DispatchPhase, PhaseIntent,
    PhaseReducer,
};

/// Result of a dispatch, as seen by the caller.
#[derive(Debug)]
pub enum Dispatched {
    /// Handled synchronously.
    Done,
    /// Async work was spawned; await [`settled`](Self::settled) to observe
    /// its final store writes.
    Pending(JoinHandle<()>),
    /// Degenerate no-op (no concurrency scope or collaborator, or a
    /// malformed chained string).
    Skipped,
}

impl Dispatched {
    pub fn is_pending(&self) -> bool {
        matches!(self, Dispatched::Pending(_))
    }

    /// Wait for spawned work, if any.
    pub async fn settled(self) {
        if let Dispatched::Pending(handle) = self {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "dispatched task did not complete");
            }
        }
    }
}

struct DispatcherInner {
    store: StateStore,
    navigator: Option<Arc<dyn Navigator>>,
    dialogs: Option<Arc<dyn DialogPresenter>>,
    api: Option<Arc<dyn ApiClient>>,
    forms: Option<Arc<dyn FormSubmitter>>,
    custom: HashMap<String, CustomHandler>,
    scope: Option<Handle>,
    settings: RuntimeConfig,
    phase: Mutex<DispatchPhase>,
    in_flight: AtomicUsize,
}

/// Cheap-to-clone dispatcher handle.
#[derive(Clone)]
pub struct ActionDispatcher {
    inner: Arc<DispatcherInner>,
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("phase", &self.phase())
            .field("in_flight", &self.in_flight())
            .field("custom_handlers", &self.inner.custom.len())
            .field("has_scope", &self.inner.scope.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct DispatcherBuilder {
    store: Option<StateStore>,
    navigator: Option<Arc<dyn Navigator>>,
    dialogs: Option<Arc<dyn DialogPresenter>>,
    api: Option<Arc<dyn ApiClient>>,
    forms: Option<Arc<dyn FormSubmitter>>,
    custom: HashMap<String, CustomHandler>,
    scope: Option<Handle>,
    settings: RuntimeConfig,
}

impl DispatcherBuilder {
    pub fn store(mut self, store: StateStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    pub fn dialogs(mut self, dialogs: impl DialogPresenter + 'static) -> Self {
        self.dialogs = Some(Arc::new(dialogs));
        self
    }

    pub fn api_client(mut self, api: Arc<dyn ApiClient>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn form_submitter(mut self, forms: Arc<dyn FormSubmitter>) -> Self {
        self.forms = Some(forms);
        self
    }

    pub fn custom_handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Option<&BTreeMap<String, String>>) -> Result<(), CollaboratorError>
            + Send
            + Sync
            + 'static,
    {
        self.custom.insert(name.into(), Arc::new(handler));
        self
    }

    /// Runtime used for API calls and form submissions.
    pub fn scope(mut self, handle: Handle) -> Self {
        self.scope = Some(handle);
        self
    }

    /// Use the ambient tokio runtime, if called from inside one.
    pub fn current_scope(mut self) -> Self {
        self.scope = Handle::try_current().ok();
        self
    }

    pub fn settings(mut self, settings: RuntimeConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> ActionDispatcher {
        ActionDispatcher {
            inner: Arc::new(DispatcherInner {
                store: self.store.unwrap_or_default(),
                navigator: self.navigator,
                dialogs: self.dialogs,
                api: self.api,
                forms: self.forms,
                custom: self.custom,
                scope: self.scope,
                settings: self.settings,
                phase: Mutex::new(DispatchPhase::Idle),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }
}

impl ActionDispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Dispatcher with no collaborators over `store`.
    pub fn new(store: StateStore) -> Self {
        Self::builder().store(store).build()
    }

    pub fn store(&self) -> &StateStore {
        &self.inner.store
    }

    pub fn settings(&self) -> &RuntimeConfig {
        &self.inner.settings
    }

    /// Phase of the most recent synchronous dispatch step.
    pub fn phase(&self) -> DispatchPhase {
        *self.inner.phase.lock()
    }

    /// Outstanding API calls and form submissions.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    fn record_phase(&self, phase: DispatchPhase) {
        let previous = std::mem::replace(&mut *self.inner.phase.lock(), phase);
        tracing::debug!(from = ?previous, to = ?phase, "dispatch phase");
    }

    pub fn dispatch(&self, action: &Action) -> Dispatched {
        let kind = ActionKind::from(action);
        let phase = PhaseReducer::reduce(DispatchPhase::Idle, PhaseIntent::Begin(kind));
        self.record_phase(phase);
        let phase = PhaseReducer::reduce(phase, PhaseIntent::Perform);
        self.record_phase(phase);

        let outcome = match action {
            Action::Navigate { route, payload } => {
                self.navigate(route.as_deref(), payload.as_ref())
            }
            Action::ApiCall {
                url,
                method,
                headers,
                body,
                on_success,
                on_error,
            } => {
                let request = ApiRequest {
                    url: url.clone(),
                    method: method.to_ascii_uppercase(),
                    headers: headers.clone().unwrap_or_default(),
                    body: body.clone(),
                };
                self.call_api(request, on_success.clone(), on_error.clone())
            }
            Action::ShowDialog {
                title,
                message,
                kind,
            } => self.show_dialog(title, message, kind),
            Action::UpdateState { key, value } => {
                self.inner.store.set_from_string(key.as_str(), value);
                Dispatched::Done
            }
            Action::Reset { .. } => {
                self.inner.store.clear();
                Dispatched::Done
            }
            Action::Custom { action, data } => self.invoke_custom(action, data.as_ref()),
        };

        self.record_phase(PhaseReducer::reduce(phase, PhaseIntent::Finish));
        outcome
    }

    /// Parse and dispatch a chained `verb:payload` string. Malformed
    /// strings are logged and dropped.
    pub fn dispatch_chained(&self, raw: &str) -> Dispatched {
        match ChainedAction::parse(raw) {
            Ok(chained) => self.dispatch(&chained.into_action()),
            Err(err) => {
                tracing::warn!(chained = raw, error = %err, "dropping malformed chained action");
                Dispatched::Skipped
            }
        }
    }

    fn navigate(&self, route: Option<&str>, payload: Option<&BTreeMap<String, String>>) -> Dispatched {
        let route = payload
            .and_then(|p| p.get("route"))
            .map(String::as_str)
            .or(route)
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(self.inner.settings.default_route.as_str());

        let Some(navigator) = &self.inner.navigator else {
            tracing::debug!(route, "no navigator registered, skipping navigate");
            return Dispatched::Skipped;
        };

        match contain(|| navigator.navigate(route, payload)) {
            Ok(()) => tracing::debug!(route, "navigated"),
            Err(err) => {
                tracing::warn!(route, error = %err, "navigation failed");
                self.inner.store.set(keys::NAVIGATION_ERROR, err.to_string());
            }
        }
        Dispatched::Done
    }

    fn show_dialog(&self, title: &str, message: &str, kind: &str) -> Dispatched {
        let payload = json!({ "title": title, "message": message, "type": kind });
        self.inner
            .store
            .set(self.inner.settings.dialog_state_key.as_str(), StateValue::from(payload));

        if let Some(dialogs) = &self.inner.dialogs {
            if let Err(err) = contain(|| dialogs.show_dialog(title, message, kind)) {
                tracing::warn!(title, error = %err, "dialog presenter failed");
            }
        }
        Dispatched::Done
    }

    fn invoke_custom(&self, name: &str, data: Option<&BTreeMap<String, String>>) -> Dispatched {
        let Some(handler) = self.inner.custom.get(name) else {
            tracing::warn!(action = name, "no handler registered for custom action");
            self.inner
                .store
                .set(keys::CUSTOM_ACTION_ERROR, format!("Unknown custom action: {}", name));
            return Dispatched::Done;
        };

        if let Err(err) = contain(|| handler(data)) {
            tracing::warn!(action = name, error = %err, "custom action failed");
            self.inner.store.set(keys::CUSTOM_ACTION_ERROR, err.to_string());
        }
        Dispatched::Done
    }

    fn call_api(
        &self,
        request: ApiRequest,
        on_success: Option<String>,
        on_error: Option<String>,
    ) -> Dispatched {
        let Some(api) = self.inner.api.clone() else {
            tracing::warn!(url = %request.url, "no api client registered, skipping api_call");
            return Dispatched::Skipped;
        };
        let url = request.url.clone();
        tracing::debug!(url = %url, method = %request.method, "starting api call");

        let call = async move {
            match api.call(request).await {
                Ok(response) if response.is_success() => Ok(response.body),
                Ok(response) => Err(CollaboratorError::Status {
                    status: response.status_code,
                    body: response.body,
                }),
                Err(err) => Err(err),
            }
        };
        self.spawn_call("api_call", url, CallKeys::API, call, on_success, on_error)
    }

    /// Submit form data through the form collaborator. Writes `isLoading`,
    /// then `formStatus` and, on failure, `formError`.
    pub fn submit_form(&self, data: BTreeMap<String, String>) -> Dispatched {
        let Some(forms) = self.inner.forms.clone() else {
            tracing::warn!("no form submitter registered, skipping submit");
            return Dispatched::Skipped;
        };
        let fields = data.len();
        let call = async move { forms.submit(data).await.map(|()| None) };
        self.spawn_call("submit_form", format!("{} fields", fields), CallKeys::FORM, call, None, None)
    }

    /// Submit the current store values of `keys`, as text. Absent keys are
    /// left out.
    pub fn submit_form_from_state(&self, keys: &[&str]) -> Dispatched {
        let data = keys
            .iter()
            .filter_map(|key| {
                self.inner
                    .store
                    .get(key)
                    .map(|value| (key.to_string(), value.as_string()))
            })
            .collect();
        self.submit_form(data)
    }

    fn spawn_call<F>(
        &self,
        label: &'static str,
        target: String,
        call_keys: CallKeys,
        call: F,
        on_success: Option<String>,
        on_error: Option<String>,
    ) -> Dispatched
    where
        F: Future<Output = Result<Option<String>, CollaboratorError>> + Send + 'static,
    {
        let Some(scope) = self.inner.scope.clone() else {
            tracing::warn!(call = label, target = %target, "no concurrency scope, skipping");
            return Dispatched::Skipped;
        };

        let loading = CallReducer::reduce(CallState::Idle, CallIntent::Start);
        call_keys.apply(&loading, &self.inner.store);
        self.inner.in_flight.fetch_add(1, Ordering::SeqCst);

        // Released on drop even if the task is never polled.
        let in_flight = scopeguard::guard(Arc::clone(&self.inner), |inner| {
            inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        });

        let this = self.clone();
        let seconds = self.inner.settings.default_http_timeout_seconds;
        let handle = scope.spawn(async move {
            let _in_flight = in_flight;

            // Own task so a panicking collaborator surfaces as a JoinError.
            let mut task = tokio::spawn(call);
            let outcome = match tokio::time::timeout(Duration::from_secs(seconds), &mut task).await {
                Ok(Ok(result)) => result,
                Ok(Err(join)) if join.is_panic() => {
                    Err(CollaboratorError::Panicked(panic_message(join.into_panic().as_ref())))
                }
                Ok(Err(join)) => Err(CollaboratorError::Failed(join.to_string())),
                Err(_) => {
                    task.abort();
                    Err(CollaboratorError::Timeout { seconds })
                }
            };

            let settled = match outcome {
                Ok(body) => {
                    tracing::info!(call = label, target = %target, "call succeeded");
                    CallReducer::reduce(loading, CallIntent::Succeed(body))
                }
                Err(err) => {
                    tracing::warn!(call = label, target = %target, error = %err, "call failed");
                    CallReducer::reduce(loading, CallIntent::Fail(err.to_string()))
                }
            };
            call_keys.apply(&settled, &this.inner.store);

            let chained = match settled {
                CallState::Succeeded { .. } => on_success,
                CallState::Failed { .. } => on_error,
                CallState::Idle | CallState::Loading => None,
            };
            if let Some(raw) = chained {
                this.dispatch_chained(&raw);
            }
        });
        Dispatched::Pending(handle)
    }
}
