//! Reactive key/value store shared between the dispatcher and the host UI.

use std::collections::BTreeMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::{Mutex, RwLock};

use super::value::StateValue;

/// One mutation, delivered to every listener.
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    pub key: String,
    pub old_value: Option<StateValue>,
    /// The new value; removals deliver an empty string.
    pub new_value: StateValue,
    pub timestamp: SystemTime,
}

impl StateChange {
    pub fn is_removal(&self) -> bool {
        self.new_value == StateValue::String(String::new()) && self.old_value.is_some()
    }
}

/// Handle returned by [`StateStore::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&StateChange) + Send + Sync>;

/// Session-scoped state store. Cloning yields another handle to the same
/// map.
///
/// Listeners run synchronously on the mutating thread after the map lock
/// is released, so a listener may read the store. A panicking listener is
/// logged and skipped; the remaining listeners still run.
#[derive(Clone, Default)]
pub struct StateStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    values: RwLock<BTreeMap<String, StateValue>>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("values", &*self.inner.values.read())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<StateValue> {
        self.inner.values.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.values.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.values.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values.read().is_empty()
    }

    /// Ordered copy of every entry.
    pub fn snapshot(&self) -> BTreeMap<String, StateValue> {
        self.inner.values.read().clone()
    }

    /// Replace the value at `key`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<StateValue>) {
        let key = key.into();
        let value = value.into();
        let old_value = self.inner.values.write().insert(key.clone(), value.clone());
        tracing::trace!(key = %key, kind = value.kind(), "state set");
        self.notify(StateChange {
            key,
            old_value,
            new_value: value,
            timestamp: SystemTime::now(),
        });
    }

    /// Store `raw` after type inference (see [`StateValue::from_string`]).
    pub fn set_from_string(&self, key: impl Into<String>, raw: &str) {
        self.set(key, StateValue::from_string(raw));
    }

    /// Remove `key`. Listeners see an empty-string `new_value`. Removing an
    /// absent key is silent.
    pub fn remove(&self, key: &str) -> Option<StateValue> {
        let old_value = self.inner.values.write().remove(key)?;
        tracing::trace!(key = %key, "state removed");
        self.notify(StateChange {
            key: key.to_string(),
            old_value: Some(old_value.clone()),
            new_value: StateValue::default(),
            timestamp: SystemTime::now(),
        });
        Some(old_value)
    }

    /// Remove every key, emitting one removal event per key held.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.inner.values.write());
        tracing::debug!(keys = drained.len(), "state cleared");
        let timestamp = SystemTime::now();
        for (key, old_value) in drained {
            self.notify(StateChange {
                key,
                old_value: Some(old_value),
                new_value: StateValue::default(),
                timestamp,
            });
        }
    }

    pub fn as_string(&self, key: &str) -> String {
        self.get(key).map(|v| v.as_string()).unwrap_or_default()
    }

    pub fn as_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.as_bool())
    }

    pub fn as_int(&self, key: &str) -> i64 {
        self.get(key).map_or(0, |v| v.as_int())
    }

    pub fn as_double(&self, key: &str) -> f64 {
        self.get(key).map_or(0.0, |v| v.as_double())
    }

    pub fn as_list(&self, key: &str) -> Vec<String> {
        self.get(key).map(|v| v.as_list()).unwrap_or_default()
    }

    pub fn as_map(&self, key: &str) -> BTreeMap<String, String> {
        self.get(key).map(|v| v.as_map()).unwrap_or_default()
    }

    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Returns false when `id` was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    fn notify(&self, change: StateChange) {
        // Snapshot so listeners can add/remove listeners without deadlocking.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(&change))).is_err() {
                tracing::warn!(key = %change.key, "state listener panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(store: &StateStore) -> Arc<Mutex<Vec<StateChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.add_listener(move |change| sink.lock().push(change.clone()));
        seen
    }

    #[test]
    fn set_notifies_with_old_and_new() {
        let store = StateStore::new();
        let seen = recorder(&store);
        store.set("k", "a");
        store.set("k", 2_i64);
        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].old_value, None);
        assert_eq!(seen[1].old_value, Some(StateValue::String("a".into())));
        assert_eq!(seen[1].new_value, StateValue::Integer(2));
    }

    #[test]
    fn remove_sends_empty_sentinel() {
        let store = StateStore::new();
        store.set("k", true);
        let seen = recorder(&store);
        assert_eq!(store.remove("k"), Some(StateValue::Boolean(true)));
        assert_eq!(store.remove("k"), None);
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].is_removal());
    }

    #[test]
    fn clear_emits_one_event_per_key() {
        let store = StateStore::new();
        store.set("a", 1_i64);
        store.set("b", 2_i64);
        let seen = recorder(&store);
        store.clear();
        assert!(store.is_empty());
        let keys: Vec<_> = seen.lock().iter().map(|c| c.key.clone()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn panicking_listener_does_not_block_others() {
        let store = StateStore::new();
        store.add_listener(|_| panic!("boom"));
        let seen = recorder(&store);
        store.set("k", "v");
        assert_eq!(seen.lock().len(), 1);
        assert_eq!(store.as_string("k"), "v");
    }

    #[test]
    fn listeners_can_read_the_store() {
        let store = StateStore::new();
        let reader = store.clone();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        store.add_listener(move |change| *sink.lock() = reader.get(&change.key));
        store.set("k", "v");
        assert_eq!(*seen.lock(), Some(StateValue::String("v".into())));
    }

    #[test]
    fn removed_listener_is_silent() {
        let store = StateStore::new();
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let id = store.add_listener(move |_| *sink.lock() += 1);
        assert!(store.remove_listener(id));
        assert!(!store.remove_listener(id));
        store.set("k", "v");
        assert_eq!(*seen.lock(), 0);
    }

    #[test]
    fn typed_getters_default_when_absent() {
        let store = StateStore::new();
        assert_eq!(store.as_string("missing"), "");
        assert!(!store.as_bool("missing"));
        assert_eq!(store.as_int("missing"), 0);
        assert!(store.as_list("missing").is_empty());
    }
}
