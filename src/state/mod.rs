//! Reactive state store.

mod store;
mod value;

pub use store::{ListenerId, StateChange, StateStore};
pub use value::StateValue;
