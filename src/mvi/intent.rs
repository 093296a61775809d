//! Base trait for machine intents.

/// Marker trait for events a [`Reducer`](super::Reducer) consumes: an
/// action starting, a collaborator returning, a call settling.
pub trait Intent: Send + 'static {}
