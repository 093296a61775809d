//! Base trait for machine states.

/// Marker trait for machine states. `Default` is the idle state.
pub trait MachineState: Clone + PartialEq + Default + Send + 'static {}
