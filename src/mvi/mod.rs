//! Intent/reducer primitives for the runtime's state machines.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ store keys / logs
//!    ↑                       │
//!    └───────────────────────┘
//! ```
//!
//! - **State**: an immutable snapshot of one machine
//! - **Intent**: an event that may move the machine
//! - **Reducer**: pure `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::MachineState;
