//! Server-driven UI engine.
//!
//! ```text
//! JSON ─→ codec::decode ─→ model::Node ─→ validation (optional gate)
//!                              │
//!                              ├─→ style::resolve per node ─→ host toolkit
//!                              └─→ model::Action ─→ runtime::ActionDispatcher ─→ state::StateStore
//! ```
//!
//! Rendering is left to the host: it receives a [`model::Node`], a way to
//! dispatch [`model::Action`]s and read/write access to the
//! [`state::StateStore`].

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod runtime;
pub mod state;
pub mod style;
pub mod validation;

pub use codec::{decode, encode, DecodeError, EncodeError};
pub use model::{Action, Node};
pub use runtime::ActionDispatcher;
pub use state::{StateStore, StateValue};
pub use validation::{validate, Severity, ValidationIssue, ValidationReport, Validator};
