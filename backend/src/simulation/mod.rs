//! Simulated agent turns
//!
//! No model is ever called. A chat turn plays back a fixed response script on
//! tokio timers; the resulting messages are handed to the caller's thread and
//! applied to the store there.

pub mod error;
pub mod runner;
pub mod script;

pub use error::TurnError;
pub use runner::{EventNotifier, TurnEvent, TurnId, TurnPolicy, TurnRunner};
pub use script::{ResponseScript, ScriptStep};
