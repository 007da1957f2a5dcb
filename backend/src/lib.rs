//! Code Studio Backend Library
//!
//! The in-memory application store behind the studio GUI, the simulated
//! agent turn runner, and configuration. The GUI binary lives in the
//! workspace root.

pub mod config;
pub mod error;
/// Application state management
///
/// Handles agents, the chat transcript, MCP connections and view selection.
pub mod state;
pub mod simulation;

pub use config::Config;
pub use error::StoreError;
pub use simulation::{TurnError, TurnRunner};
pub use state::AppState;
