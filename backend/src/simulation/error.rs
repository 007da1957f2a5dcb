//! Turn submission errors

use thiserror::Error;

/// Errors that can occur when submitting a chat turn
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// The input was empty or whitespace only
    #[error("Cannot send an empty message")]
    EmptyInput,

    /// No agent is active, or the active pointer names a removed agent
    #[error("No active agent to send the message to")]
    NoActiveAgent,
}
