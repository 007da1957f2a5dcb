// GUI state module
// Transient, view-local state that does not belong in the application store

pub mod view_state;

pub use view_state::{AgentDraft, ConnectionDraft, ViewState};
