// UI module
// Contains layout, views, components, and UI-related functionality

pub mod agents;
pub mod chat;
pub mod components;
pub mod layout;
pub mod mcp;
pub mod tools;

pub use layout::render_app_layout;

use crate::state::ViewState;
use code_studio_backend::state::{AppState, StoreAction};

/// Dispatch actions collected while rendering a view
/// Failures are reported in the banner; the remaining actions still run
pub fn apply_actions(state: &mut AppState, view: &mut ViewState, actions: Vec<StoreAction>) {
    for action in actions {
        if let Err(err) = state.dispatch(action) {
            view.report(err);
        }
    }
}
