// Tools view
// Read-only catalog of the built-in tools

use crate::ui::components::*;
use code_studio_backend::state::tools::{builtin_tools, ToolDescriptor};
use code_studio_backend::state::AppState;
use eframe::egui;

/// Render the tools view
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.heading("Tools");
    ui.label(egui::RichText::new("Capabilities available to your agents").weak());
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .id_source("tool_cards")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for tool in builtin_tools() {
                render_tool_card(ui, state, &tool);
                ui.add_space(8.0);
            }
        });
}

fn render_tool_card(ui: &mut egui::Ui, state: &AppState, tool: &ToolDescriptor) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            avatar(ui, tool.name, color_or_neutral(tool.color));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(tool.name).strong());
                ui.label(egui::RichText::new(tool.description).small().weak());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut enabled = tool.enabled;
                ui.add_enabled(false, egui::Checkbox::new(&mut enabled, "Enabled"));
            });
        });
        ui.add_space(4.0);
        config_grid(ui, ("tool_config", tool.id), &tool.config);

        let users: Vec<&str> = state
            .agents()
            .iter()
            .filter(|agent| agent.tools.iter().any(|t| t == tool.id))
            .map(|agent| agent.name.as_str())
            .collect();
        if !users.is_empty() {
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!("Used by {}", users.join(", ")))
                    .small()
                    .weak(),
            );
        }
    });
}
