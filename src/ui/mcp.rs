// MCP view
// Connection cards with status and configuration, plus a create form

use crate::state::ViewState;
use crate::ui::apply_actions;
use crate::ui::components::*;
use code_studio_backend::state::{
    AppState, ConnectionStatus, ConnectionType, McpConnection, StoreAction,
};
use eframe::egui;

/// Render the MCP connections view
pub fn render(ui: &mut egui::Ui, state: &mut AppState, view: &mut ViewState) {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("MCP Connections");
            ui.label(
                egui::RichText::new(format!(
                    "{} of {} connected",
                    state.connected_count(),
                    state.mcp_connections().len()
                ))
                .weak(),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if view.show_connection_form { "Cancel" } else { "+ New Connection" };
            if primary_button(ui, label).clicked() {
                view.show_connection_form = !view.show_connection_form;
            }
        });
    });
    ui.add_space(8.0);

    if view.show_connection_form {
        render_create_form(ui, view, &mut actions);
        ui.add_space(8.0);
    }

    let connections: Vec<McpConnection> = state.mcp_connections().to_vec();

    egui::ScrollArea::vertical()
        .id_source("mcp_cards")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for connection in &connections {
                render_connection_card(ui, connection, &mut actions);
                ui.add_space(8.0);
            }

            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(
                    "Model Context Protocol (MCP) enables your agents to connect with external \
                     services and tools: GitHub for repository management, Docker for container \
                     orchestration, web search for real-time information, and more.",
                )
                .small()
                .weak(),
            );
        });

    apply_actions(state, view, actions);
}

fn render_connection_card(
    ui: &mut egui::Ui,
    connection: &McpConnection,
    actions: &mut Vec<StoreAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&connection.name).strong().size(16.0));
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(connection.connection_type.display_name())
                            .small()
                            .weak(),
                    );
                    connection_status_badge(ui, connection.status);
                });
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if danger_button(ui, "🗑").on_hover_text("Delete").clicked() {
                    actions.push(StoreAction::RemoveMcpConnection {
                        id: connection.id.clone(),
                    });
                }
            });
        });

        ui.add_space(6.0);
        ui.label(egui::RichText::new("Configuration").small().strong());
        config_grid(ui, ("mcp_config", &connection.id), &connection.config);
        ui.add_space(6.0);

        let label = if connection.status == ConnectionStatus::Connected {
            "Disconnect"
        } else {
            "Connect"
        };
        if ui.button(label).clicked() {
            actions.push(StoreAction::ToggleConnection {
                id: connection.id.clone(),
            });
        }
    });
}

fn render_create_form(ui: &mut egui::Ui, view: &mut ViewState, actions: &mut Vec<StoreAction>) {
    let mut submitted = false;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        let draft = &mut view.connection_draft;

        egui::Grid::new("new_connection_form")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut draft.name);
                ui.end_row();

                ui.label("Type");
                egui::ComboBox::from_id_source("new_connection_type")
                    .selected_text(draft.connection_type.display_name())
                    .show_ui(ui, |ui| {
                        for kind in ConnectionType::ALL {
                            ui.selectable_value(
                                &mut draft.connection_type,
                                kind,
                                kind.display_name(),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Config (JSON)");
                ui.add(
                    egui::TextEdit::multiline(&mut draft.config_json)
                        .code_editor()
                        .desired_rows(3),
                );
                ui.end_row();
            });

        ui.add_space(6.0);
        if primary_button(ui, "Add Connection").clicked() {
            submitted = true;
        }
    });

    if submitted {
        match view.connection_draft.build() {
            Ok(connection) => {
                actions.push(StoreAction::AddMcpConnection { connection });
                view.connection_draft = Default::default();
                view.show_connection_form = false;
            }
            Err(err) => view.report(err),
        }
    }
}
