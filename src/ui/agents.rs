// Agents view
// Agent cards with provider, status, tools and power controls, plus a create form

use crate::state::ViewState;
use crate::ui::apply_actions;
use crate::ui::components::*;
use code_studio_backend::state::tools::builtin_tools;
use code_studio_backend::state::{Agent, AppState, LlmProvider, StoreAction};
use eframe::egui;
use serde_json::json;

/// Render the agents view
pub fn render(ui: &mut egui::Ui, state: &mut AppState, view: &mut ViewState) {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("AI Agents");
            ui.label(egui::RichText::new("Manage your agent team").weak());
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if view.show_agent_form { "Cancel" } else { "+ New Agent" };
            if primary_button(ui, label).clicked() {
                view.show_agent_form = !view.show_agent_form;
            }
        });
    });
    ui.add_space(8.0);

    if view.show_agent_form {
        render_create_form(ui, view, &mut actions);
        ui.add_space(8.0);
    }

    let agents: Vec<Agent> = state.agents().to_vec();
    let active_id = state.active_agent_id().map(str::to_string);

    egui::ScrollArea::vertical()
        .id_source("agent_cards")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if agents.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(egui::RichText::new("No agents").italics().weak());
                });
            }
            for agent in &agents {
                let is_target = active_id.as_deref() == Some(agent.id.as_str());
                render_agent_card(ui, agent, is_target, &mut actions);
                ui.add_space(8.0);
            }
        });

    apply_actions(state, view, actions);
}

fn render_agent_card(
    ui: &mut egui::Ui,
    agent: &Agent,
    is_target: bool,
    actions: &mut Vec<StoreAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            avatar(ui, &agent.name, color_or_neutral(&agent.color));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&agent.name).strong().size(16.0));
                ui.label(egui::RichText::new(agent.llm.as_str()).small().weak());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if danger_button(ui, "🗑").on_hover_text("Delete agent").clicked() {
                    actions.push(StoreAction::RemoveAgent {
                        id: agent.id.clone(),
                    });
                }
                if power_button(ui, agent.is_active).clicked() {
                    actions.push(StoreAction::ToggleAgentPower {
                        id: agent.id.clone(),
                    });
                }
            });
        });
        ui.add_space(6.0);

        egui::Grid::new(("agent_fields", &agent.id))
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.label(egui::RichText::new("LLM Provider").weak());
                let mut llm = agent.llm;
                egui::ComboBox::from_id_source(("llm", &agent.id))
                    .selected_text(llm.as_str())
                    .show_ui(ui, |ui| {
                        for provider in LlmProvider::ALL {
                            ui.selectable_value(&mut llm, provider, provider.as_str());
                        }
                    });
                if llm != agent.llm {
                    actions.push(StoreAction::UpdateAgent {
                        id: agent.id.clone(),
                        patch: json!({ "llm": llm.as_str() }),
                    });
                }
                ui.end_row();

                ui.label(egui::RichText::new("Status").weak());
                agent_status_badge(ui, agent.status);
                ui.end_row();

                let tools_label = format!("Enabled Tools ({})", agent.tools.len());
                ui.label(egui::RichText::new(tools_label).weak());
                ui.horizontal_wrapped(|ui| {
                    for tool in &agent.tools {
                        chip(ui, tool);
                    }
                });
                ui.end_row();
            });

        ui.add_space(6.0);
        let button = egui::Button::new(if is_target { "Active" } else { "Set as Active" });
        if ui.add_enabled(!is_target, button).clicked() {
            actions.push(StoreAction::SetActiveAgent {
                id: Some(agent.id.clone()),
            });
        }
    });
}

fn render_create_form(ui: &mut egui::Ui, view: &mut ViewState, actions: &mut Vec<StoreAction>) {
    let mut submitted = false;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        let draft = &mut view.agent_draft;

        egui::Grid::new("new_agent_form")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut draft.name);
                ui.end_row();

                ui.label("LLM Provider");
                egui::ComboBox::from_id_source("new_agent_llm")
                    .selected_text(draft.llm.as_str())
                    .show_ui(ui, |ui| {
                        for provider in LlmProvider::ALL {
                            ui.selectable_value(&mut draft.llm, provider, provider.as_str());
                        }
                    });
                ui.end_row();

                ui.label("Color");
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut draft.color);
                    if let Some(color) = parse_hex_color(&draft.color) {
                        status_dot(ui, color);
                    }
                });
                ui.end_row();

                ui.label("Tools");
                ui.horizontal_wrapped(|ui| {
                    for tool in builtin_tools() {
                        let mut ticked = draft.tools.contains(tool.id);
                        if ui.checkbox(&mut ticked, tool.name).changed() {
                            if ticked {
                                draft.tools.insert(tool.id.to_string());
                            } else {
                                draft.tools.remove(tool.id);
                            }
                        }
                    }
                });
                ui.end_row();
            });

        ui.add_space(6.0);
        if primary_button(ui, "Create Agent").clicked() {
            submitted = true;
        }
    });

    if submitted {
        match view.agent_draft.build() {
            Ok(agent) => {
                actions.push(StoreAction::AddAgent { agent });
                view.agent_draft = Default::default();
                view.show_agent_form = false;
            }
            Err(err) => view.report(err),
        }
    }
}
