// Chat view
// Agent selector, transcript, and the input line driving simulated turns

use crate::state::ViewState;
use crate::ui::components::*;
use code_studio_backend::state::{Agent, AppState, Message, MessageType};
use code_studio_backend::TurnRunner;
use eframe::egui;

/// Render the chat view
pub fn render(
    ui: &mut egui::Ui,
    state: &mut AppState,
    turns: &mut TurnRunner,
    view: &mut ViewState,
) {
    render_agent_selector(ui, state, view);
    ui.separator();

    let input_height = 48.0;
    let transcript_height = (ui.available_height() - input_height).max(80.0);
    ui.allocate_ui(egui::vec2(ui.available_width(), transcript_height), |ui| {
        render_transcript(ui, state);
    });

    ui.separator();
    render_input(ui, state, turns, view);
}

/// Horizontal row of agent chips; clicking one makes it the active agent
fn render_agent_selector(ui: &mut egui::Ui, state: &mut AppState, view: &mut ViewState) {
    let agents: Vec<Agent> = state.agents().to_vec();
    let active_id = state.active_agent_id().map(str::to_string);

    egui::ScrollArea::horizontal()
        .id_source("agent_selector")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for agent in &agents {
                    let selected = active_id.as_deref() == Some(agent.id.as_str());
                    let dot = if agent.status.is_busy() {
                        egui::Color32::from_rgb(250, 204, 21)
                    } else {
                        egui::Color32::from_rgb(74, 222, 128)
                    };

                    let response = ui
                        .horizontal(|ui| {
                            status_dot(ui, dot);
                            let text = if selected {
                                egui::RichText::new(&agent.name)
                                    .strong()
                                    .color(color_or_neutral(&agent.color))
                            } else {
                                egui::RichText::new(&agent.name)
                            };
                            ui.selectable_label(selected, text)
                        })
                        .inner;

                    if response.clicked() && !selected {
                        if let Err(err) = state.set_active_agent(Some(&agent.id)) {
                            view.report(err);
                        }
                    }
                }
            });
        });
}

fn render_transcript(ui: &mut egui::Ui, state: &AppState) {
    egui::ScrollArea::vertical()
        .id_source("transcript")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.messages().is_empty() {
                render_welcome(ui);
                return;
            }
            for message in state.messages() {
                render_message(ui, state, message);
                ui.add_space(10.0);
            }
        });
}

fn render_welcome(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.heading(egui::RichText::new("Ready to Code").size(22.0));
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(
                "Start a conversation with your AI agents. They can search files, \
                 execute commands, connect to GitHub, and manage your Docker containers.",
            )
            .weak(),
        );
    });
}

fn render_message(ui: &mut egui::Ui, state: &AppState, message: &Message) {
    if message.is_from_user() {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
            avatar(ui, "U", egui::Color32::from_rgb(51, 65, 85));
            egui::Frame::none()
                .fill(ui.visuals().selection.bg_fill)
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(8.0))
                .show(ui, |ui| {
                    ui.label(&message.content);
                });
        });
        return;
    }

    let agent = state.agent(&message.agent_id);
    let (name, color) = match agent {
        Some(agent) => (agent.name.as_str(), color_or_neutral(&agent.color)),
        None => ("Agent", NEUTRAL),
    };

    ui.horizontal_top(|ui| {
        avatar(ui, name, color);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(name).small().weak());

            if message.message_type == MessageType::ToolCall {
                let tool = message.tool_name.as_deref().unwrap_or("tool");
                ui.horizontal(|ui| {
                    ui.label("🔧");
                    chip(ui, tool);
                });
            }

            egui::Frame::none()
                .fill(ui.visuals().faint_bg_color)
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(8.0))
                .show(ui, |ui| match message.code_block() {
                    Some(code) => {
                        if let Some(language) = &message.language {
                            ui.label(egui::RichText::new(language).small().weak());
                        }
                        ui.label(egui::RichText::new(code).monospace());
                    }
                    None => {
                        ui.label(&message.content);
                    }
                });
        });
    });
}

fn render_input(
    ui: &mut egui::Ui,
    state: &mut AppState,
    turns: &mut TurnRunner,
    view: &mut ViewState,
) {
    let has_agent = state.active_agent().is_some();

    ui.horizontal(|ui| {
        let hint = if has_agent {
            "Ask your agents anything..."
        } else {
            "Select an agent first"
        };
        let send_width = 70.0;
        let edit = ui.add_enabled(
            has_agent,
            egui::TextEdit::singleline(&mut view.chat_input)
                .hint_text(hint)
                .desired_width(ui.available_width() - send_width),
        );
        let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let can_send = has_agent && !view.chat_input.trim().is_empty();
        let label = if turns.is_processing() { "⏳ Send" } else { "Send" };
        let clicked = ui
            .add_enabled(can_send, egui::Button::new(egui::RichText::new(label).strong()))
            .clicked();

        if (clicked || enter) && can_send {
            match turns.submit(state, &view.chat_input) {
                Ok(_) => {
                    view.chat_input.clear();
                    edit.request_focus();
                }
                Err(err) => view.report(err),
            }
        }
    });

    if turns.is_processing() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Agent is working...").weak().small());
        });
    }
}
