// Main application layout
// Handles the header bar, navigation sidebar, and the central view area

use crate::state::ViewState;
use crate::ui::components::*;
use crate::ui::{agents, chat, mcp, tools};
use code_studio_backend::state::{ActiveView, AppState};
use code_studio_backend::TurnRunner;
use eframe::egui;
use tracing::info;

/// Render the main application layout
/// Includes header bar, sidebar (when open) and the active view
pub fn render_app_layout(
    ctx: &egui::Context,
    state: &mut AppState,
    turns: &mut TurnRunner,
    view: &mut ViewState,
) {
    render_header(ctx, state, turns, view);

    if state.sidebar_open() {
        render_sidebar(ctx, state);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(message) = view.banner.clone() {
            if error_banner(ui, &message) {
                view.dismiss_banner();
            }
            ui.add_space(8.0);
        }

        match state.active_view() {
            ActiveView::Chat => chat::render(ui, state, turns, view),
            ActiveView::Agents => agents::render(ui, state, view),
            ActiveView::Tools => tools::render(ui, state),
            ActiveView::Mcp => mcp::render(ui, state, view),
        }
    });
}

/// Render the top header with menu, title and the active agent
fn render_header(
    ctx: &egui::Context,
    state: &mut AppState,
    turns: &mut TurnRunner,
    view: &mut ViewState,
) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            if ui.button("☰").on_hover_text("Toggle menu").clicked() {
                state.toggle_sidebar();
            }

            ui.menu_button("File", |ui| {
                if ui.button("Clear Chat").clicked() {
                    turns.cancel_all(state);
                    state.clear_messages();
                    ui.close_menu();
                }
                if ui.button("Reset Workspace").clicked() {
                    turns.cancel_all(state);
                    state.reset();
                    *view = ViewState::new();
                    info!("Workspace reset to seed data");
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                for target in ActiveView::ALL {
                    if ui
                        .selectable_label(state.active_view() == target, target.label())
                        .clicked()
                    {
                        state.set_active_view(target);
                        ui.close_menu();
                    }
                }
                ui.separator();
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    let visuals = if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    };
                    ctx.set_visuals(visuals);
                }
            });

            ui.add_space(8.0);
            ui.label(egui::RichText::new("Code Studio").strong());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match state.active_agent() {
                    Some(agent) => {
                        agent_status_badge(ui, agent.status);
                        ui.label(&agent.name);
                        status_dot(ui, color_or_neutral(&agent.color));
                    }
                    None => {
                        ui.label(egui::RichText::new("No active agent").weak().italics());
                    }
                }
            });
        });
    });
}

/// Render the navigation sidebar
/// Picking a view also closes the sidebar
fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::left("nav_sidebar")
        .resizable(false)
        .exact_width(200.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("Code Studio");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").on_hover_text("Close menu").clicked() {
                        state.toggle_sidebar();
                    }
                });
            });
            ui.label(egui::RichText::new("Multi-Agent Platform").weak().small());
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);

            for target in ActiveView::ALL {
                let badge = match target {
                    ActiveView::Agents => Some(state.agent_count()),
                    ActiveView::Mcp => Some(state.connected_count()),
                    ActiveView::Chat | ActiveView::Tools => None,
                };
                let selected = state.active_view() == target;

                let clicked = ui
                    .horizontal(|ui| {
                        let response = ui.selectable_label(selected, target.label());
                        if let Some(count) = badge {
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| count_badge(ui, count),
                            );
                        }
                        response.clicked()
                    })
                    .inner;

                if clicked {
                    state.set_active_view(target);
                    state.toggle_sidebar();
                }
                ui.add_space(4.0);
            }
        });
}
