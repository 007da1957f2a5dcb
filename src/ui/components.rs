// Reusable UI components
// Badges, buttons, chips and small widgets shared by the views

use code_studio_backend::state::mcp::humanize_key;
use code_studio_backend::state::{AgentStatus, ConfigValue, ConnectionStatus, McpConfig};
use eframe::egui;

/// Fallback for colors that fail to parse
pub const NEUTRAL: egui::Color32 = egui::Color32::from_rgb(100, 116, 139);

const GREEN: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
const YELLOW: egui::Color32 = egui::Color32::from_rgb(250, 204, 21);
const BLUE: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
const RED: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);

/// Parse a `#rrggbb` hex string
pub fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let digits = hex.trim().strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(egui::Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse a hex color, falling back to a neutral gray
pub fn color_or_neutral(hex: &str) -> egui::Color32 {
    parse_hex_color(hex).unwrap_or(NEUTRAL)
}

/// Small filled circle
pub fn status_dot(ui: &mut egui::Ui, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 4.0, color);
}

/// Render an agent status with a colored dot
/// Colors: Idle (green), Thinking (yellow), Executing (blue)
pub fn agent_status_badge(ui: &mut egui::Ui, status: AgentStatus) {
    let color = match status {
        AgentStatus::Idle => GREEN,
        AgentStatus::Thinking => YELLOW,
        AgentStatus::Executing => BLUE,
    };
    ui.horizontal(|ui| {
        status_dot(ui, color);
        ui.colored_label(color, status.as_str());
    });
}

/// Render a connection status with a colored dot
pub fn connection_status_badge(ui: &mut egui::Ui, status: ConnectionStatus) {
    let color = match status {
        ConnectionStatus::Connected => GREEN,
        ConnectionStatus::Disconnected => egui::Color32::GRAY,
        ConnectionStatus::Error => RED,
    };
    ui.horizontal(|ui| {
        status_dot(ui, color);
        ui.colored_label(color, status.as_str());
    });
}

/// Round avatar with the first letter of `name`
pub fn avatar(ui: &mut egui::Ui, name: &str, fill: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 14.0, fill);
    let initial = name.chars().next().unwrap_or('A').to_string();
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
}

/// Render a primary action button
pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.button(egui::RichText::new(text).strong())
}

/// Render a destructive button (red text)
pub fn danger_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.button(egui::RichText::new(text).color(RED))
}

/// Power toggle, green when on
pub fn power_button(ui: &mut egui::Ui, on: bool) -> egui::Response {
    let color = if on { GREEN } else { egui::Color32::GRAY };
    ui.button(egui::RichText::new("⏻").color(color))
        .on_hover_text("Toggle agent")
}

/// Rounded label used for tool IDs
pub fn chip(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(egui::Rounding::same(4.0))
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().monospace());
        });
}

/// Numeric badge next to sidebar entries
pub fn count_badge(ui: &mut egui::Ui, count: usize) {
    ui.label(egui::RichText::new(count.to_string()).small().strong().weak());
}

/// Two-column grid of config entries with humanized keys
pub fn config_grid(ui: &mut egui::Ui, id: impl std::hash::Hash, config: &McpConfig) {
    if config.is_empty() {
        ui.label(egui::RichText::new("No configuration").weak().italics());
        return;
    }
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for (key, value) in config {
                ui.label(egui::RichText::new(format!("{}:", humanize_key(key))).weak());
                let text = egui::RichText::new(value.to_string()).monospace();
                match value {
                    ConfigValue::Text(_) if value.is_masked() => ui.label(text.weak()),
                    _ => ui.label(text),
                };
                ui.end_row();
            }
        });
}

/// Dismissable error line; returns true when dismissed
pub fn error_banner(ui: &mut egui::Ui, message: &str) -> bool {
    let mut dismissed = false;
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(248, 113, 113, 40))
        .rounding(egui::Rounding::same(4.0))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(RED, message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}
