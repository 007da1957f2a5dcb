// Code Studio - Main Entry Point
// Native Rust GUI for a multi-agent coding workspace

mod state;
mod ui;

use anyhow::Result;
use code_studio_backend::simulation::EventNotifier;
use code_studio_backend::{AppState, Config, TurnRunner};
use eframe::egui;
use state::ViewState;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::info;
use ui::render_app_layout;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Turn tasks run here; the GUI thread only drains their events
    let runtime = Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Code Studio")
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Code Studio",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let notifier: EventNotifier = Arc::new(move || ctx.request_repaint());
            Box::new(StudioApp::new(runtime, &config, Some(notifier)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI terminated with an error: {}", e))?;

    info!("Code Studio closed");
    Ok(())
}

/// Main application struct
/// Owns the store, the turn runner and view-local state
struct StudioApp {
    /// Application store (agents, messages, connections, UI selection)
    state: AppState,
    /// Simulated agent turns
    turns: TurnRunner,
    /// Input buffers, forms and the error banner
    view: ViewState,
    /// Declared last so in-flight turns are aborted before the runtime shuts down
    _runtime: Runtime,
}

impl StudioApp {
    /// Create the app with seed data
    fn new(runtime: Runtime, config: &Config, notifier: Option<EventNotifier>) -> Self {
        let mut turns = TurnRunner::new(runtime.handle().clone(), &config.simulation);
        if let Some(notifier) = notifier {
            turns = turns.with_notifier(notifier);
        }
        info!(policy = %turns.policy(), "Turn runner ready");

        Self {
            state: AppState::new(),
            turns,
            view: ViewState::new(),
            _runtime: runtime,
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.turns.drain(&mut self.state);

        render_app_layout(ctx, &mut self.state, &mut self.turns, &mut self.view);

        if self.turns.is_processing() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
