mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;

/// Desktop client for the email scheduler backend.
#[derive(Debug, Parser)]
struct Args {
    /// Backend base URL, overriding the config file and environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = config::load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = config::normalize_base_url(&api_url);
    }
    tracing::info!(api_base_url = %settings.api_base_url, "starting email scheduler client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Email Scheduler")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Email Scheduler",
        options,
        Box::new(|_cc| Ok(Box::new(ui::app::EmailSchedulerApp::new(cmd_tx, ui_rx)))),
    )
}
