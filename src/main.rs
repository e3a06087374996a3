mod engine;
mod logging;
mod model;
mod ui;

use anyhow::Context;
use clap::Parser;
use log::info;

use crate::engine::game_client::HttpGameApi;
use crate::ui::app::HangmanApp;
use crate::ui::settings_io::load_settings;

/// Desktop client for a hangman game server.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Game server base URL, e.g. http://127.0.0.1:8001
    #[arg(long)]
    server: Option<String>,

    /// Milliseconds between poll cycles
    #[arg(long)]
    interval_ms: Option<u64>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logger(logging::parse_level(&args.log_level))?;

    let mut settings = load_settings();
    if let Some(server) = args.server {
        settings.server_url = server;
    }
    if let Some(ms) = args.interval_ms {
        settings.poll_interval_ms = ms;
    }

    let api = HttpGameApi::new(&settings.server_url, settings.request_timeout())
        .with_context(|| format!("invalid server url {}", settings.server_url))?;
    info!(
        "starting client against {} (poll every {:?})",
        settings.server_url,
        settings.poll_interval()
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hangman",
        options,
        Box::new(|_cc| Ok(Box::new(HangmanApp::new(settings, api)))),
    )
    .map_err(|e| anyhow::anyhow!("ui terminated: {e}"))?;

    Ok(())
}
