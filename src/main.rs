// src/main.rs
use anyhow::{Context, Result};
use eframe::egui;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod analysis;
mod api;
mod app;
mod config;
mod controller;
mod feedback;
mod file;
mod models;
mod state;
mod task;
mod ui;
mod utils;
mod view;

use api::HttpBackend;
use app::ResultsApp;
use config::AppConfig;
use file::settings::SettingsFileHandler;
use state::AppContext;

fn main() -> Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    if let Some(path) = AppConfig::settings_path() {
        match SettingsFileHandler::new().ensure(&AppConfig::default(), &path) {
            Ok(true) => info!(path = %path.display(), "wrote default settings"),
            Ok(false) => {}
            Err(e) => warn!(path = %path.display(), error = %format!("{:#}", e), "could not write default settings"),
        }
    }

    let backend = HttpBackend::new(&config).context("Failed to build HTTP client")?;
    info!(server = backend.base_url(), "starting results mailer");
    let context = AppContext::new(config, Arc::new(backend));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_drag_and_drop(true)
            .with_title("Results Mailer"),
        ..Default::default()
    };

    eframe::run_native(
        "Results Mailer",
        options,
        Box::new(|cc| Box::new(ResultsApp::new(cc, context))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
