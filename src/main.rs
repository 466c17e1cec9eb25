//! mdtabs - Tabbed markdown viewer
//!
//! Opens markdown files into tabs via drag-and-drop or file dialogs,
//! renders them, and offers a gallery overview of everything open.

mod app;
mod core;
mod ui;

use app::MdTabsApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::AppConfig;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting mdtabs...");

    // Loaded here so the window can come up at its last size
    let config = AppConfig::load().unwrap_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("mdtabs"),
        ..Default::default()
    };

    eframe::run_native(
        "mdtabs",
        native_options,
        Box::new(move |cc| Ok(Box::new(MdTabsApp::new(cc, config)))),
    )
}
