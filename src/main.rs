//! Raon Bulletin - weekly church bulletin editor and viewer
//!
//! Edits the bulletin in a form, shows it as a read-only page, and shares it
//! as a link that carries the whole bulletin in its `data` parameter.
//!
//! Usage: `raon-bulletin [SHARE_LINK]`

mod app;
mod core;
mod ui;

use app::BulletinApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Raon Bulletin...");

    // A share link opened with the app hydrates the bulletin
    let launch = std::env::args().nth(1);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 900.0])
            .with_min_inner_size([480.0, 600.0])
            .with_title("Raon Bulletin"),
        ..Default::default()
    };

    eframe::run_native(
        "Raon Bulletin",
        native_options,
        Box::new(move |cc| Ok(Box::new(BulletinApp::new(cc, launch.as_deref())))),
    )
}
