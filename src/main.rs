mod app;
mod modules;
mod settings;
mod style;

use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting Brush Tag Selector");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("Brush Tag Selector"),
        ..Default::default()
    };
    eframe::run_native(
        "Brush Tag Selector",
        options,
        Box::new(|cc| Ok(Box::new(app::BrushTagApp::new(cc)))),
    )
}
