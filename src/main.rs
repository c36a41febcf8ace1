mod app;
mod state;
mod ui;

use app::H5ImportApp;
use eframe::egui;
use rusty_h5import::ImportConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ImportConfig::from_env().unwrap_or_else(|e| {
        log::error!("Ignoring configuration: {e:#}");
        ImportConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty H5 Import",
        options,
        Box::new(move |_cc| Ok(Box::new(H5ImportApp::new(config)))),
    )
}
