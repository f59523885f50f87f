mod app;
mod color;
mod config;
mod data;
mod predict;
mod state;
mod ui;

use app::WaterPollutantsApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config_path = AppConfig::path_from_env();
    let config = AppConfig::from_file(&config_path).unwrap_or_else(|e| {
        log::error!("Invalid config, using defaults: {e:#}");
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Water Pollutants Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(WaterPollutantsApp::new(&config)))),
    )
}
