mod app;
mod cli;
mod controller;
mod engine;
mod engine_thread;
mod error;
mod sequence;
mod settings;
mod state;
mod tasks;
mod ui;

use clap::Parser;
use eframe::egui;

use crate::controller::Controller;
use crate::settings::AppSettings;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // bad algorithm selectors and amounts end the process here with clap's diagnostic
    let cli = cli::Cli::parse();
    let settings = AppSettings::load(&cli.settings);

    let algorithm = cli.algorithm();
    let amount = cli.amount_or(settings.default_amount);
    let seed = cli.seed.unwrap_or_else(rand::random);
    let controller = Controller::new(settings.to_controller_config(algorithm, amount, seed));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sorts")
            .with_inner_size([settings.window_width, settings.window_height]),
        ..Default::default()
    };
    let settings_path = cli.settings.clone();
    eframe::run_native(
        "Sorts",
        native_options,
        Box::new(move |cc| {
            Ok::<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>>(
                Box::new(crate::app::SortApp::new(cc, controller, settings, settings_path))
            )
        }),
    )
}
