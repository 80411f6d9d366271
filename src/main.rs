use std::path::PathBuf;

use anyhow::anyhow;
use eframe::egui;
use penguin_dash::app::PenguinDashApp;
use penguin_dash::config::DashboardConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional first argument: path to a JSON config file.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DashboardConfig::resolve(config_path.as_deref())?;
    let title = config.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(PenguinDashApp::new(config)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
