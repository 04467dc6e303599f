//! GAUHATT desktop front end.
//!
//! Hosts the five routes of the app in one eframe window, with the leaf
//! background mounted behind every page and the auth screens wired to the
//! mock sink.
//!
//! ```text
//! gauhatt-app [config.json]
//! ```

mod app;
mod screens;
mod tasks;
mod widgets;

use eframe::egui;
use gauhatt::Config;

use app::GauhattApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    // The UI thread stays synchronous; sink calls run here
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("GAUHATT"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "GAUHATT",
        options,
        Box::new(move |cc| Ok(Box::new(GauhattApp::new(cc, config, handle)))),
    )?;
    Ok(())
}
