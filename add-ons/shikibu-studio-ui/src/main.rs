//! shikibu-studio-ui: desktop split-pane workspace (chat + canvas).
//! Saved documents land in the sled output store under the configured
//! storage path.

mod app;

use app::StudioApp;
use eframe::egui;
use shikibu_core::{CoreConfig, OutputStore};
use std::path::Path;

fn main() -> eframe::Result<()> {
    let config = CoreConfig::load().expect("load CoreConfig");
    let outputs_path = Path::new(&config.storage_path).join("shikibu_outputs");
    let outputs = OutputStore::open_path(&outputs_path).expect("open output store");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title(config.app_name.clone()),
        ..Default::default()
    };

    let title = config.app_name.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(StudioApp::new(config, outputs)))),
    )
}
