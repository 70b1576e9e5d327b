// src/bin/gui.rs
use eframe::egui::{IconData, ViewportBuilder};
use tumblr_grab::cli::{self, Mode};
use tumblr_grab::gui;

fn app_icon() -> IconData {
    let rgba = image::load_from_memory(include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/tumblr_grab.png"
    )))
    .unwrap()
    .to_rgba8();
    let (w, h) = rgba.dimensions();
    IconData { rgba: rgba.into_raw(), width: w, height: h }
}

fn main() {
    match cli::detect_mode() {
        Ok(Mode::Cli(params)) => {
            if let Err(e) = cli::run(params) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Ok(Mode::Gui) => {
            let options = eframe::NativeOptions {
                // eframe 0.32: icon set via viewport builder
                viewport: ViewportBuilder::default().with_icon(app_icon()),
                ..Default::default()
            };
            if let Err(e) = gui::run(options) {
                eprintln!("GUI failed: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
