use std::any::Any;

use anyhow::{Context, Result};
use lazy_gallery::config::GalleryConfig;
use lazy_gallery::ui_dioxus::App;

const GALLERY_CONFIG: &str = include_str!("../gallery.toml");

fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    let config = GalleryConfig::from_toml_str(GALLERY_CONFIG).context("Invalid gallery.toml")?;
    tracing::info!(
        images = config.image_count,
        root_margin = %config.root_margin,
        threshold = config.threshold,
        "Starting lazy gallery"
    );

    let contexts: Vec<Box<dyn Fn() -> Box<dyn Any>>> =
        vec![Box::new(move || Box::new(config.clone()) as Box<dyn Any>)];

    dioxus_web::launch::launch(App, contexts, dioxus_web::Config::new());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    wasm_logger::init(wasm_logger::Config::default());
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    tracing_subscriber::fmt::init();
}
