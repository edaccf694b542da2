//! lumen studio: preview and snapshot tool for the effect programs.
//!
//! Without flags it opens a window and animates the demo scene on the GPU.
//! With `--snapshot <png>` it renders one frame with the software rasterizer.

mod config;
mod demo;
mod preview;
mod snapshot;

use anyhow::Result;
use clap::Parser;

use lumen_engine::logging::{LoggingConfig, init_logging};

use config::StudioConfig;
use demo::DemoScene;

fn main() -> Result<()> {
    let config = StudioConfig::parse();

    init_logging(
        config
            .log_filter
            .clone()
            .map(LoggingConfig::with_filter)
            .unwrap_or_default(),
    );

    match &config.snapshot {
        Some(path) => {
            let demo = DemoScene::new()?;
            let framebuffer = snapshot::render(&config, &demo);
            snapshot::write_png(&framebuffer, path)
        }
        None => preview::run(&config),
    }
}
