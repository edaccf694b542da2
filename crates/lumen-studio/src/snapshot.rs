use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use lumen_engine::coords::ColorRgba;
use lumen_engine::raster::{Blend, Framebuffer, SoftwareRenderer};
use lumen_engine::scene::DrawList;
use lumen_engine::time::FrameTime;

use crate::config::StudioConfig;
use crate::demo::DemoScene;

/// Renders one demo frame with the software rasterizer.
pub fn render(config: &StudioConfig, demo: &DemoScene) -> Framebuffer {
    let mut renderer = SoftwareRenderer::default();
    renderer.blend = Blend::PremulAlpha;
    if let Some(threads) = config.threads {
        renderer.threads = threads.get();
    }

    let mut framebuffer = Framebuffer::new(config.size.width, config.size.height);
    framebuffer.clear(ColorRgba::black());

    let frame = FrameTime::at(config.time);
    let mut list = DrawList::new();
    demo.build(&mut list, framebuffer.viewport(), frame.elapsed);

    let started = Instant::now();
    renderer.render(&mut framebuffer, &mut list, demo.textures());
    log::info!(
        "rendered {} draws at t={}s in {:.1?} on {} threads",
        list.len(),
        frame.elapsed,
        started.elapsed(),
        renderer.threads
    );

    framebuffer
}

pub fn write_png(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    framebuffer
        .to_image()?
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::config::FrameSize;

    #[test]
    fn small_snapshot_is_deterministic() {
        let demo = DemoScene::new().unwrap();
        let config = StudioConfig {
            size: FrameSize { width: 96, height: 54 },
            time: 0.75,
            threads: NonZeroUsize::new(3),
            ..StudioConfig::default()
        };

        let a = render(&config, &demo);
        let b = render(&StudioConfig { threads: NonZeroUsize::new(1), ..config.clone() }, &demo);

        assert_eq!(a, b);
        assert!(a.pixels().iter().any(|&p| p != ColorRgba::black()));
        assert!(a.pixels().iter().all(|p| p.a <= 1.0));
    }
}
