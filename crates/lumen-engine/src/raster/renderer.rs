use std::num::NonZeroUsize;

use crate::coords::{ColorRgba, Vec2};
use crate::scene::{DrawCmd, DrawItem, DrawList, TextureSet};
use crate::shading::{Fragment, Texture, Unbound};

use super::{Blend, Framebuffer};

/// Rows below which a draw is shaded on the calling thread.
const MIN_PARALLEL_ROWS: usize = 16;

/// Evaluates draw lists on the CPU.
#[derive(Debug, Copy, Clone)]
pub struct SoftwareRenderer {
    pub blend: Blend,
    /// Worker threads per draw; `1` shades inline.
    pub threads: usize,
}

impl Default for SoftwareRenderer {
    fn default() -> Self {
        Self {
            blend: Blend::default(),
            threads: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

/// Pixel span `[x0, x1) x [y0, y1)` whose centers fall inside a draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Span {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl SoftwareRenderer {
    pub fn new(blend: Blend, threads: usize) -> Self {
        Self {
            blend,
            threads: threads.max(1),
        }
    }

    /// Paints `list` into `target` back-to-front.
    ///
    /// A command whose texture id is not in `textures` samples as unbound
    /// (opaque black) instead of failing the frame.
    pub fn render(&self, target: &mut Framebuffer, list: &mut DrawList, textures: &TextureSet) {
        let mut warned_missing = false;
        let mut drawn = 0usize;

        for item in list.iter_in_paint_order() {
            let Some(span) = pixel_span(item, target.width(), target.height()) else {
                continue;
            };

            let texture: &(dyn Texture + Sync) = match item.cmd.texture() {
                Some(id) => match textures.get(id) {
                    Some(t) => t,
                    None => {
                        if !warned_missing {
                            log::warn!("texture {id:?} is not loaded; sampling as unbound");
                            warned_missing = true;
                        }
                        &Unbound
                    }
                },
                None => &Unbound,
            };

            self.shade_span(target, &item.cmd, span, texture);
            drawn += 1;
        }

        log::trace!("software render: {drawn} draws into {}x{}", target.width(), target.height());
    }

    fn shade_span(
        &self,
        target: &mut Framebuffer,
        cmd: &DrawCmd,
        span: Span,
        texture: &(dyn Texture + Sync),
    ) {
        let width = target.width() as usize;
        let blend = self.blend;
        let rows = &mut target.pixels_mut()[span.y0 * width..span.y1 * width];
        let row_count = span.y1 - span.y0;

        if self.threads <= 1 || row_count < MIN_PARALLEL_ROWS {
            shade_rows(rows, width, span.y0, span, cmd, texture, blend);
            return;
        }

        let rows_per_worker = row_count.div_ceil(self.threads);
        std::thread::scope(|s| {
            for (i, chunk) in rows.chunks_mut(rows_per_worker * width).enumerate() {
                let first_row = span.y0 + i * rows_per_worker;
                s.spawn(move || shade_rows(chunk, width, first_row, span, cmd, texture, blend));
            }
        });
    }
}

fn shade_rows(
    rows: &mut [ColorRgba],
    width: usize,
    first_row: usize,
    span: Span,
    cmd: &DrawCmd,
    texture: &(dyn Texture + Sync),
    blend: Blend,
) {
    let quad = cmd.quad();
    for (r, row) in rows.chunks_mut(width).enumerate() {
        let py = (first_row + r) as f32 + 0.5;
        for (x, dst) in row.iter_mut().enumerate().take(span.x1).skip(span.x0) {
            let position = Vec2::new(x as f32 + 0.5, py);
            let t = quad.rect.remap(position);
            let frag = Fragment::new(quad.tex_coord_at(t), position, quad.color_at(t));
            *dst = blend.apply(*dst, evaluate(cmd, &frag, texture));
        }
    }
}

/// One program invocation for one fragment.
fn evaluate(cmd: &DrawCmd, frag: &Fragment, texture: &(dyn Texture + Sync)) -> ColorRgba {
    match cmd {
        DrawCmd::Light(c) => c.light.shade(frag),
        DrawCmd::Minimap(c) => c.minimap.shade(frag, texture),
        DrawCmd::Portal(c) if c.tagged => c.portal.shade_disc(frag),
        DrawCmd::Portal(_) => frag.color,
        DrawCmd::Composite(c) => c.compositor.shade_mode(c.mode, frag, texture),
    }
}

/// Pixels whose centers lie inside the quad, its clip and the target.
fn pixel_span(item: &DrawItem, width: u32, height: u32) -> Option<Span> {
    let rect = item.cmd.quad().rect;
    if !rect.is_finite() {
        return None;
    }

    let mut area = rect.normalized();
    if let Some(clip) = item.clip_rect {
        area = area.intersect(clip)?;
    }

    // Center x + 0.5 is in [min, max) iff x is in [ceil(min - 0.5), ceil(max - 0.5)).
    let first = |v: f32, limit: u32| ((v - 0.5).ceil().max(0.0) as u32).min(limit) as usize;
    let max = area.max();
    let span = Span {
        x0: first(area.origin.x, width),
        x1: first(max.x, width),
        y0: first(area.origin.y, height),
        y1: first(max.y, height),
    };

    (span.x0 < span.x1 && span.y0 < span.y1).then_some(span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::scene::{Quad, ZIndex};
    use crate::shading::{ImageTexture, MinimapOverlay, PortalAnimator, RadialLight};

    fn covers(area: Rect, x: usize, y: usize) -> bool {
        area.contains(Vec2::new(x as f32 + 0.5, y as f32 + 0.5))
    }

    fn replace(threads: usize) -> SoftwareRenderer {
        SoftwareRenderer::new(Blend::Replace, threads)
    }

    #[test]
    fn light_falls_off_linearly() {
        let mut fb = Framebuffer::new(21, 1);
        let mut list = DrawList::new();
        let light = RadialLight::new(Vec2::new(10.5, 0.5), 10.0);
        list.push_light(
            ZIndex::new(0),
            Quad::solid(Rect::new(0.0, 0.0, 21.0, 1.0), ColorRgba::white()),
            light,
        );

        replace(1).render(&mut fb, &mut list, &TextureSet::new());

        assert_eq!(fb.get(10, 0), Some(ColorRgba::white()));
        assert_eq!(fb.get(5, 0), Some(ColorRgba::new(0.5, 0.5, 0.5, 0.5)));
        assert_eq!(fb.get(0, 0), Some(ColorRgba::new(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn span_uses_pixel_centers() {
        let mut list = DrawList::new();
        list.push_light_disc(ZIndex::new(0), Vec2::new(2.0, 2.0), 1.4, ColorRgba::white());
        let item = &list.items()[0];
        // Rect (0.6, 0.6)..(3.4, 3.4): centers 1.5, 2.5, 3.5 -> pixels 1 and 2.
        assert_eq!(
            pixel_span(item, 8, 8),
            Some(Span { x0: 1, x1: 3, y0: 1, y1: 3 })
        );
        for (x, y) in [(1, 1), (2, 2)] {
            assert!(covers(item.cmd.quad().rect, x, y));
        }
        assert!(!covers(item.cmd.quad().rect, 3, 3));
    }

    #[test]
    fn span_is_clipped_to_target_and_clip_rect() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(2.0, 0.0, 100.0, 3.0));
        list.push_portal(
            ZIndex::new(0),
            Quad::solid(Rect::new(-5.0, -5.0, 100.0, 100.0), ColorRgba::white()),
            PortalAnimator::new(0.0, Vec2::zero()),
        );
        list.pop_clip();

        let item = &list.items()[0];
        assert_eq!(
            pixel_span(item, 10, 10),
            Some(Span { x0: 2, x1: 10, y0: 0, y1: 3 })
        );
    }

    #[test]
    fn later_items_paint_over_earlier_at_equal_z() {
        let mut fb = Framebuffer::new(2, 2);
        let mut list = DrawList::new();
        let portal = PortalAnimator::new(0.0, Vec2::zero());
        let rect = Rect::new(0.0, 0.0, 2.0, 2.0);
        let red = ColorRgba::new(1.0, 0.0, 0.0, 1.0);
        let green = ColorRgba::new(0.0, 1.0, 0.0, 1.0);
        list.push_portal(ZIndex::new(1), Quad::solid(rect, red), portal);
        list.push_portal(ZIndex::new(0), Quad::solid(rect, ColorRgba::white()), portal);
        list.push_portal(ZIndex::new(1), Quad::solid(rect, green), portal);

        SoftwareRenderer::new(Blend::PremulAlpha, 1).render(&mut fb, &mut list, &TextureSet::new());

        assert!(fb.pixels().iter().all(|&p| p == green));
    }

    #[test]
    fn missing_texture_samples_black() {
        let mut fb = Framebuffer::new(4, 4);
        let mut list = DrawList::new();
        let mut textures = TextureSet::new();
        let id = textures.insert(
            ImageTexture::from_rgba8(1, 1, vec![255, 255, 255, 255]).expect("texture"),
        );
        let bounds = Rect::new(0.0, 0.0, 4.0, 4.0);
        list.push_composite_texture(ZIndex::new(0), bounds, Rect::unit(), id);

        replace(1).render(&mut fb, &mut list, &TextureSet::new());
        assert!(fb.pixels().iter().all(|&p| p == ColorRgba::black()));

        replace(1).render(&mut fb, &mut list, &textures);
        assert!(fb.pixels().iter().all(|&p| p == ColorRgba::white()));
    }

    #[test]
    fn threaded_output_matches_inline() {
        let (w, h) = (37, 53);
        let mut list = DrawList::new();
        let map = ImageTexture::from_rgba8(
            2,
            2,
            vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 255],
        )
        .expect("texture");
        let mut textures = TextureSet::new();
        let id = textures.insert(map);

        let rect = Rect::new(0.0, 0.0, w as f32, h as f32);
        list.push_minimap(
            ZIndex::new(0),
            rect,
            Rect::unit(),
            MinimapOverlay::new(0.3, Vec2::new(18.0, 26.0), Rect::unit()),
            id,
        );
        list.push_portal_disc(
            ZIndex::new(1),
            Rect::new(3.0, 4.0, 20.0, 30.0),
            0.7,
            PortalAnimator::new(1.25, Vec2::new(12.0, 19.0)),
        );
        list.push_fire_particle(ZIndex::new(2), Rect::new(10.0, 10.0, 8.0, 8.0));

        let mut inline = Framebuffer::new(w, h);
        let mut threaded = Framebuffer::new(w, h);
        SoftwareRenderer::new(Blend::PremulAlpha, 1).render(&mut inline, &mut list, &textures);
        SoftwareRenderer::new(Blend::PremulAlpha, 4).render(&mut threaded, &mut list, &textures);

        assert_eq!(inline, threaded);
    }
}
