use anyhow::Result;

use lumen_engine::coords::{ColorRgba, Rect, Vec2, Viewport};
use lumen_engine::scene::{DrawList, TextureId, TextureSet, ZIndex};
use lumen_engine::shading::{ImageTexture, MinimapOverlay, PortalAnimator};

const BACKDROP: ZIndex = ZIndex::new(0);
const LIGHTS: ZIndex = ZIndex::new(1);
const PORTALS: ZIndex = ZIndex::new(2);
const PARTICLES: ZIndex = ZIndex::new(3);
const HUD: ZIndex = ZIndex::new(4);

const MAP_SIZE: u32 = 64;
const FIRE_PARTICLES: usize = 24;
const EVAPORATE_PARTICLES: usize = 12;

/// Animated showcase of every effect program.
pub struct DemoScene {
    textures: TextureSet,
    backdrop: TextureId,
    map: TextureId,
}

impl DemoScene {
    pub fn new() -> Result<Self> {
        let mut textures = TextureSet::new();
        let backdrop = textures.insert(backdrop_texture(256, 144)?);
        let map = textures.insert(map_texture(MAP_SIZE)?);
        Ok(Self {
            textures,
            backdrop,
            map,
        })
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    /// Records the frame at `time` seconds into `list` (cleared first).
    pub fn build(&self, list: &mut DrawList, viewport: Viewport, time: f32) {
        list.clear();
        let (w, h) = (viewport.width, viewport.height);

        list.push_composite_texture(BACKDROP, viewport.rect(), Rect::unit(), self.backdrop);

        // Three lights drifting on slow circles.
        let tints = [
            ColorRgba::new(1.0, 0.8, 0.5, 0.9),
            ColorRgba::new(0.4, 0.6, 1.0, 0.8),
            ColorRgba::new(0.9, 0.3, 0.6, 0.7),
        ];
        for (i, tint) in tints.into_iter().enumerate() {
            let phase = time * 0.4 + i as f32 * 2.1;
            let center = Vec2::new(
                w * (0.3 + 0.2 * i as f32) + phase.cos() * w * 0.08,
                h * 0.55 + phase.sin() * h * 0.12,
            );
            list.push_light_disc(LIGHTS, center, h * 0.35, tint);
        }

        // Portal disc; the orbit sits below the disc center so the outer ring shows.
        let side = h * 0.5;
        let disc = Rect::new(w * 0.12, h * 0.3, side, side);
        let portal = PortalAnimator::with_offset(time, disc.center(), Vec2::new(0.0, side * 0.6));
        list.push_portal_disc(PORTALS, disc, 0.9, portal);

        self.push_particles(list, w, h, time);

        // Minimap flush with the top edge: viewer.y is also the normalization
        // scale, so the viewer sits at the quad center with y equal to the radius.
        let size = h * 0.3;
        let minimap = Rect::new(w - size - 16.0, 0.0, size, size);
        let viewer = minimap.center();
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        list.push_minimap(
            HUD,
            minimap,
            bounds,
            MinimapOverlay::new(time, viewer, bounds),
            self.map,
        );
    }

    fn push_particles(&self, list: &mut DrawList, w: f32, h: f32, time: f32) {
        let source = Vec2::new(w * 0.72, h * 0.85);

        for i in 0..FIRE_PARTICLES {
            let seed = i as f32 * 0.618;
            let life = (time * 0.7 + seed).fract();
            let size = 18.0 * (1.0 - life) + 4.0;
            let x = source.x + (seed * 37.0).sin() * 40.0 + (time * 3.0 + seed).sin() * 6.0;
            let y = source.y - life * h * 0.4;
            list.push_fire_particle(
                PARTICLES,
                Rect::new(x - size * 0.5, y - size * 0.5, size, size),
            );
        }

        for i in 0..EVAPORATE_PARTICLES {
            let seed = i as f32 * 1.37;
            let life = (time * 0.35 + seed).fract();
            let size = 10.0 + life * 14.0;
            let x = w * 0.88 + (seed * 11.0).cos() * 30.0;
            let y = h * 0.7 - life * h * 0.3;
            let tint = ColorRgba::new(0.3, 0.7 + 0.3 * life, 1.0, 1.0);
            list.push_evaporate_particle(
                PARTICLES,
                Rect::new(x - size * 0.5, y - size * 0.5, size, size),
                tint,
            );
        }
    }
}

/// Vertical dusk gradient with a faint grid.
fn backdrop_texture(width: u32, height: u32) -> Result<ImageTexture> {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        let t = y as f32 / (height - 1).max(1) as f32;
        for x in 0..width {
            let grid = if x % 16 == 0 || y % 16 == 0 { 10.0 } else { 0.0 };
            let r = 18.0 + 30.0 * t + grid;
            let g = 16.0 + 14.0 * t + grid;
            let b = 40.0 - 18.0 * t + grid;
            rgba.extend([r as u8, g as u8, b as u8, 255]);
        }
    }
    ImageTexture::from_rgba8(width, height, rgba)
}

/// Square map: walls on a hashed room grid over a floor.
fn map_texture(size: u32) -> Result<ImageTexture> {
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let room = hash(x / 8, y / 8);
            let wall = x % 8 == 0 || y % 8 == 0;
            let door = (x % 8 == 4 && room & 1 == 0) || (y % 8 == 4 && room & 2 == 0);
            let texel = match (wall && !door, room % 5 == 0) {
                (true, _) => [200, 200, 210, 255],
                (false, true) => [30, 90, 40, 200],
                (false, false) => [40, 60, 70, 160],
            };
            rgba.extend(texel);
        }
    }
    ImageTexture::from_rgba8(size, size, rgba)
}

fn hash(x: u32, y: u32) -> u32 {
    let mut h = x.wrapping_mul(0x9e37_79b9) ^ y.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 15;
    h.wrapping_mul(0xc2b2_ae35)
}
