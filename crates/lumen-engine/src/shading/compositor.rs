use crate::coords::{ColorRgba, Rect, Vec2};

use super::{Fragment, Texture};

/// Red channel value selecting texture pass-through.
pub const TEXTURE_RED_TAG: f32 = 1.0;
/// Alpha value selecting the fire particle mode.
pub const FIRE_ALPHA_TAG: f32 = 0.1111;
/// Alpha value selecting the evaporate particle mode.
pub const EVAPORATE_ALPHA_TAG: f32 = 0.2222;

/// Width of the soft border of the particle rectangle in shape space.
const PARTICLE_BORDER: f32 = 0.1;
const FIRE_BASE: [f32; 3] = [1.0, 0.3, 0.1];

/// Explicit discriminant for the compositor's four behaviors.
///
/// The renderer historically encodes the mode in the vertex color; use
/// [`classify`](Self::classify) to decode such colors and [`tag`](Self::tag)
/// for the flat value the GPU pipeline dispatches on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CompositeMode {
    /// Sample the bound texture and output it verbatim.
    Texture,
    /// Fire particle; vertex rgb is a shape-space coordinate.
    Fire,
    /// Evaporating particle; vertex rgb is both coordinate and base color.
    Evaporate,
    /// Output the vertex color unchanged.
    Passthrough,
}

impl CompositeMode {
    /// Decodes the sentinel vertex colors.
    ///
    /// Matches are exact float comparisons, checked in priority order:
    /// `r == 1`, then `a == 0.1111`, then `a == 0.2222`. Anything else
    /// (including values a single ulp away) is pass-through.
    #[inline]
    pub fn classify(color: ColorRgba) -> Self {
        if color.r == TEXTURE_RED_TAG {
            Self::Texture
        } else if color.a == FIRE_ALPHA_TAG {
            Self::Fire
        } else if color.a == EVAPORATE_ALPHA_TAG {
            Self::Evaporate
        } else {
            Self::Passthrough
        }
    }

    /// Value of the flat `mode` attribute in the compositor WGSL program.
    #[inline]
    pub const fn tag(self) -> u32 {
        match self {
            Self::Texture => 0,
            Self::Fire => 1,
            Self::Evaporate => 2,
            Self::Passthrough => 3,
        }
    }

    #[inline]
    pub const fn samples_texture(self) -> bool {
        matches!(self, Self::Texture)
    }
}

/// Full-screen compositing pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Compositor {
    /// Atlas region of the bound texture.
    pub bounds: Rect,
}

impl Default for Compositor {
    fn default() -> Self {
        Self { bounds: Rect::unit() }
    }
}

impl Compositor {
    #[inline]
    pub const fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Shades with the mode decoded from the fragment's vertex color.
    pub fn shade<T: Texture + ?Sized>(&self, frag: &Fragment, texture: &T) -> ColorRgba {
        self.shade_mode(CompositeMode::classify(frag.color), frag, texture)
    }

    /// Shades with an explicit mode. Only [`CompositeMode::Texture`] reads `texture`.
    pub fn shade_mode<T: Texture + ?Sized>(
        &self,
        mode: CompositeMode,
        frag: &Fragment,
        texture: &T,
    ) -> ColorRgba {
        match mode {
            CompositeMode::Texture => texture.sample(self.bounds.remap(frag.tex_coord)),
            CompositeMode::Fire => fire(frag.color),
            CompositeMode::Evaporate => evaporate(frag.color),
            CompositeMode::Passthrough => frag.color,
        }
    }
}

/// `1 - distance field` of a rectangle of half-extent 1 with a soft border.
///
/// Only `x` is considered; the field is the length of the splatted vector
/// `max(|x| - (1 - border), 0) / border`.
fn particle_coverage(x: f32) -> f32 {
    let rect_size = Vec2::splat(1.0) - Vec2::splat(PARTICLE_BORDER);
    let edge = (Vec2::splat(x.abs()) - rect_size).max_scalar(0.0);
    let field = (edge / Vec2::splat(PARTICLE_BORDER)).length();
    1.0 - field
}

/// `sin(x + sin(y) + 1.3)`, the flame-lick term shared by both particle modes.
#[inline]
fn lick(c: ColorRgba) -> f32 {
    (c.r + c.g.sin() + 1.3).sin()
}

fn fire(color: ColorRgba) -> ColorRgba {
    let c = color.scaled(2.0);
    let alpha = particle_coverage(c.r);
    let k = (0.8 / (lick(c) * 5.0)).abs();
    ColorRgba::new(FIRE_BASE[0] * k, FIRE_BASE[1] * k, FIRE_BASE[2] * k, alpha * 5.0)
}

fn evaporate(c: ColorRgba) -> ColorRgba {
    let alpha = particle_coverage(c.r);
    let k = (0.5 / (lick(c) * 2.0)).abs();
    ColorRgba::new(c.r * k, c.g * k, c.b * k, alpha / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::{FnTexture, SolidTexture, Unbound};

    const TEXEL: ColorRgba = ColorRgba::new(0.2, 0.4, 0.6, 0.8);

    fn frag(color: ColorRgba) -> Fragment {
        Fragment::new(Vec2::new(0.3, 0.4), Vec2::new(12.0, 34.0), color)
    }

    // ── classify ──────────────────────────────────────────────────────────

    #[test]
    fn classify_priority_and_exactness() {
        use CompositeMode::*;
        assert_eq!(CompositeMode::classify(ColorRgba::new(1.0, 0.0, 0.0, 0.1111)), Texture);
        assert_eq!(CompositeMode::classify(ColorRgba::new(0.5, 0.5, 0.5, 0.1111)), Fire);
        assert_eq!(CompositeMode::classify(ColorRgba::new(0.5, 0.5, 0.5, 0.2222)), Evaporate);
        assert_eq!(CompositeMode::classify(ColorRgba::new(0.5, 0.5, 0.5, 0.1110)), Passthrough);
        assert_eq!(CompositeMode::classify(ColorRgba::new(0.999, 0.0, 0.0, 1.0)), Passthrough);

        let next_ulp = f32::from_bits(FIRE_ALPHA_TAG.to_bits() + 1);
        assert_eq!(CompositeMode::classify(ColorRgba::new(0.0, 0.0, 0.0, next_ulp)), Passthrough);
    }

    #[test]
    fn tags_are_distinct() {
        use CompositeMode::*;
        let tags = [Texture, Fire, Evaporate, Passthrough].map(CompositeMode::tag);
        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    // ── texture pass-through ──────────────────────────────────────────────

    #[test]
    fn texture_mode_outputs_texel_verbatim() {
        let uv_texture = FnTexture(|uv: Vec2| {
            if uv == Vec2::new(0.3, 0.4) { TEXEL } else { ColorRgba::transparent() }
        });
        let out = Compositor::new(Rect::unit())
            .shade(&frag(ColorRgba::new(1.0, 0.9, 0.8, 0.7)), &uv_texture);
        assert_eq!(out, TEXEL);
    }

    #[test]
    fn texture_mode_remaps_through_bounds() {
        let uv_texture = FnTexture(|uv: Vec2| ColorRgba::new(uv.x, uv.y, 0.0, 1.0));
        let out = Compositor::new(Rect::new(0.1, 0.2, 0.5, 0.5))
            .shade(&frag(ColorRgba::new(1.0, 0.0, 0.0, 1.0)), &uv_texture);
        let expected = Rect::new(0.1, 0.2, 0.5, 0.5).remap(Vec2::new(0.3, 0.4));
        assert_eq!(out, ColorRgba::new(expected.x, expected.y, 0.0, 1.0));
    }

    // ── fire ──────────────────────────────────────────────────────────────

    #[test]
    fn fire_uses_fixed_palette() {
        let out = Compositor::default().shade(&frag(ColorRgba::new(0.0, 0.0, 0.0, 0.1111)), &Unbound);
        let k = (0.8f32 / (1.3f32.sin() * 5.0)).abs();
        assert_eq!(out, ColorRgba::new(1.0 * k, 0.3 * k, 0.1 * k, 5.0));
    }

    #[test]
    fn fire_ignores_particle_rgb_as_color() {
        let a = Compositor::default().shade(&frag(ColorRgba::new(0.1, 0.2, 0.0, 0.1111)), &Unbound);
        let b = Compositor::default().shade(&frag(ColorRgba::new(0.1, 0.2, 0.9, 0.1111)), &Unbound);
        assert_eq!(a, b);
    }

    #[test]
    fn fire_fades_past_the_doubled_rect_edge() {
        // x = 0.475 doubles to 0.95: halfway into the 0.1 border.
        let inside = Compositor::default().shade(&frag(ColorRgba::new(0.3, 0.0, 0.0, 0.1111)), &Unbound);
        let border = Compositor::default().shade(&frag(ColorRgba::new(0.475, 0.0, 0.0, 0.1111)), &Unbound);
        assert_eq!(inside.a, 5.0);
        assert!(border.a < inside.a);
        let field = ((2.0f32 * 0.475 - 0.9) / 0.1) * 2.0f32.sqrt();
        assert!((border.a - (1.0 - field) * 5.0).abs() < 1e-4);
    }

    // ── evaporate ─────────────────────────────────────────────────────────

    #[test]
    fn evaporate_uses_particle_rgb() {
        let c = ColorRgba::new(0.3, 0.6, 0.9, 0.2222);
        let out = Compositor::default().shade(&frag(c), &Unbound);
        let k = (0.5f32 / ((0.3f32 + 0.6f32.sin() + 1.3).sin() * 2.0)).abs();
        assert_eq!(out, ColorRgba::new(0.3 * k, 0.6 * k, 0.9 * k, 0.5));
    }

    #[test]
    fn evaporate_is_not_doubled() {
        // |x| = 0.95 is inside the border only when not doubled.
        let out = Compositor::default().shade(&frag(ColorRgba::new(0.95, 0.0, 0.0, 0.2222)), &Unbound);
        assert!(out.a > 0.0 && out.a < 0.5);
    }

    // ── pass-through ──────────────────────────────────────────────────────

    #[test]
    fn unmatched_sentinel_passes_through() {
        let c = ColorRgba::new(0.4, 0.5, 0.6, 0.1110);
        let out = Compositor::default().shade(&frag(c), &SolidTexture(TEXEL));
        assert_eq!(out, c);
    }

    #[test]
    fn explicit_mode_overrides_color() {
        let c = ColorRgba::new(0.4, 0.5, 0.6, 0.7);
        let out = Compositor::default().shade_mode(CompositeMode::Texture, &frag(c), &SolidTexture(TEXEL));
        assert_eq!(out, TEXEL);
    }
}
