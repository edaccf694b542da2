use crate::coords::{ColorRgba, Rect, Vec2};

use super::{Fragment, Texture};

/// Upper edge of the viewer marker band.
const MARKER_EDGE: f32 = 0.05;
/// Upper edge of the textured map disc.
const MAP_EDGE: f32 = 0.8;
/// Upper edge of the vignette ring; everything past it is clipped.
const RING_EDGE: f32 = 0.9;
/// Angular rate of the marker blink (rad/s), roughly 2.4 Hz.
const BLINK_RATE: f32 = 15.0;

const MARKER_ON: ColorRgba = ColorRgba::new(1.0, 0.0, 0.0, 1.0);

/// Distance band a fragment falls into. Upper edges are exclusive.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MinimapBand {
    /// `dist < 0.05`: blinking viewer marker.
    Marker,
    /// `0.05 <= dist < 0.8`: sampled map, brightened toward the center.
    Map,
    /// `0.8 <= dist < 0.9`: amber vignette ring.
    Ring,
    /// `dist >= 0.9` (and NaN): transparent.
    Outside,
}

impl MinimapBand {
    #[inline]
    pub fn of(dist: f32) -> Self {
        if dist < MARKER_EDGE {
            Self::Marker
        } else if dist < MAP_EDGE {
            Self::Map
        } else if dist < RING_EDGE {
            Self::Ring
        } else {
            Self::Outside
        }
    }
}

/// Circular minimap overlay with a radar-style marker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MinimapOverlay {
    /// Monotonic seconds; drives the marker blink.
    pub time: f32,
    /// Viewer marker position. `viewer.y` is also the distance normalization
    /// scale, see [`normalization_scale`](Self::normalization_scale).
    pub viewer: Vec2,
    /// Atlas region of the map texture.
    pub bounds: Rect,
}

impl MinimapOverlay {
    #[inline]
    pub const fn new(time: f32, viewer: Vec2, bounds: Rect) -> Self {
        Self { time, viewer, bounds }
    }

    /// Map radius used to normalize distances.
    ///
    /// This is the marker's y coordinate: the marker sits in the frame where
    /// its y equals the map radius, so both readings are the same value.
    #[inline]
    pub fn normalization_scale(&self) -> f32 {
        self.viewer.y
    }

    #[inline]
    pub fn normalized_distance(&self, position: Vec2) -> f32 {
        self.viewer.distance(position) / self.normalization_scale()
    }

    /// Whether the marker is in its lit half-period at `self.time`.
    #[inline]
    pub fn marker_lit(&self) -> bool {
        (self.time * BLINK_RATE).sin() > 0.0
    }

    pub fn shade<T: Texture + ?Sized>(&self, frag: &Fragment, texture: &T) -> ColorRgba {
        let texel = texture.sample(self.bounds.remap(frag.tex_coord));
        let dist = self.normalized_distance(frag.position);

        match MinimapBand::of(dist) {
            MinimapBand::Marker => {
                if self.marker_lit() {
                    MARKER_ON
                } else {
                    ColorRgba::transparent()
                }
            }
            MinimapBand::Map => {
                ColorRgba::new(texel.r / dist, texel.g, texel.b / dist, texel.a / dist)
            }
            MinimapBand::Ring => ColorRgba::new(0.6 + dist, 0.3, 0.0, 0.4 + dist),
            MinimapBand::Outside => ColorRgba::transparent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::shading::{FnTexture, SolidTexture};

    const TEXEL: ColorRgba = ColorRgba::new(0.2, 0.4, 0.3, 0.25);

    /// Viewer at (0, 100): normalization scale 100, so a fragment `d` px below
    /// the viewer sits at `dist = d / 100`.
    fn minimap(time: f32) -> MinimapOverlay {
        MinimapOverlay::new(time, Vec2::new(0.0, 100.0), Rect::unit())
    }

    fn at_px(d: f32) -> Fragment {
        Fragment::new(Vec2::new(0.5, 0.5), Vec2::new(0.0, 100.0 - d), ColorRgba::white())
    }

    fn shade(m: &MinimapOverlay, d: f32) -> ColorRgba {
        m.shade(&at_px(d), &SolidTexture(TEXEL))
    }

    // ── bands ─────────────────────────────────────────────────────────────

    #[test]
    fn band_edges_are_exclusive_upper() {
        assert_eq!(MinimapBand::of(0.0), MinimapBand::Marker);
        assert_eq!(MinimapBand::of(0.05), MinimapBand::Map);
        assert_eq!(MinimapBand::of(0.8), MinimapBand::Ring);
        assert_eq!(MinimapBand::of(0.9), MinimapBand::Outside);
        assert_eq!(MinimapBand::of(f32::INFINITY), MinimapBand::Outside);
    }

    #[test]
    fn five_percent_lands_in_map_band() {
        let m = minimap(0.0);
        assert_eq!(m.normalized_distance(at_px(5.0).position), 0.05);
        let dist = 0.05f32;
        assert_eq!(
            shade(&m, 5.0),
            ColorRgba::new(TEXEL.r / dist, TEXEL.g, TEXEL.b / dist, TEXEL.a / dist)
        );
    }

    #[test]
    fn map_band_scales_red_blue_alpha() {
        let out = shade(&minimap(0.0), 50.0);
        assert_eq!(out, ColorRgba::new(0.4, 0.4, 0.6, 0.5));
    }

    #[test]
    fn ring_band_ignores_texture() {
        let out = shade(&minimap(0.0), 85.0);
        let dist = 0.85f32;
        assert_eq!(out, ColorRgba::new(0.6 + dist, 0.3, 0.0, 0.4 + dist));
    }

    #[test]
    fn ninety_percent_is_clipped() {
        assert_eq!(shade(&minimap(0.0), 90.0), ColorRgba::transparent());
        assert_eq!(shade(&minimap(0.0), 400.0), ColorRgba::transparent());
    }

    // ── blink ─────────────────────────────────────────────────────────────

    #[test]
    fn marker_lit_when_sine_positive() {
        // sin(15 t) = 0.5
        let m = minimap((PI / 6.0) / 15.0);
        assert_eq!(shade(&m, 0.0), MARKER_ON);
    }

    #[test]
    fn marker_dark_when_sine_negative() {
        // sin(15 t) = -0.5
        let m = minimap((7.0 * PI / 6.0) / 15.0);
        assert_eq!(shade(&m, 0.0), ColorRgba::transparent());
    }

    #[test]
    fn marker_ignores_texture() {
        let m = minimap((PI / 6.0) / 15.0);
        let out = m.shade(&at_px(1.0), &FnTexture(|_| ColorRgba::new(0.0, 1.0, 0.0, 1.0)));
        assert_eq!(out, MARKER_ON);
    }

    // ── texture bounds ────────────────────────────────────────────────────

    #[test]
    fn samples_through_bounds_remap() {
        let mut m = minimap(0.0);
        m.bounds = Rect::new(0.5, 0.0, 0.5, 1.0);
        // tex_coord (0.5, 0.5) is the left edge of the region -> uv.x == 0.
        let uv_texture = FnTexture(|uv: Vec2| ColorRgba::new(uv.x, uv.y, 0.0, 1.0));
        let out = m.shade(&at_px(50.0), &uv_texture);
        assert_eq!(out, ColorRgba::new(0.0, 0.5, 0.0, 2.0));
    }

    #[test]
    fn zero_scale_is_not_finite() {
        let m = MinimapOverlay::new(0.0, Vec2::new(10.0, 0.0), Rect::unit());
        assert!(!m.normalized_distance(Vec2::new(0.0, 0.0)).is_finite());
    }
}
