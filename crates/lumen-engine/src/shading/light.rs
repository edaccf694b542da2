use crate::coords::{ColorRgba, Vec2};

use super::Fragment;

/// Single point light with linear radial falloff.
///
/// `dist = |position - center| / radius` is 0 at the center and 1 on the
/// radius. The vertex color is scaled by `1 - dist` on all four channels with
/// no clamp, so fragments past the radius come out negative and vanish in the
/// blend stage instead of being branched away.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RadialLight {
    pub center: Vec2,
    /// Must be non-zero; `0` yields non-finite output.
    pub radius: f32,
}

impl RadialLight {
    #[inline]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn normalized_distance(&self, position: Vec2) -> f32 {
        self.center.distance(position) / self.radius
    }

    pub fn shade(&self, frag: &Fragment) -> ColorRgba {
        let falloff = 1.0 - self.normalized_distance(frag.position);
        frag.color.scaled(falloff)
    }
}
