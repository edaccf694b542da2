use crate::coords::{ColorRgba, Vec2};

use super::Fragment;

/// Angular rate of the orbiting focus (rad/s).
const ORBIT_RATE: f32 = 5.0;
/// Horizontal half-axis of the focus ellipse.
const ORBIT_HALF_WIDTH: f32 = 5.0;
/// Vertical half-axis of the focus ellipse.
const ORBIT_HALF_HEIGHT: f32 = 3.0;
/// Normalized radius of the bright core.
const CORE_EDGE: f32 = 0.2;

/// Exact test for the portal-disc vertex tag: pure blue, any alpha.
#[inline]
pub fn is_portal_tag(color: ColorRgba) -> bool {
    color.rgb_eq(0.0, 0.0, 1.0)
}

/// Animated portal disc.
///
/// Fragments whose vertex color is not the portal tag pass through unchanged,
/// so one draw batch can mix portal discs with plain geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PortalAnimator {
    /// Monotonic seconds.
    pub time: f32,
    /// Center of the focus orbit. `orbit_center.y` is also the distance
    /// normalization scale, see [`normalization_scale`](Self::normalization_scale).
    pub orbit_center: Vec2,
}

impl PortalAnimator {
    #[inline]
    pub const fn new(time: f32, orbit_center: Vec2) -> Self {
        Self { time, orbit_center }
    }

    /// Orbit center from a base position plus a per-draw offset
    /// (typically the portal's world position minus the camera).
    #[inline]
    pub fn with_offset(time: f32, base: Vec2, offset: Vec2) -> Self {
        Self::new(time, base + offset)
    }

    /// The orbit center's y coordinate, reused as the disc radius.
    #[inline]
    pub fn normalization_scale(&self) -> f32 {
        self.orbit_center.y
    }

    /// Current position of the wobbling focus on its 5x3 ellipse.
    #[inline]
    pub fn focus(&self) -> Vec2 {
        let phase = self.time * ORBIT_RATE;
        Vec2::new(
            self.orbit_center.x + phase.sin() * ORBIT_HALF_WIDTH,
            self.orbit_center.y + phase.cos() * ORBIT_HALF_HEIGHT,
        )
    }

    #[inline]
    pub fn normalized_distance(&self, position: Vec2) -> f32 {
        self.focus().distance(position) / self.normalization_scale()
    }

    pub fn shade(&self, frag: &Fragment) -> ColorRgba {
        if is_portal_tag(frag.color) {
            self.shade_disc(frag)
        } else {
            frag.color
        }
    }

    /// Disc shading without the tag check.
    pub fn shade_disc(&self, frag: &Fragment) -> ColorRgba {
        let c = frag.color;
        let dist = self.normalized_distance(frag.position);

        // Flicker frequency rises as the fragment approaches the focus.
        let shimmer = (self.time / dist).sin().clamp(0.5, 1.0);

        if dist < CORE_EDGE {
            let t = dist * 2.0;
            ColorRgba::new(t + self.time.sin(), t, t, dist)
        } else {
            let rim = 1.0 - dist;
            ColorRgba::new(
                dist * shimmer * rim,
                c.g * shimmer * rim,
                (c.b / 2.0) * shimmer * rim,
                (c.a * rim).clamp(0.2, 0.8),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// At `time = 0` the focus is `orbit_center + (0, 3)`. With the center at
    /// (0, 100) a fragment `d` px below the focus sits at `dist = d / 100`.
    fn portal() -> PortalAnimator {
        PortalAnimator::new(0.0, Vec2::new(0.0, 100.0))
    }

    fn below_focus(d: f32, color: ColorRgba) -> Fragment {
        Fragment::at(Vec2::new(0.0, 103.0 + d), color)
    }

    // ── tag dispatch ──────────────────────────────────────────────────────

    #[test]
    fn tag_ignores_alpha() {
        assert!(is_portal_tag(ColorRgba::new(0.0, 0.0, 1.0, 0.7)));
        assert!(is_portal_tag(ColorRgba::new(0.0, 0.0, 1.0, 1.0)));
        assert!(!is_portal_tag(ColorRgba::new(0.0, 0.0, 0.9, 1.0)));
        assert!(!is_portal_tag(ColorRgba::new(0.0, 0.0001, 1.0, 1.0)));
    }

    #[test]
    fn tagged_fragment_is_animated() {
        for c in [ColorRgba::new(0.0, 0.0, 1.0, 0.7), ColorRgba::new(0.0, 0.0, 1.0, 1.0)] {
            let frag = below_focus(50.0, c);
            let out = portal().shade(&frag);
            assert_ne!(out, c);
            assert_eq!(out, portal().shade_disc(&frag));
        }
    }

    #[test]
    fn untagged_fragment_passes_through() {
        let c = ColorRgba::new(0.0, 0.0, 0.9, 1.0);
        assert_eq!(portal().shade(&below_focus(10.0, c)), c);
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn focus_orbits_on_ellipse() {
        let p = PortalAnimator::new(std::f32::consts::FRAC_PI_2 / 5.0, Vec2::new(10.0, 20.0));
        let f = p.focus();
        assert!((f.x - 15.0).abs() < 1e-5);
        assert!((f.y - 20.0).abs() < 1e-5);
    }

    #[test]
    fn offset_adds_to_base() {
        let p = PortalAnimator::with_offset(1.0, Vec2::new(10.0, 20.0), Vec2::new(-4.0, 6.0));
        assert_eq!(p.orbit_center, Vec2::new(6.0, 26.0));
        assert_eq!(p.normalization_scale(), 26.0);
    }

    // ── core ──────────────────────────────────────────────────────────────

    #[test]
    fn core_alpha_equals_distance() {
        let out = portal().shade(&below_focus(10.0, ColorRgba::new(0.0, 0.0, 1.0, 0.7)));
        assert_eq!(out.a, 0.1);
        assert_eq!(out, ColorRgba::new(0.2, 0.2, 0.2, 0.1));
    }

    #[test]
    fn core_red_pulses_with_time() {
        let p = PortalAnimator::new(1.0, Vec2::new(0.0, 100.0));
        let pos = p.focus();
        let out = p.shade(&Fragment::at(pos, ColorRgba::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(out, ColorRgba::new(1.0f32.sin(), 0.0, 0.0, 0.0));
    }

    // ── outer swirl ───────────────────────────────────────────────────────

    #[test]
    fn outer_swirl_at_half_radius() {
        // time 0 -> shimmer = clamp(sin(0), 0.5, 1) = 0.5
        let out = portal().shade(&below_focus(50.0, ColorRgba::new(0.0, 0.0, 1.0, 0.7)));
        let alpha = (0.7f32 * 0.5).clamp(0.2, 0.8);
        assert_eq!(out, ColorRgba::new(0.125, 0.0, 0.125, alpha));
    }

    #[test]
    fn outer_alpha_stays_within_clamp() {
        for a in [-1e30, -1.0, 0.0, 0.5, 1.0, 3.0, 1e30, f32::INFINITY] {
            for d in [20.0, 35.0, 60.0, 99.0, 150.0] {
                let out = portal().shade(&below_focus(d, ColorRgba::new(0.0, 0.0, 1.0, a)));
                assert!(out.a >= 0.2 && out.a <= 0.8, "alpha {} for a={a} d={d}", out.a);
            }
        }
    }

    #[test]
    fn outer_alpha_clamps_after_scaling() {
        // a * (1 - dist) = 0.1 is raised to the floor, not scaled below it.
        let out = portal().shade(&below_focus(50.0, ColorRgba::new(0.0, 0.0, 1.0, 0.2)));
        assert_eq!(out.a, 0.2);
    }

    #[test]
    fn shimmer_never_drops_below_half() {
        let p = PortalAnimator::new(3.7, Vec2::new(0.0, 100.0));
        let c = ColorRgba::new(0.0, 1.0, 1.0, 1.0);
        let frag = Fragment::at(p.focus() + Vec2::new(0.0, 40.0), c);
        let dist = p.normalized_distance(frag.position);
        let out = p.shade_disc(&frag);
        // g = c.g * shimmer * (1 - dist) with c.g = 1
        let shimmer = out.g / (1.0 - dist);
        assert!((0.5 - 1e-5..=1.0 + 1e-5).contains(&shimmer));
    }
}
