use super::Vec2;

/// Axis-aligned rectangle (top-left origin).
///
/// Used both for screen-space quads in logical pixels and for texture-space
/// regions such as the `x, y, w, h` texture bounds of an atlas entry.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// The unit rectangle `(0, 0, 1, 1)`; identity texture bounds.
    #[inline]
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Point at normalized position `t` (`(0,0)` = origin, `(1,1)` = max corner).
    #[inline]
    pub fn lerp(self, t: Vec2) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * t.x, self.origin.y + self.size.y * t.y)
    }

    /// Texture-bounds remap: `(p - origin) / size`.
    ///
    /// Inverse of [`lerp`](Self::lerp). A zero-sized rect yields non-finite
    /// coordinates; callers supply valid bounds.
    #[inline]
    pub fn remap(self, p: Vec2) -> Vec2 {
        (p - self.origin) / self.size
    }

    /// `[x, y, w, h]`, the layout of a `vec4` bounds uniform.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.origin.x, self.origin.y, self.size.x, self.size.y]
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── remap / lerp ──────────────────────────────────────────────────────

    #[test]
    fn remap_unit_bounds_is_identity() {
        let p = Vec2::new(0.3, 0.4);
        assert_eq!(Rect::unit().remap(p), p);
    }

    #[test]
    fn remap_sub_region() {
        // Atlas entry in the right half of the texture.
        let bounds = r(0.5, 0.0, 0.5, 1.0);
        assert_eq!(bounds.remap(Vec2::new(0.75, 0.5)), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn remap_zero_size_is_not_finite() {
        let uv = r(0.0, 0.0, 0.0, 1.0).remap(Vec2::new(0.5, 0.5));
        assert!(!uv.is_finite());
    }

    #[test]
    fn lerp_hits_corners() {
        let rect = r(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.lerp(Vec2::zero()), rect.min());
        assert_eq!(rect.lerp(Vec2::splat(1.0)), rect.max());
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(b), Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(b).is_none());
    }
}
