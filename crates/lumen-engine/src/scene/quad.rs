use crate::coords::{ColorRgba, Rect, Vec2};

/// Screen-space quad with texture coordinates and per-corner vertex colors.
///
/// Corner order is top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    /// Covered area in logical pixels.
    pub rect: Rect,
    /// Texture coordinates at the rect's min and max corners.
    pub uv: Rect,
    pub colors: [ColorRgba; 4],
}

impl Quad {
    /// Quad with one vertex color on every corner.
    #[inline]
    pub const fn new(rect: Rect, uv: Rect, color: ColorRgba) -> Self {
        Self { rect, uv, colors: [color; 4] }
    }

    /// Quad over the unit texture rectangle.
    #[inline]
    pub const fn solid(rect: Rect, color: ColorRgba) -> Self {
        Self::new(rect, Rect::unit(), color)
    }

    #[inline]
    pub const fn with_corner_colors(rect: Rect, uv: Rect, colors: [ColorRgba; 4]) -> Self {
        Self { rect, uv, colors }
    }

    /// Color of the first (top-left) vertex; this is what dispatch tags are read from.
    #[inline]
    pub fn lead_color(&self) -> ColorRgba {
        self.colors[0]
    }

    /// Texture coordinate at normalized quad position `t`.
    #[inline]
    pub fn tex_coord_at(&self, t: Vec2) -> Vec2 {
        self.uv.lerp(t)
    }

    /// Bilinearly interpolated vertex color at normalized quad position `t`.
    ///
    /// A channel that is equal on all four corners is returned bit-exact, so
    /// sentinel values survive interpolation.
    pub fn color_at(&self, t: Vec2) -> ColorRgba {
        let [tl, tr, br, bl] = self.colors;
        let channel = |f: fn(ColorRgba) -> f32| {
            let top = mix(f(tl), f(tr), t.x);
            let bottom = mix(f(bl), f(br), t.x);
            mix(top, bottom, t.y)
        };
        ColorRgba::new(
            channel(|c| c.r),
            channel(|c| c.g),
            channel(|c| c.b),
            channel(|c| c.a),
        )
    }
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    if a == b { a } else { a + (b - a) * t }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_color_is_exact_everywhere() {
        let c = ColorRgba::new(0.3, 0.7, 1.0, 0.1111);
        let q = Quad::solid(Rect::new(0.0, 0.0, 10.0, 10.0), c);
        for t in [Vec2::new(0.13, 0.77), Vec2::new(0.5, 0.5), Vec2::new(0.999, 0.001)] {
            assert_eq!(q.color_at(t), c);
        }
    }

    #[test]
    fn corners_interpolate_bilinearly() {
        let q = Quad::with_corner_colors(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::unit(),
            [
                ColorRgba::new(0.0, 0.0, 0.0, 1.0),
                ColorRgba::new(1.0, 0.0, 0.0, 1.0),
                ColorRgba::new(1.0, 1.0, 0.0, 1.0),
                ColorRgba::new(0.0, 1.0, 0.0, 1.0),
            ],
        );
        assert_eq!(q.color_at(Vec2::new(0.5, 0.25)), ColorRgba::new(0.5, 0.25, 0.0, 1.0));
    }

    #[test]
    fn tex_coord_spans_uv_rect() {
        let q = Quad::new(Rect::new(0.0, 0.0, 4.0, 4.0), Rect::new(0.5, 0.5, 0.25, 0.25), ColorRgba::white());
        assert_eq!(q.tex_coord_at(Vec2::new(1.0, 0.0)), Vec2::new(0.75, 0.5));
    }
}
