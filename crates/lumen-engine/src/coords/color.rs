/// Linear straight-alpha RGBA color.
///
/// This is the value type flowing in and out of the shading programs. Channels
/// are nominally in `[0, 1]` but are never clamped here: program outputs may go
/// negative or above one, and resolving that is the blend stage's job.
///
/// Vertex colors double as dispatch tags for some programs, so equality is
/// exact float equality.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Exact comparison of the color channels, ignoring alpha.
    #[inline]
    pub fn rgb_eq(self, r: f32, g: f32, b: f32) -> bool {
        self.r == r && self.g == g && self.b == b
    }

    /// Multiplies all four channels by `k`.
    #[inline]
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl From<[f32; 4]> for ColorRgba {
    #[inline]
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}
