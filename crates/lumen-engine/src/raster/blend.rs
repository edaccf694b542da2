use crate::coords::ColorRgba;

/// How program output is combined with the framebuffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Blend {
    /// Store the raw program output, unclamped. Used to inspect programs.
    Replace,
    /// `dst = src + dst * (1 - src.a)`, matching the GPU pipelines.
    #[default]
    PremulAlpha,
    /// `dst = src + dst`.
    Additive,
}

impl Blend {
    /// Combines `src` into `dst`.
    ///
    /// The blending modes behave like an 8-bit unorm render target: the source
    /// is clamped to `[0, 1]` before blending and the result after it. This is
    /// what makes negative light falloff and over-bright particle alpha resolve
    /// to something displayable.
    pub fn apply(self, dst: ColorRgba, src: ColorRgba) -> ColorRgba {
        match self {
            Blend::Replace => src,
            Blend::PremulAlpha => {
                let s = saturate(src);
                let k = 1.0 - s.a;
                saturate(ColorRgba::new(
                    s.r + dst.r * k,
                    s.g + dst.g * k,
                    s.b + dst.b * k,
                    s.a + dst.a * k,
                ))
            }
            Blend::Additive => {
                let s = saturate(src);
                saturate(ColorRgba::new(s.r + dst.r, s.g + dst.g, s.b + dst.b, s.a + dst.a))
            }
        }
    }
}

/// Clamps every channel to `[0, 1]`; NaN becomes 0.
#[inline]
pub(super) fn saturate(c: ColorRgba) -> ColorRgba {
    let f = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    ColorRgba::new(f(c.r), f(c.g), f(c.b), f(c.a))
}
