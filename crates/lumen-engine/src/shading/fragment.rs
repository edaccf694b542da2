use crate::coords::{ColorRgba, Vec2};

/// Interpolated per-pixel input produced by the geometry stage.
///
/// Immutable for the duration of a program invocation.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Fragment {
    /// Atlas-relative texture coordinate.
    pub tex_coord: Vec2,
    /// Position in the same space as the program's position uniforms
    /// (logical pixels for everything in this crate).
    pub position: Vec2,
    /// Interpolated vertex color. Some programs read it as a tag or as
    /// shape-space coordinates rather than a color.
    pub color: ColorRgba,
}

impl Fragment {
    #[inline]
    pub const fn new(tex_coord: Vec2, position: Vec2, color: ColorRgba) -> Self {
        Self { tex_coord, position, color }
    }

    /// Fragment for programs that ignore texture coordinates.
    #[inline]
    pub const fn at(position: Vec2, color: ColorRgba) -> Self {
        Self::new(Vec2::zero(), position, color)
    }
}
