use crate::coords::{ColorRgba, Rect};
use crate::scene::{DrawCmd, DrawList, Quad, TextureId, ZIndex};
use crate::shading::MinimapOverlay;

/// Minimap draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapCmd {
    pub quad: Quad,
    pub minimap: MinimapOverlay,
    /// Map image. Required: the overlay always samples.
    pub texture: TextureId,
}

impl DrawList {
    /// Records a minimap over `rect`, sampling `texture` through `minimap.bounds`.
    ///
    /// `uv` is the texture-coordinate rectangle spanned by the quad (usually the
    /// same atlas region as the bounds).
    pub fn push_minimap(
        &mut self,
        z: ZIndex,
        rect: Rect,
        uv: Rect,
        minimap: MinimapOverlay,
        texture: TextureId,
    ) {
        let quad = Quad::new(rect, uv, ColorRgba::white());
        self.push(z, DrawCmd::Minimap(MinimapCmd { quad, minimap, texture }));
    }
}
