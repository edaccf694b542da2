use crate::coords::{ColorRgba, Rect};
use crate::scene::{DrawCmd, DrawList, Quad, TextureId, ZIndex};
use crate::shading::{CompositeMode, Compositor, EVAPORATE_ALPHA_TAG, FIRE_ALPHA_TAG};

/// Compositor draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCmd {
    pub quad: Quad,
    pub compositor: Compositor,
    /// Resolved once per command, so every fragment of the quad shares it.
    pub mode: CompositeMode,
    /// Bound texture; only read in [`CompositeMode::Texture`].
    pub texture: Option<TextureId>,
}

impl DrawList {
    /// Records a compositor quad, decoding the mode from the quad's lead color
    /// with the exact sentinel rules.
    pub fn push_composite(
        &mut self,
        z: ZIndex,
        quad: Quad,
        compositor: Compositor,
        texture: Option<TextureId>,
    ) {
        let mode = CompositeMode::classify(quad.lead_color());
        self.push_composite_mode(z, quad, compositor, mode, texture);
    }

    /// Records a compositor quad with an explicit mode, ignoring color tags.
    pub fn push_composite_mode(
        &mut self,
        z: ZIndex,
        quad: Quad,
        compositor: Compositor,
        mode: CompositeMode,
        texture: Option<TextureId>,
    ) {
        self.push(z, DrawCmd::Composite(CompositeCmd { quad, compositor, mode, texture }));
    }

    /// Records a full texture blit of the `bounds` atlas region over `rect`.
    pub fn push_composite_texture(&mut self, z: ZIndex, rect: Rect, bounds: Rect, texture: TextureId) {
        let quad = Quad::new(rect, bounds, ColorRgba::white());
        self.push_composite_mode(z, quad, Compositor::new(bounds), CompositeMode::Texture, Some(texture));
    }

    /// Records a fire particle.
    ///
    /// Corner colors carry the shape-space coordinate: x and y run from -0.5 to
    /// 0.5 across the quad (doubled to the unit rectangle by the program).
    pub fn push_fire_particle(&mut self, z: ZIndex, rect: Rect) {
        let corner = |x: f32, y: f32| ColorRgba::new(x, y, 0.0, FIRE_ALPHA_TAG);
        let quad = Quad::with_corner_colors(
            rect,
            Rect::unit(),
            [corner(-0.5, -0.5), corner(0.5, -0.5), corner(0.5, 0.5), corner(-0.5, 0.5)],
        );
        self.push_composite_mode(z, quad, Compositor::default(), CompositeMode::Fire, None);
    }

    /// Records an evaporating particle tinted with `tint`'s rgb.
    pub fn push_evaporate_particle(&mut self, z: ZIndex, rect: Rect, tint: ColorRgba) {
        let color = ColorRgba::new(tint.r, tint.g, tint.b, EVAPORATE_ALPHA_TAG);
        let quad = Quad::solid(rect, color);
        self.push_composite_mode(z, quad, Compositor::default(), CompositeMode::Evaporate, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    fn only_composite(list: &mut DrawList) -> CompositeCmd {
        let mut cmds = list.iter_in_paint_order().filter_map(|item| match &item.cmd {
            DrawCmd::Composite(c) => Some(c.clone()),
            _ => None,
        });
        let cmd = cmds.next().expect("one composite command");
        assert!(cmds.next().is_none());
        cmd
    }

    #[test]
    fn raw_quads_are_classified_by_sentinel() {
        let mut list = DrawList::new();
        let quad = Quad::solid(Rect::new(0.0, 0.0, 4.0, 4.0), ColorRgba::new(0.2, 0.2, 0.2, 0.2222));
        list.push_composite(ZIndex(0), quad, Compositor::default(), None);
        assert_eq!(only_composite(&mut list).mode, CompositeMode::Evaporate);
    }

    #[test]
    fn fire_particle_corners_keep_the_tag() {
        let mut list = DrawList::new();
        list.push_fire_particle(ZIndex(0), Rect::new(0.0, 0.0, 8.0, 8.0));
        let cmd = only_composite(&mut list);
        assert_eq!(cmd.mode, CompositeMode::Fire);
        assert!(cmd.quad.colors.iter().all(|c| c.a == FIRE_ALPHA_TAG));
        assert_eq!(CompositeMode::classify(cmd.quad.lead_color()), CompositeMode::Fire);
    }

    #[test]
    fn texture_blit_binds_texture() {
        let mut list = DrawList::new();
        list.push_composite_texture(ZIndex(0), Rect::new(0.0, 0.0, 4.0, 4.0), Rect::unit(), TextureId(3));
        let cmd = only_composite(&mut list);
        assert_eq!(cmd.mode, CompositeMode::Texture);
        assert_eq!(cmd.texture, Some(TextureId(3)));
    }
}
