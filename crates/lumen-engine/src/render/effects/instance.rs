use bytemuck::{Pod, Zeroable};

use crate::scene::DrawCmd;

/// Per-instance data shared by all effect pipelines (144 bytes):
///
///  offset   0  rect      [f32; 4]       loc 1   (x, y, w, h) logical px
///  offset  16  uv        [f32; 4]       loc 2   (x, y, w, h) tex coords
///  offset  32  colors    [[f32; 4]; 4]  loc 3-6 TL, TR, BR, BL
///  offset  96  params0   [f32; 4]       loc 7   program uniforms
///  offset 112  params1   [f32; 4]       loc 8   texture bounds
///  offset 128  tag       u32            loc 9   flat dispatch tag
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct EffectInstance {
    pub rect: [f32; 4],
    pub uv: [f32; 4],
    pub colors: [[f32; 4]; 4],
    pub params0: [f32; 4],
    pub params1: [f32; 4],
    pub tag: u32,
    pub _pad: [u32; 3],
}

impl EffectInstance {
    const ATTRS: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
        1 => Float32x4, // rect
        2 => Float32x4, // uv
        3 => Float32x4, // color tl
        4 => Float32x4, // color tr
        5 => Float32x4, // color br
        6 => Float32x4, // color bl
        7 => Float32x4, // params0
        8 => Float32x4, // params1
        9 => Uint32     // tag
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<EffectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Packs a command's quad and program uniforms.
    pub(super) fn from_cmd(cmd: &DrawCmd) -> Self {
        let quad = cmd.quad();

        let (params0, params1, tag) = match cmd {
            DrawCmd::Light(c) => {
                let l = c.light;
                ([l.center.x, l.center.y, l.radius, 0.0], [0.0; 4], 0)
            }
            DrawCmd::Minimap(c) => {
                let m = c.minimap;
                ([m.time, m.viewer.x, m.viewer.y, 0.0], m.bounds.to_array(), 0)
            }
            DrawCmd::Portal(c) => {
                let p = c.portal;
                (
                    [p.time, p.orbit_center.x, p.orbit_center.y, 0.0],
                    [0.0; 4],
                    u32::from(c.tagged),
                )
            }
            DrawCmd::Composite(c) => ([0.0; 4], c.compositor.bounds.to_array(), c.mode.tag()),
        };

        Self {
            rect: quad.rect.to_array(),
            uv: quad.uv.to_array(),
            colors: quad.colors.map(|c| c.to_array()),
            params0,
            params1,
            tag,
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{ColorRgba, Rect, Vec2};
    use crate::scene::{DrawList, Quad, ZIndex};
    use crate::shading::{CompositeMode, MinimapOverlay, PortalAnimator};

    fn packed(list: &DrawList) -> EffectInstance {
        EffectInstance::from_cmd(&list.items()[0].cmd)
    }

    #[test]
    fn layout_matches_shader_offsets() {
        assert_eq!(std::mem::size_of::<EffectInstance>(), 144);
        assert_eq!(EffectInstance::ATTRS[8].offset, 128);
    }

    #[test]
    fn light_packs_center_and_radius() {
        let mut list = DrawList::new();
        list.push_light_disc(ZIndex::new(0), Vec2::new(40.0, 30.0), 10.0, ColorRgba::white());
        let inst = packed(&list);
        assert_eq!(inst.rect, [30.0, 20.0, 20.0, 20.0]);
        assert_eq!(inst.params0, [40.0, 30.0, 10.0, 0.0]);
        assert_eq!(inst.tag, 0);
    }

    #[test]
    fn minimap_packs_time_viewer_and_bounds() {
        let mut list = DrawList::new();
        let bounds = Rect::new(0.25, 0.0, 0.5, 0.5);
        list.push_minimap(
            ZIndex::new(0),
            Rect::new(0.0, 0.0, 64.0, 64.0),
            bounds,
            MinimapOverlay::new(2.5, Vec2::new(32.0, 48.0), bounds),
            crate::scene::TextureId(3),
        );
        let inst = packed(&list);
        assert_eq!(inst.params0, [2.5, 32.0, 48.0, 0.0]);
        assert_eq!(inst.params1, [0.25, 0.0, 0.5, 0.5]);
        assert_eq!(inst.uv, [0.25, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn portal_tag_is_resolved_on_the_cpu() {
        let mut list = DrawList::new();
        let portal = PortalAnimator::new(1.0, Vec2::new(5.0, 6.0));
        let rect = Rect::new(0.0, 0.0, 8.0, 8.0);
        list.push_portal_disc(ZIndex::new(0), rect, 0.5, portal);
        list.push_portal(ZIndex::new(0), Quad::solid(rect, ColorRgba::white()), portal);

        let disc = EffectInstance::from_cmd(&list.items()[0].cmd);
        let plain = EffectInstance::from_cmd(&list.items()[1].cmd);
        assert_eq!(disc.tag, 1);
        assert_eq!(plain.tag, 0);
        assert_eq!(disc.params0, [1.0, 5.0, 6.0, 0.0]);
        assert_eq!(disc.colors[0], [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn composite_packs_mode_tag() {
        let mut list = DrawList::new();
        list.push_fire_particle(ZIndex::new(0), Rect::new(0.0, 0.0, 4.0, 4.0));
        let inst = packed(&list);
        assert_eq!(inst.tag, CompositeMode::Fire.tag());
        assert_eq!(inst.params1, Rect::unit().to_array());
        assert_eq!(inst.colors[2], [0.5, 0.5, 0.0, 0.1111]);
    }
}
