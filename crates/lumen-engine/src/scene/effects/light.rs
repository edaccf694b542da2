use crate::coords::{ColorRgba, Rect, Vec2};
use crate::scene::{DrawCmd, DrawList, Quad, ZIndex};
use crate::shading::RadialLight;

/// Radial light draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LightCmd {
    pub quad: Quad,
    pub light: RadialLight,
}

impl DrawList {
    /// Records a light shaded over an arbitrary quad.
    #[inline]
    pub fn push_light(&mut self, z: ZIndex, quad: Quad, light: RadialLight) {
        self.push(z, DrawCmd::Light(LightCmd { quad, light }));
    }

    /// Records a light covering exactly its radius (the square around `center`).
    pub fn push_light_disc(&mut self, z: ZIndex, center: Vec2, radius: f32, color: ColorRgba) {
        let rect = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.push_light(z, Quad::solid(rect, color), RadialLight::new(center, radius));
    }
}
