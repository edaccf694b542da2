use crate::coords::{ColorRgba, Rect};
use crate::scene::{DrawCmd, DrawList, Quad, ZIndex};
use crate::shading::{PortalAnimator, is_portal_tag};

/// Portal draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalCmd {
    pub quad: Quad,
    pub portal: PortalAnimator,
    /// Whether the quad is a portal disc. Resolved once from the lead vertex
    /// color so interpolation can never flip it mid-quad.
    pub tagged: bool,
}

impl DrawList {
    /// Records a quad drawn with the portal program.
    ///
    /// Quads whose lead color is the portal tag (pure blue) get the animated
    /// disc; all others are drawn with their vertex colors.
    pub fn push_portal(&mut self, z: ZIndex, quad: Quad, portal: PortalAnimator) {
        let tagged = is_portal_tag(quad.lead_color());
        self.push(z, DrawCmd::Portal(PortalCmd { quad, portal, tagged }));
    }

    /// Records an animated portal disc with the given alpha.
    pub fn push_portal_disc(&mut self, z: ZIndex, rect: Rect, alpha: f32, portal: PortalAnimator) {
        let quad = Quad::solid(rect, ColorRgba::new(0.0, 0.0, 1.0, alpha));
        self.push_portal(z, quad, portal);
    }
}
