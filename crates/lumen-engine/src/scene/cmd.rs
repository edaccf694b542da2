use crate::shading::{Program, ProgramKind};

use super::Quad;
use super::TextureId;
use super::effects::{CompositeCmd, LightCmd, MinimapCmd, PortalCmd};

/// Backend-agnostic draw command stream.
///
/// Extending the scene:
/// - add the program under `shading`
/// - add a command module under `scene::effects` with its push helpers
/// - add a variant here
/// - teach `raster` and `render::effects` to evaluate it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Light(LightCmd),
    Minimap(MinimapCmd),
    Portal(PortalCmd),
    Composite(CompositeCmd),
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> ProgramKind {
        match self {
            Self::Light(_) => ProgramKind::Light,
            Self::Minimap(_) => ProgramKind::Minimap,
            Self::Portal(_) => ProgramKind::Portal,
            Self::Composite(_) => ProgramKind::Composite,
        }
    }

    #[inline]
    pub fn quad(&self) -> &Quad {
        match self {
            Self::Light(c) => &c.quad,
            Self::Minimap(c) => &c.quad,
            Self::Portal(c) => &c.quad,
            Self::Composite(c) => &c.quad,
        }
    }

    /// Texture bound for this draw, if the program samples one.
    #[inline]
    pub fn texture(&self) -> Option<TextureId> {
        match self {
            Self::Minimap(c) => Some(c.texture),
            Self::Composite(c) => c.texture,
            Self::Light(_) | Self::Portal(_) => None,
        }
    }

    /// The program and uniform block this command draws with.
    #[inline]
    pub fn program(&self) -> Program {
        match self {
            Self::Light(c) => Program::Light(c.light),
            Self::Minimap(c) => Program::Minimap(c.minimap),
            Self::Portal(c) => Program::Portal(c.portal),
            Self::Composite(c) => Program::Composite(c.compositor),
        }
    }
}
