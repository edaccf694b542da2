use crate::coords::ColorRgba;

use super::{Compositor, Fragment, MinimapOverlay, PortalAnimator, RadialLight, Texture};

/// Program identity, used to pick GPU pipelines and for diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ProgramKind {
    Light,
    Minimap,
    Portal,
    Composite,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 4] = [Self::Light, Self::Minimap, Self::Portal, Self::Composite];

    /// Whether draws with this program bind a texture.
    #[inline]
    pub const fn binds_texture(self) -> bool {
        matches!(self, Self::Minimap | Self::Composite)
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Minimap => "minimap",
            Self::Portal => "portal",
            Self::Composite => "composite",
        }
    }
}

/// One shading program together with its uniform block.
///
/// The surrounding renderer picks exactly one of these per draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Program {
    Light(RadialLight),
    Minimap(MinimapOverlay),
    Portal(PortalAnimator),
    Composite(Compositor),
}

impl Program {
    #[inline]
    pub fn kind(&self) -> ProgramKind {
        match self {
            Self::Light(_) => ProgramKind::Light,
            Self::Minimap(_) => ProgramKind::Minimap,
            Self::Portal(_) => ProgramKind::Portal,
            Self::Composite(_) => ProgramKind::Composite,
        }
    }

    /// Evaluates the program for one fragment. Light and portal never touch `texture`.
    pub fn shade<T: Texture + ?Sized>(&self, frag: &Fragment, texture: &T) -> ColorRgba {
        match self {
            Self::Light(p) => p.shade(frag),
            Self::Minimap(p) => p.shade(frag, texture),
            Self::Portal(p) => p.shade(frag),
            Self::Composite(p) => p.shade(frag, texture),
        }
    }
}

impl From<RadialLight> for Program {
    fn from(p: RadialLight) -> Self {
        Self::Light(p)
    }
}

impl From<MinimapOverlay> for Program {
    fn from(p: MinimapOverlay) -> Self {
        Self::Minimap(p)
    }
}

impl From<PortalAnimator> for Program {
    fn from(p: PortalAnimator) -> Self {
        Self::Portal(p)
    }
}

impl From<Compositor> for Program {
    fn from(p: Compositor) -> Self {
        Self::Composite(p)
    }
}
