//! Per-pixel shading programs.
//!
//! Every program is a pure function of a [`Fragment`], its own uniform block
//! (the program struct itself) and, for texture programs, a [`Texture`]:
//!
//! - [`RadialLight`]: radial falloff of the vertex color around a point
//! - [`MinimapOverlay`]: atlas-sampled minimap with a blinking viewer marker
//!   and an amber vignette ring
//! - [`PortalAnimator`]: animated portal disc, selected by a pure-blue vertex color
//! - [`Compositor`]: texture pass-through plus the fire / evaporate particle modes,
//!   selected by sentinel vertex colors
//!
//! Programs never clamp their output (except where a formula clamps explicitly);
//! out-of-range values are resolved by the blend stage. Degenerate uniforms
//! (zero radius, zero normalization scale) produce non-finite colors and are a
//! caller precondition, not a checked error.
//!
//! These functions are the reference semantics. The WGSL programs under
//! `render::effects::shaders` are ports of the same math.

mod compositor;
mod fragment;
mod light;
mod minimap;
mod portal;
mod program;
mod texture;

pub use compositor::{
    CompositeMode, Compositor, EVAPORATE_ALPHA_TAG, FIRE_ALPHA_TAG, TEXTURE_RED_TAG,
};
pub use fragment::Fragment;
pub use light::RadialLight;
pub use minimap::{MinimapBand, MinimapOverlay};
pub use portal::{PortalAnimator, is_portal_tag};
pub use program::{Program, ProgramKind};
pub use texture::{FnTexture, ImageTexture, SolidTexture, Texture, Unbound};
