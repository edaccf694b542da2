//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store backend-agnostic effect draw commands
//! - provide deterministic ordering (z-index + insertion order)
//! - own the CPU textures that commands reference by id
//!
//! Both the software rasterizer and the GPU effect renderer consume the same
//! [`DrawList`], so a scene renders identically through either backend.

mod cmd;
mod list;
mod order;
mod quad;
mod textures;

pub mod effects;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use order::{SortKey, ZIndex};
pub use quad::Quad;
pub use textures::{TextureId, TextureSet};
