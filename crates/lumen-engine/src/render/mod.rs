//! GPU rendering subsystem.
//!
//! [`EffectRenderer`] consumes a `scene` draw list and draws it with the WGSL
//! ports of the `shading` programs. It owns its GPU resources (pipelines,
//! buffers, uploaded textures) and creates them lazily.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The vertex stage converts to NDC using a viewport uniform and hands the
//!   logical position to the fragment programs.

mod ctx;
pub mod effects;

pub use ctx::{RenderCtx, RenderTarget};
pub use effects::EffectRenderer;
