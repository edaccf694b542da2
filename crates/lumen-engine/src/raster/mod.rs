//! Software rasterizer.
//!
//! Evaluates a [`DrawList`](crate::scene::DrawList) on the CPU with the
//! reference programs in [`shading`](crate::shading). This is the offline
//! harness: it needs no GPU, is deterministic, and every pixel is an
//! independent program invocation, so rows are shaded in parallel.

mod blend;
mod framebuffer;
mod renderer;

pub use blend::Blend;
pub use framebuffer::Framebuffer;
pub use renderer::SoftwareRenderer;
