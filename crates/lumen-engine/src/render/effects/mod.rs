//! Effect renderer: one instanced pipeline per shading program.
//!
//! Every program shares the vertex stage in `shaders/common.wgsl`; each
//! pipeline's module is that stage followed by the program's fragment stage.

mod common;
mod instance;
mod renderer;
mod textures;

pub use renderer::EffectRenderer;
