//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the preview window, and wires them to the
//! GPU layer and the frame clock.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
