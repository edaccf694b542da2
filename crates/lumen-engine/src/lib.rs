//! Lumen engine crate.
//!
//! Procedural per-pixel effects (radial lights, minimap overlays, portals and
//! particle compositing) with two backends: a wgpu renderer for windowed
//! output and a software rasterizer for offline, deterministic output.

pub mod coords;
pub mod shading;
pub mod scene;
pub mod raster;

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
