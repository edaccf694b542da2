//! Coordinate and color types shared by the shading programs and renderers.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Texture coordinates are atlas-relative and live in the same `Vec2` type.
//! The GPU path converts logical pixels to NDC in the vertex stage.

mod color;
mod rect;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
