//! Per-effect draw payloads and `DrawList` push helpers.

mod composite;
mod light;
mod minimap;
mod portal;

pub use composite::CompositeCmd;
pub use light::LightCmd;
pub use minimap::MinimapCmd;
pub use portal::PortalCmd;
