//! GPU device + surface management.
//!
//! Creates the wgpu instance/adapter/device/queue for a window, keeps the
//! surface configured across resizes and hands out one frame at a time.

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use surface::SurfaceErrorAction;
pub use init::GpuInit;
