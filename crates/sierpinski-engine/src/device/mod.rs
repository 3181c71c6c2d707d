//! GPU device and window surface.
//!
//! [`Gpu`] opens the adapter/device/queue, keeps the swapchain configured
//! across resizes, and hands out one [`GpuFrame`] per redraw.

mod config;
mod frame;
mod gpu;
mod surface;

pub use config::GpuInit;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use surface::SurfaceErrorAction;
