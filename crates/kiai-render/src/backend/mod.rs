//! Concrete [`Surface`](crate::render::Surface) implementations.
//!
//! - [`PixelSurface`]: software RGBA8 framebuffer (tests, headless output)
//! - [`GpuSurface`]: wgpu instanced-quad batcher for on-screen rendering

mod cpu;
mod gpu;

pub use cpu::PixelSurface;
pub use gpu::GpuSurface;
