//! Render-command interpreter.
//!
//! [`RenderContext`] walks a frame's commands in order and hands each one
//! to its shape renderer. Renderers only talk to the [`Surface`] primitive
//! set, so any backend that can fill, blit and clip can host the crate.
//!
//! Convention:
//! - geometry is in surface pixels (top-left origin, +Y down)
//! - draw calls reach the surface in exactly command order

mod cache;
mod clip;
mod context;
mod janitor;
mod surface;

pub mod shapes;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheStats, GlyphCache, GlyphEntry, GlyphKey, LineWidthCache};
pub use clip::ClipDriver;
pub use context::{FrameStats, RenderContext};
pub use janitor::{Eviction, EvictionReason};
pub use surface::{Surface, TextureId};
