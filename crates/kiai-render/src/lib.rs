//! Kiai render crate.
//!
//! Interprets the ordered render-command list a layout pass produces each
//! frame and turns it into primitive draw calls on a [`render::Surface`].
//! Glyph textures and measured line widths are cached across frames and
//! evicted in bulk.

pub mod backend;
pub mod config;
pub mod coords;
pub mod error;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;

pub use config::RenderConfig;
pub use error::RenderError;
pub use render::{FrameStats, RenderContext, Surface, TextureId};
pub use scene::{CommandKind, CommandList, RenderCommand};
