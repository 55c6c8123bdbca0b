//! Per-kind renderers the dispatcher delegates to.

mod image;
mod rounded_rect;
mod text;

pub use image::blit_image;
pub use rounded_rect::fill_rounded_rect;
pub use text::TextRenderer;
