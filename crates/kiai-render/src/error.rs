//! Error types surfaced by the render crate.
//!
//! Only configuration mistakes are errors. Missing fonts, failed glyph
//! rasterization and empty image handles degrade the frame instead.

use std::fmt;

/// Fatal interpreter error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RenderError {
    /// `render_frame` was called before a drawing surface was attached.
    SurfaceUnset,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceUnset => {
                f.write_str("render context has no drawing surface attached")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Error returned when font bytes cannot be parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}
