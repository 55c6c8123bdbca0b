//! Geometry shared by commands, renderers and backends.
//!
//! Canonical space:
//! - surface pixels (logical)
//! - origin top-left
//! - +X right, +Y down

mod corner_radii;
mod rect;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
