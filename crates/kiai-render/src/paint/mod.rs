//! Color model shared by commands and backends.

mod color;

pub use color::Color;
