//! Fonts and text measurement.
//!
//! [`TextMetrics`] is the provider both the layout pass and the text
//! renderer use. [`FontTable`] implements it on top of `fontdue`.

mod font_table;
mod metrics;

pub use font_table::FontTable;
pub use metrics::{FontId, GlyphBitmap, TextMetrics, TextSize};
