use fontdue::{Font, FontSettings};

use crate::error::FontLoadError;
use crate::paint::Color;

use super::{FontId, GlyphBitmap, TextMetrics, TextSize};

#[derive(Debug)]
struct FontFace {
    font: Font,
    px: f32,
    line_height: f32,
    /// Baseline offset from the top of a glyph cell, in whole pixels.
    baseline: i32,
    cell_height: u32,
}

impl FontFace {
    fn new(font: Font, px: f32) -> Self {
        let (line_height, ascent) = match font.horizontal_line_metrics(px) {
            Some(m) => (m.new_line_size, m.ascent),
            None => (px * 1.2, px),
        };
        Self {
            font,
            px,
            line_height,
            baseline: ascent.round() as i32,
            cell_height: line_height.ceil().max(1.0) as u32,
        }
    }
}

/// Fonts table: small integer id to an opened font at a fixed pixel size.
///
/// Populated during setup, read-only while frames render. Slots may be
/// empty; lookups on an empty or out-of-range slot behave like a missing
/// font everywhere in the crate.
#[derive(Debug, Default)]
pub struct FontTable {
    slots: Vec<Option<FontFace>>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType/OpenType font and appends it at `px` pixels.
    pub fn load(&mut self, bytes: &[u8], px: f32) -> Result<FontId, FontLoadError> {
        let id = u16::try_from(self.slots.len())
            .map(FontId)
            .map_err(|_| FontLoadError("fonts table is full".to_string()))?;
        self.slots.push(Some(Self::open(bytes, px)?));
        Ok(id)
    }

    /// Parses a font into a specific slot, padding the table with empty
    /// slots as needed. Replaces whatever occupied the slot.
    pub fn insert(&mut self, id: FontId, bytes: &[u8], px: f32) -> Result<(), FontLoadError> {
        let face = Self::open(bytes, px)?;
        if self.slots.len() <= id.index() {
            self.slots.resize_with(id.index() + 1, || None);
        }
        self.slots[id.index()] = Some(face);
        Ok(())
    }

    /// Empties a slot. Returns whether a font was present.
    pub fn remove(&mut self, id: FontId) -> bool {
        self.slots.get_mut(id.index()).and_then(Option::take).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pixel size the font in `id` was opened at.
    pub fn pixel_size(&self, id: FontId) -> Option<f32> {
        self.face(id).map(|f| f.px)
    }

    /// Measurement callback for the layout pass.
    pub fn measure_fn(&self) -> impl Fn(&str, FontId) -> TextSize + '_ {
        move |text, font| self.measure_text(text, font)
    }

    fn open(bytes: &[u8], px: f32) -> Result<FontFace, FontLoadError> {
        if !(px.is_finite() && px > 0.0) {
            return Err(FontLoadError(format!("invalid pixel size {px}")));
        }
        let settings = FontSettings { scale: px, ..FontSettings::default() };
        let font = Font::from_bytes(bytes, settings).map_err(|e| FontLoadError(e.to_string()))?;
        Ok(FontFace::new(font, px))
    }

    fn face(&self, id: FontId) -> Option<&FontFace> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }
}

impl TextMetrics for FontTable {
    fn line_height(&self, font: FontId) -> Option<f32> {
        self.face(font).map(|f| f.line_height)
    }

    fn glyph_advance(&self, font: FontId, ch: char) -> Option<u32> {
        let face = self.face(font)?;
        Some(face.font.metrics(ch, face.px).advance_width.round().max(0.0) as u32)
    }

    /// The cell is exactly the rounded advance wide and the line height
    /// tall. Ink outside it (negative left bearing, italic overhang past the
    /// advance, marks above the ascent) is cropped.
    fn rasterize_glyph(&self, font: FontId, ch: char, color: Color) -> Option<GlyphBitmap> {
        let face = self.face(font)?;
        let (m, coverage) = face.font.rasterize(ch, face.px);

        let cell_w = m.advance_width.round().max(0.0) as u32;
        let cell_h = face.cell_height;
        if cell_w == 0 {
            return None;
        }

        // Place the glyph box on the baseline; fontdue's ymin is measured
        // upwards from the baseline to the bottom of the bitmap.
        let mut cell = vec![0u8; (cell_w * cell_h) as usize];
        let left = m.xmin;
        let top = face.baseline - (m.ymin + m.height as i32);
        for gy in 0..m.height {
            let cy = top + gy as i32;
            if cy < 0 || cy >= cell_h as i32 {
                continue;
            }
            for gx in 0..m.width {
                let cx = left + gx as i32;
                if cx < 0 || cx >= cell_w as i32 {
                    continue;
                }
                cell[cy as usize * cell_w as usize + cx as usize] = coverage[gy * m.width + gx];
            }
        }

        Some(GlyphBitmap::from_coverage(cell_w, cell_h, &cell, color))
    }
}
