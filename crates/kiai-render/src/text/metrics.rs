use crate::paint::Color;

/// Index into the fonts table.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FontId(pub u16);

impl FontId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Measured extent of a string.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

impl TextSize {
    pub const ZERO: TextSize = TextSize::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// RGBA8 glyph image ready for upload.
///
/// Rows are tightly packed, `width * 4` bytes each.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl GlyphBitmap {
    /// Builds a tinted bitmap from one coverage byte per pixel.
    ///
    /// Color channels are copied as-is; alpha is `color.a * coverage / 255`.
    pub fn from_coverage(width: u32, height: u32, coverage: &[u8], color: Color) -> Self {
        debug_assert_eq!(coverage.len(), (width * height) as usize);
        let mut rgba = Vec::with_capacity(coverage.len() * 4);
        for &c in coverage {
            let a = (color.a as u32 * c as u32 + 127) / 255;
            rgba.extend_from_slice(&[color.r, color.g, color.b, a as u8]);
        }
        Self { width, height, rgba }
    }
}

/// Text metrics provider.
///
/// Advances are whole pixels and fixed per glyph: no kerning, no shaping.
/// Every method answers `None` (or a zero size) for an unknown font instead
/// of failing.
pub trait TextMetrics {
    /// Natural distance between baselines, `None` if the font slot is empty.
    fn line_height(&self, font: FontId) -> Option<f32>;

    /// Pen advance for `ch`.
    fn glyph_advance(&self, font: FontId, ch: char) -> Option<u32>;

    /// Rasterizes `ch` into a cell `advance` wide and `line_height` tall,
    /// tinted with `color`. Ink falling outside the cell is cropped. `None`
    /// when there is nothing to upload.
    fn rasterize_glyph(&self, font: FontId, ch: char, color: Color) -> Option<GlyphBitmap>;

    /// Width of the widest `'\n'`-separated line and the total height of
    /// all lines. A trailing `'\r'` on a line is not measured, matching the
    /// text renderer. `(0, 0)` for an unknown font.
    fn measure_text(&self, text: &str, font: FontId) -> TextSize {
        let Some(line_height) = self.line_height(font) else {
            return TextSize::ZERO;
        };

        let mut width = 0u32;
        let mut lines = 0u32;
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            lines += 1;
            let w: u32 = line.chars().filter_map(|ch| self.glyph_advance(font, ch)).sum();
            width = width.max(w);
        }

        TextSize::new(width as f32, line_height * lines as f32)
    }
}
