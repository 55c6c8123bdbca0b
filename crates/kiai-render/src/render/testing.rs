//! Test doubles shared by the crate's unit tests.

use std::collections::{HashMap, HashSet};

use crate::coords::Rect;
use crate::paint::Color;
use crate::text::{FontId, GlyphBitmap, TextMetrics};

use super::{Surface, TextureId};

/// One primitive call seen by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Fill(Rect, Color),
    Create(TextureId, u32, u32),
    Blit(TextureId, Rect),
    SetClip(Rect),
    ClearClip,
    Destroy(TextureId),
}

/// Surface that logs every call in order and tracks live textures.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<Call>,
    textures: HashMap<TextureId, (u32, u32)>,
    next_id: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(Call::Fill(rect, color));
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureId> {
        if width == 0 || height == 0 || rgba.len() < (width * height * 4) as usize {
            return None;
        }
        self.next_id += 1;
        let id = TextureId::from_raw(self.next_id);
        self.textures.insert(id, (width, height));
        self.calls.push(Call::Create(id, width, height));
        Some(id)
    }

    fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&texture).copied()
    }

    fn blit(&mut self, texture: TextureId, dst: Rect) {
        self.calls.push(Call::Blit(texture, dst));
    }

    fn set_clip(&mut self, rect: Rect) {
        self.calls.push(Call::SetClip(rect));
    }

    fn clear_clip(&mut self) {
        self.calls.push(Call::ClearClip);
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture);
        self.calls.push(Call::Destroy(texture));
    }
}

/// Fixed-advance fake font living in slot 0.
///
/// Every glyph is a solid block `advance` wide and `line_height` tall.
#[derive(Debug, Clone)]
pub(crate) struct MonoFont {
    advance: u32,
    line_height: f32,
    missing: HashSet<char>,
}

impl MonoFont {
    pub fn new(advance: u32, line_height: f32) -> Self {
        Self { advance, line_height, missing: HashSet::new() }
    }

    /// Makes `ch` fail to rasterize while still measuring normally.
    pub fn without_glyph(mut self, ch: char) -> Self {
        self.missing.insert(ch);
        self
    }
}

impl TextMetrics for MonoFont {
    fn line_height(&self, font: FontId) -> Option<f32> {
        (font == FontId(0)).then_some(self.line_height)
    }

    fn glyph_advance(&self, font: FontId, _ch: char) -> Option<u32> {
        (font == FontId(0)).then_some(self.advance)
    }

    fn rasterize_glyph(&self, font: FontId, ch: char, color: Color) -> Option<GlyphBitmap> {
        if font != FontId(0) || self.missing.contains(&ch) {
            return None;
        }
        let h = self.line_height.ceil() as u32;
        let coverage = vec![255u8; (self.advance * h) as usize];
        Some(GlyphBitmap::from_coverage(self.advance, h, &coverage, color))
    }
}
