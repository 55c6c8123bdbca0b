use std::collections::HashSet;

use crate::coords::Rect;
use crate::render::{GlyphCache, GlyphEntry, GlyphKey, LineWidthCache, Surface};
use crate::scene::{TextAlign, TextPayload};
use crate::text::{FontId, TextMetrics};

/// Renderer for text commands.
///
/// Lines come only from `'\n'` in the content (a trailing `'\r'` is
/// dropped). Each line is aligned inside the bounds using its cached width,
/// then drawn glyph by glyph from the glyph cache with a moving pen.
///
/// A glyph that cannot be rasterized or uploaded is skipped and the pen
/// stays put, so following glyphs overlap where it would have been.
#[derive(Debug, Default)]
pub struct TextRenderer {
    warned_fonts: HashSet<FontId>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `text` inside `bounds`. Returns the number of glyphs blitted.
    pub fn draw<S, M>(
        &mut self,
        surface: &mut S,
        fonts: &M,
        glyphs: &mut GlyphCache,
        lines: &mut LineWidthCache,
        bounds: Rect,
        text: &TextPayload,
    ) -> usize
    where
        S: Surface + ?Sized,
        M: TextMetrics + ?Sized,
    {
        let font = text.font;
        let Some(natural_line_height) = fonts.line_height(font) else {
            if self.warned_fonts.insert(font) {
                log::warn!("TextRenderer: unknown {font:?}, text using it is skipped");
            }
            return 0;
        };

        let line_height =
            if text.line_height > 0.0 { text.line_height } else { natural_line_height };

        let mut drawn = 0;
        let mut pen_y = bounds.y;

        for line in text.content.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let width = lines.get_or_create(font, line, || fonts.measure_text(line, font)).width;

            let mut pen_x = match text.align {
                TextAlign::Left => bounds.x,
                TextAlign::Center => bounds.x + bounds.width / 2.0,
                TextAlign::Right => bounds.x + bounds.width - width,
            };

            for ch in line.chars() {
                let key = GlyphKey::new(font, ch, text.color);
                let Some(glyph) =
                    glyphs.get_or_create(key, || upload_glyph(&mut *surface, fonts, key)).copied()
                else {
                    log::trace!("glyph {ch:?} in {font:?} unavailable, skipped");
                    continue;
                };

                surface.blit(
                    glyph.texture,
                    Rect::new(pen_x, pen_y, glyph.width as f32, glyph.height as f32),
                );
                pen_x += glyph.width as f32 + text.letter_spacing;
                drawn += 1;
            }

            pen_y += line_height;
        }

        drawn
    }
}

/// Rasterizes `key` and uploads it, recording the size the surface reports.
fn upload_glyph<S, M>(surface: &mut S, fonts: &M, key: GlyphKey) -> Option<GlyphEntry>
where
    S: Surface + ?Sized,
    M: TextMetrics + ?Sized,
{
    let bitmap = fonts.rasterize_glyph(key.font, key.ch, key.color)?;
    let texture = surface.create_texture(bitmap.width, bitmap.height, &bitmap.rgba)?;
    match surface.texture_size(texture) {
        Some((width, height)) => Some(GlyphEntry { texture, width, height }),
        None => {
            surface.destroy_texture(texture);
            None
        }
    }
}
