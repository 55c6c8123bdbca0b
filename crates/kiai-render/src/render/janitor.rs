use crate::config::RenderConfig;

use super::{GlyphCache, LineWidthCache, Surface};

/// Why a sweep cleared caches.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EvictionReason {
    /// The frame counter hit the configured interval; both caches cleared.
    Interval,
    /// The glyph cache outgrew its entry limit.
    GlyphLimit,
    /// The line-width cache outgrew its entry limit.
    LineLimit,
    /// Requested through `RenderContext::evict`.
    Manual,
}

/// Outcome of one sweep.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Eviction {
    pub reason: EvictionReason,
    pub glyphs: usize,
    pub lines: usize,
}

/// Decides, at the start of a frame, whether caches are cleared.
///
/// The interval trigger fires regardless of cache size; the size triggers
/// fire regardless of the frame number.
pub(crate) fn sweep<S: Surface + ?Sized>(
    config: &RenderConfig,
    frame: u64,
    glyphs: &mut GlyphCache,
    lines: &mut LineWidthCache,
    surface: &mut S,
) -> Option<Eviction> {
    let interval_hit = config.eviction_interval != 0 && frame % config.eviction_interval == 0;

    let eviction = if interval_hit {
        Eviction {
            reason: EvictionReason::Interval,
            glyphs: glyphs.clear(surface),
            lines: lines.clear(),
        }
    } else if glyphs.len() > config.max_glyph_entries {
        Eviction { reason: EvictionReason::GlyphLimit, glyphs: glyphs.clear(surface), lines: 0 }
    } else if lines.len() > config.max_line_entries {
        Eviction { reason: EvictionReason::LineLimit, glyphs: 0, lines: lines.clear() }
    } else {
        return None;
    };

    log::debug!(
        "cache sweep on frame {frame} ({:?}): released {} glyphs, {} lines",
        eviction.reason,
        eviction.glyphs,
        eviction.lines
    );
    Some(eviction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::render::testing::RecordingSurface;
    use crate::render::{GlyphEntry, GlyphKey, TextureId};
    use crate::text::{FontId, TextSize};

    fn filled(glyph_count: u64, line_count: usize) -> (GlyphCache, LineWidthCache) {
        let mut glyphs = GlyphCache::new();
        for i in 0..glyph_count {
            let ch = char::from_u32('a' as u32 + i as u32).unwrap();
            glyphs.get_or_create(GlyphKey::new(FontId(0), ch, Color::WHITE), || {
                Some(GlyphEntry { texture: TextureId::from_raw(i), width: 1, height: 1 })
            });
        }
        let mut lines = LineWidthCache::new();
        for i in 0..line_count {
            lines.get_or_create(FontId(0), &i.to_string(), || TextSize::new(1.0, 1.0));
        }
        (glyphs, lines)
    }

    #[test]
    fn interval_clears_small_caches() {
        let config = RenderConfig::default().with_eviction_interval(10);
        let (mut glyphs, mut lines) = filled(2, 2);
        let mut surface = RecordingSurface::new();

        assert_eq!(sweep(&config, 9, &mut glyphs, &mut lines, &mut surface), None);
        let ev = sweep(&config, 10, &mut glyphs, &mut lines, &mut surface).unwrap();

        assert_eq!(ev, Eviction { reason: EvictionReason::Interval, glyphs: 2, lines: 2 });
        assert!(glyphs.is_empty());
        assert!(lines.is_empty());
    }

    #[test]
    fn glyph_limit_clears_only_glyphs() {
        let config = RenderConfig::default().with_eviction_interval(0).with_max_glyph_entries(3);
        let (mut glyphs, mut lines) = filled(4, 1);
        let mut surface = RecordingSurface::new();

        let ev = sweep(&config, 1, &mut glyphs, &mut lines, &mut surface).unwrap();
        assert_eq!(ev.reason, EvictionReason::GlyphLimit);
        assert!(glyphs.is_empty());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn line_limit_clears_only_lines() {
        let config = RenderConfig::default().with_eviction_interval(0).with_max_line_entries(2);
        let (mut glyphs, mut lines) = filled(1, 3);
        let mut surface = RecordingSurface::new();

        let ev = sweep(&config, 7, &mut glyphs, &mut lines, &mut surface).unwrap();
        assert_eq!(ev, Eviction { reason: EvictionReason::LineLimit, glyphs: 0, lines: 3 });
        assert_eq!(glyphs.len(), 1);
    }

    #[test]
    fn zero_interval_never_fires_on_schedule() {
        let config = RenderConfig::default().with_eviction_interval(0);
        let (mut glyphs, mut lines) = filled(1, 1);
        let mut surface = RecordingSurface::new();
        for frame in 0..5 {
            assert_eq!(sweep(&config, frame, &mut glyphs, &mut lines, &mut surface), None);
        }
    }
}
