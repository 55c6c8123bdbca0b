//! Frame-synchronous caches.
//!
//! Both caches share one discipline: exact-match keys, lazy population
//! through `get_or_create`, and eviction only by clearing everything.
//! No LRU, no TTL, no locking.

use std::collections::HashMap;

use crate::paint::Color;
use crate::text::{FontId, TextSize};

use super::{Surface, TextureId};

/// Hit/miss counters since the cache was created.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

// ── glyphs ────────────────────────────────────────────────────────────────

/// Identity of a rasterized glyph texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GlyphKey {
    pub font: FontId,
    pub ch: char,
    pub color: Color,
}

impl GlyphKey {
    #[inline]
    pub fn new(font: FontId, ch: char, color: Color) -> Self {
        Self { font, ch, color }
    }
}

/// Cached glyph texture and its natural size in pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlyphEntry {
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
}

/// `(font, char, color) -> texture` cache.
///
/// The cache owns every texture it stores. Nothing else may destroy them,
/// and [`clear`](Self::clear) must be given the surface that created them.
#[derive(Debug, Default)]
pub struct GlyphCache {
    entries: HashMap<GlyphKey, GlyphEntry>,
    stats: CacheStats,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: &GlyphKey) -> Option<&GlyphEntry> {
        self.entries.get(key)
    }

    /// Returns the stored entry for `key`, or runs `factory` and stores its
    /// result. A factory that yields `None` leaves the cache untouched, so
    /// the next lookup tries again.
    pub fn get_or_create<F>(&mut self, key: GlyphKey, factory: F) -> Option<&GlyphEntry>
    where
        F: FnOnce() -> Option<GlyphEntry>,
    {
        use std::collections::hash_map::Entry;

        match self.entries.entry(key) {
            Entry::Occupied(o) => {
                self.stats.hits += 1;
                Some(o.into_mut())
            }
            Entry::Vacant(v) => {
                self.stats.misses += 1;
                let entry = factory()?;
                Some(v.insert(entry))
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Destroys every cached texture on `surface`, then empties the map.
    /// Returns the number of entries released.
    pub fn clear<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let released = self.entries.len();
        for (_, entry) in self.entries.drain() {
            surface.destroy_texture(entry.texture);
        }
        released
    }
}

// ── line widths ───────────────────────────────────────────────────────────

/// `(font, line) -> measured size` cache.
///
/// Lookups borrow the line as `&str`, so a hit never allocates.
#[derive(Debug, Default)]
pub struct LineWidthCache {
    fonts: HashMap<FontId, HashMap<Box<str>, TextSize>>,
    len: usize,
    stats: CacheStats,
}

impl LineWidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, font: FontId, line: &str) -> Option<TextSize> {
        self.fonts.get(&font)?.get(line).copied()
    }

    /// Returns the cached size of `line`, measuring and storing it on a miss.
    pub fn get_or_create<F>(&mut self, font: FontId, line: &str, measure: F) -> TextSize
    where
        F: FnOnce() -> TextSize,
    {
        let lines = self.fonts.entry(font).or_default();
        if let Some(size) = lines.get(line) {
            self.stats.hits += 1;
            return *size;
        }

        self.stats.misses += 1;
        let size = measure();
        lines.insert(line.into(), size);
        self.len += 1;
        size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every measurement. Returns the number of entries released.
    pub fn clear(&mut self) -> usize {
        let released = self.len;
        self.fonts.clear();
        self.len = 0;
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Call, RecordingSurface};

    fn key(ch: char) -> GlyphKey {
        GlyphKey::new(FontId(0), ch, Color::WHITE)
    }

    fn entry(raw: u64) -> GlyphEntry {
        GlyphEntry { texture: TextureId::from_raw(raw), width: 8, height: 16 }
    }

    // ── glyph cache ───────────────────────────────────────────────────────

    #[test]
    fn present_key_skips_factory_and_returns_stored_entry() {
        let mut cache = GlyphCache::new();
        let first = *cache.get_or_create(key('a'), || Some(entry(1))).unwrap();

        let mut called = false;
        let second = *cache
            .get_or_create(key('a'), || {
                called = true;
                Some(entry(2))
            })
            .unwrap();

        assert!(!called);
        assert_eq!(first, second);
        assert_eq!(second.texture, TextureId::from_raw(1));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn failed_factory_is_not_cached() {
        let mut cache = GlyphCache::new();
        assert!(cache.get_or_create(key('x'), || None).is_none());
        assert!(cache.is_empty());

        assert!(cache.get_or_create(key('x'), || Some(entry(5))).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_differ_by_color_and_font() {
        let mut cache = GlyphCache::new();
        cache.get_or_create(key('a'), || Some(entry(1)));
        cache.get_or_create(GlyphKey::new(FontId(0), 'a', Color::BLACK), || Some(entry(2)));
        cache.get_or_create(GlyphKey::new(FontId(1), 'a', Color::WHITE), || Some(entry(3)));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn clear_destroys_every_texture() {
        let mut surface = RecordingSurface::new();
        let mut cache = GlyphCache::new();
        cache.get_or_create(key('a'), || Some(entry(1)));
        cache.get_or_create(key('b'), || Some(entry(2)));

        assert_eq!(cache.clear(&mut surface), 2);
        assert!(cache.is_empty());

        let mut destroyed: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Destroy(t) => Some(t.raw()),
                _ => None,
            })
            .collect();
        destroyed.sort_unstable();
        assert_eq!(destroyed, vec![1, 2]);
    }

    // ── line cache ────────────────────────────────────────────────────────

    #[test]
    fn line_hit_does_not_remeasure() {
        let mut cache = LineWidthCache::new();
        let a = cache.get_or_create(FontId(0), "hello", || TextSize::new(40.0, 16.0));
        let b = cache.get_or_create(FontId(0), "hello", || panic!("measured twice"));
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn lines_are_keyed_per_font() {
        let mut cache = LineWidthCache::new();
        cache.get_or_create(FontId(0), "hi", || TextSize::new(16.0, 16.0));
        cache.get_or_create(FontId(1), "hi", || TextSize::new(20.0, 18.0));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(FontId(1), "hi"), Some(TextSize::new(20.0, 18.0)));
        assert_eq!(cache.get(FontId(2), "hi"), None);
    }

    #[test]
    fn line_clear_resets_len() {
        let mut cache = LineWidthCache::new();
        cache.get_or_create(FontId(0), "a", || TextSize::new(8.0, 16.0));
        cache.get_or_create(FontId(0), "b", || TextSize::new(8.0, 16.0));
        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.get(FontId(0), "a"), None);
    }
}
