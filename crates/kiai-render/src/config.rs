//! Interpreter configuration.

/// Default number of frames between unconditional cache clears
/// (30 seconds at 60 fps).
pub const DEFAULT_EVICTION_INTERVAL: u64 = 1800;

/// Tuning knobs for [`RenderContext`](crate::render::RenderContext).
///
/// All limits are entry counts. Eviction is a full clear; there is no
/// per-entry bookkeeping to configure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Frames between unconditional clears of both caches. `0` disables
    /// the periodic trigger.
    pub eviction_interval: u64,

    /// Glyph cache is cleared at frame start once it holds more entries
    /// than this.
    pub max_glyph_entries: usize,

    /// Line-width cache is cleared at frame start once it holds more
    /// entries than this.
    pub max_line_entries: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            eviction_interval: DEFAULT_EVICTION_INTERVAL,
            max_glyph_entries: 4096,
            max_line_entries: 2048,
        }
    }
}

impl RenderConfig {
    pub fn with_eviction_interval(mut self, frames: u64) -> Self {
        self.eviction_interval = frames;
        self
    }

    pub fn with_max_glyph_entries(mut self, entries: usize) -> Self {
        self.max_glyph_entries = entries;
        self
    }

    pub fn with_max_line_entries(mut self, entries: usize) -> Self {
        self.max_line_entries = entries;
        self
    }
}
