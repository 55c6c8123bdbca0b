use crate::coords::Rect;

use super::{CommandKind, RenderCommand};

/// Recorded command stream for one frame.
///
/// Commands are kept in insertion order; the interpreter processes them in
/// exactly that order. `clear()` drops the previous frame's payloads
/// (including image size records) while keeping the allocation.
///
/// # Clipping
///
/// ```
/// # use kiai_render::scene::CommandList;
/// # use kiai_render::coords::Rect;
/// let mut list = CommandList::new();
/// list.push_clip(Rect::new(0.0, 0.0, 200.0, 120.0));
/// // ... push children ...
/// list.pop_clip();
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<RenderCommand>,
    clip_depth: u32,
}

impl CommandList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded commands. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_depth = 0;
    }

    /// Returns commands in insertion order.
    #[inline]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Appends a command.
    #[inline]
    pub fn push(&mut self, bounds: Rect, kind: CommandKind) {
        self.commands.push(RenderCommand::new(bounds, kind));
    }

    /// Begins a clip region. Only one region is active on the surface at a
    /// time, so a nested `push_clip` replaces the outer one.
    ///
    /// Calls must be balanced with [`pop_clip`](Self::pop_clip).
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.push(rect, CommandKind::ClipStart);
    }

    /// Ends the most recent clip region.
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_clip`.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(self.clip_depth > 0, "pop_clip called without matching push_clip");
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.push(Rect::default(), CommandKind::ClipEnd);
    }

    /// Number of clip regions opened and not yet closed.
    #[inline]
    pub fn open_clips(&self) -> u32 {
        self.clip_depth
    }
}

impl<'a> IntoIterator for &'a CommandList {
    type Item = &'a RenderCommand;
    type IntoIter = std::slice::Iter<'a, RenderCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
