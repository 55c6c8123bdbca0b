use crate::coords::Rect;

use super::Surface;

/// Drives the surface's single active clip rectangle.
///
/// There is no stack: a start while clipped overwrites the region and an
/// end always returns to unbounded drawing. Keeping starts and ends paired
/// is the layout pass's job.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClipDriver {
    active: Option<Rect>,
}

impl ClipDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active clip, `None` when unbounded.
    #[inline]
    pub fn active(&self) -> Option<Rect> {
        self.active
    }

    pub fn start<S: Surface + ?Sized>(&mut self, surface: &mut S, rect: Rect) {
        if let Some(prev) = self.active {
            log::trace!("clip {prev:?} replaced by {rect:?} without clip end");
        }
        surface.set_clip(rect);
        self.active = Some(rect);
    }

    pub fn end<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear_clip();
        self.active = None;
    }
}
