use crate::coords::Rect;
use crate::scene::{CommandKind, CommandList};

/// Host-defined element. The interpreter skips these; `tag` lets the host
/// recognise its own entries when it walks the list itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CustomPayload {
    pub tag: u64,
}

impl CommandList {
    #[inline]
    pub fn push_custom(&mut self, bounds: Rect, tag: u64) {
        self.push(bounds, CommandKind::Custom(CustomPayload { tag }));
    }
}
