use crate::coords::{CornerRadii, Rect};
use crate::paint::Color;
use crate::scene::{CommandKind, CommandList};

/// Rectangle outline payload.
///
/// Carried through the stream so layouts stay complete; the interpreter
/// does not draw borders.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderPayload {
    pub color: Color,
    pub width: f32,
    pub radii: CornerRadii,
}

impl CommandList {
    /// Records a border command.
    #[inline]
    pub fn push_border(&mut self, bounds: Rect, color: Color, width: f32, radii: CornerRadii) {
        self.push(bounds, CommandKind::Border(BorderPayload { color, width, radii }));
    }
}
