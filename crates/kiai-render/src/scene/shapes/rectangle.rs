use crate::coords::{CornerRadii, Rect};
use crate::paint::Color;
use crate::scene::{CommandKind, CommandList};

/// Filled rectangle payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectanglePayload {
    pub color: Color,
    pub radii: CornerRadii,
}

impl RectanglePayload {
    #[inline]
    pub fn new(color: Color, radii: CornerRadii) -> Self {
        Self { color, radii }
    }
}

impl CommandList {
    /// Records a filled rectangle with optional corner rounding.
    #[inline]
    pub fn push_rect(&mut self, bounds: Rect, color: Color, radii: CornerRadii) {
        self.push(bounds, CommandKind::Rectangle(RectanglePayload::new(color, radii)));
    }

    /// Records a sharp-cornered filled rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, bounds: Rect, color: Color) {
        self.push_rect(bounds, color, CornerRadii::zero());
    }

    /// Records a filled rectangle with the same radius on every corner.
    #[inline]
    pub fn push_rounded_rect(&mut self, bounds: Rect, color: Color, radius: f32) {
        self.push_rect(bounds, color, CornerRadii::all(radius));
    }
}
