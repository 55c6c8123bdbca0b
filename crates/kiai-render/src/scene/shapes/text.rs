use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{CommandKind, CommandList};
use crate::text::FontId;

/// Horizontal placement of each line inside the command bounds.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Wrapping requested by the layout pass.
///
/// Recorded but not enforced: only explicit `'\n'` breaks start a new line.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum WrapMode {
    #[default]
    Words,
    Newlines,
    None,
}

/// Multi-line text payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPayload {
    pub content: String,
    pub font: FontId,
    /// Extra pen advance after every glyph, in pixels.
    pub letter_spacing: f32,
    /// Fixed distance between baselines. `<= 0` uses the font's own line height.
    pub line_height: f32,
    pub color: Color,
    pub align: TextAlign,
    pub wrap: WrapMode,
}

impl TextPayload {
    pub fn new(content: impl Into<String>, font: FontId, color: Color) -> Self {
        Self {
            content: content.into(),
            font,
            letter_spacing: 0.0,
            line_height: 0.0,
            color,
            align: TextAlign::Left,
            wrap: WrapMode::default(),
        }
    }

    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }
}

impl CommandList {
    /// Records a text command.
    #[inline]
    pub fn push_text(&mut self, bounds: Rect, text: TextPayload) {
        self.push(bounds, CommandKind::Text(text));
    }
}
