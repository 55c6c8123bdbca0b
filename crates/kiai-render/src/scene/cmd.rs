use crate::coords::Rect;

use super::shapes::{BorderPayload, CustomPayload, ImagePayload, RectanglePayload, TextPayload};

/// One declarative draw instruction for the current frame.
///
/// `bounds` is in surface pixels. Order within a frame is significant: it
/// encodes painter's-algorithm stacking and clip scoping.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub bounds: Rect,
    pub kind: CommandKind,
}

impl RenderCommand {
    #[inline]
    pub fn new(bounds: Rect, kind: CommandKind) -> Self {
        Self { bounds, kind }
    }
}

/// Command kind with its payload.
///
/// Extending the scene:
/// - add a payload module under `scene::shapes::*`
/// - add a variant here
/// - handle it in the dispatcher match (the compiler lists every site)
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    None,
    Rectangle(RectanglePayload),
    Border(BorderPayload),
    Text(TextPayload),
    Image(ImagePayload),
    ClipStart,
    ClipEnd,
    Custom(CustomPayload),
}

impl CommandKind {
    /// Short kind name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::None => "none",
            CommandKind::Rectangle(_) => "rectangle",
            CommandKind::Border(_) => "border",
            CommandKind::Text(_) => "text",
            CommandKind::Image(_) => "image",
            CommandKind::ClipStart => "clip-start",
            CommandKind::ClipEnd => "clip-end",
            CommandKind::Custom(_) => "custom",
        }
    }
}
