use crate::coords::Rect;
use crate::render::TextureId;
use crate::scene::{CommandKind, CommandList};

/// Destination size of an image blit, in surface pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

impl ImageSize {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Image payload.
///
/// `texture` is a handle the host created on the surface beforehand.
/// `size` sizes the destination box and lives exactly as long as the
/// command; a missing size or texture skips the blit.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub texture: Option<TextureId>,
    pub size: Option<ImageSize>,
}

impl CommandList {
    /// Records an image blit at the origin of `bounds`.
    #[inline]
    pub fn push_image(&mut self, bounds: Rect, texture: TextureId, size: ImageSize) {
        self.push(
            bounds,
            CommandKind::Image(ImagePayload { texture: Some(texture), size: Some(size) }),
        );
    }
}
