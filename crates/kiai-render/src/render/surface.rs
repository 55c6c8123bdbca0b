use crate::coords::Rect;
use crate::paint::Color;

/// Opaque texture handle minted by a [`Surface`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TextureId(u64);

impl TextureId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Drawing backend contract.
///
/// This is the whole primitive set the interpreter needs. Implementations
/// must apply draws in call order and honour the active clip rectangle for
/// every fill and blit.
pub trait Surface {
    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Uploads a tightly packed RGBA8 image. `None` if the backend cannot
    /// create it (zero size, short buffer, out of memory).
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureId>;

    /// Natural size of a texture, `None` for unknown handles.
    fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)>;

    /// Draws the whole texture stretched into `dst`.
    fn blit(&mut self, texture: TextureId, dst: Rect);

    /// Restricts later draws to `rect`, replacing any previous clip.
    fn set_clip(&mut self, rect: Rect);

    /// Removes the clip; later draws are unbounded.
    fn clear_clip(&mut self);

    /// Releases a texture. Unknown handles are ignored.
    fn destroy_texture(&mut self, texture: TextureId);
}
