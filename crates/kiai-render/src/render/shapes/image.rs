use crate::coords::Rect;
use crate::render::Surface;
use crate::scene::ImagePayload;

/// Blits an image command at the origin of `bounds`, sized by its size record.
///
/// Returns whether a blit was issued. A missing texture or size record
/// skips the draw; the record itself is owned by the payload and goes away
/// with the frame's command list either way.
pub fn blit_image<S: Surface + ?Sized>(surface: &mut S, bounds: Rect, image: &ImagePayload) -> bool {
    let (Some(texture), Some(size)) = (image.texture, image.size) else {
        log::trace!("image command without texture or size at {bounds:?}, skipped");
        return false;
    };

    surface.blit(texture, Rect::new(bounds.x, bounds.y, size.width, size.height));
    true
}
