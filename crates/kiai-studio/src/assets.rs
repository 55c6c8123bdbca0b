//! Startup assets: the fonts table and the demo picture.

use std::path::Path;

use anyhow::{Context, Result};

use kiai_render::text::FontTable;

/// Decoded RGBA8 image, ready for `Surface::create_texture`.
pub struct Picture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Picture {
    /// Two-tone checkerboard with `cell`-pixel squares.
    pub fn checkerboard(width: u32, height: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let light = ((x / cell) + (y / cell)) % 2 == 0;
                rgba.extend_from_slice(if light {
                    &[0xe8, 0xe4, 0xd8, 0xff]
                } else {
                    &[0x3a, 0x6e, 0xa5, 0xff]
                });
            }
        }
        Self { width, height, rgba }
    }
}

/// Fonts table with the font at `path` in slot 0.
///
/// Without a path the table stays empty and text commands are skipped.
pub fn load_fonts(path: Option<&Path>, px: f32) -> Result<FontTable> {
    let mut fonts = FontTable::new();
    let Some(path) = path else {
        log::warn!("no font given (--font or KIAI_FONT); text will not be drawn");
        return Ok(fonts);
    };

    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
    let id = fonts
        .load(&bytes, px)
        .with_context(|| format!("failed to parse font {}", path.display()))?;
    if let Some(size) = fonts.pixel_size(id) {
        log::info!("loaded {} at {size}px as {id:?}", path.display());
    }
    Ok(fonts)
}

pub fn load_picture(path: Option<&Path>) -> Result<Picture> {
    let Some(path) = path else {
        return Ok(Picture::checkerboard(96, 96, 12));
    };

    let decoded = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    log::info!("loaded {} ({width}x{height})", path.display());
    Ok(Picture { width, height, rgba: decoded.into_raw() })
}
