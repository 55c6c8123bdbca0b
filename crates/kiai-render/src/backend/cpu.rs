use std::collections::HashMap;

use crate::coords::Rect;
use crate::paint::Color;
use crate::render::{Surface, TextureId};

/// Software framebuffer.
///
/// Pixels are straight-alpha RGBA8, row-major, starting transparent. A pixel
/// is covered by a rect when its center `(px + 0.5, py + 0.5)` lies inside
/// the half-open rect; coverage is binary. Draws blend source-over and are
/// limited to the active clip.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    textures: HashMap<TextureId, Texture>,
    next_texture: u64,
    clip: Option<Rect>,
}

#[derive(Debug, Clone)]
struct Texture {
    width: u32,
    height: u32,
    texels: Vec<[u8; 4]>,
}

/// Half-open pixel index ranges covered by a rect.
struct Span {
    x0: u32,
    x1: u32,
    y0: u32,
    y1: u32,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            textures: HashMap::new(),
            next_texture: 0,
            clip: None,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at `(x, y)`, `None` outside the framebuffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[self.index(x, y)];
        Some(Color::rgba(r, g, b, a))
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Overwrites every pixel, ignoring the clip. Textures are kept.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_array());
    }

    /// Number of live textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixels whose centers fall inside `rect` and the clip.
    fn span(&self, rect: Rect) -> Option<Span> {
        let rect = match self.clip {
            Some(clip) => rect.intersect(clip)?,
            None => rect,
        };
        let to_index = |v: f32, max: u32| ((v - 0.5).ceil().max(0.0) as u32).min(max);
        let span = Span {
            x0: to_index(rect.x, self.width),
            x1: to_index(rect.right(), self.width),
            y0: to_index(rect.y, self.height),
            y1: to_index(rect.bottom(), self.height),
        };
        (span.x0 < span.x1 && span.y0 < span.y1).then_some(span)
    }

    fn blend_at(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let i = self.index(x, y);
        self.pixels[i] = source_over(src, self.pixels[i]);
    }
}

/// Straight-alpha source-over compositing.
fn source_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}

impl Surface for PixelSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(span) = self.span(rect) else { return };
        let src = color.to_array();
        for y in span.y0..span.y1 {
            for x in span.x0..span.x1 {
                self.blend_at(x, y, src);
            }
        }
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureId> {
        let len = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() < len {
            log::debug!("PixelSurface: rejected {width}x{height} texture ({} bytes)", rgba.len());
            return None;
        }
        let texels = bytemuck::cast_slice::<u8, [u8; 4]>(&rgba[..len]).to_vec();

        self.next_texture += 1;
        let id = TextureId::from_raw(self.next_texture);
        self.textures.insert(id, Texture { width, height, texels });
        Some(id)
    }

    fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&texture).map(|t| (t.width, t.height))
    }

    fn blit(&mut self, texture: TextureId, dst: Rect) {
        let Some(span) = self.span(dst) else { return };
        let Some(tex) = self.textures.get(&texture) else { return };
        if !(dst.width > 0.0 && dst.height > 0.0) {
            return;
        }

        // Nearest-neighbour: sample the texel under each covered pixel center.
        let sx = tex.width as f32 / dst.width;
        let sy = tex.height as f32 / dst.height;
        let mut row = Vec::with_capacity((span.x1 - span.x0) as usize);
        for y in span.y0..span.y1 {
            let ty = (((y as f32 + 0.5 - dst.y) * sy) as u32).min(tex.height - 1);
            row.clear();
            row.extend((span.x0..span.x1).map(|x| {
                let tx = (((x as f32 + 0.5 - dst.x) * sx) as u32).min(tex.width - 1);
                tex.texels[(ty * tex.width + tx) as usize]
            }));
            let start = self.index(span.x0, y);
            for (dst_px, src) in self.pixels[start..].iter_mut().zip(&row) {
                *dst_px = source_over(*src, *dst_px);
            }
        }
    }

    fn set_clip(&mut self, rect: Rect) {
        self.clip = Some(rect);
    }

    fn clear_clip(&mut self) {
        self.clip = None;
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture);
    }
}
