//! Software rendering straight to a PNG file.

use std::path::Path;

use anyhow::{Context, Result};

use kiai_render::backend::PixelSurface;
use kiai_render::paint::Color;
use kiai_render::scene::ImageSize;
use kiai_render::text::{FontId, FontTable};
use kiai_render::{CommandList, RenderConfig, RenderContext, Surface};

use crate::assets::Picture;
use crate::scene::{self, SceneAssets};

/// Renders `frames` frames of the demo scene and saves the last one.
pub fn render_png(
    out: &Path,
    fonts: &FontTable,
    picture: &Picture,
    width: u32,
    height: u32,
    frames: u32,
) -> Result<()> {
    let mut ctx = RenderContext::with_surface(PixelSurface::new(width, height), RenderConfig::default());
    let assets = SceneAssets { font: FontId(0), image: upload_picture(&mut ctx, picture) };

    let mut commands = CommandList::new();
    for frame in 0..u64::from(frames) {
        scene::build(&mut commands, &assets, width as f32, height as f32, frame);

        let surface = ctx.surface_mut().context("pixel surface missing")?;
        surface.clear(Color::TRANSPARENT);

        let stats = ctx
            .render_frame(fonts, commands.commands())
            .with_context(|| format!("failed to render frame {frame}"))?;
        log::debug!("headless {stats:?}");
    }

    let surface = ctx.surface().context("pixel surface missing")?;
    let img = image::RgbaImage::from_raw(width, height, surface.as_bytes().to_vec())
        .context("framebuffer size does not match the image size")?;
    img.save(out).with_context(|| format!("failed to write {}", out.display()))?;

    log::info!("wrote {}x{} frame to {}", width, height, out.display());
    Ok(())
}

fn upload_picture(
    ctx: &mut RenderContext<PixelSurface>,
    picture: &Picture,
) -> Option<(kiai_render::TextureId, ImageSize)> {
    let surface = ctx.surface_mut()?;
    let texture = surface.create_texture(picture.width, picture.height, &picture.rgba)?;
    Some((texture, ImageSize::new(picture.width as f32, picture.height as f32)))
}
