use crate::config::RenderConfig;
use crate::coords::Rect;
use crate::error::RenderError;
use crate::scene::{CommandKind, RenderCommand};
use crate::text::TextMetrics;

use super::janitor::{self, Eviction, EvictionReason};
use super::shapes::{blit_image, fill_rounded_rect, TextRenderer};
use super::{ClipDriver, GlyphCache, LineWidthCache, Surface};

/// Summary of one processed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStats {
    /// 1-based frame number.
    pub frame: u64,
    pub commands: usize,
    pub glyphs_drawn: usize,
    pub images_drawn: usize,
    /// Set when the janitor cleared caches before this frame's commands.
    pub eviction: Option<Eviction>,
    /// The command list ended with a clip region still open.
    pub clip_left_open: bool,
}

/// Owns everything the interpreter keeps between frames: the drawing
/// surface, both caches, the clip driver and the frame counter.
///
/// Built once at startup. Dropping it releases every cached glyph texture
/// on the attached surface.
pub struct RenderContext<S: Surface> {
    surface: Option<S>,
    config: RenderConfig,
    glyphs: GlyphCache,
    lines: LineWidthCache,
    clip: ClipDriver,
    text: TextRenderer,
    frame: u64,
}

impl<S: Surface> RenderContext<S> {
    /// Creates a context with no surface; attach one before rendering.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            surface: None,
            config,
            glyphs: GlyphCache::new(),
            lines: LineWidthCache::new(),
            clip: ClipDriver::new(),
            text: TextRenderer::new(),
            frame: 0,
        }
    }

    pub fn with_surface(surface: S, config: RenderConfig) -> Self {
        let mut ctx = Self::new(config);
        ctx.surface = Some(surface);
        ctx
    }

    /// Attaches `surface`, detaching (and returning) the previous one.
    pub fn attach_surface(&mut self, surface: S) -> Option<S> {
        let previous = self.detach_surface();
        self.surface = Some(surface);
        previous
    }

    /// Releases cached textures on the current surface and hands it back.
    pub fn detach_surface(&mut self) -> Option<S> {
        let mut surface = self.surface.take()?;
        self.glyphs.clear(&mut surface);
        self.lines.clear();
        self.clip = ClipDriver::new();
        Some(surface)
    }

    #[inline]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    #[inline]
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of frames rendered so far.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn glyph_cache(&self) -> &GlyphCache {
        &self.glyphs
    }

    #[inline]
    pub fn line_cache(&self) -> &LineWidthCache {
        &self.lines
    }

    /// Clip rectangle currently applied to the surface.
    #[inline]
    pub fn clip(&self) -> Option<Rect> {
        self.clip.active()
    }

    /// Clears both caches now, outside the janitor's schedule.
    pub fn evict(&mut self) -> Eviction {
        let glyphs = match self.surface.as_mut() {
            Some(surface) => self.glyphs.clear(surface),
            None => 0,
        };
        Eviction { reason: EvictionReason::Manual, glyphs, lines: self.lines.clear() }
    }

    /// Processes one frame's commands, in order, onto the attached surface.
    ///
    /// Cache eviction, when due, happens before the first command. Missing
    /// fonts, glyphs and images only degrade the frame; the one error is a
    /// missing surface.
    pub fn render_frame<M>(
        &mut self,
        fonts: &M,
        commands: &[RenderCommand],
    ) -> Result<FrameStats, RenderError>
    where
        M: TextMetrics + ?Sized,
    {
        let Some(surface) = self.surface.as_mut() else {
            log::error!("render_frame called before a surface was attached");
            return Err(RenderError::SurfaceUnset);
        };

        self.frame = self.frame.wrapping_add(1);
        let frame = self.frame;

        let eviction =
            janitor::sweep(&self.config, frame, &mut self.glyphs, &mut self.lines, surface);

        let mut glyphs_drawn = 0;
        let mut images_drawn = 0;

        for cmd in commands {
            match &cmd.kind {
                CommandKind::Rectangle(rect) => {
                    fill_rounded_rect(surface, cmd.bounds, rect.color, rect.radii.top_left);
                }
                CommandKind::Text(text) => {
                    glyphs_drawn += self.text.draw(
                        surface,
                        fonts,
                        &mut self.glyphs,
                        &mut self.lines,
                        cmd.bounds,
                        text,
                    );
                }
                CommandKind::Image(image) => {
                    if blit_image(surface, cmd.bounds, image) {
                        images_drawn += 1;
                    }
                }
                CommandKind::ClipStart => self.clip.start(surface, cmd.bounds),
                CommandKind::ClipEnd => self.clip.end(surface),
                CommandKind::None | CommandKind::Border(_) | CommandKind::Custom(_) => {}
            }
        }

        let clip_left_open = self.clip.active().is_some();
        if clip_left_open {
            log::debug!("frame {frame} ended with clip {:?} still active", self.clip.active());
        }

        let stats = FrameStats {
            frame,
            commands: commands.len(),
            glyphs_drawn,
            images_drawn,
            eviction,
            clip_left_open,
        };
        log::trace!(
            "frame {frame}: {} commands, {} glyphs, {} cached glyphs, {} cached lines",
            stats.commands,
            stats.glyphs_drawn,
            self.glyphs.len(),
            self.lines.len()
        );
        Ok(stats)
    }
}

impl<S: Surface> Drop for RenderContext<S> {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            let released = self.glyphs.clear(surface);
            if released > 0 {
                log::debug!("render context dropped, released {released} glyph textures");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PixelSurface;
    use crate::coords::CornerRadii;
    use crate::paint::Color;
    use crate::render::testing::{Call, MonoFont, RecordingSurface};
    use crate::render::TextureId;
    use crate::scene::{CommandList, ImagePayload, ImageSize, TextAlign, TextPayload};
    use crate::text::FontId;

    fn ctx() -> RenderContext<RecordingSurface> {
        RenderContext::with_surface(RecordingSurface::new(), RenderConfig::default())
    }

    fn calls(ctx: &RenderContext<RecordingSurface>) -> &[Call] {
        &ctx.surface().unwrap().calls
    }

    fn sample_frame() -> CommandList {
        let mut list = CommandList::new();
        list.push_rounded_rect(Rect::new(0.0, 0.0, 80.0, 40.0), Color::rgb(30, 30, 60), 6.0);
        list.push_clip(Rect::new(4.0, 4.0, 72.0, 32.0));
        list.push_text(
            Rect::new(4.0, 4.0, 72.0, 32.0),
            TextPayload::new("hi\nthere", FontId(0), Color::WHITE).with_letter_spacing(1.0),
        );
        list.pop_clip();
        list
    }

    // ── dispatch ──────────────────────────────────────────────────────────

    #[test]
    fn missing_surface_is_an_error() {
        let mut ctx: RenderContext<RecordingSurface> = RenderContext::new(RenderConfig::default());
        let font = MonoFont::new(8, 16.0);
        assert_eq!(ctx.render_frame(&font, &[]), Err(RenderError::SurfaceUnset));
        assert_eq!(ctx.frame_index(), 0);
    }

    #[test]
    fn single_text_command_scenario() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        let mut list = CommandList::new();
        list.push_text(
            Rect::new(0.0, 0.0, 100.0, 40.0),
            TextPayload::new("AB\nC", FontId(0), Color::WHITE)
                .with_letter_spacing(2.0)
                .with_align(TextAlign::Left),
        );

        let stats = ctx.render_frame(&font, list.commands()).unwrap();
        assert_eq!(stats.glyphs_drawn, 3);

        let blits: Vec<Rect> = calls(&ctx)
            .iter()
            .filter_map(|c| match c {
                Call::Blit(_, r) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(blits[0].x, 0.0);
        assert_eq!(blits[1].x, 8.0 + 2.0);
        assert_eq!(blits[0].y, 0.0);
        assert_eq!(blits[2].y, 16.0);
    }

    #[test]
    fn clip_is_delegated_to_the_surface() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        let outside = Rect::new(200.0, 200.0, 10.0, 10.0);
        let mut list = CommandList::new();
        list.push_clip(Rect::new(10.0, 10.0, 50.0, 50.0));
        list.push_solid_rect(outside, Color::BLACK);
        list.pop_clip();

        let stats = ctx.render_frame(&font, list.commands()).unwrap();
        assert!(!stats.clip_left_open);
        assert_eq!(ctx.clip(), None);
        assert_eq!(
            calls(&ctx),
            &[
                Call::SetClip(Rect::new(10.0, 10.0, 50.0, 50.0)),
                Call::Fill(outside, Color::BLACK),
                Call::ClearClip,
            ]
        );
    }

    #[test]
    fn unbalanced_clip_is_reported() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        let cmds = [RenderCommand::new(Rect::new(0.0, 0.0, 5.0, 5.0), CommandKind::ClipStart)];
        assert!(ctx.render_frame(&font, &cmds).unwrap().clip_left_open);
    }

    #[test]
    fn image_without_size_record_is_skipped() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        let cmds = [RenderCommand::new(
            Rect::new(0.0, 0.0, 5.0, 5.0),
            CommandKind::Image(ImagePayload { texture: Some(TextureId::from_raw(3)), size: None }),
        )];

        let stats = ctx.render_frame(&font, &cmds).unwrap();
        assert_eq!(stats.images_drawn, 0);
        assert!(calls(&ctx).is_empty());
    }

    #[test]
    fn image_with_size_record_is_blitted() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        let mut list = CommandList::new();
        list.push_image(Rect::new(3.0, 4.0, 1.0, 1.0), TextureId::from_raw(3), ImageSize::new(16.0, 8.0));

        let stats = ctx.render_frame(&font, list.commands()).unwrap();
        assert_eq!(stats.images_drawn, 1);
        assert_eq!(
            calls(&ctx),
            &[Call::Blit(TextureId::from_raw(3), Rect::new(3.0, 4.0, 16.0, 8.0))]
        );
    }

    #[test]
    fn none_border_and_custom_are_no_ops() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut list = CommandList::new();
        list.push(bounds, CommandKind::None);
        list.push_border(bounds, Color::WHITE, 2.0, CornerRadii::all(3.0));
        list.push_custom(bounds, 42);

        let stats = ctx.render_frame(&font, list.commands()).unwrap();
        assert_eq!(stats.commands, 3);
        assert!(calls(&ctx).is_empty());
    }

    #[test]
    fn only_top_left_radius_is_used() {
        let font = MonoFont::new(8, 16.0);
        let bounds = Rect::new(0.0, 0.0, 40.0, 40.0);

        let mut uniform = ctx();
        let mut list = CommandList::new();
        list.push_rect(bounds, Color::BLACK, CornerRadii::all(5.0));
        uniform.render_frame(&font, list.commands()).unwrap();

        let mut mixed = ctx();
        list.clear();
        list.push_rect(bounds, Color::BLACK, CornerRadii::new(5.0, 0.0, 12.0, 1.0));
        mixed.render_frame(&font, list.commands()).unwrap();

        assert_eq!(calls(&uniform), calls(&mixed));
    }

    #[test]
    fn draw_calls_are_deterministic() {
        let font = MonoFont::new(8, 16.0);
        let list = sample_frame();

        let mut a = ctx();
        let mut b = ctx();
        a.render_frame(&font, list.commands()).unwrap();
        b.render_frame(&font, list.commands()).unwrap();
        assert_eq!(calls(&a), calls(&b));
    }

    #[test]
    fn warm_frame_reuses_glyphs() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        let list = sample_frame();

        ctx.render_frame(&font, list.commands()).unwrap();
        let created = ctx.surface().unwrap().count(|c| matches!(c, Call::Create(..)));
        ctx.render_frame(&font, list.commands()).unwrap();
        let created_after = ctx.surface().unwrap().count(|c| matches!(c, Call::Create(..)));

        // "hi\nthere": h, i, t, e, r
        assert_eq!(created, 5);
        assert_eq!(created_after, created);
        assert_eq!(ctx.glyph_cache().len(), 5);
    }

    // ── pixels ────────────────────────────────────────────────────────────

    #[test]
    fn cold_and_warm_frames_are_pixel_identical() {
        let font = MonoFont::new(8, 16.0);
        let list = sample_frame();
        let mut ctx = RenderContext::with_surface(PixelSurface::new(96, 48), RenderConfig::default());

        ctx.render_frame(&font, list.commands()).unwrap();
        let cold = ctx.surface().unwrap().as_bytes().to_vec();

        ctx.surface_mut().unwrap().clear(Color::TRANSPARENT);
        ctx.render_frame(&font, list.commands()).unwrap();
        let warm = ctx.surface().unwrap().as_bytes().to_vec();

        assert!(cold.iter().any(|&b| b != 0));
        assert_eq!(cold, warm);
    }

    // ── eviction ──────────────────────────────────────────────────────────

    #[test]
    fn interval_resets_caches_on_trigger_frame() {
        let config = RenderConfig::default().with_eviction_interval(3);
        let mut ctx = RenderContext::with_surface(RecordingSurface::new(), config);
        let font = MonoFont::new(8, 16.0);
        let list = sample_frame();

        for _ in 0..2 {
            let stats = ctx.render_frame(&font, list.commands()).unwrap();
            assert_eq!(stats.eviction, None);
        }
        assert!(!ctx.glyph_cache().is_empty());
        assert!(!ctx.line_cache().is_empty());

        let stats = ctx.render_frame(&font, &[]).unwrap();
        assert_eq!(stats.frame, 3);
        assert_eq!(stats.eviction.map(|e| e.reason), Some(EvictionReason::Interval));
        assert_eq!(ctx.glyph_cache().len(), 0);
        assert_eq!(ctx.line_cache().len(), 0);
        assert_eq!(ctx.surface().unwrap().live_textures(), 0);
    }

    #[test]
    fn manual_evict_releases_textures() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        ctx.render_frame(&font, sample_frame().commands()).unwrap();

        let ev = ctx.evict();
        assert_eq!(ev.reason, EvictionReason::Manual);
        assert_eq!(ev.glyphs, 5);
        assert_eq!(ev.lines, 2);
        assert_eq!(ctx.surface().unwrap().live_textures(), 0);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn detach_releases_cached_textures() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        ctx.render_frame(&font, sample_frame().commands()).unwrap();

        let surface = ctx.detach_surface().unwrap();
        assert_eq!(surface.live_textures(), 0);
        assert!(ctx.glyph_cache().is_empty());
        assert_eq!(ctx.render_frame(&font, &[]), Err(RenderError::SurfaceUnset));
    }

    #[test]
    fn attach_returns_previous_surface() {
        let mut ctx = ctx();
        let font = MonoFont::new(8, 16.0);
        ctx.render_frame(&font, sample_frame().commands()).unwrap();

        let old = ctx.attach_surface(RecordingSurface::new()).unwrap();
        assert_eq!(old.live_textures(), 0);
        assert!(ctx.render_frame(&font, &[]).is_ok());
    }
}
