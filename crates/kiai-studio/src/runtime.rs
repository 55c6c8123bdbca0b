//! Windowed host: one winit window, one wgpu swapchain, one render context.

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use kiai_render::backend::GpuSurface;
use kiai_render::scene::ImageSize;
use kiai_render::text::{FontId, FontTable};
use kiai_render::{CommandList, RenderCommand, RenderConfig, RenderContext, Surface};

use crate::assets::Picture;
use crate::gpu::{Gpu, SurfaceErrorAction};
use crate::scene::{self, SceneAssets};

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Opens the window and renders the demo scene until it is closed.
pub fn run(config: WindowConfig, fonts: FontTable, picture: Picture) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut studio = Studio {
        config,
        fonts,
        picture,
        viewer: None,
        commands: CommandList::new(),
        frame: 0,
        failure: None,
    };

    event_loop
        .run_app(&mut studio)
        .context("winit event loop terminated with error")?;

    match studio.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Per-window state. `renderer` is declared first so its glyph textures are
/// released before the swapchain goes away.
struct Viewer {
    renderer: RenderContext<GpuSurface>,
    assets: SceneAssets,
    entry: WindowEntry,
}

struct Studio {
    config: WindowConfig,
    fonts: FontTable,
    picture: Picture,
    viewer: Option<Viewer>,
    commands: CommandList,
    frame: u64,
    failure: Option<anyhow::Error>,
}

impl Studio {
    fn create_viewer(&self, event_loop: &ActiveEventLoop) -> Result<Viewer> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(self.config.width),
                f64::from(self.config.height),
            ));
        let window = event_loop.create_window(attrs).context("failed to create window")?;

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let mut renderer = entry.with_gpu(|gpu| {
            RenderContext::with_surface(
                GpuSurface::new(gpu.device(), gpu.queue(), gpu.surface_format()),
                RenderConfig::default(),
            )
        });

        let picture = &self.picture;
        let image = renderer
            .surface_mut()
            .and_then(|s| s.create_texture(picture.width, picture.height, &picture.rgba))
            .map(|t| (t, ImageSize::new(picture.width as f32, picture.height as f32)));
        if image.is_none() {
            log::warn!("demo picture could not be uploaded; image slot left empty");
        }

        Ok(Viewer { renderer, assets: SceneAssets { font: FontId(0), image }, entry })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewer) = self.viewer.as_mut() else { return };
        self.frame = self.frame.wrapping_add(1);

        let (commands, fonts, frame) = (&mut self.commands, &self.fonts, self.frame);
        let Viewer { renderer, assets, entry } = viewer;
        let mut fatal = None;

        entry.with_mut(|fields| {
            let size = fields.window.inner_size();
            if size.width == 0 || size.height == 0 {
                return;
            }
            let scale = fields.window.scale_factor() as f32;
            let (width, height) = (size.width as f32 / scale, size.height as f32 / scale);

            let mut gpu_frame = match fields.gpu.begin_frame() {
                Ok(f) => f,
                Err(err) => {
                    log::debug!("surface error: {err}");
                    if fields.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                        fatal = Some(anyhow::anyhow!("GPU surface is out of memory"));
                    }
                    return;
                }
            };

            scene::build(commands, assets, width, height, frame);

            let Some(surface) = renderer.surface_mut() else { return };
            surface.begin_frame(width, height, scale);

            if let Err(err) = render_into(renderer, fonts, commands.commands()) {
                fatal = Some(err.context(format!("frame {frame}")));
                return;
            }

            if let Some(surface) = renderer.surface_mut() {
                surface.flush(&mut gpu_frame.encoder, &gpu_frame.view);
            }
            fields.gpu.submit(gpu_frame);
        });

        if let Some(err) = fatal {
            self.fail(event_loop, err);
        }
    }
}

/// Interprets one frame. An interpreter error means the context lost its
/// surface, which no later frame recovers from.
fn render_into<S: Surface>(
    renderer: &mut RenderContext<S>,
    fonts: &FontTable,
    commands: &[RenderCommand],
) -> Result<()> {
    let stats = renderer.render_frame(fonts, commands).context("render context is unusable")?;
    log::trace!("frame {}: {} commands", stats.frame, stats.commands);
    Ok(())
}

impl ApplicationHandler for Studio {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }
        match self.create_viewer(event_loop) {
            Ok(viewer) => {
                viewer.entry.with_window(|w| w.request_redraw());
                self.viewer = Some(viewer);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw so the scrolling column animates.
        if let Some(viewer) = &self.viewer {
            viewer.entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.viewer = None;
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                self.viewer = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    viewer.entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(viewer) = self.viewer.as_mut() {
                    let new_size = viewer.entry.with_window(|w| w.inner_size());
                    viewer.entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    viewer.entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
