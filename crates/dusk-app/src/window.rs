//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it opens the window
//! on `resumed`, redraws continuously by chaining `request_redraw`, and runs
//! one scene frame per `RedrawRequested`.

use std::sync::Arc;

use dusk_config::{Config, SceneConfig};
use dusk_render::{SurfaceError, Viewport};
use dusk_sky::{LightState, SUN_PLANE_Z, SceneState};
use glam::Vec3;
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::clock::FrameClock;
use crate::error::AppError;
use crate::input::KeyboardState;
use crate::renderer::SceneRenderer;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Build the pre-animation scene from configured initial values.
pub fn initial_scene(scene: &SceneConfig) -> SceneState {
    let [x, y] = scene.light_position;
    SceneState::new(
        LightState {
            position: Vec3::new(x, y, SUN_PLANE_Z),
            color: Vec3::from_array(scene.light_color),
            ambient_strength: scene.ambient_strength,
        },
        Vec3::from_array(scene.sky_color),
        Vec3::from_array(scene.sun_color),
        Vec3::from_array(scene.ground_color),
    )
}

/// Application state driven by the winit event loop.
pub struct AppState {
    config: Config,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    viewport: Viewport,
    scene: SceneState,
    clock: FrameClock,
    keyboard: KeyboardState,
    /// First fatal error; the loop exits as soon as it is set.
    failure: Option<AppError>,
}

impl AppState {
    pub fn with_config(config: Config) -> Self {
        let scene = initial_scene(&config.scene);
        let viewport = Viewport::new(config.window.width, config.window.height);
        Self {
            config,
            window: None,
            renderer: None,
            viewport,
            scene,
            clock: FrameClock::new(),
            keyboard: KeyboardState::new(),
            failure: None,
        }
    }

    /// Take the fatal error that stopped the loop, if any.
    pub fn take_failure(&mut self) -> Option<AppError> {
        self.failure.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        if let Some(size) = self.viewport.handle_resize(width, height) {
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(size.width, size.height);
            }
            info!("Framebuffer resized to {}x{}", size.width, size.height);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.keyboard.exit_requested() {
            info!("Escape pressed, shutting down");
            event_loop.exit();
            return;
        }

        let time = self.clock.tick();

        // Minimized: keep the clock running, draw nothing.
        if let Some(renderer) = self.renderer.as_mut().filter(|_| self.viewport.is_ready()) {
            match renderer.render_frame(&mut self.scene, time, &self.viewport) {
                Ok(()) => {}
                Err(SurfaceError::Timeout) => warn!("Surface timeout, skipping frame"),
                Err(SurfaceError::Lost) => {
                    let size = self.viewport.size();
                    warn!("Surface still lost, reconfiguring at {}x{}", size.width, size.height);
                    renderer.resize(size.width, size.height);
                }
                Err(err @ SurfaceError::OutOfMemory) => {
                    self.fail(event_loop, err.into());
                    return;
                }
            }
        }

        if let Some(stats) = self.clock.stats(self.config.debug.stats_interval_frames) {
            let sun = self.scene.light.position;
            info!(
                frames = stats.frame_count,
                elapsed = format_args!("{:.2}", stats.elapsed),
                sun_x = format_args!("{:.3}", sun.x),
                sun_y = format_args!("{:.3}", sun.y),
                fps = format_args!("{:.1}", stats.fps),
                "Frame stats"
            );
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };

        let inner_size = window.inner_size();
        self.viewport = Viewport::new(inner_size.width, inner_size.height);
        info!(
            "Window created: {}x{} (scale: {:.2})",
            inner_size.width,
            inner_size.height,
            window.scale_factor()
        );

        match SceneRenderer::new(window.clone(), self.config.window.vsync, &self.scene) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!("Scale factor changed to {:.2}", scale_factor);
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.handle_resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.keyboard.clear();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

/// Creates an event loop and runs the app until the window closes.
///
/// Blocks until exit. Returns the first fatal error, if any.
#[instrument(skip(config))]
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::with_config(config);
    event_loop.run_app(&mut app)?;
    info!("Exited after {} frames", app.clock.frame_count());
    match app.take_failure() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
