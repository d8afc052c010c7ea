//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]. Every frame runs on
//! `RedrawRequested`: input, panel edits, animation, then the sky pass.

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use skyview_config::Config;
use skyview_input::{KeyboardState, MouseState, OrbitController, OrbitSettings};
use skyview_render::{
    Camera, DepthBuffer, FrameEncoder, RenderContext, RenderPassBuilder, SurfaceError, Viewport,
    ViewportResize, init_render_context_blocking,
};
use skyview_sky::{GpuSkyHost, SkyScene, SkySettings, SkyView};
use skyview_ui::ParameterPanel;
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::frame_clock::FrameClock;

const PANEL_TITLE: &str = "sky";

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

pub fn camera_from_config(config: &Config, aspect_ratio: f32) -> Camera {
    let mut camera = Camera::perspective(
        config.camera.fov_y_degrees,
        aspect_ratio,
        config.camera.near,
        config.camera.far,
    );
    camera.position = Vec3::from_array(config.camera.position);
    camera.look_at(Vec3::ZERO);
    camera
}

pub fn orbit_from_config(config: &Config) -> OrbitController {
    OrbitController::new(
        Vec3::from_array(config.camera.position),
        Vec3::ZERO,
        OrbitSettings {
            rotate_speed: config.camera.rotate_speed,
            enable_zoom: config.camera.enable_zoom,
            enable_pan: config.camera.enable_pan,
            ..OrbitSettings::default()
        },
    )
}

/// Window title: base title, panel line, and a marker while paused.
pub fn compose_title(base: &str, panel_summary: &str, animating: bool) -> String {
    let paused = if animating { "" } else { " [paused]" };
    format!("{base} | {panel_summary}{paused}")
}

/// Whether to schedule another frame. A running animation only keeps the
/// loop busy while something is visible; restoring the window resizes and
/// redraws.
pub fn wants_redraw(requested: bool, animating: bool, minimized: bool) -> bool {
    requested || (animating && !minimized)
}

pub struct AppState {
    pub window: Option<Arc<Window>>,
    pub gpu: Option<RenderContext>,
    pub viewport: Viewport,
    pub depth_buffer: Option<DepthBuffer>,
    pub scene: Option<SkyScene>,
    pub camera: Camera,
    pub orbit: OrbitController,
    pub view: SkyView,
    pub panel: ParameterPanel,
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub clock: FrameClock,
    pub config: Config,
    config_dir: PathBuf,
    title: String,
    fatal: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config, config_dir: PathBuf) -> Result<Self, AppError> {
        let viewport = Viewport::new(config.window.width, config.window.height, 1.0);
        let mut panel = ParameterPanel::new(PANEL_TITLE);
        SkyView::register_controls(&mut panel)?;

        Ok(Self {
            window: None,
            gpu: None,
            camera: camera_from_config(&config, viewport.aspect_ratio()),
            orbit: orbit_from_config(&config),
            view: SkyView::new(SkySettings::from(&config.sky)),
            viewport,
            depth_buffer: None,
            scene: None,
            panel,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            clock: FrameClock::new(),
            config,
            config_dir,
            title: String::new(),
            fatal: None,
        })
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.fatal.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let inner_size = window.inner_size();
        self.viewport = Viewport::new(inner_size.width, inner_size.height, window.scale_factor());
        let size = self.viewport.size();
        self.camera.set_aspect_ratio(size.width as f32, size.height as f32);
        info!(
            "Viewport initialized: {}x{} (scale: {:.2})",
            size.width,
            size.height,
            self.viewport.scale_factor()
        );

        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let mut scene = SkyScene::new(&gpu.device, gpu.surface_format, self.config.debug.show_grid)?;
        self.view.attach(&mut GpuSkyHost::new(&gpu.device, &mut scene));

        self.depth_buffer = Some(DepthBuffer::new(&gpu.device, size.width, size.height));
        self.scene = Some(scene);
        self.gpu = Some(gpu);
        self.window = Some(window.clone());
        self.clock.reset();
        window.request_redraw();
        Ok(())
    }

    fn apply_resize(&mut self, resize: ViewportResize) {
        let w = resize.physical.width;
        let h = resize.physical.height;
        self.camera.set_aspect_ratio(w as f32, h as f32);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(w, h);
            if let Some(depth_buffer) = &mut self.depth_buffer {
                depth_buffer.resize(&gpu.device, w, h);
            }
        }
        info!(
            "Viewport resized to {}x{} (scale: {:.2}, minimized: {})",
            w, h, resize.scale_factor, resize.minimized
        );
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// F5: re-read `config.ron` and push the sky and grid settings.
    fn reload_config(&mut self, gpu: &RenderContext, scene: &mut SkyScene) {
        match self.config.reload(&self.config_dir) {
            Ok(Some(config)) => {
                let mut host = GpuSkyHost::new(&gpu.device, scene);
                self.view
                    .apply_settings(SkySettings::from(&config.sky), &mut host);
                scene.set_show_grid(config.debug.show_grid);
                self.config = config;
                info!("Applied reloaded config");
            }
            Ok(None) => debug!("Config unchanged"),
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    #[instrument(skip_all)]
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt_ms = self.clock.tick();

        if self.gpu.is_none() || self.scene.is_none() {
            return;
        }
        let (Some(mut gpu), Some(mut scene)) = (self.gpu.take(), self.scene.take()) else {
            return;
        };

        if self.orbit.update(&self.mouse, self.viewport.size().height) {
            debug!(eye = ?self.orbit.eye(), "Orbit moved");
        }
        self.camera.position = self.orbit.eye();
        self.camera.look_at(self.orbit.target());

        let panel_result =
            self.panel
                .handle_input(&self.keyboard, &mut self.view, |view, _change| {
                    view.refresh(&mut GpuSkyHost::new(&gpu.device, &mut scene));
                });
        if let Err(e) = panel_result {
            warn!("Panel input rejected: {e}");
        }

        if self.keyboard.just_pressed(KeyCode::KeyP) {
            let running = self.view.toggle_pause();
            info!(running, "Sun animation toggled");
        }
        if self.keyboard.just_pressed(KeyCode::KeyR) {
            self.view.reset(&mut GpuSkyHost::new(&gpu.device, &mut scene));
        }
        if self.keyboard.just_pressed(KeyCode::F5) {
            self.reload_config(&gpu, &mut scene);
        }
        if self.keyboard.just_pressed(KeyCode::Escape) {
            info!("Escape pressed, shutting down");
            event_loop.exit();
        }

        self.view.advance(dt_ms, &mut GpuSkyHost::new(&gpu.device, &mut scene));

        if !self.viewport.is_minimized() {
            scene.prepare(&gpu.queue, self.camera.view_projection_matrix());
            match gpu.get_current_texture() {
                Ok(surface_texture) => {
                    if let Some(depth_buffer) = &self.depth_buffer {
                        let builder = RenderPassBuilder::new()
                            .depth(depth_buffer.view.clone(), DepthBuffer::CLEAR_VALUE)
                            .label("sky-pass");
                        let mut frame = FrameEncoder::new(&gpu.device, &gpu.queue, surface_texture);
                        {
                            let mut pass = frame.begin_render_pass(&builder);
                            scene.render(&mut pass);
                        }
                        frame.submit();
                    }
                }
                Err(SurfaceError::Timeout) => debug!("Surface timeout, skipping frame"),
                Err(SurfaceError::Lost) => {
                    warn!("Surface lost, reconfiguring");
                    let size = self.viewport.size();
                    gpu.resize(size.width, size.height);
                }
                Err(SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory, shutting down");
                    event_loop.exit();
                }
            }
        }

        let redraw = wants_redraw(
            scene.take_redraw_request(),
            self.view.driver().is_running(),
            self.viewport.is_minimized(),
        );
        self.gpu = Some(gpu);
        self.scene = Some(scene);
        self.end_frame();
        if redraw {
            self.request_redraw();
        }
    }

    fn end_frame(&mut self) {
        let title = compose_title(
            &self.config.window.title,
            &self.panel.summary(&self.view),
            self.view.driver().is_running(),
        );
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
        self.keyboard.clear_transients();
        self.mouse.clear_transients();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            self.fail(event_loop, e);
        }
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
                if let Some(resize) = self.viewport.resize(new_size.width, new_size.height) {
                    self.apply_resize(resize);
                    self.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let inner = window.inner_size();
                    let resize = self.viewport.rescale(scale_factor, inner.width, inner.height);
                    self.apply_resize(resize);
                    self.request_redraw();
                }
            }
            WindowEvent::Focused(false) => {
                self.keyboard.release_all();
                self.mouse.release_all();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
                self.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
                if self.mouse.is_button_pressed(winit::event::MouseButton::Left) {
                    self.request_redraw();
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse.on_cursor_left();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
                self.request_redraw();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}

/// Create the event loop and run until the window closes.
#[instrument(skip_all)]
pub fn run(config: Config, config_dir: PathBuf) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, config_dir)?;
    event_loop.run_app(&mut app)?;
    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
