use skyview_config::ConfigError;
use skyview_render::RenderContextError;
use skyview_sky::SkyError;
use skyview_ui::PanelError;

use crate::platform::PlatformError;

/// Everything that can stop the application from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("GPU initialization failed: {0}")]
    RenderContext(#[from] RenderContextError),

    #[error("sky setup failed: {0}")]
    Sky(#[from] SkyError),

    #[error("panel setup failed: {0}")]
    Panel(#[from] PanelError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] skyview_log::TryInitError),
}
