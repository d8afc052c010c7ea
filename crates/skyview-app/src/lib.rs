//! skyview application: window, event loop, and per-frame driving of the sky
//! view.

pub mod error;
pub mod frame_clock;
pub mod platform;
pub mod window;

pub use error::AppError;
pub use frame_clock::FrameClock;
pub use platform::PlatformDirs;
pub use window::{AppState, run};
