//! Input state for the viewer: frame-coherent keyboard and mouse tracking,
//! plus the orbit controller that turns mouse drags into camera placement.

pub mod keyboard;
pub mod mouse;
pub mod orbit;

pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
pub use orbit::{OrbitController, OrbitSettings};
