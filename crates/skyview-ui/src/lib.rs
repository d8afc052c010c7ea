//! Keyboard-driven parameter panel.
//!
//! Controls are registered against named fields of any [`Tweakable`] target.
//! The panel edits those fields from keyboard input and calls back on every
//! change; its state is rendered as a single line for the window title.

pub mod control;
pub mod error;
pub mod panel;

pub use control::{Control, ControlKind, ControlValue};
pub use error::PanelError;
pub use panel::{ControlChange, ParameterPanel, Tweakable};
