//! The parameter panel: an ordered list of controls, a selection cursor, and
//! keyboard bindings that edit the selected field of a [`Tweakable`] target.
//!
//! | key                | action                          |
//! |--------------------|---------------------------------|
//! | Tab, ↓             | next control (Shift+Tab: back)  |
//! | ↑                  | previous control                |
//! | ←, →               | step value (Shift: ×10)         |
//! | Space, Enter       | flip toggle                     |
//! | H                  | hide / show                     |

use skyview_input::KeyboardState;
use tracing::{debug, trace};
use winit::keyboard::KeyCode;

use crate::control::{Control, ControlKind, ControlValue};
use crate::error::PanelError;

/// Anything with named fields the panel can read and write.
pub trait Tweakable {
    fn get(&self, name: &str) -> Option<ControlValue>;
    fn set(&mut self, name: &str, value: ControlValue) -> Result<(), PanelError>;
}

/// One applied edit, passed to the change callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlChange {
    pub name: String,
    pub previous: ControlValue,
    pub value: ControlValue,
}

/// Step multiplier while Shift is held.
const COARSE_STEPS: i32 = 10;

#[derive(Debug, Clone)]
pub struct ParameterPanel {
    title: String,
    controls: Vec<Control>,
    selected: usize,
    visible: bool,
}

impl ParameterPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            controls: Vec::new(),
            selected: 0,
            visible: true,
        }
    }

    /// Register a numeric control for field `name`.
    pub fn add_number(
        &mut self,
        name: &str,
        min: f64,
        max: f64,
        step: f64,
    ) -> Result<&mut Self, PanelError> {
        self.add(Control::number(name, min, max, step))
    }

    /// Register a boolean toggle for field `name`.
    pub fn add_toggle(&mut self, name: &str) -> Result<&mut Self, PanelError> {
        self.add(Control::toggle(name))
    }

    fn add(&mut self, control: Control) -> Result<&mut Self, PanelError> {
        if self.control(&control.name).is_some() {
            return Err(PanelError::Duplicate { name: control.name });
        }
        debug!(control = %control.name, kind = ?control.kind, "Registered panel control");
        self.controls.push(control);
        Ok(self)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name == name)
    }

    pub fn selected(&self) -> Option<&Control> {
        self.controls.get(self.selected)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn select_next(&mut self) {
        if !self.controls.is_empty() {
            self.selected = (self.selected + 1) % self.controls.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.controls.is_empty() {
            self.selected = (self.selected + self.controls.len() - 1) % self.controls.len();
        }
    }

    /// Write `value` into field `name` of `target` and report the change.
    ///
    /// Writing the current value again is not a change: the callback is not
    /// called and `None` is returned.
    pub fn set_value<T: Tweakable>(
        &self,
        target: &mut T,
        name: &str,
        value: ControlValue,
        mut on_change: impl FnMut(&mut T, &ControlChange),
    ) -> Result<Option<ControlChange>, PanelError> {
        let control = self
            .control(name)
            .ok_or_else(|| PanelError::UnknownControl {
                name: name.to_string(),
            })?;
        let matches_kind = matches!(
            (&control.kind, value),
            (ControlKind::Number { .. }, ControlValue::Number(_))
                | (ControlKind::Toggle, ControlValue::Toggle(_))
        );
        if !matches_kind {
            return Err(PanelError::KindMismatch {
                name: name.to_string(),
                expected: control.expected(),
            });
        }

        let previous = target.get(name).ok_or_else(|| PanelError::UnknownControl {
            name: name.to_string(),
        })?;
        if previous == value {
            return Ok(None);
        }

        target.set(name, value)?;
        let change = ControlChange {
            name: name.to_string(),
            previous,
            value,
        };
        trace!(control = name, from = %previous, to = %value, "Panel change");
        on_change(target, &change);
        Ok(Some(change))
    }

    /// Apply this frame's keyboard input.
    ///
    /// Selection and visibility keys always work; value edits only while the
    /// panel is visible. Returns the applied changes in order.
    pub fn handle_input<T: Tweakable>(
        &mut self,
        keyboard: &KeyboardState,
        target: &mut T,
        mut on_change: impl FnMut(&mut T, &ControlChange),
    ) -> Result<Vec<ControlChange>, PanelError> {
        if keyboard.just_pressed(KeyCode::KeyH) {
            self.visible = !self.visible;
            debug!(visible = self.visible, "Panel visibility toggled");
        }
        if !self.visible || self.controls.is_empty() {
            return Ok(Vec::new());
        }

        let shift = keyboard.shift_held();
        if keyboard.pressed_or_repeated(KeyCode::ArrowDown)
            || (keyboard.just_pressed(KeyCode::Tab) && !shift)
        {
            self.select_next();
        }
        if keyboard.pressed_or_repeated(KeyCode::ArrowUp)
            || (keyboard.just_pressed(KeyCode::Tab) && shift)
        {
            self.select_previous();
        }

        let mut steps = 0;
        if keyboard.pressed_or_repeated(KeyCode::ArrowRight) {
            steps += 1;
        }
        if keyboard.pressed_or_repeated(KeyCode::ArrowLeft) {
            steps -= 1;
        }
        if shift {
            steps *= COARSE_STEPS;
        }
        let flip = keyboard.just_pressed(KeyCode::Space)
            || keyboard.just_pressed(KeyCode::Enter)
            || keyboard.just_pressed(KeyCode::NumpadEnter);

        let Some(control) = self.selected().cloned() else {
            return Ok(Vec::new());
        };
        let current = target
            .get(&control.name)
            .ok_or_else(|| PanelError::UnknownControl {
                name: control.name.clone(),
            })?;

        let next = match (&control.kind, current) {
            (ControlKind::Number { .. }, ControlValue::Number(value)) if steps != 0 => control
                .stepped(value, steps)
                .map(ControlValue::Number),
            (ControlKind::Toggle, ControlValue::Toggle(value)) if flip || steps != 0 => {
                Some(ControlValue::Toggle(!value))
            }
            _ => None,
        };

        let mut changes = Vec::new();
        if let Some(next) = next
            && let Some(change) = self.set_value(target, &control.name, next, &mut on_change)?
        {
            changes.push(change);
        }
        Ok(changes)
    }

    /// One-line rendering for the window title.
    ///
    /// Shows the panel title, the selected control with its value and range,
    /// and the cursor position. Hidden panels render only a hint.
    pub fn summary<T: Tweakable>(&self, target: &T) -> String {
        if !self.visible {
            return format!("{} [H: show panel]", self.title);
        }
        let Some(control) = self.selected() else {
            return self.title.clone();
        };
        let value = target
            .get(&control.name)
            .map(|value| control.display(value))
            .unwrap_or_else(|| "?".to_string());
        let range = match control.kind {
            ControlKind::Number { min, max, .. } => {
                let precision = control.precision();
                format!(" [{min:.precision$}..{max:.precision$}]")
            }
            ControlKind::Toggle => String::new(),
        };
        format!(
            "{} | {} = {}{} | {}/{}",
            self.title,
            control.name,
            value,
            range,
            self.selected + 1,
            self.controls.len()
        )
    }
}
