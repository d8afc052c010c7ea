//! Control definitions: what a panel row edits and within which bounds.

use std::fmt;

/// A value a control reads from or writes to its target field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number(f64),
    Toggle(bool),
}

impl ControlValue {
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Toggle(_) => None,
        }
    }

    pub fn as_toggle(self) -> Option<bool> {
        match self {
            Self::Toggle(value) => Some(value),
            Self::Number(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// A slider. The bounds only limit edits made through the panel; values
    /// set elsewhere may lie outside them and are displayed as they are.
    Number { min: f64, max: f64, step: f64 },
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Field name on the target.
    pub name: String,
    pub kind: ControlKind,
}

impl Control {
    pub fn number(name: impl Into<String>, min: f64, max: f64, step: f64) -> Self {
        Self {
            name: name.into(),
            kind: ControlKind::Number { min, max, step },
        }
    }

    pub fn toggle(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ControlKind::Toggle,
        }
    }

    /// Step `current` by `steps` increments, snapped to the step grid and
    /// clamped to the bounds. Returns `None` for toggles.
    pub fn stepped(&self, current: f64, steps: i32) -> Option<f64> {
        let ControlKind::Number { min, max, step } = self.kind else {
            return None;
        };
        let mut next = current + step * f64::from(steps);
        if step > 0.0 {
            next = (next / step).round() * step;
        }
        Some(next.clamp(min, max))
    }

    /// Decimal places implied by the step, for display.
    pub fn precision(&self) -> usize {
        match self.kind {
            ControlKind::Number { step, .. } if step > 0.0 && step < 1.0 => {
                (-step.log10()).round() as usize
            }
            _ => 0,
        }
    }

    pub fn expected(&self) -> &'static str {
        match self.kind {
            ControlKind::Number { .. } => "number",
            ControlKind::Toggle => "boolean",
        }
    }

    /// Format `value` the way the panel displays it.
    pub fn display(&self, value: ControlValue) -> String {
        match value {
            ControlValue::Number(number) => format!("{number:.*}", self.precision()),
            ControlValue::Toggle(true) => "on".to_string(),
            ControlValue::Toggle(false) => "off".to_string(),
        }
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Toggle(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_up_and_down() {
        let control = Control::number("turbidity", 1.0, 20.0, 0.1);
        let up = control.stepped(10.0, 1).unwrap();
        assert!((up - 10.1).abs() < 1e-9);
        let down = control.stepped(10.0, -10).unwrap();
        assert!((down - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_clamps_to_bounds() {
        let control = Control::number("mieCoefficient", 0.0, 0.1, 0.001);
        assert_eq!(control.stepped(0.0995, 10), Some(0.1));
        assert_eq!(control.stepped(0.0, -1), Some(0.0));
    }

    #[test]
    fn test_step_snaps_off_grid_values() {
        let control = Control::number("inclination", 0.0, 1.0, 0.0001);
        let next = control.stepped(0.490_037, 1).unwrap();
        assert!((next - 0.4901).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_value_steps_back_into_range() {
        let control = Control::number("inclination", 0.0, 1.0, 0.0001);
        assert_eq!(control.stepped(1.7, 1), Some(1.0));
    }

    #[test]
    fn test_toggle_does_not_step() {
        assert_eq!(Control::toggle("sun").stepped(0.0, 1), None);
    }

    #[test]
    fn test_precision_from_step() {
        assert_eq!(Control::number("a", 0.0, 1.0, 0.1).precision(), 1);
        assert_eq!(Control::number("b", 0.0, 1.0, 0.001).precision(), 3);
        assert_eq!(Control::number("c", 0.0, 1.0, 0.0001).precision(), 4);
        assert_eq!(Control::number("d", 0.0, 10.0, 1.0).precision(), 0);
    }

    #[test]
    fn test_display() {
        let control = Control::number("rayleigh", 0.0, 4.0, 0.001);
        assert_eq!(control.display(ControlValue::Number(2.0)), "2.000");
        let toggle = Control::toggle("sun");
        assert_eq!(toggle.display(ControlValue::Toggle(false)), "off");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(ControlValue::Number(1.5).as_number(), Some(1.5));
        assert_eq!(ControlValue::Number(1.5).as_toggle(), None);
        assert_eq!(ControlValue::Toggle(true).as_toggle(), Some(true));
    }
}
