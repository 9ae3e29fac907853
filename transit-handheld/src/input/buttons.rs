//! The two physical buttons.
//!
//! Both are momentary, active-low with pull-ups: a pressed button reads low.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// BTN1: step through the current list.
    Next,
    /// BTN2: select, with hold gestures.
    Select,
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Button::Next => "NEXT",
            Button::Select => "SELECT",
        })
    }
}

/// Raw pin sampling.
pub trait InputPins {
    /// Whether `button`'s pin currently reads low (pressed).
    fn is_low(&mut self, button: Button) -> bool;

    /// Whether input can still arrive. Hardware pins always can; scripted
    /// sources end when their script does.
    fn is_live(&self) -> bool {
        true
    }
}

impl<P: InputPins + ?Sized> InputPins for &mut P {
    fn is_low(&mut self, button: Button) -> bool {
        (**self).is_low(button)
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }
}
