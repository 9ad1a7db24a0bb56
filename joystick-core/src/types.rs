//! Core data model: Buttons, JoystickReport, and the fixed cardinalities.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Number of independent panels multiplexed on the bus.
///
/// One data lane per panel; panels are addressed by index `0..PANEL_COUNT`.
pub const PANEL_COUNT: usize = 4;

/// Number of physical button slots read per panel during one bus sweep.
pub const SLOT_COUNT: usize = 12;

/// Axis value for the full negative deflection (up / left).
pub const AXIS_MIN: u8 = 0;

/// Axis value for the centered / released position.
pub const AXIS_CENTER: u8 = 128;

/// Axis value for the full positive deflection (down / right).
pub const AXIS_MAX: u8 = 255;

/// Hat switch sentinel for "no direction pressed".
///
/// The hat is declared with a null state in the HID descriptor; 0xFF is the
/// out-of-range value hosts interpret as released. Plain zero would read as
/// "north".
pub const HAT_NEUTRAL: u8 = 0xFF;

/// Button state represented as a bitfield for efficiency.
///
/// Supports up to 16 buttons, with the pad's controls pre-defined. The bit
/// positions match the HID report descriptor (bit 0 = button 1).
///
/// # Example
///
/// ```
/// use joystick_core::Buttons;
///
/// let buttons = Buttons::A | Buttons::B;
/// assert!(buttons.contains(Buttons::A));
/// assert!(!buttons.contains(Buttons::X));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const Y: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const A: Self = Self(1 << 2);
    pub const X: Self = Self(1 << 3);
    pub const L: Self = Self(1 << 4);
    pub const R: Self = Self(1 << 5);
    pub const ZL: Self = Self(1 << 6);
    pub const ZR: Self = Self(1 << 7);
    pub const MINUS: Self = Self(1 << 8);
    pub const PLUS: Self = Self(1 << 9);
    pub const LS: Self = Self(1 << 10); // Left stick press
    pub const RS: Self = Self(1 << 11); // Right stick press
    pub const HOME: Self = Self(1 << 12);
    pub const CAPTURE: Self = Self(1 << 13);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// One panel's input report, in the fixed layout handed to the transport.
///
/// Mirrors the HID report descriptor field for field:
/// - 16 button bits
/// - hat switch (8-bit, [`HAT_NEUTRAL`] when released)
/// - X/Y axes (unsigned 8-bit, centered at 128)
/// - Slider/Z secondary axes (same encoding, centered when unwired)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport {
    pub buttons: Buttons,
    pub hat: u8,
    pub x: u8,
    pub y: u8,
    pub slider: u8,
    pub z: u8,
}

impl JoystickReport {
    /// The idle report: no buttons, hat released, all axes centered.
    ///
    /// Unused analog channels are explicitly centered rather than left at
    /// zero, since zero is a valid extreme on these axes.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            buttons: Buttons::NONE,
            hat: HAT_NEUTRAL,
            x: AXIS_CENTER,
            y: AXIS_CENTER,
            slider: AXIS_CENTER,
            z: AXIS_CENTER,
        }
    }
}

impl Default for JoystickReport {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::A | Buttons::B;
        assert!(buttons.contains(Buttons::A));
        assert!(buttons.contains(Buttons::B));
        assert!(!buttons.contains(Buttons::X));
    }

    #[test]
    fn test_buttons_set_clear() {
        let mut buttons = Buttons::NONE;
        buttons.set(Buttons::A, true);
        assert!(buttons.contains(Buttons::A));
        buttons.set(Buttons::A, false);
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_idle_report_sentinels() {
        let report = JoystickReport::idle();
        assert!(report.buttons.is_empty());
        assert_eq!(report.hat, HAT_NEUTRAL);
        assert_eq!(report.x, AXIS_CENTER);
        assert_eq!(report.y, AXIS_CENTER);
        assert_eq!(report.slider, AXIS_CENTER);
        assert_eq!(report.z, AXIS_CENTER);
    }
}
