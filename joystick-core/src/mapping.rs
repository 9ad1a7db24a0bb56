//! Static slot-to-control wiring.
//!
//! Each physical button slot is permanently associated with one logical
//! control: a button bit, or one end of an axis pair. The wiring is pure
//! data, so an alternate panel layout is a table change, not a code change.

use crate::types::{Buttons, SLOT_COUNT};

/// A report axis that can be driven by an opposing pair of slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Slider,
    Z,
}

impl Axis {
    /// All axes, in report order.
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Slider, Axis::Z];
}

/// The logical control a slot is wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    /// The slot sets the given button bit(s) while pressed.
    Button(Buttons),
    /// The slot drives the axis to its minimum (up / left) while pressed.
    AxisLow(Axis),
    /// The slot drives the axis to its maximum (down / right) while pressed.
    AxisHigh(Axis),
}

/// Error found while validating a [`ControlMap`] at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapError {
    /// A slot maps to a button entry with no bits set.
    EmptyButtonMask { slot: usize },
    /// Two slots drive the same end of the same axis.
    DuplicateAxisSlot { axis: Axis },
}

/// Immutable slot-to-control lookup table for one panel wiring.
///
/// All four panels share the same wiring. Validate with
/// [`ControlMap::validate`] before use; a malformed table is a configuration
/// error and must be rejected at startup, not at sample time.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlMap {
    slots: [Control; SLOT_COUNT],
}

impl ControlMap {
    /// The reference cabinet wiring.
    ///
    /// Select and start ride the Home and Plus report bits on this cabinet;
    /// the hat and the Slider/Z pair are left unwired.
    pub const REFERENCE: Self = Self::new([
        Control::Button(Buttons::B),
        Control::Button(Buttons::Y),
        Control::Button(Buttons::HOME),
        Control::Button(Buttons::PLUS),
        Control::AxisLow(Axis::Y),
        Control::AxisHigh(Axis::Y),
        Control::AxisLow(Axis::X),
        Control::AxisHigh(Axis::X),
        Control::Button(Buttons::A),
        Control::Button(Buttons::X),
        Control::Button(Buttons::L),
        Control::Button(Buttons::R),
    ]);

    /// Create a map from an explicit wiring table.
    #[must_use]
    pub const fn new(slots: [Control; SLOT_COUNT]) -> Self {
        Self { slots }
    }

    /// The per-slot wiring table.
    #[inline]
    #[must_use]
    pub const fn slots(&self) -> &[Control; SLOT_COUNT] {
        &self.slots
    }

    /// Check the wiring for configuration errors.
    ///
    /// Rejects button entries with an empty mask and axes driven to the same
    /// extreme by more than one slot, so that at most one slot can set each
    /// axis end per cycle.
    pub fn validate(&self) -> Result<(), MapError> {
        for (slot, control) in self.slots.iter().enumerate() {
            if let Control::Button(mask) = control {
                if mask.is_empty() {
                    return Err(MapError::EmptyButtonMask { slot });
                }
            }
        }

        for axis in Axis::ALL {
            let low = self.slots.iter().filter(|c| **c == Control::AxisLow(axis));
            if low.count() > 1 {
                return Err(MapError::DuplicateAxisSlot { axis });
            }
            let high = self.slots.iter().filter(|c| **c == Control::AxisHigh(axis));
            if high.count() > 1 {
                return Err(MapError::DuplicateAxisSlot { axis });
            }
        }

        Ok(())
    }

    /// Find the (low, high) slot pair wired to an axis, if any.
    ///
    /// Call only on a validated map; with duplicates present the first match
    /// wins.
    #[must_use]
    pub fn axis_slots(&self, axis: Axis) -> (Option<usize>, Option<usize>) {
        let mut low = None;
        let mut high = None;
        for (slot, control) in self.slots.iter().enumerate() {
            match control {
                Control::AxisLow(a) if *a == axis && low.is_none() => low = Some(slot),
                Control::AxisHigh(a) if *a == axis && high.is_none() => high = Some(slot),
                _ => {}
            }
        }
        (low, high)
    }
}

impl Default for ControlMap {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_map_is_valid() {
        assert_eq!(ControlMap::REFERENCE.validate(), Ok(()));
    }

    #[test]
    fn test_reference_axis_wiring() {
        let map = ControlMap::REFERENCE;
        assert_eq!(map.axis_slots(Axis::Y), (Some(4), Some(5)));
        assert_eq!(map.axis_slots(Axis::X), (Some(6), Some(7)));
        // Secondary axes exist but are not wired in this cabinet.
        assert_eq!(map.axis_slots(Axis::Slider), (None, None));
        assert_eq!(map.axis_slots(Axis::Z), (None, None));
    }

    #[test]
    fn test_empty_button_mask_rejected() {
        let mut slots = *ControlMap::REFERENCE.slots();
        slots[3] = Control::Button(Buttons::NONE);
        assert_eq!(
            ControlMap::new(slots).validate(),
            Err(MapError::EmptyButtonMask { slot: 3 })
        );
    }

    #[test]
    fn test_duplicate_axis_slot_rejected() {
        let mut slots = *ControlMap::REFERENCE.slots();
        // Two slots driving Y to its minimum.
        slots[0] = Control::AxisLow(Axis::Y);
        assert_eq!(
            ControlMap::new(slots).validate(),
            Err(MapError::DuplicateAxisSlot { axis: Axis::Y })
        );
    }
}
