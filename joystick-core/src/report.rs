//! Report synthesis and change detection.
//!
//! Turns one panel's stabilized slot states into a [`JoystickReport`] and
//! diffs it against the report previously synthesized for that panel. The
//! previous-report arena lives here and nowhere else.

use crate::mapping::{Axis, Control, ControlMap, MapError};
use crate::types::{JoystickReport, AXIS_CENTER, AXIS_MAX, AXIS_MIN, PANEL_COUNT, SLOT_COUNT};

/// Builds reports from stabilized state and tracks the last report sent per
/// panel.
///
/// Change detection covers the button mask and the X/Y axes only: the hat
/// and the secondary axes are never driven by this wiring and differences in
/// them do not warrant a retransmission.
pub struct ReportSynthesizer {
    map: ControlMap,
    previous: [JoystickReport; PANEL_COUNT],
}

impl ReportSynthesizer {
    /// Create a synthesizer for the given wiring.
    ///
    /// Fails fast on a malformed map; every panel's previous report starts
    /// at [`JoystickReport::idle`], so the first cycle with nothing pressed
    /// reports no change.
    pub fn new(map: ControlMap) -> Result<Self, MapError> {
        map.validate()?;
        Ok(Self {
            map,
            previous: [JoystickReport::idle(); PANEL_COUNT],
        })
    }

    /// Synthesize one panel's report and flag whether it warrants sending.
    ///
    /// The stored previous report is overwritten unconditionally, whether or
    /// not the caller ends up transmitting: it is the single point of truth
    /// the next cycle diffs against.
    pub fn synthesize(
        &mut self,
        panel: usize,
        stable: &[bool; SLOT_COUNT],
    ) -> (JoystickReport, bool) {
        let mut report = JoystickReport::idle();

        for (slot, control) in self.map.slots().iter().enumerate() {
            if let Control::Button(mask) = control {
                if stable[slot] {
                    report.buttons |= *mask;
                }
            }
        }

        for axis in Axis::ALL {
            // The low (up / left) slot is checked first: with both opposing
            // slots held the axis pins to its minimum instead of cancelling
            // back to center.
            let (low, high) = self.map.axis_slots(axis);
            let value = if low.is_some_and(|slot| stable[slot]) {
                AXIS_MIN
            } else if high.is_some_and(|slot| stable[slot]) {
                AXIS_MAX
            } else {
                AXIS_CENTER
            };
            set_axis(&mut report, axis, value);
        }

        let previous = &self.previous[panel];
        let changed = report.buttons != previous.buttons
            || report.x != previous.x
            || report.y != previous.y;

        self.previous[panel] = report;
        (report, changed)
    }

    /// The report last synthesized for a panel.
    #[inline]
    #[must_use]
    pub fn previous(&self, panel: usize) -> &JoystickReport {
        &self.previous[panel]
    }
}

#[inline]
fn set_axis(report: &mut JoystickReport, axis: Axis, value: u8) {
    match axis {
        Axis::X => report.x = value,
        Axis::Y => report.y = value,
        Axis::Slider => report.slider = value,
        Axis::Z => report.z = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Buttons, HAT_NEUTRAL};

    const UP: usize = 4;
    const DOWN: usize = 5;
    const LEFT: usize = 6;
    const RIGHT: usize = 7;

    fn stable_with(slots: &[usize]) -> [bool; SLOT_COUNT] {
        let mut stable = [false; SLOT_COUNT];
        for &slot in slots {
            stable[slot] = true;
        }
        stable
    }

    fn reference() -> ReportSynthesizer {
        ReportSynthesizer::new(ControlMap::REFERENCE).unwrap()
    }

    #[test]
    fn test_idle_panel_reports_idle_without_change() {
        let mut synth = reference();
        let (report, changed) = synth.synthesize(0, &[false; SLOT_COUNT]);
        assert_eq!(report, JoystickReport::idle());
        assert!(!changed);
    }

    #[test]
    fn test_button_slots_set_their_bits() {
        let mut synth = reference();
        let (report, changed) = synth.synthesize(0, &stable_with(&[0, 8, 11]));
        assert_eq!(report.buttons, Buttons::B | Buttons::A | Buttons::R);
        assert!(changed);
    }

    #[test]
    fn test_directional_slots_drive_axes() {
        let mut synth = reference();

        let (report, _) = synth.synthesize(0, &stable_with(&[UP]));
        assert_eq!(report.y, AXIS_MIN);
        assert_eq!(report.x, AXIS_CENTER);

        let (report, _) = synth.synthesize(0, &stable_with(&[DOWN, RIGHT]));
        assert_eq!(report.y, AXIS_MAX);
        assert_eq!(report.x, AXIS_MAX);

        let (report, _) = synth.synthesize(0, &stable_with(&[]));
        assert_eq!(report.y, AXIS_CENTER);
        assert_eq!(report.x, AXIS_CENTER);
    }

    #[test]
    fn test_opposing_slots_favor_the_low_direction() {
        let mut synth = reference();

        // Up beats down, left beats right, every time.
        for _ in 0..3 {
            let (report, _) = synth.synthesize(0, &stable_with(&[UP, DOWN, LEFT, RIGHT]));
            assert_eq!(report.y, AXIS_MIN);
            assert_eq!(report.x, AXIS_MIN);
        }
    }

    #[test]
    fn test_unwired_channels_stay_at_sentinels() {
        let mut synth = reference();
        let (report, _) = synth.synthesize(0, &stable_with(&[UP, 0, 1, 2, 3]));
        assert_eq!(report.hat, HAT_NEUTRAL);
        assert_eq!(report.slider, AXIS_CENTER);
        assert_eq!(report.z, AXIS_CENTER);
    }

    #[test]
    fn test_identical_state_is_idempotent() {
        let mut synth = reference();
        let stable = stable_with(&[0, UP]);

        let (first, changed) = synth.synthesize(0, &stable);
        assert!(changed);

        let (second, changed) = synth.synthesize(0, &stable);
        assert_eq!(second, first);
        assert!(!changed);
    }

    #[test]
    fn test_any_button_or_axis_difference_flags_change() {
        let mut synth = reference();
        let _ = synth.synthesize(0, &stable_with(&[0]));

        // Single button bit difference.
        let (_, changed) = synth.synthesize(0, &stable_with(&[0, 1]));
        assert!(changed);

        // X-only difference.
        let (_, changed) = synth.synthesize(0, &stable_with(&[0, 1, LEFT]));
        assert!(changed);

        // Y-only difference.
        let (_, changed) = synth.synthesize(0, &stable_with(&[0, 1, LEFT, UP]));
        assert!(changed);
    }

    #[test]
    fn test_secondary_axis_difference_is_not_a_change() {
        // Wire the slider where the cabinet map leaves slots unwired, so the
        // mechanism works without a code change.
        let mut slots = *ControlMap::REFERENCE.slots();
        slots[0] = Control::AxisLow(Axis::Slider);
        let mut synth = ReportSynthesizer::new(ControlMap::new(slots)).unwrap();

        let _ = synth.synthesize(0, &[false; SLOT_COUNT]);
        let (report, changed) = synth.synthesize(0, &stable_with(&[0]));

        // The slider moved, but slider differences are excluded from change
        // detection in this configuration.
        assert_eq!(report.slider, AXIS_MIN);
        assert!(!changed);
    }

    #[test]
    fn test_previous_overwritten_even_without_change_consumer() {
        let mut synth = reference();

        // Two different states back to back: the second diff is against the
        // first synthesized report, not against the report before it.
        let _ = synth.synthesize(0, &stable_with(&[0]));
        let _ = synth.synthesize(0, &stable_with(&[1]));
        let (_, changed) = synth.synthesize(0, &stable_with(&[1]));
        assert!(!changed);
    }

    #[test]
    fn test_panels_keep_separate_previous_reports() {
        let mut synth = reference();
        let _ = synth.synthesize(0, &stable_with(&[0]));

        // Panel 1 never saw panel 0's press.
        let (_, changed) = synth.synthesize(1, &[false; SLOT_COUNT]);
        assert!(!changed);

        let (_, changed) = synth.synthesize(1, &stable_with(&[0]));
        assert!(changed);
    }

    #[test]
    fn test_malformed_map_rejected_at_construction() {
        let mut slots = *ControlMap::REFERENCE.slots();
        slots[9] = Control::Button(Buttons::NONE);
        assert!(ReportSynthesizer::new(ControlMap::new(slots)).is_err());
    }
}
