//! Per-button hysteresis filtering.
//!
//! Every (panel, slot) pair carries its own counter; a stabilized state only
//! flips after the raw reading has disagreed with it for more than
//! [`DEBOUNCE_TOLERANCE`] consecutive cycles. Slots are filtered
//! independently, so chatter on one button never delays another.

use crate::sampler::SampleMatrix;
use crate::types::{PANEL_COUNT, SLOT_COUNT};

/// Default number of consecutive disagreeing cycles tolerated before a
/// stabilized state flips.
///
/// This is the single tuning knob for the filter: too small and contact
/// bounce leaks through as spurious report changes, too large and inputs lag
/// perceptibly. With a held input the flip lands on the
/// `tolerance + 2`-th cycle (the counter must strictly exceed the tolerance
/// before the flip is taken).
pub const DEBOUNCE_TOLERANCE: u8 = 10;

/// Filter state for one physical button.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct ButtonState {
    /// Raw reading from the last sweep.
    physical: bool,
    /// Debounced state the rest of the pipeline sees.
    stable: bool,
    /// Consecutive cycles physical and stable have disagreed.
    counter: u8,
}

/// Debounce arena for all panels and slots.
///
/// Lives for the whole process; every state starts released with a zero
/// counter. The filter cannot fail, it can only lag a real transition by at
/// most the tolerance, which is the intended noise rejection.
pub struct Debouncer {
    states: [[ButtonState; SLOT_COUNT]; PANEL_COUNT],
    tolerance: u8,
}

impl Debouncer {
    /// Create a debouncer with the default [`DEBOUNCE_TOLERANCE`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_tolerance(DEBOUNCE_TOLERANCE)
    }

    /// Create a debouncer with an explicit tolerance.
    ///
    /// The counter has to be able to strictly exceed the tolerance for the
    /// flip to fire, so `u8::MAX` is pulled back one step; any other value
    /// is used as-is.
    #[must_use]
    pub const fn with_tolerance(tolerance: u8) -> Self {
        let tolerance = if tolerance == u8::MAX {
            u8::MAX - 1
        } else {
            tolerance
        };
        Self {
            states: [[ButtonState {
                physical: false,
                stable: false,
                counter: 0,
            }; SLOT_COUNT]; PANEL_COUNT],
            tolerance,
        }
    }

    /// Feed one raw matrix and advance every slot's filter by one cycle.
    ///
    /// Per slot: while physical and stable disagree the counter climbs, and
    /// once it has exceeded the tolerance the stable state flips to match.
    /// Whenever the two agree the counter resets to zero.
    pub fn update(&mut self, raw: &SampleMatrix) {
        for (panel, slots) in self.states.iter_mut().enumerate() {
            for (slot, state) in slots.iter_mut().enumerate() {
                state.physical = raw[panel][slot];

                if state.physical != state.stable {
                    if state.counter > self.tolerance {
                        state.stable = state.physical;
                    } else {
                        state.counter += 1;
                    }
                }

                if state.physical == state.stable {
                    state.counter = 0;
                }
            }
        }
    }

    /// Stabilized state of every slot on one panel.
    #[must_use]
    pub fn stabilized(&self, panel: usize) -> [bool; SLOT_COUNT] {
        let mut out = [false; SLOT_COUNT];
        for (slot, state) in self.states[panel].iter().enumerate() {
            out[slot] = state.stable;
        }
        out
    }

    /// Stabilized state of a single slot.
    #[inline]
    #[must_use]
    pub fn is_stable_on(&self, panel: usize, slot: usize) -> bool {
        self.states[panel][slot].stable
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_with(panel: usize, slot: usize, pressed: bool) -> SampleMatrix {
        let mut raw = [[false; SLOT_COUNT]; PANEL_COUNT];
        raw[panel][slot] = pressed;
        raw
    }

    #[test]
    fn test_held_press_flips_on_cycle_twelve() {
        let mut debouncer = Debouncer::new();
        let pressed = matrix_with(0, 4, true);

        // Cycles 1..=11: still filtering.
        for cycle in 1..=11 {
            debouncer.update(&pressed);
            assert!(
                !debouncer.is_stable_on(0, 4),
                "flipped early on cycle {cycle}"
            );
        }

        // Cycle 12: counter has exceeded the tolerance, state flips.
        debouncer.update(&pressed);
        assert!(debouncer.is_stable_on(0, 4));
    }

    #[test]
    fn test_release_filters_symmetrically() {
        let mut debouncer = Debouncer::new();
        let pressed = matrix_with(0, 0, true);
        let released = matrix_with(0, 0, false);

        for _ in 0..12 {
            debouncer.update(&pressed);
        }
        assert!(debouncer.is_stable_on(0, 0));

        for _ in 0..11 {
            debouncer.update(&released);
            assert!(debouncer.is_stable_on(0, 0));
        }
        debouncer.update(&released);
        assert!(!debouncer.is_stable_on(0, 0));
    }

    #[test]
    fn test_counter_resets_once_states_agree() {
        let mut debouncer = Debouncer::new();
        let pressed = matrix_with(0, 2, true);
        let released = matrix_with(0, 2, false);

        // Bounce right up to the edge of the tolerance, then agree again.
        for _ in 0..10 {
            debouncer.update(&pressed);
        }
        debouncer.update(&released);
        assert_eq!(debouncer.states[0][2].counter, 0);

        // The reset means a fresh press starts filtering from scratch.
        for _ in 0..11 {
            debouncer.update(&pressed);
            assert!(!debouncer.is_stable_on(0, 2));
        }
        debouncer.update(&pressed);
        assert!(debouncer.is_stable_on(0, 2));
    }

    #[test]
    fn test_short_glitch_never_flips() {
        let mut debouncer = Debouncer::new();
        let pressed = matrix_with(1, 5, true);
        let released = matrix_with(1, 5, false);

        // Repeated sub-tolerance bursts of chatter.
        for _ in 0..20 {
            for _ in 0..5 {
                debouncer.update(&pressed);
            }
            debouncer.update(&released);
        }
        assert!(!debouncer.is_stable_on(1, 5));
    }

    #[test]
    fn test_panels_filter_independently() {
        let mut debouncer = Debouncer::new();
        let mut raw = [[false; SLOT_COUNT]; PANEL_COUNT];
        raw[2][3] = true;

        for _ in 0..12 {
            debouncer.update(&raw);
        }

        assert!(debouncer.is_stable_on(2, 3));
        for panel in [0, 1, 3] {
            assert_eq!(debouncer.stabilized(panel), [false; SLOT_COUNT]);
        }
    }

    #[test]
    fn test_max_tolerance_press_still_flips() {
        // At u8::MAX the tolerance clamps one below, keeping the counter in
        // range and the flip reachable on cycle 256.
        let mut debouncer = Debouncer::with_tolerance(u8::MAX);
        let pressed = matrix_with(0, 0, true);

        for cycle in 1..=255 {
            debouncer.update(&pressed);
            assert!(
                !debouncer.is_stable_on(0, 0),
                "flipped early on cycle {cycle}"
            );
        }
        debouncer.update(&pressed);
        assert!(debouncer.is_stable_on(0, 0));
    }

    #[test]
    fn test_custom_tolerance() {
        let mut debouncer = Debouncer::with_tolerance(2);
        let pressed = matrix_with(0, 0, true);

        for _ in 0..3 {
            debouncer.update(&pressed);
            assert!(!debouncer.is_stable_on(0, 0));
        }
        debouncer.update(&pressed);
        assert!(debouncer.is_stable_on(0, 0));
    }
}
