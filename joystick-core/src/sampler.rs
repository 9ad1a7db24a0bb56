//! Shift-register bus sweep.
//!
//! The four panels share a latch and clock line and contribute one data lane
//! each. One sweep clocks all [`SLOT_COUNT`] bits out of every panel's
//! register in lockstep and returns the complete raw matrix; nothing is
//! observable until the sweep has finished, so a cycle never sees a torn
//! read across panels or slots.

use crate::types::{PANEL_COUNT, SLOT_COUNT};

/// Minimum hold time for each clock half-pulse, in microseconds.
///
/// This is a timing contract of the bus protocol, not a tunable: the
/// register outputs need the full window to settle before the opposite edge.
pub const SETTLE_MICROS: u64 = 6;

/// Raw sample matrix: `matrix[panel][slot]`, `true` = logically pressed.
pub type SampleMatrix = [[bool; SLOT_COUNT]; PANEL_COUNT];

/// Control-line and lane access for the shared shift-register bus.
///
/// Implementations own the physical pins. [`settle`](PanelBus::settle) must
/// busy-wait for at least [`SETTLE_MICROS`] without yielding to a scheduler;
/// a preempted wait can stretch a half-pulse past the window the registers
/// tolerate and corrupt the sampled bit.
pub trait PanelBus {
    /// Drive the shared latch line.
    fn set_latch(&mut self, high: bool);

    /// Drive the shared clock line.
    fn set_clock(&mut self, high: bool);

    /// Sample every data lane at once. Lane `i` belongs to panel `i`.
    ///
    /// Returns the electrical level: the lanes are pulled up and a pressed
    /// button reads low. The sweep owns inverting this.
    fn read_lanes(&mut self) -> [bool; PANEL_COUNT];

    /// Busy-wait for the bus settle window.
    fn settle(&mut self);
}

/// Run one full sweep over the bus and return the raw matrix.
///
/// Protocol: assert the latch (low), then for every slot hold, drop the
/// clock, sample all lanes, hold again, and raise the clock; finally release
/// the latch. The active-low wire polarity is inverted here, so the rest of
/// the pipeline only ever sees `true` = pressed.
pub fn sweep<B: PanelBus>(bus: &mut B) -> SampleMatrix {
    let mut matrix = [[false; SLOT_COUNT]; PANEL_COUNT];

    bus.set_latch(false);

    for slot in 0..SLOT_COUNT {
        bus.settle();
        bus.set_clock(false);

        let lanes = bus.read_lanes();
        for (panel, level) in lanes.iter().enumerate() {
            // Pulled-up lane: low level = pressed.
            matrix[panel][slot] = !level;
        }

        bus.settle();
        bus.set_clock(true);
    }

    bus.set_latch(true);

    matrix
}
