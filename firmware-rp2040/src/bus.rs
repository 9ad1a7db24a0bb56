//! GPIO implementation of the shared shift-register bus.
//!
//! Two push-pull outputs drive the common latch and clock lines; four
//! pulled-up inputs read one serial data lane per panel. The settle delay is
//! a busy-wait, never a timer yield: a suspended wait could stretch a clock
//! half-pulse past what the registers tolerate.

use embassy_rp::gpio::{Input, Level, Output};
use embassy_time::{block_for, Duration};
use joystick_core::{PanelBus, PANEL_COUNT, SETTLE_MICROS};

/// Shift-register bus over RP2040 GPIO.
///
/// The caller configures the lane inputs with `Pull::Up`; a pressed button
/// pulls its bit low on the wire.
pub struct ShiftRegisterBus<'d> {
    latch: Output<'d>,
    clock: Output<'d>,
    lanes: [Input<'d>; PANEL_COUNT],
}

impl<'d> ShiftRegisterBus<'d> {
    /// Create a bus from the latch/clock outputs and the panel data lanes.
    #[must_use]
    pub fn new(latch: Output<'d>, clock: Output<'d>, lanes: [Input<'d>; PANEL_COUNT]) -> Self {
        Self {
            latch,
            clock,
            lanes,
        }
    }
}

impl PanelBus for ShiftRegisterBus<'_> {
    fn set_latch(&mut self, high: bool) {
        self.latch.set_level(Level::from(high));
    }

    fn set_clock(&mut self, high: bool) {
        self.clock.set_level(Level::from(high));
    }

    fn read_lanes(&mut self) -> [bool; PANEL_COUNT] {
        [
            self.lanes[0].is_high(),
            self.lanes[1].is_high(),
            self.lanes[2].is_high(),
            self.lanes[3].is_high(),
        ]
    }

    fn settle(&mut self) {
        // Busy-wait: holds the whole executor for the settle window.
        block_for(Duration::from_micros(SETTLE_MICROS));
    }
}
