//! Quad-panel shift-register to USB joystick adapter for RP2040.
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Sweeps four button panels over a shared shift-register bus
//! 2. Debounces every button and synthesizes one report per panel
//! 3. Outputs the reports as four USB HID joystick interfaces
//!
//! # Hardware Configuration
//!
//! | Function     | GPIO | Description                        |
//! |--------------|------|------------------------------------|
//! | Bus latch    | 2    | Shared shift-register latch        |
//! | Bus clock    | 3    | Shared shift-register clock        |
//! | Panel 0 lane | 4    | Serial data, panel 0 (pulled up)   |
//! | Panel 1 lane | 5    | Serial data, panel 1 (pulled up)   |
//! | Panel 2 lane | 6    | Serial data, panel 2 (pulled up)   |
//! | Panel 3 lane | 7    | Serial data, panel 3 (pulled up)   |
//! | LED          | 25   | On-board LED (error indicator)     |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Poll Task**: Runs the [`JoystickPipeline`]: bus sweep, debounce,
//!   report synthesis, and the HID hand-off for all four panels
//!
//! The bus sweep's settle delays are busy-waits
//! ([`embassy_time::block_for`]); the poll task never yields mid-sweep, so
//! the clock pulse widths the registers require are honored.
//!
//! HID GetReport control requests are answered per panel from a shared
//! report cache the poll task refreshes every cycle.
//!
//! # Modules
//!
//! - [`bus`]: GPIO shift-register bus ([`ShiftRegisterBus`])
//! - [`usb_output`]: USB HID output ([`UsbJoystickOutput`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports all public items from [`joystick_core`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

// Re-export core types for convenience
pub use joystick_core::{
    sweep, Axis, Buttons, Control, ControlMap, Debouncer, JoystickPipeline, JoystickReport,
    MapError, PanelBus, ReportSink, ReportSynthesizer, SampleMatrix, SinkError, AXIS_CENTER,
    AXIS_MAX, AXIS_MIN, DEBOUNCE_TOLERANCE, HAT_NEUTRAL, PANEL_COUNT, SETTLE_MICROS, SLOT_COUNT,
};

pub mod bus;
pub mod usb_output;

pub use bus::ShiftRegisterBus;
pub use usb_output::{
    configure_panel_hid, encode_report, new_report_cache, JoystickRequestHandler, ReportCache,
    UsbJoystickOutput, REPORT_DESCRIPTOR, REPORT_SIZE,
};
