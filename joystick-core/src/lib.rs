//! Platform-agnostic panel sampling, debouncing, and report synthesis.
//!
//! This crate contains the input pipeline for a four-panel arcade controller
//! multiplexed over a shared shift-register bus, without any platform-specific
//! dependencies. It can be used both in embedded `no_std` environments and on
//! host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Core data structures ([`Buttons`], [`JoystickReport`])
//! - [`mapping`]: Static slot-to-control wiring ([`ControlMap`])
//! - [`sampler`]: Shift-register bus sweep ([`PanelBus`], [`sweep`])
//! - [`debounce`]: Per-button hysteresis filtering ([`Debouncer`])
//! - [`report`]: Report synthesis and change detection ([`ReportSynthesizer`])
//! - [`pipeline`]: Orchestrates one polling cycle ([`JoystickPipeline`])
//! - [`sink`]: Output sink trait ([`ReportSink`])
//!
//! # Pipeline
//!
//! Each polling cycle runs the stages in sequence:
//!
//! ```text
//! bus sweep -> raw matrix -> debounce -> stabilized matrix
//!           -> report synthesis (x4 panels) -> sink hand-off
//! ```
//!
//! # Example
//!
//! ```rust
//! use joystick_core::{ControlMap, Debouncer, ReportSynthesizer, AXIS_CENTER};
//!
//! let debouncer = Debouncer::new();
//! let mut synth = ReportSynthesizer::new(ControlMap::REFERENCE).unwrap();
//!
//! // With no buttons pressed every panel reports the idle state.
//! let stable = debouncer.stabilized(0);
//! let (report, changed) = synth.synthesize(0, &stable);
//! assert_eq!(report.x, AXIS_CENTER);
//! assert!(!changed);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations; all
//! state lives in fixed arrays sized by [`PANEL_COUNT`] and [`SLOT_COUNT`].

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod debounce;
pub mod mapping;
pub mod pipeline;
pub mod report;
pub mod sampler;
pub mod sink;
pub mod types;

// Re-export main types at crate root
pub use debounce::{Debouncer, DEBOUNCE_TOLERANCE};
pub use mapping::{Axis, Control, ControlMap, MapError};
pub use pipeline::JoystickPipeline;
pub use report::ReportSynthesizer;
pub use sampler::{sweep, PanelBus, SampleMatrix, SETTLE_MICROS};
pub use sink::{ReportSink, SinkError};
pub use types::{
    Buttons, JoystickReport, AXIS_CENTER, AXIS_MAX, AXIS_MIN, HAT_NEUTRAL, PANEL_COUNT, SLOT_COUNT,
};
