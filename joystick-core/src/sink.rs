//! Report sink trait and error types.

use core::future::Future;

use crate::types::JoystickReport;

/// Error type for report hand-off operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Report dropped (e.g., host not polling the endpoint).
    Dropped,
}

/// Async trait for per-panel report sinks.
///
/// This trait abstracts the transport the synthesized reports are handed to,
/// enabling different outputs (USB HID, serial debug, host-test mocks) to be
/// used interchangeably. The sink decides independently whether a report is
/// actually transmitted; the `changed` flag is advisory.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait ReportSink {
    /// Hand one panel's report to the transport.
    ///
    /// May block until the previous report for that panel has been sent.
    fn send(
        &mut self,
        panel: usize,
        report: &JoystickReport,
        changed: bool,
    ) -> impl Future<Output = Result<(), SinkError>>;

    /// Check if the transport is ready to accept a report for this panel.
    ///
    /// A not-ready panel is skipped for the cycle without blocking the other
    /// panels or the next sweep.
    fn is_ready(&self, panel: usize) -> bool;
}
