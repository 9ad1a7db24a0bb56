//! USB HID joystick output: one HID interface per panel.

use core::cell::RefCell;

use defmt::trace;
use embassy_rp::peripherals::USB;
use embassy_time::{with_timeout, Duration};
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::Builder;
use joystick_core::{JoystickReport, ReportSink, SinkError, PANEL_COUNT};

/// Size of one joystick report on the wire, in bytes.
pub const REPORT_SIZE: usize = 7;

/// Upper bound on one interrupt IN transfer.
///
/// The interfaces poll at 1 ms; a host that has stopped polling one of them
/// would otherwise park `write().await` forever and stall the sweep for the
/// remaining panels.
const SEND_TIMEOUT: Duration = Duration::from_millis(5);

/// HID Joystick Report Descriptor, shared by all four interfaces.
///
/// Describes the wire layout of [`encode_report`]:
/// - 16 buttons
/// - hat switch (8-bit, null state when released)
/// - X/Y/Slider/Z axes (unsigned 8-bit, centered at 128)
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (16 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x10, //   Report Count (16)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Hat switch ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x39, //   Usage (Hat switch)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x07, //   Logical Maximum (7)
    0x35, 0x00, //   Physical Minimum (0)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x65, 0x14, //   Unit (Eng Rot: Degrees)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    //
    // --- Axes: X, Y, Slider, Z ---
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x36, //   Usage (Slider)
    0x09, 0x32, //   Usage (Z)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// Encode a report into its HID wire layout.
#[must_use]
pub fn encode_report(report: &JoystickReport) -> [u8; REPORT_SIZE] {
    let buttons = report.buttons.raw().to_le_bytes();
    [
        buttons[0],
        buttons[1],
        report.hat,
        report.x,
        report.y,
        report.slider,
        report.z,
    ]
}

/// Shared cache of the most recent report per panel.
///
/// Refreshed by the poll task on every cycle; read by the control-request
/// handlers to answer GetReport without touching the pipeline.
pub type ReportCache = Mutex<CriticalSectionRawMutex, RefCell<[JoystickReport; PANEL_COUNT]>>;

/// Create a report cache with every panel at the idle report.
#[must_use]
pub const fn new_report_cache() -> ReportCache {
    Mutex::new(RefCell::new([JoystickReport::idle(); PANEL_COUNT]))
}

/// USB HID joystick output.
///
/// Wraps one embassy-usb HID writer per panel and mirrors every handed-off
/// report into the shared [`ReportCache`].
pub struct UsbJoystickOutput<'d> {
    writers: [HidWriter<'d, Driver<'d, USB>, 8>; PANEL_COUNT],
    cache: &'static ReportCache,
    ready: bool,
}

impl<'d> UsbJoystickOutput<'d> {
    /// Create a new USB joystick output from one HID writer per panel.
    pub fn new(
        writers: [HidWriter<'d, Driver<'d, USB>, 8>; PANEL_COUNT],
        cache: &'static ReportCache,
    ) -> Self {
        Self {
            writers,
            cache,
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated) on every interface.
    pub async fn wait_ready(&mut self) {
        for writer in &mut self.writers {
            writer.ready().await;
        }
        self.ready = true;
    }
}

impl<'d> ReportSink for UsbJoystickOutput<'d> {
    async fn send(
        &mut self,
        panel: usize,
        report: &JoystickReport,
        changed: bool,
    ) -> Result<(), SinkError> {
        // Cache first so GetReport answers stay current even if the
        // interrupt write fails.
        self.cache.lock(|cache| cache.borrow_mut()[panel] = *report);

        if changed {
            trace!("panel {} input changed", panel);
        }

        match with_timeout(SEND_TIMEOUT, self.writers[panel].write(&encode_report(report))).await {
            Ok(result) => result.map_err(|_| SinkError::Io),
            Err(_) => Err(SinkError::Dropped),
        }
    }

    // Readiness here is device-wide: true once every interface has
    // enumerated. embassy-usb exposes no synchronous per-transfer readiness
    // check, so an interface the host has stopped polling is caught by the
    // send timeout rather than skipped up front.
    fn is_ready(&self, _panel: usize) -> bool {
        self.ready
    }
}

/// HID request handler for one panel's interface.
///
/// Answers GetReport from the shared report cache; output reports are
/// accepted and ignored (the joystick has no host-driven state).
pub struct JoystickRequestHandler {
    panel: usize,
    cache: &'static ReportCache,
}

impl JoystickRequestHandler {
    /// Create a handler serving the given panel index.
    #[must_use]
    pub fn new(panel: usize, cache: &'static ReportCache) -> Self {
        Self { panel, cache }
    }
}

impl RequestHandler for JoystickRequestHandler {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        match id {
            ReportId::In(_) if buf.len() >= REPORT_SIZE => {
                let report = self.cache.lock(|cache| *cache.borrow())[self.panel];
                buf[..REPORT_SIZE].copy_from_slice(&encode_report(&report));
                Some(REPORT_SIZE)
            }
            _ => None,
        }
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure one panel's HID interface in the USB builder.
///
/// Returns the HID writer for use by the output sink.
pub fn configure_panel_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    handler: &'d mut JoystickRequestHandler,
) -> HidWriter<'d, Driver<'d, USB>, 8> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: 1,
        max_packet_size: 8,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    embassy_usb::class::hid::HidWriter::new(builder, state, config)
}
