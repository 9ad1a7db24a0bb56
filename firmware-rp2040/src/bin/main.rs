#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use shiftreg_to_joystick_rp2040::{
    configure_panel_hid, new_report_cache, ControlMap, JoystickPipeline, JoystickRequestHandler,
    ReportCache, ShiftRegisterBus, UsbJoystickOutput, PANEL_COUNT,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Most recent report per panel, shared with the GetReport handlers.
static REPORT_CACHE: ReportCache = new_report_cache();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state and control-request handler, one per panel interface.
static HID_STATES: StaticCell<[State; PANEL_COUNT]> = StaticCell::new();
static HID_HANDLERS: StaticCell<[JoystickRequestHandler; PANEL_COUNT]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("shiftreg-to-joystick starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Bus Setup ---
    let latch = Output::new(p.PIN_2, Level::Low);
    let clock = Output::new(p.PIN_3, Level::Low);
    let lanes = [
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
    ];
    let bus = ShiftRegisterBus::new(latch, clock, lanes);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Joystick");
    usb_config.product = Some("Quad Panel Joystick");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure one HID interface per panel
    let [s0, s1, s2, s3] = HID_STATES.init([State::new(), State::new(), State::new(), State::new()]);
    let [h0, h1, h2, h3] = HID_HANDLERS.init([
        JoystickRequestHandler::new(0, &REPORT_CACHE),
        JoystickRequestHandler::new(1, &REPORT_CACHE),
        JoystickRequestHandler::new(2, &REPORT_CACHE),
        JoystickRequestHandler::new(3, &REPORT_CACHE),
    ]);
    let writers = [
        configure_panel_hid(&mut builder, s0, h0),
        configure_panel_hid(&mut builder, s1, h1),
        configure_panel_hid(&mut builder, s2, h2),
        configure_panel_hid(&mut builder, s3, h3),
    ];

    // Build the USB device
    let usb_device = builder.build();

    // Create output and pipeline; a malformed control map is a configuration
    // error and stops the firmware before the first sweep.
    let usb_output = UsbJoystickOutput::new(writers, &REPORT_CACHE);
    let pipeline = match JoystickPipeline::new(bus, usb_output, ControlMap::REFERENCE) {
        Ok(pipeline) => pipeline,
        Err(e) => defmt::panic!("control map rejected: {}", e),
    };

    // On-board LED for error indication
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(usb_task(usb_device)).unwrap();
    spawner.spawn(poll_task(pipeline, led)).unwrap();

    info!("shiftreg-to-joystick initialized");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Poll task - sweeps the bus, debounces, and hands reports to USB HID.
#[embassy_executor::task]
async fn poll_task(
    mut pipeline: JoystickPipeline<ShiftRegisterBus<'static>, UsbJoystickOutput<'static>>,
    mut led: Output<'static>,
) {
    // Wait for USB to be ready before the first hand-off
    pipeline.sink_mut().wait_ready().await;
    info!("USB HID ready, scanning panels...");

    loop {
        if let Err(e) = pipeline.cycle_once().await {
            error!("report hand-off failed: {:?}", e);
            // Toggle LED to indicate error
            led.toggle();
        }
    }
}
