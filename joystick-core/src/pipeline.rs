//! JoystickPipeline: runs the sample -> debounce -> synthesize cycle.

use crate::debounce::Debouncer;
use crate::mapping::{ControlMap, MapError};
use crate::report::ReportSynthesizer;
use crate::sampler::{sweep, PanelBus};
use crate::sink::{ReportSink, SinkError};
use crate::types::{JoystickReport, PANEL_COUNT};

/// Owns the whole input pipeline for all four panels.
///
/// One [`cycle_once`](Self::cycle_once) call performs a full bus sweep,
/// advances every debounce filter, synthesizes all four reports in panel
/// order, and hands each to the sink. Everything runs sequentially on the
/// caller's task; only the sink hand-off is async.
pub struct JoystickPipeline<B, S> {
    bus: B,
    sink: S,
    debouncer: Debouncer,
    synthesizer: ReportSynthesizer,
}

impl<B: PanelBus, S: ReportSink> JoystickPipeline<B, S> {
    /// Create a pipeline for the given bus, sink, and panel wiring.
    ///
    /// Fails fast if the wiring table is malformed.
    pub fn new(bus: B, sink: S, map: ControlMap) -> Result<Self, MapError> {
        Ok(Self {
            bus,
            sink,
            debouncer: Debouncer::new(),
            synthesizer: ReportSynthesizer::new(map)?,
        })
    }

    /// Run the pipeline indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.cycle_once().await;
        }
    }

    /// Run one polling cycle.
    ///
    /// A sink error on one panel does not stop the remaining panels; the
    /// last error is returned once the cycle has completed. Not-ready panels
    /// are skipped, but their previous reports still update so change
    /// detection stays consistent across retries.
    pub async fn cycle_once(&mut self) -> Result<(), SinkError> {
        let raw = sweep(&mut self.bus);
        self.debouncer.update(&raw);

        let mut result = Ok(());
        for panel in 0..PANEL_COUNT {
            let stable = self.debouncer.stabilized(panel);
            let (report, changed) = self.synthesizer.synthesize(panel, &stable);

            if !self.sink.is_ready(panel) {
                continue;
            }
            if let Err(e) = self.sink.send(panel, &report, changed).await {
                result = Err(e);
            }
        }
        result
    }

    /// Synthesize one panel's report immediately, outside the polling loop.
    ///
    /// Used to answer host status queries on demand. Runs the same synthesis
    /// contract as the loop, including the previous-report overwrite.
    pub fn synthesize_now(&mut self, panel: usize) -> (JoystickReport, bool) {
        let stable = self.debouncer.stabilized(panel);
        self.synthesizer.synthesize(panel, &stable)
    }

    /// Get a mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Get a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Decompose the pipeline into its bus and sink.
    pub fn into_parts(self) -> (B, S) {
        (self.bus, self.sink)
    }
}
