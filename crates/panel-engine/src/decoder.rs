//! Edge-triggered input report decoding.

use std::time::Instant;

use panel_hid_common::HidDevice;
use tracing::{debug, trace};

use crate::config::{EngineConfig, InitialReportPolicy};
use crate::control::{ControlMap, ControlTable, PanelControl};
use crate::error::PanelResult;
use crate::event::{EventSink, PanelEvent};
use crate::family::{PanelFamily, ProcessingOrder, SensorState};

/// Turns successive input reports of one device into [`PanelEvent`]s.
///
/// A decoder belongs to exactly one reader context. Reports must be fed in
/// arrival order; the decoder keeps a private copy of the last accepted one
/// and never holds on to the caller's buffer.
pub struct ReportDecoder<F: PanelFamily> {
    snapshot: Vec<u8>,
    has_baseline: bool,
    sensors: F::Sensors,
    table: ControlTable<F::Control>,
    config: EngineConfig,
    min_len: usize,
    seq: u64,
    processed: u64,
    dropped: u64,
}

impl<F: PanelFamily> ReportDecoder<F> {
    pub fn new(config: EngineConfig) -> Self {
        let min_len = config.effective_min_len::<F>();
        let table = ControlTable::build::<F::Map>();
        debug!(
            family = F::NAME,
            min_len,
            mapped = table.entries().count(),
            policy = ?config.initial_report,
            "report decoder created"
        );
        Self {
            snapshot: Vec::with_capacity(F::REPORT_LEN.max(min_len)),
            has_baseline: false,
            sensors: F::Sensors::default(),
            table,
            config,
            min_len,
            seq: 0,
            processed: 0,
            dropped: 0,
        }
    }

    /// Feeds one input report. Returns the number of events emitted.
    pub fn on_report<S>(&mut self, data: &[u8], sink: &mut S) -> usize
    where
        S: EventSink<F::Control> + ?Sized,
    {
        if data.len() < self.min_len {
            self.dropped += 1;
            trace!(
                family = F::NAME,
                len = data.len(),
                min = self.min_len,
                "dropping short report"
            );
            return 0;
        }

        let at = Instant::now();
        let first = !self.has_baseline;
        if first && self.config.initial_report == InitialReportPolicy::SeedCurrent {
            // baseline only; sensors still pick up their starting values
            self.sensors.update(data);
            self.store(data);
            return 0;
        }

        let emitted = match F::PROCESSING_ORDER {
            ProcessingOrder::ControlsFirst => {
                self.diff_controls(data, at, sink) + self.derive_sensors(data, at, sink)
            }
            ProcessingOrder::SensorsFirst => {
                self.derive_sensors(data, at, sink) + self.diff_controls(data, at, sink)
            }
        };
        self.store(data);
        emitted
    }

    /// Reads one report from `device` and decodes it. A read timeout is not an
    /// error and decodes nothing.
    pub fn pump<D, S>(
        &mut self,
        device: &mut D,
        buf: &mut [u8],
        timeout_ms: i32,
        sink: &mut S,
    ) -> PanelResult<usize>
    where
        D: HidDevice + ?Sized,
        S: EventSink<F::Control> + ?Sized,
    {
        let len = device.read_report(buf, timeout_ms)?;
        let Some(report) = buf.get(..len) else {
            return Ok(0);
        };
        if report.is_empty() {
            return Ok(0);
        }
        Ok(self.on_report(report, sink))
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn diff_controls<S>(&mut self, data: &[u8], at: Instant, sink: &mut S) -> usize
    where
        S: EventSink<F::Control> + ?Sized,
    {
        // absent bytes on either side compare as zero; an empty snapshot is
        // the all-zero seed
        let span = self.snapshot.len().max(data.len());
        let mut emitted = 0;
        for offset in 0..span {
            let old = self.snapshot.get(offset).copied().unwrap_or(0);
            let new = data.get(offset).copied().unwrap_or(0);
            let mut changed = old ^ new;
            while changed != 0 {
                let flag = changed & changed.wrapping_neg();
                changed &= !flag;
                match self.table.identify(offset, flag) {
                    Some(control) => {
                        let seq = self.next_seq();
                        sink.emit(PanelEvent::ControlChanged {
                            control,
                            active: new & flag != 0,
                            seq,
                            at,
                        });
                        emitted += 1;
                    }
                    None if self.config.log_unmapped_bits => {
                        trace!(
                            family = F::NAME,
                            offset,
                            flag,
                            set = new & flag != 0,
                            "unmapped bit changed"
                        );
                    }
                    None => {}
                }
            }
        }
        emitted
    }

    fn derive_sensors<S>(&mut self, data: &[u8], at: Instant, sink: &mut S) -> usize
    where
        S: EventSink<F::Control> + ?Sized,
    {
        match self.sensors.update(data) {
            Some(reading) => {
                let seq = self.next_seq();
                sink.emit(PanelEvent::SensorChanged { reading, seq, at });
                1
            }
            None => 0,
        }
    }

    fn store(&mut self, data: &[u8]) {
        self.snapshot.clear();
        self.snapshot.extend_from_slice(data);
        self.has_baseline = true;
        self.processed += 1;
    }

    /// Whether `control`'s bit is set in the last accepted report.
    pub fn is_active(&self, control: F::Control) -> bool {
        <F::Map as ControlMap>::locate(control).is_set(&self.snapshot)
    }

    /// Controls held in the last accepted report, in declaration order.
    pub fn engaged_controls(&self) -> impl Iterator<Item = F::Control> + '_ {
        <F::Control as PanelControl>::ALL
            .iter()
            .copied()
            .filter(move |control| self.is_active(*control))
    }

    pub fn last_report(&self) -> Option<&[u8]> {
        self.has_baseline.then_some(self.snapshot.as_slice())
    }

    pub fn sensors(&self) -> &F::Sensors {
        &self.sensors
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn min_report_len(&self) -> usize {
        self.min_len
    }

    /// Sequence number of the last event emitted, 0 if none.
    pub fn last_seq(&self) -> u64 {
        self.seq
    }

    pub fn reports_processed(&self) -> u64 {
        self.processed
    }

    pub fn reports_dropped(&self) -> u64 {
        self.dropped
    }

    /// Forgets the snapshot and derived fields. The next report is handled as
    /// the first after connection. Sequence numbers keep counting up.
    pub fn reset(&mut self) {
        debug!(family = F::NAME, last_seq = self.seq, "report decoder reset");
        self.snapshot.clear();
        self.has_baseline = false;
        self.sensors = F::Sensors::default();
    }
}

impl<F: PanelFamily> Default for ReportDecoder<F> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<F: PanelFamily> std::fmt::Debug for ReportDecoder<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportDecoder")
            .field("family", &F::NAME)
            .field("has_baseline", &self.has_baseline)
            .field("sensors", &self.sensors)
            .field("seq", &self.seq)
            .field("processed", &self.processed)
            .field("dropped", &self.dropped)
            .finish_non_exhaustive()
    }
}
