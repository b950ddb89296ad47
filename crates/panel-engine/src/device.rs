//! A connected panel: one decoder, one commander, one connected flag.

use panel_hid_common::{DeviceWriter, HidDevice};
use tracing::debug;

use crate::capabilities::FrontpanelCapabilities;
use crate::commander::{ConnectionState, PanelCommander};
use crate::config::EngineConfig;
use crate::decoder::ReportDecoder;
use crate::error::{PanelError, PanelResult};
use crate::event::EventSink;
use crate::family::PanelFamily;
use crate::output::{BrightnessRequest, OUTPUT_REPORT_LEN};

pub struct PanelDevice<F: PanelFamily> {
    name: String,
    decoder: ReportDecoder<F>,
    commander: PanelCommander<F>,
    reader: Option<Box<dyn HidDevice>>,
    read_buf: Vec<u8>,
}

/// The halves of a [`PanelDevice`], for running the reader and command
/// paths on different threads.
pub struct PanelParts<F: PanelFamily> {
    pub name: String,
    pub decoder: ReportDecoder<F>,
    pub commander: PanelCommander<F>,
    pub reader: Option<Box<dyn HidDevice>>,
}

impl<F: PanelFamily> PanelDevice<F> {
    /// A device that starts out disconnected. Call [`PanelDevice::connect`]
    /// once the transport is open.
    pub fn new(name: impl Into<String>, writer: Box<dyn DeviceWriter>, config: EngineConfig) -> Self {
        let name = name.into();
        debug!(family = F::NAME, %name, "panel device created");
        Self {
            name,
            decoder: ReportDecoder::new(config),
            commander: PanelCommander::new(writer, ConnectionState::new()),
            reader: None,
            read_buf: Vec::new(),
        }
    }

    /// Attaches the handle [`PanelDevice::poll`] reads from.
    pub fn with_reader(mut self, reader: Box<dyn HidDevice>) -> Self {
        self.read_buf = vec![0; F::REPORT_LEN.max(OUTPUT_REPORT_LEN)];
        self.reader = Some(reader);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> FrontpanelCapabilities {
        F::capabilities()
    }

    pub fn connect(&self) -> PanelResult<usize> {
        self.commander.connect()
    }

    /// Stops all output and returns the decoder to its pre-connection state.
    pub fn disconnect(&mut self) {
        self.commander.disconnect();
        self.decoder.reset();
    }

    pub fn is_connected(&self) -> bool {
        self.commander.is_connected()
    }

    pub fn on_report<S>(&mut self, data: &[u8], sink: &mut S) -> usize
    where
        S: EventSink<F::Control> + ?Sized,
    {
        self.decoder.on_report(data, sink)
    }

    /// Reads and decodes one report from the attached reader. Without a
    /// reader, or on timeout, nothing happens. Losing the device disconnects
    /// the panel before the error is returned.
    pub fn poll<S>(&mut self, timeout_ms: i32, sink: &mut S) -> PanelResult<usize>
    where
        S: EventSink<F::Control> + ?Sized,
    {
        let Some(reader) = self.reader.as_deref_mut() else {
            return Ok(0);
        };
        let result = self
            .decoder
            .pump(reader, &mut self.read_buf, timeout_ms, sink);
        let lost = !reader.is_connected()
            || matches!(&result, Err(PanelError::Transport(e)) if e.is_disconnect());
        if lost {
            self.disconnect();
        }
        result
    }

    pub fn set_brightness(&self, request: BrightnessRequest) -> PanelResult<usize> {
        self.commander.set_brightness(request)
    }

    pub fn update_leds(&self, leds: &F::Leds) -> PanelResult<usize> {
        self.commander.update_leds(leds)
    }

    pub fn update_display(&self, display: &F::Display) -> PanelResult<usize> {
        self.commander.update_display(display)
    }

    pub fn decoder(&self) -> &ReportDecoder<F> {
        &self.decoder
    }

    pub fn commander(&self) -> &PanelCommander<F> {
        &self.commander
    }

    pub fn split(self) -> PanelParts<F> {
        PanelParts {
            name: self.name,
            decoder: self.decoder,
            commander: self.commander,
            reader: self.reader,
        }
    }
}

impl<F: PanelFamily> std::fmt::Debug for PanelDevice<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelDevice")
            .field("name", &self.name)
            .field("decoder", &self.decoder)
            .field("commander", &self.commander)
            .field("has_reader", &self.reader.is_some())
            .finish()
    }
}
