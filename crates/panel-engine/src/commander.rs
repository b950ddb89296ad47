//! Output command path and the connected flag it shares with the reader.

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use panel_hid_common::DeviceWriter;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{PanelError, PanelResult};
use crate::family::PanelFamily;
use crate::output::{BrightnessRequest, OutputReport, encode_brightness_command};

/// Connected flag shared between the reader and command contexts.
///
/// Loads are `Acquire` and updates release, so a command issued after a
/// teardown is observed never reaches the old handle.
#[derive(Debug, Clone, Default)]
pub struct ConnectionState {
    connected: Arc<AtomicBool>,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Stores the new state and returns the previous one.
    pub fn set_connected(&self, connected: bool) -> bool {
        self.connected.swap(connected, Ordering::AcqRel)
    }
}

/// Sends commands to one panel.
///
/// Cheap to clone; clones share the writer and the connected flag. Every
/// command is a silent no-op while disconnected, and callers never need to
/// check first. The `usize` results count reports actually written.
pub struct PanelCommander<F: PanelFamily> {
    writer: Arc<Mutex<Box<dyn DeviceWriter>>>,
    state: ConnectionState,
    _family: PhantomData<fn() -> F>,
}

impl<F: PanelFamily> Clone for PanelCommander<F> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            state: self.state.clone(),
            _family: PhantomData,
        }
    }
}

impl<F: PanelFamily> PanelCommander<F> {
    pub fn new(writer: Box<dyn DeviceWriter>, state: ConnectionState) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            state,
            _family: PhantomData,
        }
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Marks the panel connected and sends the family's init packet.
    ///
    /// If the init packet fails, the flag returns to its previous value.
    ///
    /// # Errors
    ///
    /// [`PanelError::Transport`] if the init packet write fails for a reason
    /// other than the device going away.
    pub fn connect(&self) -> PanelResult<usize> {
        let was_connected = self.state.set_connected(true);
        let mut init = OutputReport::new();
        if !F::init_packet(&mut init) {
            debug!(family = F::NAME, was_connected, "panel connected");
            return Ok(0);
        }
        match self.send(&init) {
            Ok(sent) => {
                debug!(family = F::NAME, was_connected, "panel connected");
                Ok(sent)
            }
            Err(e) => {
                let _writer = self.writer.lock();
                self.state.set_connected(was_connected);
                warn!(family = F::NAME, error = %e, "init packet failed, panel not connected");
                Err(e)
            }
        }
    }

    /// Once this returns, no write is in flight and none will start.
    pub fn disconnect(&self) {
        let _writer = self.writer.lock();
        if self.state.set_connected(false) {
            debug!(family = F::NAME, "panel disconnected");
        }
    }

    /// One command per backlight channel the family has. Channels the family
    /// lacks are skipped.
    pub fn set_brightness(&self, request: BrightnessRequest) -> PanelResult<usize> {
        let mut written = 0;
        for channel in F::BACKLIGHT_CHANNELS {
            let report = encode_brightness_command(
                F::COMMAND_PREFIX,
                channel.sub_command,
                request.level(channel.source),
            );
            written += self.send(&report)?;
        }
        Ok(written)
    }

    pub fn update_leds(&self, leds: &F::Leds) -> PanelResult<usize> {
        let mut report = OutputReport::new();
        if F::encode_leds(leds, &mut report) {
            self.send(&report)
        } else {
            Ok(0)
        }
    }

    pub fn update_display(&self, display: &F::Display) -> PanelResult<usize> {
        let mut report = OutputReport::new();
        if F::encode_display(display, &mut report) {
            self.send(&report)
        } else {
            Ok(0)
        }
    }

    fn send(&self, report: &OutputReport) -> PanelResult<usize> {
        let mut writer = self.writer.lock();
        // must be read while holding the writer lock
        if !self.state.is_connected() {
            return Ok(0);
        }
        match writer.write_output_report(report.as_bytes()) {
            Ok(_) => Ok(1),
            Err(e) if e.is_disconnect() => {
                self.state.set_connected(false);
                warn!(
                    family = F::NAME,
                    prefix = report.command_prefix(),
                    "device went away during write, command dropped"
                );
                Ok(0)
            }
            Err(e) => Err(PanelError::Transport(e)),
        }
    }
}

impl<F: PanelFamily> std::fmt::Debug for PanelCommander<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelCommander")
            .field("family", &F::NAME)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}
