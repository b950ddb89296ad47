//! The capability interface each panel family implements.

use std::fmt::Debug;

use crate::capabilities::FrontpanelCapabilities;
use crate::control::{ControlMap, PanelControl};
use crate::event::SensorReading;
use crate::output::{BacklightChannel, OutputReport};

/// Whether generic control diffing or the family's sensor extraction runs
/// first for each report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingOrder {
    #[default]
    ControlsFirst,
    SensorsFirst,
}

/// Derived fields a family computes from each accepted input report.
pub trait SensorState: Default + Debug + Send {
    /// Re-reads the fields from `report`. Returns a reading only when the
    /// value consumers see has changed.
    fn update(&mut self, report: &[u8]) -> Option<SensorReading>;

    /// Current value, if the family has one.
    fn current(&self) -> Option<SensorReading>;
}

/// For families without derived fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSensors;

impl SensorState for NoSensors {
    fn update(&mut self, _report: &[u8]) -> Option<SensorReading> {
        None
    }

    fn current(&self) -> Option<SensorReading> {
        None
    }
}

/// One device family: its report layout and its output command set.
///
/// Implementors are zero-sized markers. The engine monomorphises over them, so
/// control lookups and sensor extraction are static calls.
pub trait PanelFamily: Send + Sync + 'static {
    const NAME: &'static str;

    /// Reports shorter than this are dropped unread.
    const MIN_REPORT_LEN: usize;

    /// Nominal input report size, used to size the snapshot buffer.
    const REPORT_LEN: usize;

    /// 16-bit prefix opening every command for this family.
    const COMMAND_PREFIX: u16;

    /// Backlight channels, in the order brightness commands are sent.
    const BACKLIGHT_CHANNELS: &'static [BacklightChannel];

    const PROCESSING_ORDER: ProcessingOrder = ProcessingOrder::ControlsFirst;

    type Control: PanelControl;
    type Map: ControlMap<Control = Self::Control>;
    type Sensors: SensorState;
    type Leds;
    type Display;

    /// Fills the packet sent right after connecting. Return `false` when the
    /// family needs none.
    fn init_packet(report: &mut OutputReport) -> bool;

    /// Return `false` to send nothing.
    fn encode_leds(_leds: &Self::Leds, _report: &mut OutputReport) -> bool {
        false
    }

    /// Return `false` to send nothing.
    fn encode_display(_display: &Self::Display, _report: &mut OutputReport) -> bool {
        false
    }

    fn capabilities() -> FrontpanelCapabilities {
        FrontpanelCapabilities::NONE
    }
}
