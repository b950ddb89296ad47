//! Device engine for cockpit HID panels.
//!
//! One decoding algorithm serves every panel family. A family plugs in through
//! [`PanelFamily`]: its control enumeration, the [`ControlMap`] that places each
//! control on a bit of the input report, any derived sensor fields, and the
//! framing of its output commands. The engine supplies the rest:
//!
//! - [`ReportDecoder`] diffs each input report against the previous snapshot
//!   and emits edge-triggered [`PanelEvent`]s to an [`EventSink`].
//! - [`PanelCommander`] encodes brightness, LED and display requests into
//!   64-byte [`OutputReport`]s and drops them while the device is disconnected.
//! - [`PanelDevice`] ties both halves to one [`ConnectionState`].
//!
//! Malformed input never surfaces as an error. Short reports are dropped,
//! bits with no control are ignored, and commands to a disconnected device do
//! nothing.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod capabilities;
pub mod commander;
pub mod config;
pub mod control;
pub mod decoder;
pub mod device;
pub mod error;
pub mod event;
pub mod family;
pub mod output;
pub mod sensors;

pub use capabilities::FrontpanelCapabilities;
pub use commander::{ConnectionState, PanelCommander};
pub use config::{EngineConfig, InitialReportPolicy};
pub use control::{BitLocation, ControlMap, ControlTable, PanelControl, TableConflict, mapped_controls};
pub use decoder::ReportDecoder;
pub use device::{PanelDevice, PanelParts};
pub use error::{PanelError, PanelResult};
pub use event::{EventSink, FilteredSink, NullSink, PanelEvent, SensorReading, event_channel};
pub use family::{NoSensors, PanelFamily, ProcessingOrder, SensorState};
pub use output::{
    BacklightChannel, BacklightSource, BrightnessRequest, OUTPUT_REPORT_LEN, OutputReport,
    encode_brightness_command,
};
pub use sensors::{AMBIENT_LIGHT_FULL_SCALE, AmbientLightSensors, ambient_light_percent};
