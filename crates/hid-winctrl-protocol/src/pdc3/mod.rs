//! PDC-3N navigation display control panel.
//!
//! # Input report (25 bytes)
//!
//! | Offset | Content |
//! |--------|---------|
//! | 0 | Report ID |
//! | 1..=6 | Control bits, see [`Pdc3ControlMap`] |
//! | 7..17 | Unused |
//! | 17..19 | Left ambient light sensor, u16 LE, 0..=4095 |
//! | 19..21 | Right ambient light sensor, u16 LE, 0..=4095 |
//! | 21..25 | Unused |
//!
//! # Output
//!
//! Every command opens with the prefix `0x60BB`. The unit has a single
//! backlight channel (sub-command `0x00`) that follows the LED backlight
//! level. After opening, the host sends `F0 02` padded to 64 bytes.

pub mod controls;

use panel_engine::{
    AmbientLightSensors, BacklightChannel, BacklightSource, OutputReport, PanelDevice, PanelFamily,
};

pub use controls::{Pdc3Control, Pdc3ControlMap};

/// Input reports shorter than this are dropped.
pub const PDC3_REPORT_LEN: usize = 25;

pub const PDC3_COMMAND_PREFIX: u16 = 0x60BB;

/// First two bytes of the packet sent after opening the device.
pub const PDC3_INIT_HEADER: [u8; 2] = [0xF0, 0x02];

pub const LEFT_LIGHT_SENSOR_OFFSET: usize = 17;
pub const RIGHT_LIGHT_SENSOR_OFFSET: usize = 19;

pub type Pdc3Sensors = AmbientLightSensors<LEFT_LIGHT_SENSOR_OFFSET, RIGHT_LIGHT_SENSOR_OFFSET>;

/// Family marker for both PDC-3N units. Left and right units share the
/// report layout and command set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pdc3n;

impl PanelFamily for Pdc3n {
    const NAME: &'static str = "pdc3n";
    const MIN_REPORT_LEN: usize = PDC3_REPORT_LEN;
    const REPORT_LEN: usize = PDC3_REPORT_LEN;
    const COMMAND_PREFIX: u16 = PDC3_COMMAND_PREFIX;
    const BACKLIGHT_CHANNELS: &'static [BacklightChannel] =
        &[BacklightChannel::new(0x00, BacklightSource::Led)];

    type Control = Pdc3Control;
    type Map = Pdc3ControlMap;
    type Sensors = Pdc3Sensors;
    type Leds = ();
    type Display = ();

    fn init_packet(report: &mut OutputReport) -> bool {
        report.write_at(0, &PDC3_INIT_HEADER);
        true
    }
}

pub type Pdc3Device = PanelDevice<Pdc3n>;
