//! Ambient-light sensor extraction.

use panel_hid_common::ReportParser;

use crate::event::SensorReading;
use crate::family::SensorState;

/// Raw value of a saturated 12-bit light sensor.
pub const AMBIENT_LIGHT_FULL_SCALE: u16 = 0x0FFF;

/// `round(100 * ((left + right) / 2) / 4095)`, capped at 100.
pub fn ambient_light_percent(left: u16, right: u16) -> u8 {
    let sum = u32::from(left) + u32::from(right);
    let denom = 2 * u32::from(AMBIENT_LIGHT_FULL_SCALE);
    // half-up rounding in integer arithmetic
    let percent = (100 * sum + denom / 2) / denom;
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Two little-endian 16-bit light sensors at fixed report offsets.
///
/// Both raw values start at zero, so a first report carrying zeros raises no
/// reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmbientLightSensors<const LEFT: usize, const RIGHT: usize> {
    left: u16,
    right: u16,
    percent: u8,
}

impl<const LEFT: usize, const RIGHT: usize> AmbientLightSensors<LEFT, RIGHT> {
    pub fn left(&self) -> u16 {
        self.left
    }

    pub fn right(&self) -> u16 {
        self.right
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }
}

impl<const LEFT: usize, const RIGHT: usize> SensorState for AmbientLightSensors<LEFT, RIGHT> {
    fn update(&mut self, report: &[u8]) -> Option<SensorReading> {
        let left = ReportParser::u16_le_at(report, LEFT)?;
        let right = ReportParser::u16_le_at(report, RIGHT)?;
        if left == self.left && right == self.right {
            return None;
        }
        self.left = left;
        self.right = right;

        let percent = ambient_light_percent(left, right);
        if percent == self.percent {
            return None;
        }
        self.percent = percent;
        Some(SensorReading::AmbientLight { percent })
    }

    fn current(&self) -> Option<SensorReading> {
        Some(SensorReading::AmbientLight {
            percent: self.percent,
        })
    }
}
