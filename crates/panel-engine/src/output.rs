//! Output report framing.
//!
//! Every command a panel accepts is one fixed 64-byte output report:
//!
//! ```text
//! byte 0..2   command prefix, big-endian (0x60BB -> 60 BB)
//! byte 2      sub-command (backlight channel)
//! byte 3      value
//! byte 4..64  zero
//! ```

use panel_hid_common::{ReportBuilder, ReportParser};
use serde::{Deserialize, Serialize};

pub const OUTPUT_REPORT_LEN: usize = 64;

/// A fixed-size output report, zero-filled by default.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OutputReport {
    bytes: [u8; OUTPUT_REPORT_LEN],
}

impl OutputReport {
    pub const fn new() -> Self {
        Self {
            bytes: [0; OUTPUT_REPORT_LEN],
        }
    }

    /// Copies `data` into a zeroed report. Anything past 64 bytes is cut off.
    pub fn from_slice(data: &[u8]) -> Self {
        let mut report = Self::new();
        report.write_at(0, data);
        report
    }

    /// Writes `data` starting at `offset`, clipped to the report.
    pub fn write_at(&mut self, offset: usize, data: &[u8]) {
        let Some(tail) = self.bytes.get_mut(offset..) else {
            return;
        };
        let len = data.len().min(tail.len());
        if let (Some(dst), Some(src)) = (tail.get_mut(..len), data.get(..len)) {
            dst.copy_from_slice(src);
        }
    }

    pub fn as_bytes(&self) -> &[u8; OUTPUT_REPORT_LEN] {
        &self.bytes
    }

    pub fn command_prefix(&self) -> u16 {
        ReportParser::new(&self.bytes)
            .read_u16_be()
            .unwrap_or_default()
    }
}

impl Default for OutputReport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OutputReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self
            .bytes
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        f.debug_struct("OutputReport")
            .field("bytes", &self.bytes.get(..used).unwrap_or_default())
            .field("len", &OUTPUT_REPORT_LEN)
            .finish()
    }
}

/// Frames one brightness command.
pub fn encode_brightness_command(prefix: u16, sub_command: u8, value: u8) -> OutputReport {
    let mut builder = ReportBuilder::with_capacity(OUTPUT_REPORT_LEN);
    builder.write_u16_be(prefix).write_u8(sub_command).write_u8(value);
    OutputReport::from_slice(builder.as_slice())
}

/// Which requested level a backlight channel is driven from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklightSource {
    Panel,
    Lcd,
    Led,
}

/// One backlight channel a family exposes, addressed by its sub-command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BacklightChannel {
    pub sub_command: u8,
    pub source: BacklightSource,
}

impl BacklightChannel {
    pub const fn new(sub_command: u8, source: BacklightSource) -> Self {
        Self {
            sub_command,
            source,
        }
    }
}

/// Requested levels for the three backlight groups a panel may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BrightnessRequest {
    pub panel_backlight: u8,
    pub lcd_backlight: u8,
    pub led_backlight: u8,
}

impl BrightnessRequest {
    pub const fn new(panel_backlight: u8, lcd_backlight: u8, led_backlight: u8) -> Self {
        Self {
            panel_backlight,
            lcd_backlight,
            led_backlight,
        }
    }

    /// The same level on every group.
    pub const fn uniform(level: u8) -> Self {
        Self::new(level, level, level)
    }

    pub fn level(&self, source: BacklightSource) -> u8 {
        match source {
            BacklightSource::Panel => self.panel_backlight,
            BacklightSource::Lcd => self.lcd_backlight,
            BacklightSource::Led => self.led_backlight,
        }
    }
}
