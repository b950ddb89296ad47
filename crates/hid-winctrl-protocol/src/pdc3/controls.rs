//! PDC-3N controls and where each one sits in the input report.

use panel_engine::{BitLocation, ControlMap, PanelControl};
use serde::{Deserialize, Serialize};

/// Buttons, switch positions and encoder detents of the PDC-3N.
///
/// Rotary encoders appear as momentary bits, one per direction and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pdc3Control {
    Wxr,
    Sta,
    Wpt,
    Arpt,
    Data,
    Pos,
    Terr,

    Nav1Vor1,
    Nav1Off,
    Nav1Adf1,
    Nav2Vor2,
    Nav2Off,
    Nav2Adf2,

    MinsBaro,
    MinsRadio,
    MinsRst,
    MinsCenter,
    MinsIncSlow,
    MinsDecSlow,
    MinsIncFast,
    MinsDecFast,

    Fpv,
    Mtrs,

    BaroIn,
    BaroHpa,
    BaroStd,
    BaroIncSlow,
    BaroDecSlow,
    BaroCenter,
    BaroIncFast,
    BaroDecFast,

    ModeApp,
    ModeVor,
    ModeMap,
    ModePln,
    ModeCtr,

    Range5,
    Range10,
    Range20,
    Range40,
    Range80,
    Range160,
    Range320,
    Range640,
    RangeTfc,
}

impl PanelControl for Pdc3Control {
    const ALL: &'static [Self] = &[
        Self::Wxr,
        Self::Sta,
        Self::Wpt,
        Self::Arpt,
        Self::Data,
        Self::Pos,
        Self::Terr,
        Self::Nav1Vor1,
        Self::Nav1Off,
        Self::Nav1Adf1,
        Self::Nav2Vor2,
        Self::Nav2Off,
        Self::Nav2Adf2,
        Self::MinsBaro,
        Self::MinsRadio,
        Self::MinsRst,
        Self::MinsCenter,
        Self::MinsIncSlow,
        Self::MinsDecSlow,
        Self::MinsIncFast,
        Self::MinsDecFast,
        Self::Fpv,
        Self::Mtrs,
        Self::BaroIn,
        Self::BaroHpa,
        Self::BaroStd,
        Self::BaroIncSlow,
        Self::BaroDecSlow,
        Self::BaroCenter,
        Self::BaroIncFast,
        Self::BaroDecFast,
        Self::ModeApp,
        Self::ModeVor,
        Self::ModeMap,
        Self::ModePln,
        Self::ModeCtr,
        Self::Range5,
        Self::Range10,
        Self::Range20,
        Self::Range40,
        Self::Range80,
        Self::Range160,
        Self::Range320,
        Self::Range640,
        Self::RangeTfc,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Wxr => "WXR",
            Self::Sta => "STA",
            Self::Wpt => "WPT",
            Self::Arpt => "ARPT",
            Self::Data => "DATA",
            Self::Pos => "POS",
            Self::Terr => "TERR",
            Self::Nav1Vor1 => "NAV1_VOR1",
            Self::Nav1Off => "NAV1_OFF",
            Self::Nav1Adf1 => "NAV1_ADF1",
            Self::Nav2Vor2 => "NAV2_VOR2",
            Self::Nav2Off => "NAV2_OFF",
            Self::Nav2Adf2 => "NAV2_ADF2",
            Self::MinsBaro => "MINS_BARO",
            Self::MinsRadio => "MINS_RADIO",
            Self::MinsRst => "MINS_RST",
            Self::MinsCenter => "MINS_CENTER",
            Self::MinsIncSlow => "MINS_INC_SLOW",
            Self::MinsDecSlow => "MINS_DEC_SLOW",
            Self::MinsIncFast => "MINS_INC_FAST",
            Self::MinsDecFast => "MINS_DEC_FAST",
            Self::Fpv => "FPV",
            Self::Mtrs => "MTRS",
            Self::BaroIn => "BARO_IN",
            Self::BaroHpa => "BARO_HPA",
            Self::BaroStd => "BARO_STD",
            Self::BaroIncSlow => "BARO_INC_SLOW",
            Self::BaroDecSlow => "BARO_DEC_SLOW",
            Self::BaroCenter => "BARO_CENTER",
            Self::BaroIncFast => "BARO_INC_FAST",
            Self::BaroDecFast => "BARO_DEC_FAST",
            Self::ModeApp => "MODE_APP",
            Self::ModeVor => "MODE_VOR",
            Self::ModeMap => "MODE_MAP",
            Self::ModePln => "MODE_PLN",
            Self::ModeCtr => "MODE_CTR",
            Self::Range5 => "RANGE_5",
            Self::Range10 => "RANGE_10",
            Self::Range20 => "RANGE_20",
            Self::Range40 => "RANGE_40",
            Self::Range80 => "RANGE_80",
            Self::Range160 => "RANGE_160",
            Self::Range320 => "RANGE_320",
            Self::Range640 => "RANGE_640",
            Self::RangeTfc => "RANGE_TFC",
        }
    }
}

/// Byte 0 is the report ID. Bytes 7 onward carry no controls; bytes 17..21
/// hold the light sensors.
pub struct Pdc3ControlMap;

impl ControlMap for Pdc3ControlMap {
    type Control = Pdc3Control;

    fn locate(control: Pdc3Control) -> BitLocation {
        use Pdc3Control::*;
        let (flag, offset) = match control {
            Fpv => (0x01, 1),
            Mtrs => (0x02, 1),
            Wxr => (0x04, 1),
            Sta => (0x08, 1),
            Wpt => (0x10, 1),
            Arpt => (0x20, 1),
            Data => (0x40, 1),
            Pos => (0x80, 1),

            Terr => (0x01, 2),
            Nav1Vor1 => (0x02, 2),
            Nav1Off => (0x04, 2),
            Nav1Adf1 => (0x08, 2),
            Nav2Vor2 => (0x10, 2),
            Nav2Off => (0x20, 2),
            Nav2Adf2 => (0x40, 2),
            MinsRst => (0x80, 2),

            ModeCtr => (0x01, 3),
            RangeTfc => (0x02, 3),
            BaroStd => (0x04, 3),
            MinsDecFast => (0x08, 3),
            MinsIncFast => (0x10, 3),
            BaroDecFast => (0x20, 3),
            BaroIncFast => (0x40, 3),
            MinsRadio => (0x80, 3),

            MinsBaro => (0x01, 4),
            BaroIn => (0x02, 4),
            BaroHpa => (0x04, 4),
            ModeApp => (0x08, 4),
            ModeVor => (0x10, 4),
            ModeMap => (0x20, 4),
            ModePln => (0x40, 4),
            Range5 => (0x80, 4),

            Range10 => (0x01, 5),
            Range20 => (0x02, 5),
            Range40 => (0x04, 5),
            Range80 => (0x08, 5),
            Range160 => (0x10, 5),
            Range320 => (0x20, 5),
            Range640 => (0x40, 5),
            MinsDecSlow => (0x80, 5),

            MinsCenter => (0x01, 6),
            MinsIncSlow => (0x02, 6),
            BaroDecSlow => (0x04, 6),
            BaroCenter => (0x08, 6),
            BaroIncSlow => (0x10, 6),
        };
        BitLocation::new(flag, offset)
    }
}
