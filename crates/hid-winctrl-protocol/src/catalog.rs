//! Catalog of supported Winctrl devices.
//!
//! Each entry is keyed by its (vendor ID, product ID) pair, which must be
//! unique across the whole catalog. Discovery matches enumerated HID devices
//! against these entries and skips anything that is not listed.

use std::fmt;

use panel_hid_common::HidDeviceInfo;
use serde::{Deserialize, Serialize};

use crate::ids::{WINCTRL_VENDOR_ID, product_ids};

/// Physical product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    WinctrlMcdu,
    WinctrlPfp3N,
    WinctrlPfp4,
    WinctrlPfp7,
    WinctrlFcu,
    WinctrlFcuLeftEfis,
    WinctrlFcuRightEfis,
    WinctrlFcuBothEfis,
    WinctrlPap3,
    WinctrlPdc3n,
}

/// Seat the unit is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceUser {
    Captain,
    FirstOfficer,
    Observer,
    NotApplicable,
}

/// Which aircraft panel the unit stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    AirbusA320Mcdu,
    Boeing737NGPfp,
    Boeing747Cdu,
    Boeing777Pfp,
    AirbusA320Fcu,
    Boeing737FrontPanel,
    Pdc3n,
}

/// The two halves of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Control and display units with a screen and keyboard.
    Cdu,
    /// Glareshield and pedestal panels with buttons, knobs and segment displays.
    Frontpanel,
}

impl DeviceType {
    pub fn class(self) -> DeviceClass {
        match self {
            Self::AirbusA320Mcdu | Self::Boeing737NGPfp | Self::Boeing747Cdu | Self::Boeing777Pfp => {
                DeviceClass::Cdu
            }
            Self::AirbusA320Fcu | Self::Boeing737FrontPanel | Self::Pdc3n => {
                DeviceClass::Frontpanel
            }
        }
    }
}

/// One supported physical configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceIdentifier {
    pub name: &'static str,
    pub vendor_id: u16,
    pub product_id: u16,
    pub device: Device,
    pub user: DeviceUser,
    pub device_type: DeviceType,
}

impl DeviceIdentifier {
    pub const fn new(
        name: &'static str,
        vendor_id: u16,
        product_id: u16,
        device: Device,
        user: DeviceUser,
        device_type: DeviceType,
    ) -> Self {
        Self {
            name,
            vendor_id,
            product_id,
            device,
            user,
            device_type,
        }
    }

    const fn winctrl(
        name: &'static str,
        product_id: u16,
        device: Device,
        user: DeviceUser,
        device_type: DeviceType,
    ) -> Self {
        Self::new(name, WINCTRL_VENDOR_ID, product_id, device, user, device_type)
    }

    pub fn key(&self) -> (u16, u16) {
        (self.vendor_id, self.product_id)
    }

    pub fn class(&self) -> DeviceClass {
        self.device_type.class()
    }

    pub fn matches(&self, info: &HidDeviceInfo) -> bool {
        info.matches(self.vendor_id, self.product_id)
    }
}

impl fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:04X}:{:04X})",
            self.name, self.vendor_id, self.product_id
        )
    }
}

/// Every device the crate knows how to recognise.
pub struct SupportedDevices;

impl SupportedDevices {
    pub const WINCTRL_MCDU_CAPTAIN: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl MCDU (Captain)",
        product_ids::MCDU_CAPTAIN,
        Device::WinctrlMcdu,
        DeviceUser::Captain,
        DeviceType::AirbusA320Mcdu,
    );
    pub const WINCTRL_MCDU_FIRST_OFFICER: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl MCDU (F/O)",
        product_ids::MCDU_FIRST_OFFICER,
        Device::WinctrlMcdu,
        DeviceUser::FirstOfficer,
        DeviceType::AirbusA320Mcdu,
    );
    pub const WINCTRL_MCDU_OBSERVER: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl MCDU (Observer)",
        product_ids::MCDU_OBSERVER,
        Device::WinctrlMcdu,
        DeviceUser::Observer,
        DeviceType::AirbusA320Mcdu,
    );

    pub const WINCTRL_PFP3N_CAPTAIN: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-3N (Captain)",
        product_ids::PFP3N_CAPTAIN,
        Device::WinctrlPfp3N,
        DeviceUser::Captain,
        DeviceType::Boeing737NGPfp,
    );
    pub const WINCTRL_PFP3N_FIRST_OFFICER: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-3N (F/O)",
        product_ids::PFP3N_FIRST_OFFICER,
        Device::WinctrlPfp3N,
        DeviceUser::FirstOfficer,
        DeviceType::Boeing737NGPfp,
    );
    pub const WINCTRL_PFP3N_OBSERVER: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-3N (Observer)",
        product_ids::PFP3N_OBSERVER,
        Device::WinctrlPfp3N,
        DeviceUser::Observer,
        DeviceType::Boeing737NGPfp,
    );

    pub const WINCTRL_PFP7_CAPTAIN: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-7 (Captain)",
        product_ids::PFP7_CAPTAIN,
        Device::WinctrlPfp7,
        DeviceUser::Captain,
        DeviceType::Boeing777Pfp,
    );
    pub const WINCTRL_PFP7_FIRST_OFFICER: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-7 (F/O)",
        product_ids::PFP7_FIRST_OFFICER,
        Device::WinctrlPfp7,
        DeviceUser::FirstOfficer,
        DeviceType::Boeing777Pfp,
    );
    pub const WINCTRL_PFP7_OBSERVER: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-7 (Observer)",
        product_ids::PFP7_OBSERVER,
        Device::WinctrlPfp7,
        DeviceUser::Observer,
        DeviceType::Boeing777Pfp,
    );

    pub const WINCTRL_PFP4_CAPTAIN: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-4 (Captain)",
        product_ids::PFP4_CAPTAIN,
        Device::WinctrlPfp4,
        DeviceUser::NotApplicable,
        DeviceType::Boeing747Cdu,
    );
    pub const WINCTRL_PFP4_FIRST_OFFICER: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-4 (First Officer)",
        product_ids::PFP4_FIRST_OFFICER,
        Device::WinctrlPfp4,
        DeviceUser::NotApplicable,
        DeviceType::Boeing747Cdu,
    );
    pub const WINCTRL_PFP4_OBSERVER: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PFP-4 (Observer)",
        product_ids::PFP4_OBSERVER,
        Device::WinctrlPfp4,
        DeviceUser::NotApplicable,
        DeviceType::Boeing747Cdu,
    );

    pub const WINCTRL_FCU: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl FCU",
        product_ids::FCU,
        Device::WinctrlFcu,
        DeviceUser::NotApplicable,
        DeviceType::AirbusA320Fcu,
    );
    pub const WINCTRL_FCU_LEFT_EFIS: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl FCU + Left EFIS",
        product_ids::FCU_LEFT_EFIS,
        Device::WinctrlFcuLeftEfis,
        DeviceUser::NotApplicable,
        DeviceType::AirbusA320Fcu,
    );
    pub const WINCTRL_FCU_RIGHT_EFIS: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl FCU + Right EFIS",
        product_ids::FCU_RIGHT_EFIS,
        Device::WinctrlFcuRightEfis,
        DeviceUser::NotApplicable,
        DeviceType::AirbusA320Fcu,
    );
    pub const WINCTRL_FCU_BOTH_EFIS: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl FCU + Both EFIS",
        product_ids::FCU_BOTH_EFIS,
        Device::WinctrlFcuBothEfis,
        DeviceUser::NotApplicable,
        DeviceType::AirbusA320Fcu,
    );

    pub const WINCTRL_PAP3: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PAP-3",
        product_ids::PAP3,
        Device::WinctrlPap3,
        DeviceUser::NotApplicable,
        DeviceType::Boeing737FrontPanel,
    );

    pub const WINCTRL_PDC3N_LEFT: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PDC-3NL",
        product_ids::PDC3N_LEFT,
        Device::WinctrlPdc3n,
        DeviceUser::NotApplicable,
        DeviceType::Pdc3n,
    );
    pub const WINCTRL_PDC3N_RIGHT: DeviceIdentifier = DeviceIdentifier::winctrl(
        "Winctrl PDC-3NR",
        product_ids::PDC3N_RIGHT,
        Device::WinctrlPdc3n,
        DeviceUser::NotApplicable,
        DeviceType::Pdc3n,
    );

    pub const ALL_CDU_DEVICES: &'static [DeviceIdentifier] = &[
        Self::WINCTRL_MCDU_CAPTAIN,
        Self::WINCTRL_MCDU_FIRST_OFFICER,
        Self::WINCTRL_MCDU_OBSERVER,
        Self::WINCTRL_PFP3N_CAPTAIN,
        Self::WINCTRL_PFP3N_FIRST_OFFICER,
        Self::WINCTRL_PFP3N_OBSERVER,
        Self::WINCTRL_PFP7_CAPTAIN,
        Self::WINCTRL_PFP7_FIRST_OFFICER,
        Self::WINCTRL_PFP7_OBSERVER,
        Self::WINCTRL_PFP4_CAPTAIN,
        Self::WINCTRL_PFP4_FIRST_OFFICER,
        Self::WINCTRL_PFP4_OBSERVER,
    ];

    pub const ALL_FRONTPANELS: &'static [DeviceIdentifier] = &[
        Self::WINCTRL_FCU,
        Self::WINCTRL_FCU_LEFT_EFIS,
        Self::WINCTRL_FCU_RIGHT_EFIS,
        Self::WINCTRL_FCU_BOTH_EFIS,
        Self::WINCTRL_PAP3,
        Self::WINCTRL_PDC3N_LEFT,
        Self::WINCTRL_PDC3N_RIGHT,
    ];

    /// CDUs first, then front panels.
    pub fn all() -> impl Iterator<Item = &'static DeviceIdentifier> {
        Self::ALL_CDU_DEVICES.iter().chain(Self::ALL_FRONTPANELS)
    }

    pub fn of_class(class: DeviceClass) -> &'static [DeviceIdentifier] {
        match class {
            DeviceClass::Cdu => Self::ALL_CDU_DEVICES,
            DeviceClass::Frontpanel => Self::ALL_FRONTPANELS,
        }
    }

    /// The entry keyed by (`vendor_id`, `product_id`). `None` means the device
    /// is unsupported.
    pub fn find(vendor_id: u16, product_id: u16) -> Option<&'static DeviceIdentifier> {
        Self::all().find(|id| id.key() == (vendor_id, product_id))
    }

    pub fn identify(info: &HidDeviceInfo) -> Option<&'static DeviceIdentifier> {
        Self::find(info.vendor_id, info.product_id)
    }

    pub fn class_of(vendor_id: u16, product_id: u16) -> Option<DeviceClass> {
        Self::find(vendor_id, product_id).map(DeviceIdentifier::class)
    }

    /// (vendor ID, product ID) pairs listed more than once. Empty for a
    /// well-formed catalog.
    pub fn duplicate_keys() -> Vec<(u16, u16)> {
        let mut keys: Vec<_> = Self::all().map(DeviceIdentifier::key).collect();
        keys.sort_unstable();
        let mut dups: Vec<_> = keys
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] if a == b => Some(*a),
                _ => None,
            })
            .collect();
        dups.dedup();
        dups
    }
}
