//! Catalog-based enumeration and family dispatch.

use std::collections::HashSet;

use panel_engine::{EngineConfig, PanelDevice, PanelError, PanelResult};
use panel_hid_common::{HidCommonResult, HidDeviceInfo, HidPort};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{DeviceIdentifier, DeviceType, SupportedDevices};
use crate::pdc3::{Pdc3Device, Pdc3n};

/// Panel families this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PanelFamilyKind {
    Pdc3n,
}

impl PanelFamilyKind {
    /// `None` for catalog entries that have no decoder yet.
    pub fn for_device(identifier: &DeviceIdentifier) -> Option<Self> {
        match identifier.device_type {
            DeviceType::Pdc3n => Some(Self::Pdc3n),
            DeviceType::AirbusA320Mcdu
            | DeviceType::Boeing737NGPfp
            | DeviceType::Boeing747Cdu
            | DeviceType::Boeing777Pfp
            | DeviceType::AirbusA320Fcu
            | DeviceType::Boeing737FrontPanel => None,
        }
    }
}

/// An enumerated device that matched a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredPanel {
    pub identifier: &'static DeviceIdentifier,
    pub info: HidDeviceInfo,
}

impl DiscoveredPanel {
    pub fn family(&self) -> Option<PanelFamilyKind> {
        PanelFamilyKind::for_device(self.identifier)
    }
}

/// Lists the devices on `port` that appear in the catalog, in enumeration
/// order. A path reported more than once is kept once.
///
/// Matching is on (VID, PID) alone. A unit that exposes several HID
/// interfaces yields one entry per interface path; callers pick the one to
/// open from `info.usage_page` and `info.usage`.
///
/// # Errors
///
/// Returns the port's error if enumeration fails.
pub async fn discover_panels(port: &dyn HidPort) -> HidCommonResult<Vec<DiscoveredPanel>> {
    let devices = port.list_devices().await?;
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for info in devices {
        let Some(identifier) = SupportedDevices::identify(&info) else {
            debug!(
                vendor_id = info.vendor_id,
                product_id = info.product_id,
                path = %info.path,
                "skipping unsupported device"
            );
            continue;
        };
        if !seen.insert(info.path.clone()) {
            debug!(path = %info.path, "skipping duplicate device path");
            continue;
        }
        info!(device = %identifier, path = %info.path, "discovered panel");
        found.push(DiscoveredPanel { identifier, info });
    }

    Ok(found)
}

/// Opens a discovered PDC-3N and connects it.
///
/// The path is opened twice: one handle feeds [`PanelDevice::poll`], the
/// other carries output commands.
///
/// # Errors
///
/// [`PanelError::UnsupportedDevice`] if `discovered` is not a PDC-3N, or the
/// transport error if opening or the init packet fails.
pub async fn open_pdc3(
    port: &dyn HidPort,
    discovered: &DiscoveredPanel,
    config: EngineConfig,
) -> PanelResult<Pdc3Device> {
    if discovered.family() != Some(PanelFamilyKind::Pdc3n) {
        return Err(PanelError::UnsupportedDevice {
            vendor_id: discovered.identifier.vendor_id,
            product_id: discovered.identifier.product_id,
        });
    }

    let path = discovered.info.path.as_str();
    let writer = port.open_device(path).await?;
    let reader = port.open_device(path).await?;

    let device = PanelDevice::<Pdc3n>::new(discovered.identifier.name, Box::new(writer), config)
        .with_reader(reader);
    device.connect()?;
    info!(device = %discovered.identifier, path, "panel connected");
    Ok(device)
}
