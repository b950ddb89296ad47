//! `hidapi`-backed transport

use crate::{HidCommonError, HidCommonResult, HidDevice, HidDeviceInfo, HidPort};
use async_trait::async_trait;
use std::ffi::CString;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

fn describe(info: &hidapi::DeviceInfo) -> HidDeviceInfo {
    let mut out = HidDeviceInfo::new(
        info.vendor_id(),
        info.product_id(),
        info.path().to_string_lossy().into_owned(),
    )
    .with_usage(info.usage_page(), info.usage());
    if let Some(serial) = info.serial_number() {
        out = out.with_serial(serial);
    }
    if let Some(manufacturer) = info.manufacturer_string() {
        out = out.with_manufacturer(manufacturer);
    }
    if let Some(product) = info.product_string() {
        out = out.with_product_name(product);
    }
    out
}

pub struct HidapiDevice {
    device: hidapi::HidDevice,
    info: HidDeviceInfo,
    connected: bool,
}

impl HidapiDevice {
    fn check(&self) -> HidCommonResult<()> {
        if self.connected {
            Ok(())
        } else {
            Err(HidCommonError::Disconnected)
        }
    }
}

impl HidDevice for HidapiDevice {
    fn write_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
        self.check()?;
        self.device
            .write(data)
            .map_err(|e| HidCommonError::WriteError(e.to_string()))
    }

    fn read_report(&mut self, buf: &mut [u8], timeout_ms: i32) -> HidCommonResult<usize> {
        self.check()?;
        match self.device.read_timeout(buf, timeout_ms) {
            Ok(n) => Ok(n),
            Err(e) => {
                warn!(path = %self.info.path, error = %e, "HID read failed, marking device gone");
                self.connected = false;
                Err(HidCommonError::ReadError(e.to_string()))
            }
        }
    }

    fn device_info(&self) -> &HidDeviceInfo {
        &self.info
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn close(&mut self) -> HidCommonResult<()> {
        self.connected = false;
        Ok(())
    }
}

/// Enumerates and opens devices through a shared `HidApi` context.
pub struct HidapiPort {
    api: Mutex<hidapi::HidApi>,
}

impl HidapiPort {
    pub fn new() -> HidCommonResult<Self> {
        let api = hidapi::HidApi::new().map_err(|e| HidCommonError::OpenError(e.to_string()))?;
        Ok(Self {
            api: Mutex::new(api),
        })
    }

    fn api(&self) -> MutexGuard<'_, hidapi::HidApi> {
        self.api.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HidPort for HidapiPort {
    async fn list_devices(&self) -> HidCommonResult<Vec<HidDeviceInfo>> {
        let api = self.api();
        Ok(api.device_list().map(describe).collect())
    }

    async fn open_device(&self, path: &str) -> HidCommonResult<Box<dyn HidDevice>> {
        let api = self.api();
        let info = api
            .device_list()
            .find(|d| d.path().to_string_lossy() == path)
            .map(describe)
            .ok_or_else(|| HidCommonError::DeviceNotFound(path.to_string()))?;
        let c_path =
            CString::new(path).map_err(|e| HidCommonError::OpenError(e.to_string()))?;
        let device = api
            .open_path(&c_path)
            .map_err(|e| HidCommonError::OpenError(e.to_string()))?;
        debug!(
            "Opened HID device VID=0x{:04X} PID=0x{:04X} at {}",
            info.vendor_id, info.product_id, info.path
        );
        Ok(Box::new(HidapiDevice {
            device,
            info,
            connected: true,
        }))
    }

    async fn refresh(&self) -> HidCommonResult<()> {
        self.api()
            .refresh_devices()
            .map_err(|e| HidCommonError::OpenError(e.to_string()))
    }
}
