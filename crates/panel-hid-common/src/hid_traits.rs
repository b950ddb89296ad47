//! HID transport traits
//!
//! The panel engine never talks to an OS handle directly. It reads input
//! reports through [`HidDevice`], writes output reports through
//! [`DeviceWriter`], and discovers hardware through [`HidPort`].

use crate::{HidCommonError, HidCommonResult, HidDeviceInfo};
use async_trait::async_trait;

/// An open HID handle.
///
/// `read_report` fills a caller-owned buffer so a reader loop can reuse one
/// allocation for the lifetime of the device. A return of `Ok(0)` means the
/// timeout elapsed without a report.
pub trait HidDevice: Send {
    fn write_report(&mut self, data: &[u8]) -> HidCommonResult<usize>;

    fn read_report(&mut self, buf: &mut [u8], timeout_ms: i32) -> HidCommonResult<usize>;

    fn device_info(&self) -> &HidDeviceInfo;

    fn is_connected(&self) -> bool;

    fn close(&mut self) -> HidCommonResult<()>;
}

impl<T: HidDevice + ?Sized> HidDevice for Box<T> {
    fn write_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
        (**self).write_report(data)
    }

    fn read_report(&mut self, buf: &mut [u8], timeout_ms: i32) -> HidCommonResult<usize> {
        (**self).read_report(buf, timeout_ms)
    }

    fn device_info(&self) -> &HidDeviceInfo {
        (**self).device_info()
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn close(&mut self) -> HidCommonResult<()> {
        (**self).close()
    }
}

/// Write half of a device, as seen by output-command encoders.
pub trait DeviceWriter: Send {
    fn write_output_report(&mut self, data: &[u8]) -> HidCommonResult<usize>;
}

impl<T: HidDevice + ?Sized> DeviceWriter for T {
    fn write_output_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
        self.write_report(data)
    }
}

#[async_trait]
pub trait HidPort: Send + Sync {
    async fn list_devices(&self) -> HidCommonResult<Vec<HidDeviceInfo>>;

    async fn open_device(&self, path: &str) -> HidCommonResult<Box<dyn HidDevice>>;

    async fn refresh(&self) -> HidCommonResult<()>;
}

pub mod mock {
    //! In-memory transport for tests. Clones of a [`MockHidDevice`] share
    //! state, so a test can keep one handle and inspect what was written
    //! through another.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, MutexGuard};

    #[derive(Debug, Default)]
    struct MockState {
        reads: VecDeque<Vec<u8>>,
        output_writes: Vec<Vec<u8>>,
        disconnected: bool,
    }

    #[derive(Debug, Clone)]
    pub struct MockHidDevice {
        info: HidDeviceInfo,
        state: Arc<Mutex<MockState>>,
    }

    impl MockHidDevice {
        pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
            Self::from_info(HidDeviceInfo::new(vendor_id, product_id, path))
        }

        pub fn from_info(info: HidDeviceInfo) -> Self {
            Self {
                info,
                state: Arc::new(Mutex::new(MockState::default())),
            }
        }

        fn state(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }

        pub fn queue_read(&self, data: impl Into<Vec<u8>>) {
            self.state().reads.push_back(data.into());
        }

        pub fn pending_reads(&self) -> usize {
            self.state().reads.len()
        }

        pub fn output_writes(&self) -> Vec<Vec<u8>> {
            self.state().output_writes.clone()
        }

        pub fn clear_writes(&self) {
            self.state().output_writes.clear();
        }

        pub fn disconnect(&self) {
            self.state().disconnected = true;
        }

        pub fn reconnect(&self) {
            self.state().disconnected = false;
        }
    }

    impl HidDevice for MockHidDevice {
        fn write_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
            let mut state = self.state();
            if state.disconnected {
                return Err(HidCommonError::Disconnected);
            }
            state.output_writes.push(data.to_vec());
            Ok(data.len())
        }

        fn read_report(&mut self, buf: &mut [u8], _timeout_ms: i32) -> HidCommonResult<usize> {
            let mut state = self.state();
            if state.disconnected {
                return Err(HidCommonError::Disconnected);
            }
            let Some(report) = state.reads.pop_front() else {
                return Ok(0);
            };
            let len = report.len().min(buf.len());
            if let (Some(dst), Some(src)) = (buf.get_mut(..len), report.get(..len)) {
                dst.copy_from_slice(src);
            }
            Ok(len)
        }

        fn device_info(&self) -> &HidDeviceInfo {
            &self.info
        }

        fn is_connected(&self) -> bool {
            !self.state().disconnected
        }

        fn close(&mut self) -> HidCommonResult<()> {
            self.disconnect();
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    pub struct MockHidPort {
        devices: Vec<MockHidDevice>,
    }

    impl MockHidPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_device(&mut self, device: MockHidDevice) {
            self.devices.push(device);
        }

        pub fn device_count(&self) -> usize {
            self.devices.len()
        }
    }

    #[async_trait]
    impl HidPort for MockHidPort {
        async fn list_devices(&self) -> HidCommonResult<Vec<HidDeviceInfo>> {
            Ok(self.devices.iter().map(|d| d.info.clone()).collect())
        }

        async fn open_device(&self, path: &str) -> HidCommonResult<Box<dyn HidDevice>> {
            let device = self
                .devices
                .iter()
                .find(|d| d.info.path == path)
                .ok_or_else(|| HidCommonError::DeviceNotFound(path.to_string()))?;
            if !device.is_connected() {
                return Err(HidCommonError::OpenError(format!("{path} is unplugged")));
            }
            Ok(Box::new(device.clone()))
        }

        async fn refresh(&self) -> HidCommonResult<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockHidDevice;
    use super::*;

    #[test]
    fn mock_read_fills_caller_buffer() -> Result<(), HidCommonError> {
        let mut device = MockHidDevice::new(0x4098, 0xBB61, "/dev/hidraw0");
        device.queue_read(vec![0xAA, 0xBB, 0xCC]);

        let mut buf = [0u8; 8];
        assert_eq!(device.read_report(&mut buf, 10)?, 3);
        assert_eq!(buf, [0xAA, 0xBB, 0xCC, 0, 0, 0, 0, 0]);
        assert_eq!(device.read_report(&mut buf, 10)?, 0, "empty queue is a timeout");
        Ok(())
    }

    #[test]
    fn mock_read_truncates_to_buffer() -> Result<(), HidCommonError> {
        let mut device = MockHidDevice::new(0x4098, 0xBB61, "/dev/hidraw0");
        device.queue_read(vec![1, 2, 3, 4]);

        let mut buf = [0u8; 2];
        assert_eq!(device.read_report(&mut buf, 10)?, 2);
        assert_eq!(buf, [1, 2]);
        Ok(())
    }

    #[test]
    fn clones_share_write_history() -> Result<(), HidCommonError> {
        let observer = MockHidDevice::new(0x4098, 0xBB61, "/dev/hidraw0");
        let mut writer: Box<dyn DeviceWriter> = Box::new(observer.clone());

        writer.write_output_report(&[0x60, 0xBB])?;
        writer.write_output_report(&[0xF0, 0x02])?;

        assert_eq!(observer.output_writes(), vec![vec![0x60, 0xBB], vec![0xF0, 0x02]]);
        Ok(())
    }

    #[test]
    fn disconnected_mock_rejects_io() {
        let mut device = MockHidDevice::new(0x4098, 0xBB61, "/dev/hidraw0");
        device.disconnect();

        assert!(!device.is_connected());
        assert!(matches!(
            device.write_report(&[0x01]),
            Err(HidCommonError::Disconnected)
        ));
        let mut buf = [0u8; 4];
        assert!(matches!(
            device.read_report(&mut buf, 0),
            Err(HidCommonError::Disconnected)
        ));
    }

    #[test]
    fn boxed_device_forwards() -> Result<(), HidCommonError> {
        let observer = MockHidDevice::new(0x4098, 0xBB62, "/dev/hidraw1");
        let mut boxed: Box<dyn HidDevice> = Box::new(observer.clone());

        assert_eq!(boxed.device_info().product_id, 0xBB62);
        boxed.write_output_report(&[0x01, 0x02])?;
        boxed.close()?;

        assert_eq!(observer.output_writes().len(), 1);
        assert!(!observer.is_connected());
        Ok(())
    }
}
