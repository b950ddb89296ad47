//! Common HID utilities for cockpit panel protocol implementations
//!
//! This crate holds the pieces every panel family shares with the transport:
//! byte cursors over input and output reports, the descriptor of a discovered
//! device, and the read/write/enumerate traits the panel engine is driven
//! through. Concrete transports live behind the traits; the optional `hidapi`
//! feature provides one.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod hid_traits;
#[cfg(feature = "hidapi")]
pub mod hidapi_transport;
pub mod report_parser;

pub use device_info::*;
pub use hid_traits::*;
pub use report_parser::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open device: {0}")]
    OpenError(String),

    #[error("Failed to read from device: {0}")]
    ReadError(String),

    #[error("Failed to write to device: {0}")]
    WriteError(String),

    #[error("Invalid report format: {0}")]
    InvalidReport(String),

    #[error("Device disconnected")]
    Disconnected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HidCommonError {
    /// True when the handle is gone and further I/O on it is pointless.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::Disconnected | Self::DeviceNotFound(_))
    }
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;
