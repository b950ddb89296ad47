//! Engine error types

use panel_hid_common::HidCommonError;
use thiserror::Error;

/// Failures the engine reports to its caller.
///
/// Malformed reports, unmapped bits and commands sent while disconnected are
/// not errors and never appear here.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("transport error: {0}")]
    Transport(#[from] HidCommonError),

    #[error("invalid engine configuration: {0}")]
    Config(String),

    #[error("unsupported device VID=0x{vendor_id:04X} PID=0x{product_id:04X}")]
    UnsupportedDevice { vendor_id: u16, product_id: u16 },
}

pub type PanelResult<T> = Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_device_formats_ids_in_hex() {
        let err = PanelError::UnsupportedDevice {
            vendor_id: 0x4098,
            product_id: 0xBB61,
        };
        assert_eq!(
            err.to_string(),
            "unsupported device VID=0x4098 PID=0xBB61"
        );
    }

    #[test]
    fn transport_errors_convert() {
        let err: PanelError = HidCommonError::Disconnected.into();
        assert!(matches!(err, PanelError::Transport(HidCommonError::Disconnected)));
        assert_eq!(err.to_string(), "transport error: Device disconnected");
    }
}
