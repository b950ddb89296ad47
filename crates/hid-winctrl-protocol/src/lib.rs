//! Winctrl cockpit panel protocol support.
//!
//! - [`ids`]: USB vendor and product IDs.
//! - [`catalog`]: every supported unit, keyed by (VID, PID).
//! - [`pdc3`]: the PDC-3N navigation display control family for the panel
//!   engine.
//! - [`discovery`]: matching enumerated devices against the catalog and
//!   opening the ones with a decoder.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod discovery;
pub mod ids;
pub mod pdc3;

pub use catalog::{
    Device, DeviceClass, DeviceIdentifier, DeviceType, DeviceUser, SupportedDevices,
};
pub use discovery::{DiscoveredPanel, PanelFamilyKind, discover_panels, open_pdc3};
pub use ids::{WINCTRL_VENDOR_ID, is_winctrl_product, product_ids};
pub use pdc3::{Pdc3Control, Pdc3ControlMap, Pdc3Device, Pdc3n};
