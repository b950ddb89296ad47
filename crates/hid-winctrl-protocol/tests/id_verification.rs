//! Golden values for the Winctrl USB IDs.
//!
//! A failure here means a constant in `ids.rs` drifted from the value the
//! hardware enumerates with. Fix the constant, not the test.

use hid_winctrl_protocol::{SupportedDevices, WINCTRL_VENDOR_ID, product_ids};

#[test]
fn vendor_id_is_4098() {
    assert_eq!(WINCTRL_VENDOR_ID, 0x4098);
}

#[test]
fn pdc3n_product_ids() {
    assert_eq!(product_ids::PDC3N_LEFT, 0xBB61);
    assert_eq!(product_ids::PDC3N_RIGHT, 0xBB62);
}

#[test]
fn cdu_product_ids() {
    assert_eq!(
        [
            product_ids::MCDU_CAPTAIN,
            product_ids::MCDU_FIRST_OFFICER,
            product_ids::MCDU_OBSERVER,
        ],
        [0xBB36, 0xBB3E, 0xBB3A]
    );
    assert_eq!(
        [
            product_ids::PFP3N_CAPTAIN,
            product_ids::PFP3N_FIRST_OFFICER,
            product_ids::PFP3N_OBSERVER,
        ],
        [0xBB35, 0xBB3D, 0xBB39]
    );
    assert_eq!(
        [
            product_ids::PFP7_CAPTAIN,
            product_ids::PFP7_FIRST_OFFICER,
            product_ids::PFP7_OBSERVER,
        ],
        [0xBB37, 0xBB3F, 0xBB3B]
    );
    assert_eq!(
        [
            product_ids::PFP4_CAPTAIN,
            product_ids::PFP4_FIRST_OFFICER,
            product_ids::PFP4_OBSERVER,
        ],
        [0xBB38, 0xBB40, 0xBB3C]
    );
}

#[test]
fn front_panel_product_ids() {
    assert_eq!(product_ids::FCU, 0xBB10);
    assert_eq!(product_ids::FCU_LEFT_EFIS, 0xBC1D);
    assert_eq!(product_ids::FCU_RIGHT_EFIS, 0xBC1E);
    assert_eq!(product_ids::FCU_BOTH_EFIS, 0xBA01);
    assert_eq!(product_ids::PAP3, 0xBF0F);
}

#[test]
fn catalog_uses_the_constants() {
    for id in SupportedDevices::all() {
        assert_eq!(id.vendor_id, WINCTRL_VENDOR_ID, "{id}");
        assert!(
            hid_winctrl_protocol::is_winctrl_product(id.product_id),
            "{id} has no constant"
        );
    }
}
