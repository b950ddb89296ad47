//! Winctrl USB vendor and product ID constants.
//!
//! Every Winctrl panel enumerates under one vendor ID. Units that can be
//! installed at more than one seat carry a separate product ID per seat, so
//! the seat is known at discovery time.

/// Winctrl USB vendor ID.
pub const WINCTRL_VENDOR_ID: u16 = 0x4098;

pub mod product_ids {
    /// A320 MCDU, captain seat.
    pub const MCDU_CAPTAIN: u16 = 0xBB36;
    /// A320 MCDU, first officer seat.
    pub const MCDU_FIRST_OFFICER: u16 = 0xBB3E;
    /// A320 MCDU, observer seat.
    pub const MCDU_OBSERVER: u16 = 0xBB3A;

    /// 737NG PFP-3N CDU, captain seat.
    pub const PFP3N_CAPTAIN: u16 = 0xBB35;
    /// 737NG PFP-3N CDU, first officer seat.
    pub const PFP3N_FIRST_OFFICER: u16 = 0xBB3D;
    /// 737NG PFP-3N CDU, observer seat.
    pub const PFP3N_OBSERVER: u16 = 0xBB39;

    /// 777 PFP-7 CDU, captain seat.
    pub const PFP7_CAPTAIN: u16 = 0xBB37;
    /// 777 PFP-7 CDU, first officer seat.
    pub const PFP7_FIRST_OFFICER: u16 = 0xBB3F;
    /// 777 PFP-7 CDU, observer seat.
    pub const PFP7_OBSERVER: u16 = 0xBB3B;

    /// 747 PFP-4 CDU, captain seat.
    pub const PFP4_CAPTAIN: u16 = 0xBB38;
    /// 747 PFP-4 CDU, first officer seat.
    pub const PFP4_FIRST_OFFICER: u16 = 0xBB40;
    /// 747 PFP-4 CDU, observer seat.
    pub const PFP4_OBSERVER: u16 = 0xBB3C;

    /// A320 FCU on its own.
    pub const FCU: u16 = 0xBB10;
    /// A320 FCU with the captain-side EFIS attached.
    pub const FCU_LEFT_EFIS: u16 = 0xBC1D;
    /// A320 FCU with the first-officer-side EFIS attached.
    pub const FCU_RIGHT_EFIS: u16 = 0xBC1E;
    /// A320 FCU with both EFIS panels attached.
    pub const FCU_BOTH_EFIS: u16 = 0xBA01;

    /// 737 PAP-3 autopilot front panel.
    pub const PAP3: u16 = 0xBF0F;

    /// 737 PDC-3N navigation display control, left-hand unit.
    pub const PDC3N_LEFT: u16 = 0xBB61;
    /// 737 PDC-3N navigation display control, right-hand unit.
    pub const PDC3N_RIGHT: u16 = 0xBB62;
}

/// True for any product ID listed in [`product_ids`].
pub fn is_winctrl_product(product_id: u16) -> bool {
    use product_ids::*;
    matches!(
        product_id,
        MCDU_CAPTAIN
            | MCDU_FIRST_OFFICER
            | MCDU_OBSERVER
            | PFP3N_CAPTAIN
            | PFP3N_FIRST_OFFICER
            | PFP3N_OBSERVER
            | PFP7_CAPTAIN
            | PFP7_FIRST_OFFICER
            | PFP7_OBSERVER
            | PFP4_CAPTAIN
            | PFP4_FIRST_OFFICER
            | PFP4_OBSERVER
            | FCU
            | FCU_LEFT_EFIS
            | FCU_RIGHT_EFIS
            | FCU_BOTH_EFIS
            | PAP3
            | PDC3N_LEFT
            | PDC3N_RIGHT
    )
}
