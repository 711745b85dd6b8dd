//! Logitech G940 USB and report ID constants.

#![deny(static_mut_refs)]

/// Logitech USB vendor ID.
pub const LOGITECH_VENDOR_ID: u16 = 0x046D;

/// Report IDs used by the G940 force-feedback interface.
pub mod report_ids {
    /// Output report carrying the 63-byte two-axis force-feedback payload.
    pub const FORCE_FEEDBACK: u8 = 0x02;
}

/// Known product IDs.
pub mod product_ids {
    /// Flight System G940 (stick with dual-axis force feedback).
    pub const G940: u16 = 0xC287;
}

/// Return `true` if the product ID is a G940 stick.
pub fn is_g940_product(product_id: u16) -> bool {
    product_id == product_ids::G940
}
