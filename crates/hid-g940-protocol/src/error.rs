//! Initialization errors.

use flightsim_hid_common::HidCommonError;

/// Why force feedback could not be enabled on a device.
///
/// Only initialization can fail; steady-state play and autocenter updates
/// are fire-and-forget.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The device does not declare the expected 63-byte output report.
    #[error("force-feedback output report does not match the G940 layout: {0}")]
    Descriptor(#[from] HidCommonError),
}
