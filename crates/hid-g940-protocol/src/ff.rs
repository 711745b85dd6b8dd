//! G940 force-feedback capability object: registration and dispatch.
//!
//! [`Lg3ffForceFeedback`] is bound to one transport at [`init`] time. Every
//! play or autocenter call encodes a fresh report on the stack and hands it
//! to the transport's pre-registered output report without waiting. Separate
//! instances (one per physical stick) share nothing.
//!
//! [`init`]: Lg3ffForceFeedback::init

#![deny(static_mut_refs)]

use crate::config::Lg3ffConfig;
use crate::effect::{EffectCategory, FfEffect, autocenter_report, translate};
use crate::error::InitError;
use crate::ids::{is_g940_product, report_ids};
use crate::report::{Lg3ffReport, REPORT_LEN};
use flightsim_hid_common::{HidOutputTransport, validate_output_report};
use tracing::{debug, info, warn};

/// Force-feedback features advertised to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfCapability {
    Constant,
    Autocenter,
}

/// Capability set registered for the G940.
pub const G940_FF_CAPABILITIES: &[FfCapability] = &[FfCapability::Constant, FfCapability::Autocenter];

/// Outcome of a play request. Both variants are success from the host's
/// point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStatus {
    /// A report was handed to the transport.
    Dispatched,
    /// The category has no G940 mapping; nothing was sent.
    Ignored(EffectCategory),
}

impl PlayStatus {
    pub fn was_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched)
    }
}

/// Callbacks the host's memoryless effect scheduler drives.
///
/// Implementations must not block: `play` may be called from an atomic
/// context.
pub trait MemlessForceFeedback: Send + Sync {
    /// Capabilities registered with the host.
    fn capabilities(&self) -> &'static [FfCapability];

    /// Apply or update an effect. Never fails.
    fn play(&self, effect: &FfEffect) -> PlayStatus;

    /// Set or clear autocentering.
    fn set_autocenter(&self, magnitude: u16);
}

/// Force feedback for one Logitech Flight System G940.
pub struct Lg3ffForceFeedback<T: HidOutputTransport> {
    transport: T,
    report_id: u8,
}

impl<T: HidOutputTransport> Lg3ffForceFeedback<T> {
    /// Validate the device's force-feedback output report and register.
    ///
    /// On success the configured initial autocenter report is sent before
    /// returning.
    ///
    /// # Errors
    ///
    /// [`InitError::Descriptor`] when output report `0x02` is missing, has no
    /// first field, or that field is not exactly 63 byte-wide values. Force
    /// feedback must then not be advertised for the device.
    pub fn init(transport: T, config: &Lg3ffConfig) -> Result<Self, InitError> {
        let report_id = report_ids::FORCE_FEEDBACK;
        let info = transport.device_info();
        let device = info.display_name();

        if !is_g940_product(info.product_id) {
            debug!(
                "Binding G940 force feedback to product 0x{:04X} ({})",
                info.product_id, device
            );
        }

        match validate_output_report(&transport, report_id, 0, REPORT_LEN) {
            Ok(layout) => debug!(
                report_id,
                payload_len = layout.payload_len(),
                "G940 force-feedback output report validated"
            ),
            Err(e) => {
                warn!(%device, error = %e, "G940 force feedback not enabled");
                return Err(e.into());
            }
        }

        let ff = Self {
            transport,
            report_id,
        };
        ff.set_autocenter(config.initial_autocenter);

        info!(
            "Force feedback for Logitech Flight System G940 enabled on {} (autocenter {})",
            device, config.initial_autocenter
        );
        Ok(ff)
    }

    /// Encode `report` and hand it to the transport. Does not block,
    /// allocate, or wait for delivery.
    pub fn send(&self, report: &Lg3ffReport) {
        let bytes = report.encode();
        self.transport.send_output_report(self.report_id, &bytes);
    }

    /// Whether `capability` was registered.
    pub fn supports(&self, capability: FfCapability) -> bool {
        G940_FF_CAPABILITIES.contains(&capability)
    }

    pub fn report_id(&self) -> u8 {
        self.report_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: HidOutputTransport> MemlessForceFeedback for Lg3ffForceFeedback<T> {
    fn capabilities(&self) -> &'static [FfCapability] {
        G940_FF_CAPABILITIES
    }

    fn play(&self, effect: &FfEffect) -> PlayStatus {
        match translate(effect) {
            Some(report) => {
                self.send(&report);
                PlayStatus::Dispatched
            }
            None => PlayStatus::Ignored(effect.category()),
        }
    }

    fn set_autocenter(&self, magnitude: u16) {
        self.send(&autocenter_report(magnitude));
    }
}
