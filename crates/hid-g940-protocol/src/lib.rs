//! Logitech Flight System G940 force feedback: report codec, effect
//! translation, and fire-and-forget dispatch.
//!
//! The encoding layer is pure and allocation-free. Dispatch copies a stack
//! buffer into the transport and returns; nothing here blocks, so the play
//! and autocenter paths may be driven from a non-blocking context.

#![deny(static_mut_refs)]

pub mod config;
pub mod effect;
pub mod error;
pub mod ff;
pub mod ids;
pub mod report;

pub use config::Lg3ffConfig;
pub use effect::{
    EffectCategory, FfEffect, RampLevels, autocenter_report, constant_force_report, translate,
};
pub use error::InitError;
pub use ff::{FfCapability, G940_FF_CAPABILITIES, Lg3ffForceFeedback, MemlessForceFeedback, PlayStatus};
pub use ids::{LOGITECH_VENDOR_ID, is_g940_product, product_ids, report_ids};
pub use report::{AXIS_BLOCK_LEN, AxisParameters, Lg3ffReport, REPORT_LEN, TRAILER_LEN, encode_report};
