//! Common HID output plumbing for flight-controller protocol implementations
//!
//! Protocol crates encode reports; this crate describes where those reports go.
//! It provides the output-report layout model used to validate a device's
//! descriptor, the fire-and-forget [`HidOutputTransport`] seam, and a
//! pre-allocated, lock-free [`OutputReportQueue`] that a writer thread drains.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
#[cfg(feature = "hidapi")]
pub mod hidapi_writer;
pub mod output;
pub mod queue;

pub use device_info::*;
#[cfg(feature = "hidapi")]
pub use hidapi_writer::HidapiOutputWriter;
pub use output::*;
pub use queue::OutputReportQueue;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Output report {report_id:#04x} not present in descriptor")]
    ReportNotFound { report_id: u8 },

    #[error("Output report {report_id:#04x} has no field {field_index}")]
    FieldNotFound { report_id: u8, field_index: usize },

    #[error(
        "Output report {report_id:#04x} field {field_index} carries {actual} values, expected {expected}"
    )]
    ReportCountMismatch {
        report_id: u8,
        field_index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Output report {report_id:#04x} uses {bits}-bit values, expected 8-bit")]
    UnsupportedFieldSize { report_id: u8, bits: u8 },

    #[error("Failed to write to device: {0}")]
    WriteError(String),
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;
