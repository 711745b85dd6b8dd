//! Output-report layouts and the fire-and-forget transport seam

use crate::{HidCommonError, HidCommonResult, HidDeviceInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One main-item field of an output report: `report_count` values of
/// `report_size_bits` bits each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputField {
    pub report_count: usize,
    pub report_size_bits: u8,
}

impl OutputField {
    /// A field made of `count` byte-wide values.
    pub const fn bytes(count: usize) -> Self {
        Self {
            report_count: count,
            report_size_bits: 8,
        }
    }

    /// Total size of the field in bytes, rounded up.
    pub fn len_bytes(&self) -> usize {
        (self.report_count * usize::from(self.report_size_bits)).div_ceil(8)
    }
}

/// Output report as declared by a device's report descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputReportLayout {
    pub report_id: u8,
    pub fields: Vec<OutputField>,
}

impl OutputReportLayout {
    pub fn new(report_id: u8) -> Self {
        Self {
            report_id,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: OutputField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, index: usize) -> Option<&OutputField> {
        self.fields.get(index)
    }

    /// Payload length in bytes, excluding the report ID.
    pub fn payload_len(&self) -> usize {
        self.fields.iter().map(OutputField::len_bytes).sum()
    }
}

/// Transport that owns a device's registered output reports.
///
/// `send_output_report` is fire-and-forget: it must copy `data` into storage
/// the transport already owns and return without blocking, sleeping, or
/// allocating. It may be called concurrently from several contexts; any
/// serialization of the destination buffer is the implementation's job.
/// Failures are the transport's to handle and are never reported back.
pub trait HidOutputTransport: Send + Sync {
    fn device_info(&self) -> &HidDeviceInfo;

    fn output_report_layout(&self, report_id: u8) -> Option<&OutputReportLayout>;

    fn send_output_report(&self, report_id: u8, data: &[u8]);
}

impl<T: HidOutputTransport + ?Sized> HidOutputTransport for Arc<T> {
    fn device_info(&self) -> &HidDeviceInfo {
        (**self).device_info()
    }

    fn output_report_layout(&self, report_id: u8) -> Option<&OutputReportLayout> {
        (**self).output_report_layout(report_id)
    }

    fn send_output_report(&self, report_id: u8, data: &[u8]) {
        (**self).send_output_report(report_id, data)
    }
}

impl<T: HidOutputTransport + ?Sized> HidOutputTransport for &T {
    fn device_info(&self) -> &HidDeviceInfo {
        (**self).device_info()
    }

    fn output_report_layout(&self, report_id: u8) -> Option<&OutputReportLayout> {
        (**self).output_report_layout(report_id)
    }

    fn send_output_report(&self, report_id: u8, data: &[u8]) {
        (**self).send_output_report(report_id, data)
    }
}

/// Check that output report `report_id` exists, has a field at
/// `field_index`, and that the field carries exactly `expected_count`
/// byte-wide values.
///
/// # Errors
///
/// Returns the [`HidCommonError`] variant naming the first mismatch.
pub fn validate_output_report<T: HidOutputTransport + ?Sized>(
    transport: &T,
    report_id: u8,
    field_index: usize,
    expected_count: usize,
) -> HidCommonResult<&OutputReportLayout> {
    let layout = transport
        .output_report_layout(report_id)
        .ok_or(HidCommonError::ReportNotFound { report_id })?;

    let field = layout
        .field(field_index)
        .ok_or(HidCommonError::FieldNotFound {
            report_id,
            field_index,
        })?;

    if field.report_size_bits != 8 {
        return Err(HidCommonError::UnsupportedFieldSize {
            report_id,
            bits: field.report_size_bits,
        });
    }

    if field.report_count != expected_count {
        return Err(HidCommonError::ReportCountMismatch {
            report_id,
            field_index,
            expected: expected_count,
            actual: field.report_count,
        });
    }

    Ok(layout)
}

pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// A report captured by [`MockOutputDevice`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentReport {
        pub report_id: u8,
        pub data: Vec<u8>,
    }

    /// Recording transport for tests. Serializes writes behind a mutex, which
    /// is fine off the real device path.
    pub struct MockOutputDevice {
        info: HidDeviceInfo,
        layouts: Vec<OutputReportLayout>,
        sent: Mutex<Vec<SentReport>>,
        connected: AtomicBool,
    }

    impl MockOutputDevice {
        pub fn new(info: HidDeviceInfo) -> Self {
            Self {
                info,
                layouts: Vec::new(),
                sent: Mutex::new(Vec::new()),
                connected: AtomicBool::new(true),
            }
        }

        pub fn with_output_report(mut self, layout: OutputReportLayout) -> Self {
            self.layouts.push(layout);
            self
        }

        pub fn sent_reports(&self) -> Vec<SentReport> {
            let sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.clone()
        }

        pub fn last_report(&self) -> Option<SentReport> {
            let sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.last().cloned()
        }

        pub fn sent_count(&self) -> usize {
            let sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.len()
        }

        pub fn clear(&self) {
            let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.clear();
        }

        pub fn disconnect(&self) {
            self.connected.store(false, Ordering::Release);
        }

        pub fn reconnect(&self) {
            self.connected.store(true, Ordering::Release);
        }

        pub fn is_connected(&self) -> bool {
            self.connected.load(Ordering::Acquire)
        }
    }

    impl HidOutputTransport for MockOutputDevice {
        fn device_info(&self) -> &HidDeviceInfo {
            &self.info
        }

        fn output_report_layout(&self, report_id: u8) -> Option<&OutputReportLayout> {
            self.layouts.iter().find(|l| l.report_id == report_id)
        }

        fn send_output_report(&self, report_id: u8, data: &[u8]) {
            if !self.is_connected() {
                return;
            }
            let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.push(SentReport {
                report_id,
                data: data.to_vec(),
            });
        }
    }
}
