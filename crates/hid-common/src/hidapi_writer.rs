//! `hidapi` backed writer that drains an [`OutputReportQueue`] to a device.
//!
//! Runs on an ordinary thread; `hid_write` may block.

use crate::queue::OutputReportQueue;
use crate::{HidCommonError, HidCommonResult};
use tracing::{debug, warn};

pub struct HidapiOutputWriter {
    device: hidapi::HidDevice,
    frame: Vec<u8>,
}

impl HidapiOutputWriter {
    pub fn new(device: hidapi::HidDevice) -> Self {
        Self {
            device,
            frame: Vec::with_capacity(65),
        }
    }

    /// Write every pending report as `[report_id, payload...]`.
    ///
    /// # Errors
    ///
    /// Stops at the first failed write and returns
    /// [`HidCommonError::WriteError`]. The report whose write failed has
    /// already been taken off the queue and is dropped; reports behind it
    /// stay queued for the next flush.
    pub fn flush<const N: usize>(&mut self, queue: &OutputReportQueue<N>) -> HidCommonResult<usize> {
        let overwritten = queue.take_overwritten();
        if overwritten > 0 {
            debug!(overwritten, "output reports superseded before write");
        }

        let mut written = 0;
        while let Some(report) = queue.pop() {
            self.frame.clear();
            self.frame.push(report.report_id);
            self.frame.extend_from_slice(&report.payload);
            if let Err(e) = self.device.write(&self.frame) {
                warn!(
                    report_id = report.report_id,
                    error = %e,
                    "HID output report write failed"
                );
                return Err(HidCommonError::WriteError(e.to_string()));
            }
            written += 1;
        }
        Ok(written)
    }
}
