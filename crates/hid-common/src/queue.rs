//! Pre-allocated, lock-free output-report queue.
//!
//! [`OutputReportQueue`] is a transport whose `send_output_report` only copies
//! the payload into a fixed-capacity ring of `[u8; N]` slots. A writer running
//! on an ordinary thread drains the ring and performs the blocking device I/O.
//! Producers never block, allocate, or wait for the writer.
//!
//! When the ring is full the oldest pending report is overwritten; a later
//! report for the same device supersedes it anyway. Overwrites and rejected
//! payloads are counted so the writer side can report them.

use crate::{HidDeviceInfo, HidOutputTransport, OutputReportLayout};
use crossbeam::queue::ArrayQueue;
use std::sync::atomic::{AtomicU64, Ordering};

/// One pending report: the report ID plus its fixed-size payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedReport<const N: usize> {
    pub report_id: u8,
    pub payload: [u8; N],
}

pub struct OutputReportQueue<const N: usize> {
    info: HidDeviceInfo,
    layouts: Vec<OutputReportLayout>,
    pending: ArrayQueue<QueuedReport<N>>,
    overwritten: AtomicU64,
    overwritten_reported: AtomicU64,
    rejected: AtomicU64,
}

impl<const N: usize> OutputReportQueue<N> {
    /// Create a queue holding at most `capacity` pending reports (minimum 1).
    pub fn new(info: HidDeviceInfo, layouts: Vec<OutputReportLayout>, capacity: usize) -> Self {
        Self {
            info,
            layouts,
            pending: ArrayQueue::new(capacity.max(1)),
            overwritten: AtomicU64::new(0),
            overwritten_reported: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.pending.capacity()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of pending reports replaced before the writer reached them.
    pub fn overwritten(&self) -> u64 {
        self.overwritten.load(Ordering::Relaxed)
    }

    /// Overwrites since the previous call, for writers that log per flush.
    pub fn take_overwritten(&self) -> u64 {
        let total = self.overwritten();
        let previous = self.overwritten_reported.fetch_max(total, Ordering::Relaxed);
        total.saturating_sub(previous)
    }

    /// Number of payloads dropped because their length was not `N`.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Take the oldest pending report, if any.
    pub fn pop(&self) -> Option<QueuedReport<N>> {
        self.pending.pop()
    }

    /// Hand every pending report to `write` in FIFO order and return how many
    /// were drained.
    pub fn drain<F>(&self, mut write: F) -> usize
    where
        F: FnMut(&QueuedReport<N>),
    {
        let mut drained = 0;
        while let Some(report) = self.pending.pop() {
            write(&report);
            drained += 1;
        }
        drained
    }
}

impl<const N: usize> HidOutputTransport for OutputReportQueue<N> {
    fn device_info(&self) -> &HidDeviceInfo {
        &self.info
    }

    fn output_report_layout(&self, report_id: u8) -> Option<&OutputReportLayout> {
        self.layouts.iter().find(|l| l.report_id == report_id)
    }

    fn send_output_report(&self, report_id: u8, data: &[u8]) {
        let Ok(payload) = <[u8; N]>::try_from(data) else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return;
        };
        let report = QueuedReport { report_id, payload };
        if self.pending.force_push(report).is_some() {
            self.overwritten.fetch_add(1, Ordering::Relaxed);
        }
    }
}
