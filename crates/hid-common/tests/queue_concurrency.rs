//! Concurrency and property tests for the lock-free output-report queue.

use flightsim_hid_common::{
    HidDeviceInfo, HidOutputTransport, OutputField, OutputReportLayout, OutputReportQueue,
};
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

const LEN: usize = 63;

fn queue(capacity: usize) -> OutputReportQueue<LEN> {
    OutputReportQueue::new(
        HidDeviceInfo::new(0x046d, 0xc287, "/dev/hidraw0"),
        vec![OutputReportLayout::new(2).with_field(OutputField::bytes(LEN))],
        capacity,
    )
}

#[test]
fn concurrent_producers_never_tear_a_payload() {
    let q = Arc::new(queue(8));
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let q = Arc::clone(&q);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut seen = 0usize;
            let mut torn = 0usize;
            loop {
                let finished = done.load(Ordering::Acquire);
                seen += q.drain(|r| {
                    let first = r.payload[0];
                    if r.payload.iter().any(|&b| b != first) {
                        torn += 1;
                    }
                });
                if finished {
                    break;
                }
                thread::yield_now();
            }
            (seen, torn)
        })
    };

    let producers: Vec<_> = (0u8..4)
        .map(|id| {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    q.send_output_report(2, &[id.wrapping_mul(0x3F); LEN]);
                }
            })
        })
        .collect();

    for p in producers {
        p.join().expect("producer thread panicked");
    }
    done.store(true, Ordering::Release);
    let (seen, torn) = reader.join().expect("reader thread panicked");

    assert_eq!(torn, 0, "every drained payload must come from a single send");
    let overwritten = usize::try_from(q.overwritten()).unwrap_or(usize::MAX);
    assert_eq!(seen + overwritten, 8_000, "each send is either drained or overwritten");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Pending count never exceeds capacity, and sends beyond it are counted.
    #[test]
    fn prop_len_bounded_by_capacity(capacity in 1usize..16, sends in 0usize..64) {
        let q = queue(capacity);
        for i in 0..sends {
            q.send_output_report(2, &[(i % 251) as u8; LEN]);
        }
        prop_assert!(q.len() <= capacity);
        prop_assert_eq!(q.len() as u64 + q.overwritten(), sends as u64);
    }

    /// The newest report always survives.
    #[test]
    fn prop_newest_report_retained(capacity in 1usize..8, sends in 1usize..32) {
        let q = queue(capacity);
        for i in 0..sends {
            q.send_output_report(2, &[i as u8; LEN]);
        }
        let mut last = None;
        q.drain(|r| last = Some(r.payload[0]));
        prop_assert_eq!(last, Some((sends - 1) as u8));
    }
}
