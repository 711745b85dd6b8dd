//! Fuzzes the G940 report encoder, effect translation, and queued dispatch.
//!
//! Must never panic on arbitrary input, and reserved bytes must stay zero.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_g940_output
#![no_main]
use flightsim_hid_common::{
    HidDeviceInfo, HidOutputTransport, OutputField, OutputReportLayout, OutputReportQueue,
};
use flightsim_hid_g940_protocol::{
    AxisParameters, FfEffect, LOGITECH_VENDOR_ID, Lg3ffConfig, Lg3ffForceFeedback,
    MemlessForceFeedback, REPORT_LEN, RampLevels, autocenter_report, encode_report, product_ids,
    report_ids,
};
use libfuzzer_sys::fuzz_target;

fn axis(data: &[u8]) -> AxisParameters {
    let b = |i: usize| data.get(i).copied().unwrap_or(0);
    let w = |i: usize| i16::from_le_bytes([b(i), b(i + 1)]);
    AxisParameters {
        constant_force: w(0),
        autocenter_strength: b(2) as i8,
        autocenter_force: b(3) as i8,
        autocenter_damping: b(4) as i8,
        spring_deadzone_neg: w(5),
        spring_deadzone_pos: w(7),
        spring_coeff_neg: b(9) as i8,
        spring_coeff_pos: b(10) as i8,
        spring_saturation: w(11),
        damper_coeff_neg: b(13) as i8,
        damper_coeff_pos: b(14) as i8,
        damper_saturation: w(15),
    }
}

fuzz_target!(|data: &[u8]| {
    // Arbitrary per-axis configuration.
    let x = axis(data);
    let y = axis(data.get(17..).unwrap_or(&[]));
    let out = encode_report(x, y);
    assert_eq!(out.len(), REPORT_LEN);
    assert_eq!(out[2], 0);
    assert_eq!(&out[60..], &[0u8; 3]);

    // Autocenter with an arbitrary magnitude.
    if data.len() >= 2 {
        let report = autocenter_report(u16::from_le_bytes([data[0], data[1]]));
        assert!(report.x.autocenter_force >= 0);
    }

    // Play through a queued transport.
    if data.len() >= 5 {
        let queue = OutputReportQueue::<REPORT_LEN>::new(
            HidDeviceInfo::new(LOGITECH_VENDOR_ID, product_ids::G940, "fuzz"),
            vec![
                OutputReportLayout::new(report_ids::FORCE_FEEDBACK)
                    .with_field(OutputField::bytes(REPORT_LEN)),
            ],
            4,
        );
        if let Ok(ff) = Lg3ffForceFeedback::init(&queue, &Lg3ffConfig::default()) {
            let levels = RampLevels::new(
                i16::from_le_bytes([data[1], data[2]]),
                i16::from_le_bytes([data[3], data[4]]),
            );
            let effect = match data[0] % 3 {
                0 => FfEffect::Constant(levels),
                1 => FfEffect::Ramp(levels),
                _ => FfEffect::Rumble,
            };
            let _ = ff.play(&effect);
        }
        assert_eq!(queue.rejected(), 0);
        let _ = queue.device_info();
    }
});
