//! Property-based tests for G940 report encoding and effect translation.

use flightsim_hid_g940_protocol::{
    AXIS_BLOCK_LEN, AxisParameters, FfEffect, Lg3ffConfig, Lg3ffForceFeedback, Lg3ffReport,
    MemlessForceFeedback, PlayStatus, REPORT_LEN, RampLevels, autocenter_report,
    constant_force_report, encode_report, product_ids, report_ids, LOGITECH_VENDOR_ID,
};
use flightsim_hid_common::mock::MockOutputDevice;
use flightsim_hid_common::{HidDeviceInfo, OutputField, OutputReportLayout};
use proptest::prelude::*;

/// Reserved byte positions inside one axis block.
const AXIS_RESERVED: [usize; 13] = [2, 14, 15, 16, 17, 18, 19, 20, 21, 26, 27, 28, 29];

fn axis_strategy() -> impl Strategy<Value = AxisParameters> {
    (
        (any::<i16>(), any::<i8>(), any::<i8>(), any::<i8>()),
        (any::<i16>(), any::<i16>(), any::<i8>(), any::<i8>(), any::<i16>()),
        (any::<i8>(), any::<i8>(), any::<i16>()),
    )
        .prop_map(|((cf, st, fo, dp), (dzn, dzp, scn, scp, ss), (dcn, dcp, ds))| {
            AxisParameters {
                constant_force: cf,
                autocenter_strength: st,
                autocenter_force: fo,
                autocenter_damping: dp,
                spring_deadzone_neg: dzn,
                spring_deadzone_pos: dzp,
                spring_coeff_neg: scn,
                spring_coeff_pos: scp,
                spring_saturation: ss,
                damper_coeff_neg: dcn,
                damper_coeff_pos: dcp,
                damper_saturation: ds,
            }
        })
}

fn g940() -> MockOutputDevice {
    MockOutputDevice::new(HidDeviceInfo::new(
        LOGITECH_VENDOR_ID,
        product_ids::G940,
        "/dev/hidraw0",
    ))
    .with_output_report(
        OutputReportLayout::new(report_ids::FORCE_FEEDBACK).with_field(OutputField::bytes(REPORT_LEN)),
    )
}

fn le(bytes: &[u8], offset: usize) -> [u8; 2] {
    [bytes[offset], bytes[offset + 1]]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every 16-bit field is written least-significant byte first.
    #[test]
    fn prop_sixteen_bit_fields_little_endian(x in axis_strategy(), y in axis_strategy()) {
        let out = encode_report(x, y);
        prop_assert_eq!(out.len(), REPORT_LEN);
        for (base, axis) in [(0usize, x), (AXIS_BLOCK_LEN, y)] {
            for (offset, value) in [
                (0usize, axis.constant_force),
                (6, axis.spring_deadzone_neg),
                (8, axis.spring_deadzone_pos),
                (12, axis.spring_saturation),
                (24, axis.damper_saturation),
            ] {
                let v = value as u16;
                prop_assert_eq!(
                    le(&out, base + offset),
                    [(v & 0xFF) as u8, ((v >> 8) & 0xFF) as u8]
                );
            }
        }
    }

    /// Single-byte fields are the two's-complement value, as-is.
    #[test]
    fn prop_byte_fields_twos_complement(x in axis_strategy()) {
        let out = x.to_bytes();
        prop_assert_eq!(out[3], x.autocenter_strength as u8);
        prop_assert_eq!(out[4], x.autocenter_force as u8);
        prop_assert_eq!(out[5], x.autocenter_damping as u8);
        prop_assert_eq!(out[10], x.spring_coeff_neg as u8);
        prop_assert_eq!(out[11], x.spring_coeff_pos as u8);
        prop_assert_eq!(out[22], x.damper_coeff_neg as u8);
        prop_assert_eq!(out[23], x.damper_coeff_pos as u8);
    }

    /// Reserved ranges are zero whatever the parameters.
    #[test]
    fn prop_reserved_bytes_zero(x in axis_strategy(), y in axis_strategy()) {
        let out = encode_report(x, y);
        for base in [0usize, AXIS_BLOCK_LEN] {
            for idx in AXIS_RESERVED {
                prop_assert_eq!(out[base + idx], 0, "reserved byte {} non-zero", base + idx);
            }
        }
        prop_assert_eq!(&out[2 * AXIS_BLOCK_LEN..], &[0u8; 3]);
    }

    /// Encoding is a pure function of its input.
    #[test]
    fn prop_encode_deterministic(x in axis_strategy(), y in axis_strategy()) {
        prop_assert_eq!(encode_report(x, y), Lg3ffReport::new(x, y).encode());
        prop_assert_eq!(encode_report(x, y), encode_report(x, y));
    }

    /// X = -start << 8, Y = -end << 8, and nothing else is set.
    #[test]
    fn prop_constant_force_law(start in -127i16..=127, end in -127i16..=127) {
        let report = constant_force_report(RampLevels::new(start, end));
        prop_assert_eq!(i32::from(report.x.constant_force), -i32::from(start) * 256);
        prop_assert_eq!(i32::from(report.y.constant_force), -i32::from(end) * 256);
        prop_assert_eq!(report.x, AxisParameters::constant(report.x.constant_force));
        prop_assert_eq!(report.y, AxisParameters::constant(report.y.constant_force));
    }

    /// Constant force always pushes opposite to the requested level.
    #[test]
    fn prop_constant_force_polarity(start in any::<i16>(), end in any::<i16>()) {
        let report = constant_force_report(RampLevels::new(start, end));
        for (level, force) in [(start, report.x.constant_force), (end, report.y.constant_force)] {
            prop_assert_eq!(level.signum(), -force.signum(), "level {} force {}", level, force);
        }
    }

    /// force = magnitude >> 9, strength pinned at 127, identical on both axes.
    #[test]
    fn prop_autocenter_law(magnitude in any::<u16>()) {
        let report = autocenter_report(magnitude);
        prop_assert_eq!(i32::from(report.x.autocenter_force), i32::from(magnitude >> 9));
        prop_assert!(report.x.autocenter_force >= 0);
        prop_assert_eq!(report.x.autocenter_strength, 127);
        prop_assert_eq!(report.x.autocenter_damping, 0);
        prop_assert_eq!(report.x, report.y);
    }

    /// Playing the same effect twice produces byte-identical reports.
    #[test]
    fn prop_play_idempotent(start in -128i16..=127, end in -128i16..=127) {
        let dev = g940();
        let ff = Lg3ffForceFeedback::init(&dev, &Lg3ffConfig::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        dev.clear();

        let effect = FfEffect::Constant(RampLevels::new(start, end));
        prop_assert_eq!(ff.play(&effect), PlayStatus::Dispatched);
        prop_assert_eq!(ff.play(&effect), PlayStatus::Dispatched);

        let sent = dev.sent_reports();
        prop_assert_eq!(sent.len(), 2);
        prop_assert_eq!(&sent[0], &sent[1]);
        prop_assert_eq!(sent[0].data.len(), REPORT_LEN);
    }
}
