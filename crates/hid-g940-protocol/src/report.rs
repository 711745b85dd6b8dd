//! G940 force-feedback output report encoding.
//!
//! All functions are pure and allocation-free.
//!
//! # Wire layout
//!
//! The payload of output report `0x02` is 63 bytes (the report ID byte is
//! prepended by the transport). It holds one 30-byte parameter block per
//! axis, X first, then three reserved bytes:
//!
//! ```text
//! Offset  Size  Field
//!  0      2     constant_force       i16 LE, 0 = center
//!  2      1     reserved             no observed effect
//!  3      1     autocenter_strength  i8, 0 = off, 127 = engage on any deflection, <0 repels
//!  4      1     autocenter_force     i8
//!  5      1     autocenter_damping   i8, applied at autocenter_force
//!  6      2     spring_deadzone_neg  i16 LE
//!  8      2     spring_deadzone_pos  i16 LE (set equal to _neg for an offset center)
//! 10      1     spring_coeff_neg     i8, <0 repels
//! 11      1     spring_coeff_pos     i8
//! 12      2     spring_saturation    i16 LE
//! 14      8     reserved             possibly a second autocenter mechanism
//! 22      1     damper_coeff_neg     i8
//! 23      1     damper_coeff_pos     i8
//! 24      2     damper_saturation    i16 LE
//! 26      4     reserved             appears to duplicate the damper fields
//! ```
//!
//! Reserved ranges are always written as zero.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

/// Size of one axis parameter block.
pub const AXIS_BLOCK_LEN: usize = 30;

/// Reserved bytes following the two axis blocks.
pub const TRAILER_LEN: usize = 3;

/// Wire size of the force-feedback payload, excluding the report ID.
pub const REPORT_LEN: usize = 63;

/// Byte offsets of each field within an axis block.
pub mod axis_offsets {
    pub const CONSTANT_FORCE: usize = 0;
    pub const RESERVED_0: usize = 2;
    pub const RESERVED_0_LEN: usize = 1;
    pub const AUTOCENTER_STRENGTH: usize = 3;
    pub const AUTOCENTER_FORCE: usize = 4;
    pub const AUTOCENTER_DAMPING: usize = 5;
    pub const SPRING_DEADZONE_NEG: usize = 6;
    pub const SPRING_DEADZONE_POS: usize = 8;
    pub const SPRING_COEFF_NEG: usize = 10;
    pub const SPRING_COEFF_POS: usize = 11;
    pub const SPRING_SATURATION: usize = 12;
    pub const RESERVED_1: usize = 14;
    pub const RESERVED_1_LEN: usize = 8;
    pub const DAMPER_COEFF_NEG: usize = 22;
    pub const DAMPER_COEFF_POS: usize = 23;
    pub const DAMPER_SATURATION: usize = 24;
    pub const RESERVED_2: usize = 26;
    pub const RESERVED_2_LEN: usize = 4;
}

/// Offset of the Y axis block within the payload.
pub const Y_AXIS_OFFSET: usize = AXIS_BLOCK_LEN;

/// Offset of the reserved trailer within the payload.
pub const TRAILER_OFFSET: usize = 2 * AXIS_BLOCK_LEN;

// The device ignores or misreads anything but the exact 63-byte shape.
const _: () = assert!(REPORT_LEN == 63);
const _: () = assert!(TRAILER_OFFSET + TRAILER_LEN == REPORT_LEN);
const _: () = assert!(axis_offsets::RESERVED_2 + axis_offsets::RESERVED_2_LEN == AXIS_BLOCK_LEN);
const _: () = assert!(axis_offsets::RESERVED_1 + axis_offsets::RESERVED_1_LEN == axis_offsets::DAMPER_COEFF_NEG);
const _: () = assert!(axis_offsets::RESERVED_0 + axis_offsets::RESERVED_0_LEN == axis_offsets::AUTOCENTER_STRENGTH);

/// Force-feedback parameters for one physical axis.
///
/// `Default` is all-zero: no force, autocenter off, no spring or damper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisParameters {
    /// Steady force, 0 = center. Can cancel autocenter on the pushed side.
    pub constant_force: i16,
    /// How far toward center autocenter keeps pushing.
    pub autocenter_strength: i8,
    /// How hard autocenter pushes.
    pub autocenter_force: i8,
    /// Damping applied at `autocenter_force` magnitude.
    pub autocenter_damping: i8,
    pub spring_deadzone_neg: i16,
    pub spring_deadzone_pos: i16,
    pub spring_coeff_neg: i8,
    pub spring_coeff_pos: i8,
    pub spring_saturation: i16,
    pub damper_coeff_neg: i8,
    pub damper_coeff_pos: i8,
    pub damper_saturation: i16,
}

impl AxisParameters {
    /// Axis carrying only a constant force.
    pub fn constant(force: i16) -> Self {
        Self {
            constant_force: force,
            ..Self::default()
        }
    }

    /// Axis carrying only autocenter strength and force.
    pub fn autocenter(strength: i8, force: i8) -> Self {
        Self {
            autocenter_strength: strength,
            autocenter_force: force,
            ..Self::default()
        }
    }

    pub fn with_autocenter_damping(mut self, damping: i8) -> Self {
        self.autocenter_damping = damping;
        self
    }

    pub fn with_spring_deadzone(mut self, neg: i16, pos: i16) -> Self {
        self.spring_deadzone_neg = neg;
        self.spring_deadzone_pos = pos;
        self
    }

    pub fn with_spring_coefficients(mut self, neg: i8, pos: i8) -> Self {
        self.spring_coeff_neg = neg;
        self.spring_coeff_pos = pos;
        self
    }

    pub fn with_spring_saturation(mut self, saturation: i16) -> Self {
        self.spring_saturation = saturation;
        self
    }

    pub fn with_damper_coefficients(mut self, neg: i8, pos: i8) -> Self {
        self.damper_coeff_neg = neg;
        self.damper_coeff_pos = pos;
        self
    }

    pub fn with_damper_saturation(mut self, saturation: i16) -> Self {
        self.damper_saturation = saturation;
        self
    }

    /// Serialize this axis into its 30-byte block.
    pub fn to_bytes(&self) -> [u8; AXIS_BLOCK_LEN] {
        use axis_offsets as off;

        let mut block = [0u8; AXIS_BLOCK_LEN];
        put_i16(&mut block, off::CONSTANT_FORCE, self.constant_force);
        put_i8(&mut block, off::AUTOCENTER_STRENGTH, self.autocenter_strength);
        put_i8(&mut block, off::AUTOCENTER_FORCE, self.autocenter_force);
        put_i8(&mut block, off::AUTOCENTER_DAMPING, self.autocenter_damping);
        put_i16(&mut block, off::SPRING_DEADZONE_NEG, self.spring_deadzone_neg);
        put_i16(&mut block, off::SPRING_DEADZONE_POS, self.spring_deadzone_pos);
        put_i8(&mut block, off::SPRING_COEFF_NEG, self.spring_coeff_neg);
        put_i8(&mut block, off::SPRING_COEFF_POS, self.spring_coeff_pos);
        put_i16(&mut block, off::SPRING_SATURATION, self.spring_saturation);
        put_i8(&mut block, off::DAMPER_COEFF_NEG, self.damper_coeff_neg);
        put_i8(&mut block, off::DAMPER_COEFF_POS, self.damper_coeff_pos);
        put_i16(&mut block, off::DAMPER_SATURATION, self.damper_saturation);
        block
    }
}

/// Little-endian regardless of host byte order.
fn put_i16(block: &mut [u8; AXIS_BLOCK_LEN], offset: usize, value: i16) {
    let [lsb, msb] = value.to_le_bytes();
    block[offset] = lsb;
    block[offset + 1] = msb;
}

fn put_i8(block: &mut [u8; AXIS_BLOCK_LEN], offset: usize, value: i8) {
    let [byte] = value.to_le_bytes();
    block[offset] = byte;
}

/// One complete force-feedback report: X axis, then Y axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lg3ffReport {
    pub x: AxisParameters,
    pub y: AxisParameters,
}

impl Lg3ffReport {
    pub fn new(x: AxisParameters, y: AxisParameters) -> Self {
        Self { x, y }
    }

    /// Report with the same parameters on both axes.
    pub fn uniform(axis: AxisParameters) -> Self {
        Self { x: axis, y: axis }
    }

    /// Encode into a fresh 63-byte payload.
    pub fn encode(&self) -> [u8; REPORT_LEN] {
        let mut out = [0u8; REPORT_LEN];
        self.encode_into(&mut out);
        out
    }

    /// Encode into `out`, overwriting every byte including reserved ones.
    pub fn encode_into(&self, out: &mut [u8; REPORT_LEN]) {
        out[..Y_AXIS_OFFSET].copy_from_slice(&self.x.to_bytes());
        out[Y_AXIS_OFFSET..TRAILER_OFFSET].copy_from_slice(&self.y.to_bytes());
        out[TRAILER_OFFSET..].fill(0);
    }
}

/// Encode an X/Y parameter pair into the 63-byte wire payload.
pub fn encode_report(x: AxisParameters, y: AxisParameters) -> [u8; REPORT_LEN] {
    Lg3ffReport::new(x, y).encode()
}
