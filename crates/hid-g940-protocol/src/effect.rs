//! Mapping of host force-feedback effects onto G940 reports.
//!
//! # Conventions
//!
//! - Constant force: the host hands over a combined effect whose ramp levels
//!   carry the X (`start_level`) and Y (`end_level`) components at 8-bit
//!   resolution. The G940 pushes the opposite way from the generic
//!   convention (and from the other Logitech Force 3D sticks), so each level
//!   is negated, then widened into the 16-bit field with `<< 8`.
//! - Autocenter: the 16-bit magnitude is reduced to the 7-bit positive range
//!   of `autocenter_force` with `>> 9`; strength is pinned to 127 so
//!   centering engages on any deflection. Damping stays at zero.

#![deny(static_mut_refs)]

use crate::report::{AxisParameters, Lg3ffReport};
use serde::{Deserialize, Serialize};

/// Shift widening an 8-bit constant-force level into the 16-bit field.
pub const CONSTANT_FORCE_SHIFT: u32 = 8;

/// Shift reducing a 16-bit autocenter magnitude to `autocenter_force`.
pub const AUTOCENTER_SHIFT: u32 = 9;

/// Autocenter strength used whenever autocenter is driven by the host.
pub const AUTOCENTER_STRENGTH_MAX: i8 = 127;

/// Effect categories the host scheduler can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectCategory {
    Rumble,
    Periodic,
    Constant,
    Spring,
    Friction,
    Damper,
    Inertia,
    Ramp,
}

/// Start/end level pair of a ramp-style effect description.
///
/// Levels arrive already clamped by the host scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RampLevels {
    pub start_level: i16,
    pub end_level: i16,
}

impl RampLevels {
    pub fn new(start_level: i16, end_level: i16) -> Self {
        Self {
            start_level,
            end_level,
        }
    }
}

/// An effect request as delivered by the host scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FfEffect {
    /// Combined constant force; `start_level` is X, `end_level` is Y.
    Constant(RampLevels),
    Ramp(RampLevels),
    Periodic,
    Spring,
    Friction,
    Damper,
    Inertia,
    Rumble,
}

impl FfEffect {
    pub fn category(&self) -> EffectCategory {
        match self {
            Self::Constant(_) => EffectCategory::Constant,
            Self::Ramp(_) => EffectCategory::Ramp,
            Self::Periodic => EffectCategory::Periodic,
            Self::Spring => EffectCategory::Spring,
            Self::Friction => EffectCategory::Friction,
            Self::Damper => EffectCategory::Damper,
            Self::Inertia => EffectCategory::Inertia,
            Self::Rumble => EffectCategory::Rumble,
        }
    }
}

/// Negate and widen one constant-force level, saturating at the i16 range.
fn scale_constant_level(level: i16) -> i16 {
    let scaled = -i32::from(level) << CONSTANT_FORCE_SHIFT;
    i16::try_from(scaled).unwrap_or(if scaled < 0 { i16::MIN } else { i16::MAX })
}

/// Build the report for a constant-force update.
///
/// Levels in `-127..=127` map to exactly `-level << 8`. Outside that range
/// the wire value saturates at the `i16` bounds rather than being truncated
/// to 16 bits: a truncating `-level << 8` turns a full negative level of
/// -128 into -32768 and reverses the push, where this yields 32767.
pub fn constant_force_report(levels: RampLevels) -> Lg3ffReport {
    Lg3ffReport::new(
        AxisParameters::constant(scale_constant_level(levels.start_level)),
        AxisParameters::constant(scale_constant_level(levels.end_level)),
    )
}

/// Build the report for an autocenter-level update.
pub fn autocenter_report(magnitude: u16) -> Lg3ffReport {
    // u16 >> 9 is at most 127, so the conversion never saturates.
    let force = i8::try_from(magnitude >> AUTOCENTER_SHIFT).unwrap_or(i8::MAX);
    Lg3ffReport::uniform(AxisParameters::autocenter(AUTOCENTER_STRENGTH_MAX, force))
}

/// Translate a host effect into a report, or `None` if the G940 has no
/// mapping for its category.
pub fn translate(effect: &FfEffect) -> Option<Lg3ffReport> {
    match effect {
        FfEffect::Constant(levels) => Some(constant_force_report(*levels)),
        _ => None,
    }
}
