//! Driver configuration.
//!
//! The report layout is fixed; only the autocenter level sent while
//! registering the device can be chosen.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`Lg3ffConfig::initial_autocenter`].
pub const INITIAL_AUTOCENTER_ENV: &str = "FLIGHTSIM_G940_INITIAL_AUTOCENTER";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lg3ffConfig {
    /// Autocenter magnitude sent once force feedback is registered.
    /// `0` leaves the stick free (strength stays at 127 with zero force).
    pub initial_autocenter: u16,
}

impl Lg3ffConfig {
    /// Defaults, overridden by `FLIGHTSIM_G940_INITIAL_AUTOCENTER` when it
    /// holds a decimal or `0x`-prefixed hex `u16`.
    pub fn from_env() -> Self {
        let initial_autocenter = std::env::var(INITIAL_AUTOCENTER_ENV)
            .ok()
            .and_then(|value| parse_magnitude(&value))
            .unwrap_or_default();
        Self { initial_autocenter }
    }

    pub fn with_initial_autocenter(mut self, magnitude: u16) -> Self {
        self.initial_autocenter = magnitude;
        self
    }
}

fn parse_magnitude(value: &str) -> Option<u16> {
    let t = value.trim();
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).ok()
    } else {
        t.parse::<u16>().ok()
    }
}
