//! Deep-space probe distances by linear recession.
//!
//! Each probe is modelled as a fixed published reference distance from
//! Earth at a reference epoch plus a constant radial velocity. The
//! extrapolation is purely linear, so the distance at the reference
//! epoch reproduces the published figure exactly and grows
//! monotonically with time.

use chrono::{DateTime, Utc};

use crate::timeutil::{self, KM_PER_AU, SECONDS_PER_DAY};

/// Reference epoch for all probe constants: 2024-01-01 00:00 UTC.
const REFERENCE_EPOCH_JD: f64 = 2_460_310.5;

/// A deep-space probe with published recession constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// Display name of the probe.
    pub name: &'static str,
    /// Distance from Earth at the reference epoch, AU.
    pub reference_distance_au: f64,
    /// Radial recession speed, km/s.
    pub speed_km_per_sec: f64,
}

/// Voyager 1, the most distant human-made object.
pub const VOYAGER_1: Probe = Probe {
    name: "Voyager 1",
    reference_distance_au: 159.0,
    speed_km_per_sec: 17.0,
};

/// Voyager 2.
pub const VOYAGER_2: Probe = Probe {
    name: "Voyager 2",
    reference_distance_au: 133.0,
    speed_km_per_sec: 15.4,
};

/// New Horizons, outbound through the Kuiper Belt since its 2015
/// Pluto flyby.
pub const NEW_HORIZONS: Probe = Probe {
    name: "New Horizons",
    reference_distance_au: 58.0,
    speed_km_per_sec: 13.8,
};

impl Probe {
    /// Distance from Earth in AU at the given instant.
    pub fn distance_from_earth_au(&self, t: DateTime<Utc>) -> f64 {
        let days = timeutil::julian_date(t) - REFERENCE_EPOCH_JD;
        self.reference_distance_au + self.au_per_day() * days
    }

    /// Recession speed converted to AU per day.
    fn au_per_day(&self) -> f64 {
        self.speed_km_per_sec * SECONDS_PER_DAY / KM_PER_AU
    }
}
