//! The immutable astronomical snapshot and its builder.
//!
//! [`AstroSnapshot`] is the unit of publication: every field derives
//! from one reference instant, and the struct is never mutated after
//! [`build_snapshot`] returns. Consumers hold it behind an `Arc` and
//! read it freely.
//!
//! The builder has no partial-failure path. Any single quantity whose
//! computation produces a non-finite number degrades to `None` for that
//! field alone; the rest of the snapshot completes normally. Absent
//! fields serialize as `null` (never omitted) so clients can tell
//! "not computed" from "missing key".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::moon::{MoonPhaseName, MoonState};
use crate::{almanac, earth, lighttime, orbits, probes};

/// Display format of the computation timestamp.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Immutable snapshot of all computed astronomical quantities.
///
/// Field names serialize in camelCase, matching the wire contract of
/// the dashboard (`moonPhaseName`, `sunDistanceAu`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstroSnapshot {
    /// Named moon phase bucket.
    pub moon_phase_name: Option<MoonPhaseName>,
    /// Illuminated fraction of the lunar disc, percent (one decimal).
    pub moon_illumination_percent: Option<f64>,
    /// LED-matrix icon slot for the current phase.
    pub moon_phase_icon: Option<String>,
    /// Multi-line ASCII rendering of the current phase.
    pub moon_ascii_art: Option<Vec<String>>,
    /// Days since the last new moon.
    pub moon_age_days: Option<f64>,
    /// Days until the next full moon.
    pub days_until_full_moon: Option<f64>,

    /// Sun–Earth distance, AU.
    pub sun_distance_au: Option<f64>,
    /// Earth–Mars distance, AU.
    pub mars_distance_au: Option<f64>,
    /// Earth–Jupiter distance, AU.
    pub jupiter_distance_au: Option<f64>,
    /// Earth–Saturn distance, AU.
    pub saturn_distance_au: Option<f64>,

    /// Earth–Moon distance, km.
    pub moon_distance_km: Option<f64>,

    /// Voyager 1 distance from Earth, AU.
    pub voyager1_distance_au: Option<f64>,
    /// Voyager 2 distance from Earth, AU.
    pub voyager2_distance_au: Option<f64>,
    /// New Horizons distance from Earth, AU.
    pub new_horizons_distance_au: Option<f64>,

    /// Earth's heliocentric speed, km/s.
    pub earth_speed_km_per_sec: Option<f64>,
    /// Earth's heliocentric speed, km/h.
    pub earth_speed_km_per_hour: Option<f64>,

    /// Daylight duration at the configured latitude, hours.
    pub daylight_hours: Option<f64>,

    /// One-way light time, Sun to Earth.
    pub light_time_sun_to_earth: Option<String>,
    /// One-way light time, Earth to Mars.
    pub light_time_earth_to_mars: Option<String>,
    /// One-way light time, Earth to Jupiter.
    pub light_time_earth_to_jupiter: Option<String>,
    /// One-way light time, Earth to Saturn.
    pub light_time_earth_to_saturn: Option<String>,
    /// One-way light time, Earth to Voyager 1.
    pub light_time_earth_to_voyager1: Option<String>,
    /// One-way light time, Earth to Voyager 2.
    pub light_time_earth_to_voyager2: Option<String>,

    /// Days until the next June solstice.
    pub days_until_summer_solstice: Option<i64>,
    /// Days until the next December solstice.
    pub days_until_winter_solstice: Option<i64>,
    /// Days until the next perihelion.
    pub days_until_perihelion: Option<i64>,
    /// Days until the next aphelion.
    pub days_until_aphelion: Option<i64>,

    /// UTC timestamp of the computation, `YYYY-MM-DDTHH:MM:SS`.
    pub last_updated: String,
}

/// Compute a complete snapshot for the given UTC instant.
///
/// `latitude_deg` only affects the daylight-hours field. The builder
/// always returns a whole snapshot; individual quantities degrade to
/// `None` on numeric faults.
pub fn build_snapshot(t: DateTime<Utc>, latitude_deg: f64) -> AstroSnapshot {
    let moon_state = MoonState::at(t);
    let phase = moon_state.phase();
    let today = t.date_naive();

    let sun_au = finite(orbits::sun_distance_au(t));
    let mars_au = finite(orbits::planet_distance_au(t, &orbits::MARS));
    let jupiter_au = finite(orbits::planet_distance_au(t, &orbits::JUPITER));
    let saturn_au = finite(orbits::planet_distance_au(t, &orbits::SATURN));
    let voyager1_au = finite(probes::VOYAGER_1.distance_from_earth_au(t));
    let voyager2_au = finite(probes::VOYAGER_2.distance_from_earth_au(t));
    let new_horizons_au = finite(probes::NEW_HORIZONS.distance_from_earth_au(t));

    AstroSnapshot {
        moon_phase_name: Some(phase),
        moon_illumination_percent: finite(moon_state.illumination_percent()),
        moon_phase_icon: Some(phase.icon().to_owned()),
        moon_ascii_art: Some(phase.ascii_art().iter().map(|row| (*row).to_owned()).collect()),
        moon_age_days: finite(moon_state.age_days()),
        days_until_full_moon: finite(moon_state.days_until_full()),
        sun_distance_au: sun_au,
        mars_distance_au: mars_au,
        jupiter_distance_au: jupiter_au,
        saturn_distance_au: saturn_au,
        moon_distance_km: finite(moon_state.distance_km()),
        voyager1_distance_au: voyager1_au,
        voyager2_distance_au: voyager2_au,
        new_horizons_distance_au: new_horizons_au,
        earth_speed_km_per_sec: finite(earth::speed_km_per_sec(t)),
        earth_speed_km_per_hour: finite(earth::speed_km_per_hour(t)),
        daylight_hours: finite(earth::daylight_hours(t, latitude_deg)),
        light_time_sun_to_earth: sun_au.map(lighttime::format_travel_time),
        light_time_earth_to_mars: mars_au.map(lighttime::format_travel_time),
        light_time_earth_to_jupiter: jupiter_au.map(lighttime::format_travel_time),
        light_time_earth_to_saturn: saturn_au.map(lighttime::format_travel_time),
        light_time_earth_to_voyager1: voyager1_au.map(lighttime::format_travel_time),
        light_time_earth_to_voyager2: voyager2_au.map(lighttime::format_travel_time),
        days_until_summer_solstice: almanac::days_until_june_solstice(today),
        days_until_winter_solstice: almanac::days_until_december_solstice(today),
        days_until_perihelion: almanac::days_until_perihelion(today),
        days_until_aphelion: almanac::days_until_aphelion(today),
        last_updated: t.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// Keep a value only if it is finite; the per-field fault guard.
fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use crate::moon::SYNODIC_PERIOD_DAYS;

    use super::*;

    fn sample_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn builder_populates_every_field() {
        let snap = build_snapshot(sample_instant(), 51.476_9);

        assert!(snap.moon_phase_name.is_some());
        assert!(snap.moon_illumination_percent.is_some());
        assert!(snap.moon_phase_icon.is_some());
        assert_eq!(snap.moon_ascii_art.as_ref().map(Vec::len), Some(6));
        assert!(snap.moon_age_days.is_some());
        assert!(snap.days_until_full_moon.is_some());
        assert!(snap.sun_distance_au.is_some());
        assert!(snap.mars_distance_au.is_some());
        assert!(snap.jupiter_distance_au.is_some());
        assert!(snap.saturn_distance_au.is_some());
        assert!(snap.moon_distance_km.is_some());
        assert!(snap.voyager1_distance_au.is_some());
        assert!(snap.voyager2_distance_au.is_some());
        assert!(snap.new_horizons_distance_au.is_some());
        assert!(snap.earth_speed_km_per_sec.is_some());
        assert!(snap.earth_speed_km_per_hour.is_some());
        assert!(snap.daylight_hours.is_some());
        assert!(snap.light_time_sun_to_earth.is_some());
        assert!(snap.light_time_earth_to_mars.is_some());
        assert!(snap.light_time_earth_to_jupiter.is_some());
        assert!(snap.light_time_earth_to_saturn.is_some());
        assert!(snap.light_time_earth_to_voyager1.is_some());
        assert!(snap.light_time_earth_to_voyager2.is_some());
        assert!(snap.days_until_summer_solstice.is_some());
        assert!(snap.days_until_winter_solstice.is_some());
        assert!(snap.days_until_perihelion.is_some());
        assert!(snap.days_until_aphelion.is_some());
        assert_eq!(snap.last_updated, "2026-03-14T09:26:53");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let snap = build_snapshot(sample_instant(), 51.476_9);
        let value = serde_json::to_value(&snap).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "moonPhaseName",
            "moonIlluminationPercent",
            "moonPhaseIcon",
            "moonAsciiArt",
            "moonAgeDays",
            "daysUntilFullMoon",
            "sunDistanceAu",
            "marsDistanceAu",
            "jupiterDistanceAu",
            "saturnDistanceAu",
            "moonDistanceKm",
            "voyager1DistanceAu",
            "voyager2DistanceAu",
            "newHorizonsDistanceAu",
            "earthSpeedKmPerSec",
            "earthSpeedKmPerHour",
            "daylightHours",
            "lightTimeSunToEarth",
            "lightTimeEarthToMars",
            "lightTimeEarthToJupiter",
            "lightTimeEarthToSaturn",
            "lightTimeEarthToVoyager1",
            "lightTimeEarthToVoyager2",
            "daysUntilSummerSolstice",
            "daysUntilWinterSolstice",
            "daysUntilPerihelion",
            "daysUntilAphelion",
            "lastUpdated",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }

        assert!(obj["sunDistanceAu"].is_number());
        assert!(obj["moonAsciiArt"].is_array());
        assert!(obj["lightTimeSunToEarth"].is_string());
    }

    #[test]
    fn absent_fields_serialize_as_null_not_omitted() {
        let mut snap = build_snapshot(sample_instant(), 51.476_9);
        snap.mars_distance_au = None;
        snap.light_time_earth_to_mars = None;

        let value = serde_json::to_value(&snap).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("marsDistanceAu"));
        assert!(obj["marsDistanceAu"].is_null());
        assert!(obj["lightTimeEarthToMars"].is_null());
    }

    #[test]
    fn new_moon_reference_instant() {
        let epoch = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let snap = build_snapshot(epoch, 51.476_9);
        assert_eq!(
            snap.moon_phase_name,
            Some(crate::moon::MoonPhaseName::New)
        );
        assert!(snap.moon_age_days.unwrap() < 1e-6);
        assert!(snap.moon_illumination_percent.unwrap() < 0.1);
    }

    #[test]
    fn full_moon_half_period_after_reference() {
        let epoch = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let t = epoch + TimeDelta::seconds((SYNODIC_PERIOD_DAYS / 2.0 * 86_400.0) as i64);
        let snap = build_snapshot(t, 51.476_9);
        assert_eq!(
            snap.moon_phase_name,
            Some(crate::moon::MoonPhaseName::Full)
        );
        assert!(snap.moon_illumination_percent.unwrap() > 99.9);
    }

    #[test]
    fn round_trips_through_json() {
        let snap = build_snapshot(sample_instant(), 51.476_9);
        let json = serde_json::to_string(&snap).unwrap();
        let back: AstroSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
