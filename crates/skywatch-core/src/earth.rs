//! Earth's orbital speed and daylight duration.
//!
//! Speed comes from the vis-viva equation `v = √(GM·(2/r − 1/a))` with
//! the current Sun–Earth radius; it swings between roughly 29.3 km/s at
//! aphelion and 30.3 km/s at perihelion. Day length uses the standard
//! sunrise-equation formula from the approximate solar declination on
//! the day of year, clamped to polar day / polar night.

use chrono::{DateTime, Datelike, Utc};

use crate::orbits;
use crate::timeutil::KM_PER_AU;

/// Standard gravitational parameter of the Sun, km³/s².
const GM_SUN: f64 = 1.327_124_400_18e11;

/// Earth's semi-major axis in km (1 AU).
const SEMI_MAJOR_AXIS_KM: f64 = KM_PER_AU;

/// Obliquity of the ecliptic used for the declination approximation,
/// degrees.
const OBLIQUITY_DEG: f64 = 23.44;

/// Earth's heliocentric orbital speed in km/s at the given instant.
pub fn speed_km_per_sec(t: DateTime<Utc>) -> f64 {
    let r_km = orbits::sun_distance_au(t) * KM_PER_AU;
    (GM_SUN * (2.0 / r_km - 1.0 / SEMI_MAJOR_AXIS_KM)).sqrt()
}

/// Earth's heliocentric orbital speed in km/h at the given instant.
pub fn speed_km_per_hour(t: DateTime<Utc>) -> f64 {
    speed_km_per_sec(t) * 3_600.0
}

/// Daylight duration in hours on the given day at `latitude_deg`.
///
/// Returns 0 for polar night and 24 for polar day.
pub fn daylight_hours(t: DateTime<Utc>, latitude_deg: f64) -> f64 {
    let n = f64::from(t.ordinal());
    let lat = latitude_deg.to_radians();
    // Approximate solar declination for day-of-year n.
    let decl =
        OBLIQUITY_DEG.to_radians() * (2.0 * core::f64::consts::PI * (284.0 + n) / 365.0).sin();
    let x = -lat.tan() * decl.tan();
    if x >= 1.0 {
        return 0.0;
    }
    if x <= -1.0 {
        return 24.0;
    }
    (24.0 / core::f64::consts::PI) * x.acos()
}

/// Minimum and maximum daylight hours over the year at `latitude_deg`.
///
/// Evaluated analytically at the solstice declinations; latitudes past
/// the polar circles span the full 0–24 h range.
pub fn min_max_daylight_hours(latitude_deg: f64) -> (f64, f64) {
    if latitude_deg.abs() >= 66.5 {
        return (0.0, 24.0);
    }
    let lat = latitude_deg.to_radians();
    let at_decl = |decl_deg: f64| {
        let x = -lat.tan() * decl_deg.to_radians().tan();
        if x >= 1.0 {
            0.0
        } else if x <= -1.0 {
            24.0
        } else {
            (24.0 / core::f64::consts::PI) * x.acos()
        }
    };
    let a = at_decl(OBLIQUITY_DEG);
    let b = at_decl(-OBLIQUITY_DEG);
    (a.min(b), a.max(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    const GREENWICH_LAT: f64 = 51.476_9;

    #[test]
    fn speed_stays_in_orbital_band() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        for i in 0..366 {
            let v = speed_km_per_sec(start + TimeDelta::days(i));
            assert!((29.2..=30.4).contains(&v), "speed {v} outside band");
        }
    }

    #[test]
    fn faster_at_perihelion_than_aphelion() {
        let january = Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap();
        let july = Utc.with_ymd_and_hms(2025, 7, 4, 0, 0, 0).unwrap();
        assert!(speed_km_per_sec(january) > speed_km_per_sec(july));
    }

    #[test]
    fn km_per_hour_is_3600_times_km_per_sec() {
        let t = Utc.with_ymd_and_hms(2025, 5, 20, 6, 0, 0).unwrap();
        let ratio = speed_km_per_hour(t) / speed_km_per_sec(t);
        assert!((ratio - 3_600.0).abs() < 1e-6);
    }

    #[test]
    fn equator_has_near_constant_twelve_hour_days() {
        let june = Utc.with_ymd_and_hms(2025, 6, 21, 0, 0, 0).unwrap();
        let december = Utc.with_ymd_and_hms(2025, 12, 21, 0, 0, 0).unwrap();
        assert!((daylight_hours(june, 0.0) - 12.0).abs() < 0.3);
        assert!((daylight_hours(december, 0.0) - 12.0).abs() < 0.3);
    }

    #[test]
    fn greenwich_summer_days_are_long_winter_days_short() {
        let june = Utc.with_ymd_and_hms(2025, 6, 21, 0, 0, 0).unwrap();
        let december = Utc.with_ymd_and_hms(2025, 12, 21, 0, 0, 0).unwrap();
        assert!(daylight_hours(june, GREENWICH_LAT) > 15.0);
        assert!(daylight_hours(december, GREENWICH_LAT) < 9.0);
    }

    #[test]
    fn polar_latitudes_clamp_to_full_range() {
        let june = Utc.with_ymd_and_hms(2025, 6, 21, 0, 0, 0).unwrap();
        let december = Utc.with_ymd_and_hms(2025, 12, 21, 0, 0, 0).unwrap();
        assert!((daylight_hours(june, 80.0) - 24.0).abs() < f64::EPSILON);
        assert!(daylight_hours(december, 80.0).abs() < f64::EPSILON);
        assert_eq!(min_max_daylight_hours(80.0), (0.0, 24.0));
    }

    #[test]
    fn min_max_brackets_daily_values() {
        let (min, max) = min_max_daylight_hours(GREENWICH_LAT);
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        for i in 0..365 {
            let h = daylight_hours(start + TimeDelta::days(i), GREENWICH_LAT);
            assert!(h >= min - 0.1 && h <= max + 0.1, "day {i}: {h} outside {min}..{max}");
        }
    }
}
