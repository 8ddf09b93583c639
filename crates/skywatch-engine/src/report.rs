//! Per-tick log report.
//!
//! Writes the full snapshot to the log in a human-scannable layout:
//! each distance on a relative gauge between its sampled yearly (or
//! monthly, for the Moon) minimum and maximum, followed by the light
//! travel times and the upcoming-event countdowns. Fields the builder
//! could not compute are skipped rather than logged as garbage.

use chrono::{DateTime, NaiveDateTime, Utc};
use skywatch_core::gauge::relative_bar;
use skywatch_core::moon::MoonState;
use skywatch_core::snapshot::AstroSnapshot;
use skywatch_core::timeutil::min_max_daily;
use skywatch_core::{almanac, earth, orbits};
use tracing::{debug, info};

/// Gauge width in cells.
const BAR_WIDTH: usize = 30;

/// One astronomical unit, for the report header.
const AU_IN_MILES: &str = "92,955,807.273026 miles";

/// Log the complete report for one tick.
pub fn log_report(snapshot: &AstroSnapshot, latitude_deg: f64) {
    let Some(t) = parse_timestamp(&snapshot.last_updated) else {
        debug!(
            timestamp = snapshot.last_updated,
            "report skipped: unparseable snapshot timestamp"
        );
        return;
    };
    let midnight = t
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(t, |naive| naive.and_utc());

    info!(
        date = %t.format("%Y-%m-%d"),
        day = %t.format("%A"),
        time = %t.format("%H:%M:%S"),
        "Report reference instant"
    );
    info!("1 astronomical unit = {AU_IN_MILES}");

    if let Some(value) = snapshot.sun_distance_au {
        let (min, max) = min_max_daily(midnight, 366, orbits::sun_distance_au);
        info!("Current Earth-Sun distance: {value:.6} AU");
        info!("{}", relative_bar(value, min, max, BAR_WIDTH));
        info!("{min:.6}        {value:.6}        {max:.6}");
    }

    for (label, value, elements) in [
        ("Mars", snapshot.mars_distance_au, &orbits::MARS),
        ("Jupiter", snapshot.jupiter_distance_au, &orbits::JUPITER),
        ("Saturn", snapshot.saturn_distance_au, &orbits::SATURN),
    ] {
        let Some(value) = value else {
            debug!(body = label, "distance unavailable this tick");
            continue;
        };
        let (min, max) = min_max_daily(midnight, 366, |d| orbits::planet_distance_au(d, elements));
        info!("Current Earth-{label} distance: {value:.6} AU");
        info!("{}", relative_bar(value, min, max, BAR_WIDTH));
        info!("{min:.6}        {value:.6}        {max:.6}");
    }

    if let Some(value) = snapshot.moon_distance_km {
        let (min, max) = min_max_daily(midnight, 30, |d| MoonState::at(d).distance_km());
        info!("Current Moon distance: {value:.0} km");
        info!("{}", relative_bar(value, min, max, BAR_WIDTH));
        info!("{min:.0} km        {value:.0} km        {max:.0} km");
    }

    if let Some(hours) = snapshot.daylight_hours {
        let (min, max) = earth::min_max_daylight_hours(latitude_deg);
        info!("Daylight length (hours) at latitude {latitude_deg}");
        info!("{}", relative_bar(hours, min, max, BAR_WIDTH));
        info!("{min:.2}        {hours:.2}        {max:.2}");
    }

    if let (Some(km_s), Some(km_h)) = (
        snapshot.earth_speed_km_per_sec,
        snapshot.earth_speed_km_per_hour,
    ) {
        info!("Earth's orbital speed: {km_s:.2} km/s ({km_h:.0} km/h)");
    }

    if let (Some(v1), Some(v2)) = (snapshot.voyager1_distance_au, snapshot.voyager2_distance_au) {
        info!("Voyager 1 distance from Earth: {v1:.6} AU");
        info!("Voyager 2 distance from Earth: {v2:.6} AU");
    }
    if let Some(nh) = snapshot.new_horizons_distance_au {
        info!("New Horizons distance from Earth: {nh:.6} AU");
    }

    if let Some(phase) = snapshot.moon_phase_name {
        info!(
            "Current moon phase is {phase} ({:.1} days, {:.1}% illuminated).",
            snapshot.moon_age_days.unwrap_or(f64::NAN),
            snapshot.moon_illumination_percent.unwrap_or(f64::NAN),
        );
        if let Some(art) = &snapshot.moon_ascii_art {
            for row in art {
                info!("{row}");
            }
        }
    }
    if let Some(days) = snapshot.days_until_full_moon {
        info!("Days until next full moon: {days:.1}");
    }

    info!("--- Light Travel Times ---");
    for (label, value) in [
        ("Sun -> Earth", &snapshot.light_time_sun_to_earth),
        ("Earth -> Mars", &snapshot.light_time_earth_to_mars),
        ("Earth -> Jupiter", &snapshot.light_time_earth_to_jupiter),
        ("Earth -> Saturn", &snapshot.light_time_earth_to_saturn),
        ("Earth -> Voyager 1", &snapshot.light_time_earth_to_voyager1),
        ("Earth -> Voyager 2", &snapshot.light_time_earth_to_voyager2),
    ] {
        if let Some(time) = value {
            info!("{label}: {time}");
        }
    }

    let today = t.date_naive();
    if let Some(days) = snapshot.days_until_summer_solstice {
        info!("Days until next June solstice: {days}");
    }
    if let Some(days) = snapshot.days_until_winter_solstice {
        info!("Days until next December solstice: {days}");
    }
    if let Some(days) = almanac::days_until_march_equinox(today) {
        info!("Days until next March equinox: {days}");
    }
    if let Some(days) = almanac::days_until_september_equinox(today) {
        info!("Days until next September equinox: {days}");
    }
    if let Some(days) = snapshot.days_until_perihelion {
        info!("Days until next perihelion (closest to Sun): {days}");
    }
    if let Some(days) = snapshot.days_until_aphelion {
        info!("Days until next aphelion (farthest from Sun): {days}");
    }
}

/// Parse the snapshot's display timestamp back into a UTC instant.
fn parse_timestamp(formatted: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(formatted, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use skywatch_core::build_snapshot;

    use super::*;

    #[test]
    fn timestamp_round_trips() {
        let t = Utc.with_ymd_and_hms(2026, 4, 1, 12, 30, 5).unwrap();
        let snap = build_snapshot(t, 51.476_9);
        assert_eq!(parse_timestamp(&snap.last_updated), Some(t));
    }

    #[test]
    fn report_tolerates_missing_fields() {
        let t = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
        let mut snap = build_snapshot(t, 51.476_9);
        snap.mars_distance_au = None;
        snap.earth_speed_km_per_sec = None;
        snap.moon_ascii_art = None;
        // Must not panic, whatever is absent.
        log_report(&snap, 51.476_9);
    }

    #[test]
    fn report_tolerates_garbage_timestamp() {
        let t = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
        let mut snap = build_snapshot(t, 51.476_9);
        snap.last_updated = String::from("not a timestamp");
        log_report(&snap, 51.476_9);
    }
}
