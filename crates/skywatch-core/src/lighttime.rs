//! One-way light travel times.
//!
//! Light covers 1 AU in ≈ 499 seconds (8 m 19 s). Times are formatted
//! for display as `42s`, `8m 19s` or `4h 12m` depending on magnitude.

/// Speed of light in km/s.
pub const C_KM_PER_SEC: f64 = 299_792.458;

use crate::timeutil::KM_PER_AU;

/// One-way light travel time in seconds for a distance in AU.
pub fn travel_time_seconds(distance_au: f64) -> f64 {
    distance_au * KM_PER_AU / C_KM_PER_SEC
}

/// Format the light travel time for a distance in AU as a short
/// human-readable duration.
pub fn format_travel_time(distance_au: f64) -> String {
    let total_seconds = travel_time_seconds(distance_au);
    if !total_seconds.is_finite() || total_seconds < 0.0 {
        return String::from("n/a");
    }
    if total_seconds < 60.0 {
        return format!("{total_seconds:.0}s");
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_minutes = (total_seconds / 60.0) as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let secs = (total_seconds % 60.0) as u64;

    if total_minutes < 60 {
        return format!("{total_minutes}m {secs}s");
    }
    let hours = total_minutes / 60;
    let mins = total_minutes % 60;
    format!("{hours}h {mins}m")
}
