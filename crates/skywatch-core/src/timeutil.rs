//! Shared date/time helpers and unit constants for astronomical math.
//!
//! Centralizes the Julian Date conversion and the handful of constants
//! every other module needs, so the orbital formulas stay free of
//! duplicated calendar arithmetic.

use chrono::{DateTime, Datelike, TimeDelta, Timelike, Utc};

/// Kilometres in one astronomical unit.
pub const KM_PER_AU: f64 = 149_597_870.7;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Earth's mean anomaly at J2000.0, degrees.
pub const EARTH_MEAN_ANOMALY_J2000_DEG: f64 = 357.529;

/// Earth's mean motion, degrees per day.
pub const EARTH_MEAN_MOTION_DEG_PER_DAY: f64 = 0.985_600_28;

/// Normalise an angle in degrees to [0, 360).
pub fn normalize_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Julian Day Number of the given calendar date.
///
/// Fliegel–Van Flandern integer algorithm, with the Gregorian calendar
/// cutover at 1582-10-15. The JDN labels the day beginning at the
/// preceding noon.
pub fn julian_day_number(year: i64, month: i64, day: i64) -> i64 {
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    let gregorian = year > 1582 || (year == 1582 && (month > 10 || (month == 10 && day >= 15)));

    if gregorian {
        day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
            + y.div_euclid(400)
            - 32045
    } else {
        day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32083
    }
}

/// Julian Date (fractional) of the given UTC instant.
pub fn julian_date(t: DateTime<Utc>) -> f64 {
    let jdn = julian_day_number(
        i64::from(t.year()),
        i64::from(t.month()),
        i64::from(t.day()),
    );
    let frac = (f64::from(t.hour()) - 12.0) / 24.0
        + f64::from(t.minute()) / 1_440.0
        + f64::from(t.second()) / 86_400.0;
    jdn_to_f64(jdn) + frac
}

/// Days elapsed since J2000.0 at the given UTC instant.
pub fn days_since_j2000(t: DateTime<Utc>) -> f64 {
    julian_date(t) - J2000_JD
}

/// Sample a quantity once per day over `days` days starting at `start`
/// and return its observed (min, max) range.
///
/// Used to place the current value on a relative gauge (e.g. where in
/// the yearly Earth–Mars range today's distance sits). Days that cannot
/// be represented on the calendar are skipped.
pub fn min_max_daily<F>(start: DateTime<Utc>, days: u32, f: F) -> (f64, f64)
where
    F: Fn(DateTime<Utc>) -> f64,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for i in 0..days {
        let Some(day) = start.checked_add_signed(TimeDelta::days(i64::from(i))) else {
            continue;
        };
        let v = f(day);
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    (min, max)
}

/// Convert an integer JDN to `f64`.
///
/// JDN values in the supported calendar range are far below 2^53, so
/// the conversion is exact.
#[allow(clippy::cast_precision_loss)]
fn jdn_to_f64(jdn: i64) -> f64 {
    jdn as f64
}
