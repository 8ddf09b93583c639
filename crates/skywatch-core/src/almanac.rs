//! Countdowns to recurring orbital calendar events.
//!
//! Solstices, equinoxes, perihelion and aphelion are pinned to their
//! average calendar dates (the true instants drift by about a day).
//! Every `next_*` function returns the first occurrence strictly after
//! the reference date: on the event day itself, the countdown already
//! points at next year's occurrence.

use chrono::{Datelike, NaiveDate};

/// June solstice: ~June 21.
const JUNE_SOLSTICE: (u32, u32) = (6, 21);

/// December solstice: ~December 21.
const DECEMBER_SOLSTICE: (u32, u32) = (12, 21);

/// March equinox: ~March 20.
const MARCH_EQUINOX: (u32, u32) = (3, 20);

/// September equinox: ~September 22.
const SEPTEMBER_EQUINOX: (u32, u32) = (9, 22);

/// Perihelion (Earth closest to the Sun): ~January 3.
const PERIHELION: (u32, u32) = (1, 3);

/// Aphelion (Earth farthest from the Sun): ~July 4.
const APHELION: (u32, u32) = (7, 4);

/// Next occurrence of a fixed (month, day) anniversary strictly after
/// `from`. Returns `None` only if the date cannot be represented.
fn next_occurrence(from: NaiveDate, (month, day): (u32, u32)) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(from.year(), month, day)?;
    if from < this_year {
        Some(this_year)
    } else {
        NaiveDate::from_ymd_opt(from.year().checked_add(1)?, month, day)
    }
}

/// Days from `from` until a fixed anniversary's next occurrence.
fn days_until(from: NaiveDate, event: (u32, u32)) -> Option<i64> {
    next_occurrence(from, event).map(|next| (next - from).num_days())
}

/// Date of the next June solstice strictly after `from`.
pub fn next_june_solstice(from: NaiveDate) -> Option<NaiveDate> {
    next_occurrence(from, JUNE_SOLSTICE)
}

/// Date of the next December solstice strictly after `from`.
pub fn next_december_solstice(from: NaiveDate) -> Option<NaiveDate> {
    next_occurrence(from, DECEMBER_SOLSTICE)
}

/// Days until the next June solstice.
pub fn days_until_june_solstice(from: NaiveDate) -> Option<i64> {
    days_until(from, JUNE_SOLSTICE)
}

/// Days until the next December solstice.
pub fn days_until_december_solstice(from: NaiveDate) -> Option<i64> {
    days_until(from, DECEMBER_SOLSTICE)
}

/// Days until the next March equinox.
pub fn days_until_march_equinox(from: NaiveDate) -> Option<i64> {
    days_until(from, MARCH_EQUINOX)
}

/// Days until the next September equinox.
pub fn days_until_september_equinox(from: NaiveDate) -> Option<i64> {
    days_until(from, SEPTEMBER_EQUINOX)
}

/// Days until the next perihelion.
pub fn days_until_perihelion(from: NaiveDate) -> Option<i64> {
    days_until(from, PERIHELION)
}

/// Days until the next aphelion.
pub fn days_until_aphelion(from: NaiveDate) -> Option<i64> {
    days_until(from, APHELION)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_before_solstice_counts_one() {
        assert_eq!(days_until_june_solstice(date(2026, 6, 20)), Some(1));
    }

    #[test]
    fn event_day_rolls_to_next_year() {
        let days = days_until_june_solstice(date(2026, 6, 21)).unwrap();
        assert_eq!(days, 365);
        assert_eq!(
            next_june_solstice(date(2026, 6, 21)),
            Some(date(2027, 6, 21))
        );
    }

    #[test]
    fn december_solstice_wraps_across_new_year() {
        assert_eq!(days_until_december_solstice(date(2026, 12, 25)), Some(361));
    }

    #[test]
    fn perihelion_follows_new_year() {
        assert_eq!(days_until_perihelion(date(2026, 1, 1)), Some(2));
        // On Jan 3 the countdown points at next January.
        assert_eq!(days_until_perihelion(date(2026, 1, 3)), Some(365));
    }

    #[test]
    fn aphelion_midsummer() {
        assert_eq!(days_until_aphelion(date(2026, 7, 1)), Some(3));
    }

    #[test]
    fn equinox_countdowns_are_nonnegative_all_year() {
        let mut day = date(2026, 1, 1);
        for _ in 0..730 {
            for days in [
                days_until_march_equinox(day),
                days_until_september_equinox(day),
                days_until_june_solstice(day),
                days_until_december_solstice(day),
                days_until_perihelion(day),
                days_until_aphelion(day),
            ] {
                let days = days.unwrap();
                assert!((0..=366).contains(&days), "{day}: countdown {days} out of range");
            }
            day = day.succ_opt().unwrap();
        }
    }
}
