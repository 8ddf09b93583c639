//! Moon phase, illumination, age and distance.
//!
//! The phase model is a pure synodic clock: days elapsed since a known
//! new moon, folded into [0, synodic period). Age drives everything
//! else -- the phase bucket, the illuminated fraction, the countdown to
//! the next full moon and the elliptical distance approximation.
//!
//! Phase names are assigned from eight equal-width, closed-open age
//! buckets of one eighth of a synodic period each; an age sitting
//! exactly on a bucket boundary belongs to the upcoming bucket, and an
//! age of exactly one period wraps back to bucket 0 (New).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timeutil;

/// Mean length of the synodic month in days.
pub const SYNODIC_PERIOD_DAYS: f64 = 29.530_588;

/// Julian Date of the reference new moon: 2026-01-02 00:00 UTC
/// (JDN 2461043). Verified against <https://moonphases.co.uk/>.
const NEW_MOON_EPOCH_JD: f64 = 2_461_042.5;

/// Mean Earth–Moon distance in km.
pub const MEAN_DISTANCE_KM: f64 = 384_400.0;

/// Semi-amplitude of the modelled distance variation in km.
const DISTANCE_AMPLITUDE_KM: f64 = 21_000.0;

/// Closest approach (perigee) bound in km.
pub const PERIGEE_KM: f64 = 356_500.0;

/// Farthest distance (apogee) bound in km.
pub const APOGEE_KM: f64 = 406_700.0;

/// Number of named phase buckets in one synodic cycle.
const PHASE_COUNT: usize = 8;

/// The eight named moon phases, in cyclic order starting at new moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhaseName {
    /// Dark disc at the start of the cycle.
    New,
    /// Thin waxing sliver on the right limb.
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    /// Right half illuminated.
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    /// More than half lit, still growing.
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    /// Fully illuminated disc.
    Full,
    /// More than half lit, shrinking.
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    /// Left half illuminated.
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    /// Thin waning sliver on the left limb.
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl MoonPhaseName {
    /// All phases in cyclic order, index 0 = New.
    pub const ALL: [Self; PHASE_COUNT] = [
        Self::New,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::Full,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Human-readable label, identical to the serialized form.
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::Full => "Full",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// Icon slot name on the LED matrix for this phase.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::New => "nwmoon",
            Self::WaxingCrescent => "wancrebmoon",
            Self::FirstQuarter => "fqmoon",
            Self::WaxingGibbous => "wgmoon",
            Self::Full => "FullMoon",
            Self::WaningGibbous => "wangmoon",
            Self::LastQuarter => "lqmoon",
            Self::WaningCrescent => "wcmoon",
        }
    }

    /// Six-row ASCII rendering of the phase.
    pub const fn ascii_art(self) -> [&'static str; 6] {
        match self {
            Self::New => [
                "       _..._     ",
                "     .'     `.   ",
                "    :         :  ",
                "    :         :  ",
                "    `.       .'  ",
                "      `-...-'    ",
            ],
            Self::WaxingCrescent => [
                "       _..._     ",
                "     .'   `::.   ",
                "    :       :::  ",
                "    :       :::  ",
                "    `.     .::'  ",
                "      `-..:''    ",
            ],
            Self::FirstQuarter => [
                "       _..._     ",
                "     .'  ::::.   ",
                "    :    ::::::  ",
                "    :    ::::::  ",
                "    `.   :::::'  ",
                "      `-.::''    ",
            ],
            Self::WaxingGibbous => [
                "       _..._     ",
                "     .' .::::.   ",
                "    :  ::::::::  ",
                "    :  ::::::::  ",
                "    `. '::::::'  ",
                "      `-.::''    ",
            ],
            Self::Full => [
                "       _..._     ",
                "     .:::::::.   ",
                "    :::::::::::  ",
                "    :::::::::::  ",
                "    `:::::::::'  ",
                "      `':::''    ",
            ],
            Self::WaningGibbous => [
                "       _..._     ",
                "     .::::. `.   ",
                "    :::::::.  :  ",
                "    ::::::::  :  ",
                "    `::::::' .'  ",
                "      `'::'-'    ",
            ],
            Self::LastQuarter => [
                "       _..._     ",
                "     .::::  `.   ",
                "    ::::::    :  ",
                "    ::::::    :  ",
                "    `:::::   .'  ",
                "      `'::.-'    ",
            ],
            Self::WaningCrescent => [
                "       _..._     ",
                "     .::'   `.   ",
                "    :::       :  ",
                "    :::       :  ",
                "    `::.     .'  ",
                "      `':..-'    ",
            ],
        }
    }
}

impl core::fmt::Display for MoonPhaseName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// The Moon's synodic state at one instant.
///
/// Construct with [`MoonState::at`]; every derived quantity is a pure
/// function of the stored age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonState {
    age_days: f64,
}

impl MoonState {
    /// Compute the synodic state for the given UTC instant.
    pub fn at(t: DateTime<Utc>) -> Self {
        let elapsed = timeutil::julian_date(t) - NEW_MOON_EPOCH_JD;
        Self {
            age_days: elapsed.rem_euclid(SYNODIC_PERIOD_DAYS),
        }
    }

    /// Build a state directly from an age in days (folded into range).
    pub fn from_age_days(age_days: f64) -> Self {
        Self {
            age_days: age_days.rem_euclid(SYNODIC_PERIOD_DAYS),
        }
    }

    /// Days since the last new moon, in [0, synodic period).
    pub const fn age_days(&self) -> f64 {
        self.age_days
    }

    /// The named phase bucket for this age.
    pub fn phase(&self) -> MoonPhaseName {
        let bucket_width = SYNODIC_PERIOD_DAYS / bucket_count_f64();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = ((self.age_days / bucket_width).floor() as usize).min(PHASE_COUNT - 1);
        MoonPhaseName::ALL.get(idx).copied().unwrap_or(MoonPhaseName::New)
    }

    /// Illuminated fraction of the disc as a percentage in [0, 100],
    /// rounded to one decimal place.
    pub fn illumination_percent(&self) -> f64 {
        let raw = 50.0
            * (1.0 - (2.0 * core::f64::consts::PI * self.age_days / SYNODIC_PERIOD_DAYS).cos());
        (raw * 10.0).round() / 10.0
    }

    /// Days until the next full moon (age = half a synodic period).
    ///
    /// Always positive; the instant of exact full counts as just passed,
    /// so the countdown reads one whole period there.
    pub fn days_until_full(&self) -> f64 {
        let half = SYNODIC_PERIOD_DAYS / 2.0;
        if self.age_days < half {
            half - self.age_days
        } else {
            SYNODIC_PERIOD_DAYS + half - self.age_days
        }
    }

    /// Approximate Earth–Moon distance in km.
    ///
    /// Cosine oscillation about the mean distance, one full cycle per
    /// synodic period, closest at new moon. Stays inside the perigee /
    /// apogee bounds by construction.
    pub fn distance_km(&self) -> f64 {
        MEAN_DISTANCE_KM
            - DISTANCE_AMPLITUDE_KM
                * (2.0 * core::f64::consts::PI * self.age_days / SYNODIC_PERIOD_DAYS).cos()
    }
}

/// Bucket count as `f64` (exact for a value this small).
#[allow(clippy::cast_precision_loss)]
const fn bucket_count_f64() -> f64 {
    PHASE_COUNT as f64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap()
    }

    fn seconds(days: f64) -> TimeDelta {
        TimeDelta::seconds((days * 86_400.0).round() as i64)
    }

    #[test]
    fn new_moon_at_epoch() {
        let m = MoonState::at(epoch());
        assert!(m.age_days().abs() < 1e-6);
        assert_eq!(m.phase(), MoonPhaseName::New);
        assert!(m.illumination_percent() < 0.1);
    }

    #[test]
    fn full_moon_half_a_period_later() {
        let t = epoch() + seconds(SYNODIC_PERIOD_DAYS / 2.0);
        let m = MoonState::at(t);
        assert_eq!(m.phase(), MoonPhaseName::Full);
        assert!(m.illumination_percent() > 99.9);
    }

    #[test]
    fn exact_full_counts_as_just_passed() {
        let m = MoonState::from_age_days(SYNODIC_PERIOD_DAYS / 2.0);
        assert!((m.days_until_full() - SYNODIC_PERIOD_DAYS).abs() < 1e-9);
    }

    #[test]
    fn age_is_periodic() {
        let t = epoch() + seconds(7.3);
        let later = t + seconds(SYNODIC_PERIOD_DAYS);
        let diff = (MoonState::at(t).age_days() - MoonState::at(later).age_days()).abs();
        assert!(diff < 1e-4, "age not periodic: diff {diff}");
    }

    #[test]
    fn phases_cycle_in_order_over_one_period() {
        let bucket = SYNODIC_PERIOD_DAYS / 8.0;
        let mut seen = Vec::new();
        for i in 0..8 {
            // Sample each bucket at its midpoint.
            let age = (f64::from(i) + 0.5) * bucket;
            seen.push(MoonState::from_age_days(age).phase());
        }
        assert_eq!(seen, MoonPhaseName::ALL.to_vec());
    }

    #[test]
    fn bucket_boundary_belongs_to_upcoming_phase() {
        let bucket = SYNODIC_PERIOD_DAYS / 8.0;
        assert_eq!(
            MoonState::from_age_days(bucket).phase(),
            MoonPhaseName::WaxingCrescent
        );
        // A full period wraps back to New.
        assert_eq!(
            MoonState::from_age_days(SYNODIC_PERIOD_DAYS).phase(),
            MoonPhaseName::New
        );
    }

    #[test]
    fn illumination_stays_in_range() {
        for i in 0..300 {
            let m = MoonState::from_age_days(f64::from(i) * 0.1);
            let pct = m.illumination_percent();
            assert!((0.0..=100.0).contains(&pct), "illumination {pct} out of range");
        }
    }

    #[test]
    fn days_until_full_counts_down_then_resets() {
        let before = MoonState::from_age_days(10.0);
        let closer = MoonState::from_age_days(12.0);
        assert!(closer.days_until_full() < before.days_until_full());

        // Just past full: countdown resets to nearly a full period.
        let past = MoonState::from_age_days(SYNODIC_PERIOD_DAYS / 2.0 + 0.1);
        assert!(past.days_until_full() > SYNODIC_PERIOD_DAYS - 0.2);
        assert!(past.days_until_full() >= 0.0);
    }

    #[test]
    fn distance_respects_orbit_bounds() {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for i in 0..600 {
            let d = MoonState::from_age_days(f64::from(i) * 0.05).distance_km();
            assert!(d >= PERIGEE_KM && d <= APOGEE_KM, "distance {d} outside bounds");
            lo = lo.min(d);
            hi = hi.max(d);
        }
        // The oscillation actually spans its modelled amplitude.
        assert!(hi - lo > DISTANCE_AMPLITUDE_KM);
    }

    #[test]
    fn distance_completes_one_cycle_per_period() {
        let at_new = MoonState::from_age_days(0.0).distance_km();
        let at_full = MoonState::from_age_days(SYNODIC_PERIOD_DAYS / 2.0).distance_km();
        let wrapped = MoonState::from_age_days(SYNODIC_PERIOD_DAYS).distance_km();
        assert!((at_new - wrapped).abs() < 1e-6);
        assert!((at_full - at_new).abs() > DISTANCE_AMPLITUDE_KM);
    }

    #[test]
    fn phase_labels_match_serialized_form() {
        let json = serde_json::to_string(&MoonPhaseName::WaxingGibbous).unwrap();
        assert_eq!(json, "\"Waxing Gibbous\"");
        let json = serde_json::to_string(&MoonPhaseName::New).unwrap();
        assert_eq!(json, "\"New\"");
        assert_eq!(MoonPhaseName::Full.label(), "Full");
    }
}
