//! Earth–Sun and Earth–planet distance approximations.
//!
//! The Sun–Earth radius uses the mean-anomaly cosine series
//! `r ≈ 1.00014 − 0.01671·cos M − 0.00014·cos 2M`, accurate to a few
//! 1e-4 AU. Planet distances combine Earth's radius with a first-order
//! radial approximation `r ≈ a·(1 − e·cos M)` for the planet and the
//! law of cosines across the difference of approximate heliocentric
//! longitudes. Good enough to place a value on a dashboard gauge; not
//! an ephemeris.

use chrono::{DateTime, Utc};

use crate::timeutil;

/// Mean of Earth's orbital radius series, AU.
const EARTH_ORBIT_MEAN_AU: f64 = 1.000_14;

/// Earth's orbital eccentricity term, AU.
const EARTH_ORBIT_ECCENTRICITY: f64 = 0.016_71;

/// Second-order correction term, AU.
const EARTH_ORBIT_CORRECTION: f64 = 0.000_14;

/// Longitude of Earth's perihelion, degrees.
const EARTH_PERIHELION_LONGITUDE_DEG: f64 = 102.937_35;

/// Approximate orbital elements for a planet, J2000 epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Display name of the body.
    pub name: &'static str,
    /// Semi-major axis, AU.
    pub semi_major_axis_au: f64,
    /// Orbital eccentricity.
    pub eccentricity: f64,
    /// Mean anomaly at J2000.0, degrees.
    pub mean_anomaly_j2000_deg: f64,
    /// Mean motion, degrees per day.
    pub mean_motion_deg_per_day: f64,
    /// Longitude of perihelion, degrees.
    pub perihelion_longitude_deg: f64,
}

/// Mars orbital elements (approximate).
pub const MARS: OrbitalElements = OrbitalElements {
    name: "Mars",
    semi_major_axis_au: 1.523_679,
    eccentricity: 0.093_4,
    mean_anomaly_j2000_deg: 19.387,
    mean_motion_deg_per_day: 0.524_020_776_6,
    perihelion_longitude_deg: 336.040_84,
};

/// Jupiter orbital elements (approximate).
pub const JUPITER: OrbitalElements = OrbitalElements {
    name: "Jupiter",
    semi_major_axis_au: 5.202_6,
    eccentricity: 0.048_9,
    mean_anomaly_j2000_deg: 20.020_2,
    mean_motion_deg_per_day: 0.083_129_4,
    perihelion_longitude_deg: 14.753_85,
};

/// Saturn orbital elements (approximate).
pub const SATURN: OrbitalElements = OrbitalElements {
    name: "Saturn",
    semi_major_axis_au: 9.554_9,
    eccentricity: 0.055_7,
    mean_anomaly_j2000_deg: 317.020_7,
    mean_motion_deg_per_day: 0.033_444_2,
    perihelion_longitude_deg: 92.431_94,
};

/// Sun–Earth distance in AU at the given instant.
pub fn sun_distance_au(t: DateTime<Utc>) -> f64 {
    let m = earth_mean_anomaly_rad(t);
    EARTH_ORBIT_MEAN_AU
        - EARTH_ORBIT_ECCENTRICITY * m.cos()
        - EARTH_ORBIT_CORRECTION * (2.0 * m).cos()
}

/// Earth–planet distance in AU at the given instant.
///
/// Law-of-cosines combination of the two heliocentric radii and the
/// difference of their approximate ecliptic longitudes.
pub fn planet_distance_au(t: DateTime<Utc>, planet: &OrbitalElements) -> f64 {
    let d = timeutil::days_since_j2000(t);

    let r_earth = sun_distance_au(t);
    let m_earth_deg = timeutil::normalize_deg(
        timeutil::EARTH_MEAN_ANOMALY_J2000_DEG + timeutil::EARTH_MEAN_MOTION_DEG_PER_DAY * d,
    );
    let long_earth_rad = (m_earth_deg + EARTH_PERIHELION_LONGITUDE_DEG).to_radians();

    let m_planet_deg = timeutil::normalize_deg(
        planet.mean_anomaly_j2000_deg + planet.mean_motion_deg_per_day * d,
    );
    let r_planet =
        planet.semi_major_axis_au * (1.0 - planet.eccentricity * m_planet_deg.to_radians().cos());
    let long_planet_rad = (m_planet_deg + planet.perihelion_longitude_deg).to_radians();

    let delta = (long_planet_rad - long_earth_rad).abs();
    (r_earth * r_earth + r_planet * r_planet - 2.0 * r_earth * r_planet * delta.cos()).sqrt()
}

/// Earth's mean anomaly in radians at the given instant.
fn earth_mean_anomaly_rad(t: DateTime<Utc>) -> f64 {
    let d = timeutil::days_since_j2000(t);
    timeutil::normalize_deg(
        timeutil::EARTH_MEAN_ANOMALY_J2000_DEG + timeutil::EARTH_MEAN_MOTION_DEG_PER_DAY * d,
    )
    .to_radians()
}
