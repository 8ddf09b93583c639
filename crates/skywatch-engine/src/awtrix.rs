//! Awtrix LED-matrix push client.
//!
//! Pushes snapshot values to an Awtrix clock as custom apps: one POST
//! to `/api/custom?name={app}` per displayed value, retried up to three
//! times with a fixed delay. Push failures only affect the counters --
//! the device being offline never disturbs the snapshot pipeline.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde::Serialize;
use skywatch_core::snapshot::AstroSnapshot;
use tracing::{info, warn};

/// Attempts per push before giving up.
const MAX_ATTEMPTS: u32 = 3;

/// Delay between retry attempts.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Request timeout for device calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Icon slot names on the device.
mod icon {
    pub const MARS: &str = "MARS";
    pub const JUPITER: &str = "JUPITER";
    pub const SATURN: &str = "SATURN";
    pub const VOYAGER: &str = "VOYAGER";
    pub const NEWHORIZONS: &str = "NEWHORIZONS";
    pub const DAYLENGTH: &str = "DAYLENGTH";
    pub const EARTH: &str = "EARTH";
    pub const MOON: &str = "MOON";
    pub const LIGHT: &str = "LIGHT";
    pub const SUMMER: &str = "SUMMER";
    pub const WINTER: &str = "WINTER";
    pub const PERIHELION: &str = "PERIHELION";
    pub const FULL_MOON: &str = "FullMoon";
}

/// Custom-app payload understood by the device.
#[derive(Debug, Serialize)]
struct CustomApp<'a> {
    name: &'a str,
    text: &'a str,
    save: &'a str,
    effect: &'a str,
    icon: &'a str,
}

/// HTTP client for one Awtrix device, with push counters.
#[derive(Debug)]
pub struct AwtrixClient {
    base_url: String,
    http: reqwest::Client,
    success_count: AtomicU32,
    failure_count: AtomicU32,
}

impl AwtrixClient {
    /// Create a client for the device at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a [`reqwest::Error`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
            success_count: AtomicU32::new(0),
            failure_count: AtomicU32::new(0),
        })
    }

    /// Probe the device's stats endpoint and log reachability.
    ///
    /// Purely informational: an unreachable device only means pushes
    /// will fail until it comes online.
    pub async fn check_connectivity(&self) {
        let url = format!("{}/api/stats", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                info!(url = self.base_url, status = %response.status(), "Awtrix reachable");
            }
            Ok(response) => {
                warn!(
                    url = self.base_url,
                    status = %response.status(),
                    "Awtrix responded with unexpected status, pushes may fail"
                );
            }
            Err(e) => {
                warn!(
                    url = self.base_url,
                    error = %e,
                    "Awtrix device not reachable, pushes will fail until it comes online"
                );
            }
        }
    }

    /// Push one custom app to the device, retrying on failure.
    pub async fn push(&self, app_name: &str, text: &str, icon: &str) {
        let url = format!("{}/api/custom?name={app_name}", self.base_url);
        let payload = CustomApp {
            name: app_name,
            text,
            save: "1",
            effect: "",
            icon,
        };

        for attempt in 1..=MAX_ATTEMPTS {
            match self.http.post(&url).json(&payload).send().await {
                Ok(response) => {
                    info!(app = app_name, status = %response.status(), "Awtrix push");
                    self.success_count.fetch_add(1, Ordering::Relaxed);
                    return;
                }
                Err(e) if attempt < MAX_ATTEMPTS => {
                    warn!(
                        app = app_name,
                        attempt,
                        max_attempts = MAX_ATTEMPTS,
                        error = %e,
                        "Awtrix push failed, retrying"
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    warn!(
                        app = app_name,
                        attempts = MAX_ATTEMPTS,
                        error = %e,
                        "Awtrix push failed, giving up"
                    );
                    self.failure_count.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    /// Push every displayable snapshot value to the device.
    ///
    /// Fields the builder could not compute are skipped.
    pub async fn push_snapshot(&self, snapshot: &AstroSnapshot) {
        if let (Some(phase), Some(phase_icon)) =
            (snapshot.moon_phase_name, snapshot.moon_phase_icon.as_deref())
        {
            self.push("moonphase", phase.label(), phase_icon).await;
            if let Some(pct) = snapshot.moon_illumination_percent {
                self.push("moonillumination", &format!("{pct:.0}%"), phase_icon)
                    .await;
            }
        }
        if let Some(days) = snapshot.days_until_full_moon {
            self.push("fullmoon", &format!("{days:.0}d"), icon::FULL_MOON)
                .await;
        }
        if let Some(au) = snapshot.mars_distance_au {
            self.push("marsDistanceAu", &format!("{au:.1}au"), icon::MARS)
                .await;
        }
        if let Some(au) = snapshot.jupiter_distance_au {
            self.push("jupiterDistanceAu", &format!("{au:.1}au"), icon::JUPITER)
                .await;
        }
        if let Some(au) = snapshot.saturn_distance_au {
            self.push("saturnDistanceAu", &format!("{au:.1}au"), icon::SATURN)
                .await;
        }
        if let Some(au) = snapshot.voyager1_distance_au {
            self.push("voyager1", &format!("V1:{au:.0}au"), icon::VOYAGER)
                .await;
        }
        if let Some(au) = snapshot.voyager2_distance_au {
            self.push("voyager2", &format!("V2:{au:.0}au"), icon::VOYAGER)
                .await;
        }
        if let Some(au) = snapshot.new_horizons_distance_au {
            self.push("newhorizons", &format!("NH:{au:.0}au"), icon::NEWHORIZONS)
                .await;
        }
        if let Some(hours) = snapshot.daylight_hours {
            self.push("CurrentDayLength", &format!("{hours:.1}hrs"), icon::DAYLENGTH)
                .await;
        }
        if let Some(speed) = snapshot.earth_speed_km_per_sec {
            self.push("earthSpeed", &format!("{speed:.1}km/s"), icon::EARTH)
                .await;
        }
        if let Some(km) = snapshot.moon_distance_km {
            self.push("moonDistance", &format!("{km:.0}km"), icon::MOON)
                .await;
        }
        if let Some(time) = snapshot.light_time_earth_to_mars.as_deref() {
            self.push("lightMars", &format!("Lt:{time}"), icon::LIGHT).await;
        }
        if let Some(time) = snapshot.light_time_earth_to_jupiter.as_deref() {
            self.push("lightJupiter", &format!("Lt:{time}"), icon::LIGHT)
                .await;
        }
        if let Some(days) = snapshot.days_until_summer_solstice {
            self.push("summersolstice", &format!("{days}d"), icon::SUMMER)
                .await;
        }
        if let Some(days) = snapshot.days_until_winter_solstice {
            self.push("wintersolstice", &format!("{days}d"), icon::WINTER)
                .await;
        }
        if let Some(days) = snapshot.days_until_perihelion {
            self.push("perihelion", &format!("{days}d"), icon::PERIHELION)
                .await;
        }
        if let Some(days) = snapshot.days_until_aphelion {
            self.push("aphelion", &format!("{days}d"), icon::PERIHELION)
                .await;
        }
    }

    /// Lifetime (success, failure) push counts.
    pub fn stats(&self) -> (u32, u32) {
        (
            self.success_count.load(Ordering::Relaxed),
            self.failure_count.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalised() {
        let client = AwtrixClient::new("http://moonclock.local/").unwrap();
        assert_eq!(client.base_url, "http://moonclock.local");
    }

    #[test]
    fn counters_start_at_zero() {
        let client = AwtrixClient::new("http://moonclock.local").unwrap();
        assert_eq!(client.stats(), (0, 0));
    }

    #[test]
    fn custom_app_serializes_device_fields() {
        let app = CustomApp {
            name: "moonphase",
            text: "Full",
            save: "1",
            effect: "",
            icon: "FullMoon",
        };
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["name"], "moonphase");
        assert_eq!(json["text"], "Full");
        assert_eq!(json["save"], "1");
        assert_eq!(json["icon"], "FullMoon");
    }
}
