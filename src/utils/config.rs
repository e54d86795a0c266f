// src/utils/config.rs

use log::{debug, info, warn};
use std::env;

use crate::normalize::coordinate::Coordinate;
use crate::utils::constants::{DEFAULT_AVERAGE_SPEED_KMH, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};

/// Runtime settings for distance estimates and location fallbacks
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorConfig {
    /// Average travel speed used for arrival estimates
    pub average_speed_kmh: f64,
    /// Coordinate used when a location can't be normalized
    pub default_coordinate: Coordinate,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            default_coordinate: Coordinate::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
        }
    }
}

impl LocatorConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let average_speed_kmh = env_f64("ETA_AVERAGE_SPEED_KMH", defaults.average_speed_kmh)
            .filter(|speed| *speed > 0.0)
            .unwrap_or_else(|| {
                warn!(
                    "ETA_AVERAGE_SPEED_KMH must be positive, using {} km/h",
                    defaults.average_speed_kmh
                );
                defaults.average_speed_kmh
            });

        let candidate = Coordinate::new(
            env_f64("DEFAULT_LATITUDE", defaults.default_coordinate.latitude)
                .unwrap_or(f64::NAN),
            env_f64("DEFAULT_LONGITUDE", defaults.default_coordinate.longitude)
                .unwrap_or(f64::NAN),
        );
        let default_coordinate = if candidate.is_valid() {
            candidate
        } else {
            warn!(
                "DEFAULT_LATITUDE/DEFAULT_LONGITUDE do not form a valid coordinate, using {:?}",
                defaults.default_coordinate
            );
            defaults.default_coordinate
        };

        let config = Self { average_speed_kmh, default_coordinate };
        debug!("Locator config: {:?}", config);
        config
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("📍 Average travel speed: {} km/h", self.average_speed_kmh);
        info!(
            "📍 Fallback location: {}, {}",
            self.default_coordinate.latitude, self.default_coordinate.longitude
        );
    }
}

/// Unset variables give the default; unparseable ones give `None`.
fn env_f64(name: &str, default: f64) -> Option<f64> {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                warn!("Ignoring unparseable {}='{}'", name, raw);
                None
            }
        },
        Err(_) => Some(default),
    }
}
