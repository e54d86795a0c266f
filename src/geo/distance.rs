// src/geo/distance.rs - Haversine distance, arrival estimates and display strings
use log::warn;
use serde::{Deserialize, Serialize};

use crate::normalize::coordinate::Coordinate;
use crate::utils::constants::{DEFAULT_AVERAGE_SPEED_KMH, EARTH_RADIUS_KM};

/// Great-circle distance in kilometers, rounded to one decimal.
///
/// Inputs are degrees and are not range checked.
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let (delta_phi, delta_lambda) = ((lat2 - lat1).to_radians(), (lon2 - lon1).to_radians());
    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let km = 2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt());
    round_half_up_tenths(km)
}

/// Round to one decimal, ties towards positive infinity.
fn round_half_up_tenths(value: f64) -> f64 {
    let scaled = value * 10.0;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / 10.0
}

pub fn calculate_distance_between(from: &Coordinate, to: &Coordinate) -> f64 {
    calculate_distance(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Human readable travel time at the default average speed of 40 km/h.
pub fn calculate_estimated_arrival(distance_km: f64) -> String {
    calculate_estimated_arrival_at_speed(distance_km, DEFAULT_AVERAGE_SPEED_KMH)
}

pub fn calculate_estimated_arrival_at_speed(distance_km: f64, speed_kmh: f64) -> String {
    let speed_kmh = if speed_kmh.is_finite() && speed_kmh > 0.0 {
        speed_kmh
    } else {
        warn!(
            "Invalid average speed {} km/h, using {} km/h",
            speed_kmh, DEFAULT_AVERAGE_SPEED_KMH
        );
        DEFAULT_AVERAGE_SPEED_KMH
    };

    let minutes = (distance_km / speed_kmh * 60.0).round();
    if !minutes.is_finite() || minutes < 1.0 {
        return "Less than 1 minute".to_string();
    }
    if minutes == 1.0 {
        return "1 minute".to_string();
    }
    if minutes < 60.0 {
        return format!("{} minutes", minutes);
    }

    // Split in f64, huge finite distances must not saturate
    let (hours, remainder) = ((minutes / 60.0).floor(), minutes % 60.0);
    let hour_text = if hours == 1.0 {
        "1 hour".to_string()
    } else {
        format!("{} hours", hours)
    };
    if remainder == 0.0 {
        hour_text
    } else {
        format!("{} {} minutes", hour_text, remainder)
    }
}

/// Display string for a distance: meters below 1 km, kilometers otherwise.
///
/// `distance_km` must already be rounded to one decimal, as
/// [`calculate_distance`] returns it. The kilometer branch prints it as-is.
/// NaN and infinite distances render as `"Unknown distance"`.
pub fn format_distance(distance_km: f64) -> String {
    if !distance_km.is_finite() {
        return "Unknown distance".to_string();
    }
    if distance_km < 1.0 {
        format!("{} m", (distance_km * 1000.0).round() as i64)
    } else {
        format!("{} km", distance_km)
    }
}

/// Distance and arrival estimate between a patient and a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSummary {
    pub distance_km: f64,
    pub distance_text: String,
    pub eta_text: String,
}

impl TravelSummary {
    pub fn between(from: &Coordinate, to: &Coordinate, speed_kmh: f64) -> Self {
        let distance_km = calculate_distance_between(from, to);
        Self {
            distance_km,
            distance_text: format_distance(distance_km),
            eta_text: calculate_estimated_arrival_at_speed(distance_km, speed_kmh),
        }
    }
}
