// src/utils/constants.rs

/// Country calling code every canonical phone number starts with (Namibia).
pub const NAMIBIA_COUNTRY_CODE: &str = "264";

/// Mean Earth radius used by the Haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average travel speed assumed when estimating arrival times.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;

/// Fallback coordinate (Windhoek city centre) when a location can't be read.
pub const DEFAULT_LATITUDE: f64 = -22.5609;
pub const DEFAULT_LONGITUDE: f64 = 17.0658;

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;
