// src/normalize/coordinate.rs - Decoding locations from every shape the API sends
//
// Provider and patient locations reach the client in three encodings:
// a `{latitude, longitude}` object, a GeoJSON Point, or a bare `[lng, lat]`
// pair. They are decoded into `CoordinateInput` first and only then
// collapsed into the one canonical `Coordinate`.

use log::{debug, warn};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::utils::constants::{MAX_LATITUDE, MAX_LONGITUDE};

/// Canonical location used by every distance calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both parts finite and inside the WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= MAX_LATITUDE
            && self.longitude.abs() <= MAX_LONGITUDE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeoJsonType {
    Point,
}

/// GeoJSON Point, longitude first: `{"type": "Point", "coordinates": [lng, lat]}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: GeoJsonType,
    pub coordinates: [f64; 2],
}

/// A number, or a string holding one. The API is not consistent about
/// which of the two it sends for `latitude`/`longitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeric(pub f64);

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumericVisitor;

        impl<'de> Visitor<'de> for NumericVisitor {
            type Value = Numeric;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Numeric, E> {
                Ok(Numeric(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
                Ok(Numeric(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
                Ok(Numeric(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
                v.trim()
                    .parse::<f64>()
                    .map(Numeric)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(NumericVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngInput {
    pub latitude: Numeric,
    pub longitude: Numeric,
}

// Hand-written so that only JSON objects qualify. A derived impl would also
// accept `[a, b]` sequences and shadow the `[lng, lat]` pair encoding.
impl<'de> Deserialize<'de> for LatLngInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(LatLngInput {
            latitude: take_numeric::<D::Error>(&mut fields, "latitude")?,
            longitude: take_numeric::<D::Error>(&mut fields, "longitude")?,
        })
    }
}

fn take_numeric<E: de::Error>(fields: &mut Map<String, Value>, name: &'static str) -> Result<Numeric, E> {
    let value = fields.remove(name).ok_or_else(|| E::missing_field(name))?;
    Numeric::deserialize(value).map_err(E::custom)
}

/// Every coordinate encoding the client accepts. Variant order is the
/// recognition order.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    LatLng(LatLngInput),
    Point(GeoJsonPoint),
    /// `[longitude, latitude]`, same order as GeoJSON.
    Pair([f64; 2]),
}

impl CoordinateInput {
    /// Decode an untyped JSON value, `None` when no encoding matches.
    pub fn from_value(value: &Value) -> Option<Self> {
        CoordinateInput::deserialize(value).ok()
    }

    pub fn into_coordinate(self) -> Coordinate {
        match self {
            CoordinateInput::LatLng(LatLngInput { latitude, longitude }) => {
                Coordinate::new(latitude.0, longitude.0)
            }
            CoordinateInput::Point(GeoJsonPoint { coordinates: [lng, lat], .. })
            | CoordinateInput::Pair([lng, lat]) => Coordinate::new(lat, lng),
        }
    }
}

impl From<CoordinateInput> for Coordinate {
    fn from(input: CoordinateInput) -> Self {
        input.into_coordinate()
    }
}

impl From<Coordinate> for GeoJsonPoint {
    fn from(coordinate: Coordinate) -> Self {
        to_geojson(&coordinate)
    }
}

/// Normalize any supported coordinate encoding to `Coordinate`.
///
/// Unrecognized input, `null` included, logs a warning and returns `None`.
pub fn normalize_coordinate(value: &Value) -> Option<Coordinate> {
    match CoordinateInput::from_value(value) {
        Some(input) => {
            debug!("Coordinate decoded as {:?}", input);
            Some(input.into_coordinate())
        }
        None => {
            warn!("Unrecognized coordinate format: {}", value);
            None
        }
    }
}

/// True only when `value` normalizes and lies inside the WGS84 bounds.
pub fn is_valid_coordinate(value: &Value) -> bool {
    normalize_coordinate(value).map_or(false, |c| c.is_valid())
}

/// Exact inverse of the GeoJSON recognizer.
pub fn to_geojson(coordinate: &Coordinate) -> GeoJsonPoint {
    GeoJsonPoint {
        kind: GeoJsonType::Point,
        coordinates: [coordinate.longitude, coordinate.latitude],
    }
}

pub fn normalize_coordinate_or(value: &Value, default: Coordinate) -> Coordinate {
    normalize_coordinate(value).unwrap_or(default)
}

/// For optional fields: a missing value is simply `None`, no warning.
pub fn normalize_optional_coordinate(value: Option<&Value>) -> Option<Coordinate> {
    value.and_then(normalize_coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_close(actual: Coordinate, expected: Coordinate) {
        assert!((actual.latitude - expected.latitude).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        assert!((actual.longitude - expected.longitude).abs() < 1e-9, "{:?} != {:?}", actual, expected);
    }

    #[test]
    fn test_lat_lng_object_is_identity() {
        let c = normalize_coordinate(&json!({"latitude": -22.5, "longitude": 17.1}));
        assert_eq!(c, Some(Coordinate::new(-22.5, 17.1)));
    }

    #[test]
    fn test_lat_lng_strings_are_coerced() {
        let c = normalize_coordinate(&json!({"latitude": "-22.5", "longitude": " 17.1 "}));
        assert_eq!(c, Some(Coordinate::new(-22.5, 17.1)));

        let ints = normalize_coordinate(&json!({"latitude": -22, "longitude": 17}));
        assert_eq!(ints, Some(Coordinate::new(-22.0, 17.0)));

        assert_eq!(normalize_coordinate(&json!({"latitude": "north", "longitude": 17.1})), None);
    }

    #[test]
    fn test_geojson_point() {
        let c = normalize_coordinate(&json!({"type": "Point", "coordinates": [17.1, -22.5]}));
        assert_eq!(c, Some(Coordinate::new(-22.5, 17.1)));
    }

    #[test]
    fn test_lng_lat_pair() {
        assert_eq!(normalize_coordinate(&json!([17.1, -22.5])), Some(Coordinate::new(-22.5, 17.1)));
    }

    #[test]
    fn test_lat_lng_fields_win_over_geojson() {
        let mixed = json!({
            "latitude": 1.0,
            "longitude": 2.0,
            "type": "Point",
            "coordinates": [30.0, 40.0]
        });
        assert_eq!(normalize_coordinate(&mixed), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(normalize_coordinate(&json!({"foo": "bar"})), None);
        assert_eq!(normalize_coordinate(&Value::Null), None);
        assert_eq!(normalize_coordinate(&json!("-22.5,17.1")), None);
        assert_eq!(normalize_coordinate(&json!([17.1])), None);
        assert_eq!(normalize_coordinate(&json!([17.1, -22.5, 0.0])), None);
        assert_eq!(normalize_coordinate(&json!({"type": "LineString", "coordinates": [17.1, -22.5]})), None);
        assert_eq!(normalize_coordinate(&json!({"type": "Point", "coordinates": [17.1]})), None);
        assert_eq!(normalize_coordinate(&json!({"latitude": 1.0})), None);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(!is_valid_coordinate(&json!({"latitude": 91, "longitude": 0})));
        assert!(!is_valid_coordinate(&json!({"latitude": 0, "longitude": 181})));
        assert!(is_valid_coordinate(&json!({"latitude": 0, "longitude": 0})));
        assert!(is_valid_coordinate(&json!({"latitude": -90, "longitude": 180})));
        assert!(!is_valid_coordinate(&json!({"foo": "bar"})));
        assert!(!is_valid_coordinate(&Value::Null));

        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_geojson_round_trip() {
        for c in [
            Coordinate::new(-22.5609, 17.0658),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(90.0, -180.0),
            Coordinate::new(-17.7833, 15.7),
        ] {
            let encoded = serde_json::to_value(to_geojson(&c)).unwrap();
            assert_close(normalize_coordinate(&encoded).unwrap(), c);
        }
    }

    #[test]
    fn test_geojson_serialized_shape() {
        let encoded = serde_json::to_value(GeoJsonPoint::from(Coordinate::new(-22.5, 17.1))).unwrap();
        assert_eq!(encoded, json!({"type": "Point", "coordinates": [17.1, -22.5]}));
    }

    #[test]
    fn test_wrappers() {
        let fallback = Coordinate::new(-22.5609, 17.0658);
        assert_eq!(normalize_coordinate_or(&json!({"foo": "bar"}), fallback), fallback);
        assert_eq!(
            normalize_coordinate_or(&json!([17.1, -22.5]), fallback),
            Coordinate::new(-22.5, 17.1)
        );

        assert_eq!(normalize_optional_coordinate(None), None);
        assert_eq!(normalize_optional_coordinate(Some(&Value::Null)), None);
        assert_eq!(
            normalize_optional_coordinate(Some(&json!({"latitude": -22.5, "longitude": 17.1}))),
            Some(Coordinate::new(-22.5, 17.1))
        );
    }
}
