pub mod geo;
pub mod normalize;
pub mod utils;

pub use geo::distance::{
    calculate_distance, calculate_estimated_arrival, format_distance, TravelSummary,
};
pub use normalize::coordinate::{normalize_coordinate, Coordinate, CoordinateInput, GeoJsonPoint};
pub use normalize::phone::normalize_phone;
