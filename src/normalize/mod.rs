pub mod coordinate;
pub mod phone;
