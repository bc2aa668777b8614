pub mod bearing;
pub mod distance;
pub mod position;

pub use bearing::bearing;
pub use distance::{distance, EARTH_RADIUS_M};
pub use position::GeoPosition;
