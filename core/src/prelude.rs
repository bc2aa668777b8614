pub use crate::geo::{bearing, distance, GeoPosition};
pub use crate::radar::{
    find_nearest_point, project, recompute, ProjectedPoint, RadarConfig, RadarFrame, RadarScope,
    RankedEntity, ScreenPoint,
};
pub use crate::tracking::{retain_selection, SignalTier, TrackedEntity};

/// Validation failures raised while building engine inputs.
///
/// Runtime conditions such as a missing fix or an out-of-range device are
/// regular outcomes of `recompute`, never errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RadarError {
    #[error("invalid position: latitude {latitude}, longitude {longitude}")]
    InvalidPosition { latitude: f64, longitude: f64 },
    #[error("invalid radar range: {0} m")]
    InvalidRange(f64),
    #[error("invalid scope geometry: {0}")]
    InvalidScope(String),
}

pub type RadarResult<T> = Result<T, RadarError>;
