//! Proximity radar engine for the Wi-Fi monitoring front-end.
//!
//! Turns an observer fix and a wholesale list of tracked devices into polar
//! coordinates, a screen-projected point set for the radar scope and a
//! distance-ranked device list. Every operation is a pure, synchronous
//! transform; the host owns all state and calls back in on each refresh.

pub mod feed;
pub mod geo;
pub mod prelude;
pub mod radar;
pub mod telemetry;
pub mod tracking;

pub use geo::{bearing, distance, GeoPosition};
pub use prelude::{RadarError, RadarResult};
pub use radar::{
    find_nearest_point, project, recompute, ProjectedPoint, RadarConfig, RadarFrame, RadarScope,
    RankedEntity, ScreenPoint,
};
pub use tracking::{SignalTier, TrackedEntity};
