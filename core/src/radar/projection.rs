use crate::geo::{bearing, distance, GeoPosition};
use crate::radar::config::RadarScope;
use crate::tracking::TrackedEntity;
use serde::{Deserialize, Serialize};

/// A device placed on the scope for one render frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub entity_id: String,
    pub screen_x: f64,
    pub screen_y: f64,
    pub distance_m: f64,
    pub bearing_rad: f64,
}

/// Places `target` on the scope relative to `observer`.
///
/// Returns `None` when the target lies beyond `max_range_m`. North points
/// up the screen and bearings grow clockwise.
pub fn project(
    observer: &GeoPosition,
    target: &TrackedEntity,
    max_range_m: f64,
    scope: &RadarScope,
) -> Option<ProjectedPoint> {
    let distance_m = distance(observer, &target.position);
    place(observer, target, distance_m, max_range_m, scope)
}

/// Projection with a distance the caller already computed.
pub(crate) fn place(
    observer: &GeoPosition,
    target: &TrackedEntity,
    distance_m: f64,
    max_range_m: f64,
    scope: &RadarScope,
) -> Option<ProjectedPoint> {
    // NaN distances never plot.
    if !(distance_m <= max_range_m) {
        return None;
    }
    let bearing_rad = bearing(observer, &target.position);
    let pixel_distance = (distance_m / max_range_m) * scope.radius_px;

    Some(ProjectedPoint {
        entity_id: target.id.clone(),
        screen_x: scope.center.x + pixel_distance * bearing_rad.sin(),
        screen_y: scope.center.y - pixel_distance * bearing_rad.cos(),
        distance_m,
        bearing_rad,
    })
}
