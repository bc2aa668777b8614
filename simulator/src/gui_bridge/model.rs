use crate::workflow::state::HostState;
use radarcore::{GeoPosition, TrackedEntity};
use serde::{Deserialize, Serialize};

/// Wholesale view of the host state handed to remote scopes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RadarSnapshot {
    pub observer: Option<GeoPosition>,
    pub entities: Vec<TrackedEntity>,
    pub max_range_m: f64,
    pub status: String,
}

impl From<&HostState> for RadarSnapshot {
    fn from(state: &HostState) -> Self {
        Self {
            observer: state.config.observer(),
            entities: state.entities.clone(),
            max_range_m: state.config.max_range_m(),
            status: state.status.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeRequest {
    pub max_range_m: f64,
}
