use crate::radar::config::RadarScope;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RING_COUNT: u32 = 5;

/// One labelled distance ring on the scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRing {
    pub radius_px: f64,
    pub distance_m: f64,
    pub label: String,
}

/// Evenly spaced rings from the centre out to the scope edge.
pub fn range_rings(max_range_m: f64, scope: &RadarScope, count: u32) -> Vec<RangeRing> {
    let count_f = f64::from(count);
    (1..=count)
        .map(|ring| {
            let fraction = f64::from(ring) / count_f;
            let distance_m = max_range_m * fraction;
            RangeRing {
                radius_px: scope.radius_px * fraction,
                distance_m,
                label: format!("{}m", distance_m.round()),
            }
        })
        .collect()
}
