use crate::feed::FeedResult;
use crate::geo::GeoPosition;
use serde::{Deserialize, Serialize};

/// Monitoring-path reply carrying the latest GPS fix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GpsFixReport {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellites: Option<u32>,
}

impl GpsFixReport {
    /// Observer position, or `None` while the receiver has no usable fix.
    pub fn observer(&self) -> Option<GeoPosition> {
        if !self.success {
            return None;
        }
        let (lat, lon) = (self.lat?, self.lon?);
        GeoPosition::validated(lat, lon).ok()
    }
}

pub fn parse_fix_report(json: &str) -> FeedResult<GpsFixReport> {
    Ok(serde_json::from_str(json)?)
}
