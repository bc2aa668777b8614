use crate::geo::distance::EARTH_RADIUS_M;
use crate::prelude::{RadarError, RadarResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    latitude: f64,
    longitude: f64,
}

impl GeoPosition {
    /// Builds a position without range checks.
    ///
    /// Out-of-domain values are accepted and produce mathematically defined
    /// but meaningless distances; use [`GeoPosition::validated`] at trust
    /// boundaries.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn validated(latitude: f64, longitude: f64) -> RadarResult<Self> {
        let position = Self::new(latitude, longitude);
        if position.is_valid() {
            Ok(position)
        } else {
            Err(RadarError::InvalidPosition {
                latitude,
                longitude,
            })
        }
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle destination reached by travelling `meters` from this
    /// position along the initial bearing `bearing_rad` (clockwise from north).
    pub fn offset_by(&self, bearing_rad: f64, meters: f64) -> Self {
        let angular = meters / EARTH_RADIUS_M;
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();

        let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing_rad.cos())
            .asin();
        let lon2 = lon1
            + (bearing_rad.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * lat2.sin());

        // Normalise longitude back into [-180, 180).
        let longitude = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        Self::new(lat2.to_degrees(), longitude)
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
