use crate::geo::GeoPosition;
use crate::prelude::{RadarError, RadarResult};
use serde::{Deserialize, Serialize};

/// Range selector state plus the current observer fix, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarConfig {
    max_range_m: f64,
    observer: Option<GeoPosition>,
}

impl RadarConfig {
    pub fn new(max_range_m: f64, observer: Option<GeoPosition>) -> RadarResult<Self> {
        if !max_range_m.is_finite() || max_range_m <= 0.0 {
            return Err(RadarError::InvalidRange(max_range_m));
        }
        Ok(Self {
            max_range_m,
            observer,
        })
    }

    pub const fn max_range_m(&self) -> f64 {
        self.max_range_m
    }

    pub const fn observer(&self) -> Option<GeoPosition> {
        self.observer
    }

    pub fn with_observer(self, observer: Option<GeoPosition>) -> Self {
        Self { observer, ..self }
    }

    pub fn with_range(self, max_range_m: f64) -> RadarResult<Self> {
        Self::new(max_range_m, self.observer)
    }
}

/// Point on the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Geometry of the circular scope on its canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarScope {
    pub center: ScreenPoint,
    pub radius_px: f64,
}

impl RadarScope {
    pub fn new(center: ScreenPoint, radius_px: f64) -> RadarResult<Self> {
        if !radius_px.is_finite() || radius_px <= 0.0 {
            return Err(RadarError::InvalidScope(format!(
                "radius must be positive, got {radius_px}"
            )));
        }
        Ok(Self { center, radius_px })
    }

    /// Scope centred in a square canvas of `size` pixels, inset by `margin`.
    pub fn for_canvas(size: f64, margin: f64) -> RadarResult<Self> {
        let half = size / 2.0;
        Self::new(ScreenPoint::new(half, half), half - margin)
    }
}
