use crate::geo::position::GeoPosition;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance between two positions, in metres.
///
/// Inputs are not range-checked.
pub fn distance(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let d_phi = (b.latitude() - a.latitude()).to_radians();
    let d_lambda = (b.longitude() - a.longitude()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `h` just past 1 for near-antipodal pairs.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fixtures() -> Vec<GeoPosition> {
        vec![
            GeoPosition::new(0.0, 0.0),
            GeoPosition::new(3.1390, 101.6869),
            GeoPosition::new(-33.8688, 151.2093),
            GeoPosition::new(51.5074, -0.1278),
            GeoPosition::new(89.9, 179.9),
            GeoPosition::new(-90.0, -180.0),
        ]
    }

    #[test]
    fn distance_to_self_is_zero() {
        for position in fixtures() {
            assert_eq!(distance(&position, &position), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let points = fixtures();
        for a in &points {
            for b in &points {
                assert_relative_eq!(distance(a, b), distance(b, a), max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = distance(&GeoPosition::new(0.0, 0.0), &GeoPosition::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() <= 50.0, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let d = distance(&GeoPosition::new(0.0, 0.0), &GeoPosition::new(0.0, 180.0));
        assert_relative_eq!(d, std::f64::consts::PI * EARTH_RADIUS_M, max_relative = 1e-9);
    }

    #[test]
    fn near_antipodal_pairs_stay_finite() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;
        for lat_step in -36..=36 {
            for lon_step in -72..72 {
                let lat = f64::from(lat_step) * 2.5;
                let lon = f64::from(lon_step) * 2.5 + 0.5;
                let a = GeoPosition::new(lat, lon);
                let b = GeoPosition::new(-lat, lon + 180.0);
                let d = distance(&a, &b);
                assert!(d.is_finite(), "{a} -> {b} gave {d}");
                assert!(d <= half_circumference * (1.0 + 1e-12));
            }
        }
        let d = distance(&GeoPosition::new(-87.5, -179.5), &GeoPosition::new(87.5, 0.5));
        assert_relative_eq!(d, half_circumference, max_relative = 1e-6);
    }
}
