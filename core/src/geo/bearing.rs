use crate::geo::position::GeoPosition;
use std::f64::consts::PI;

/// Initial great-circle bearing from `observer` to `target`, in radians
/// within (-π, π], clockwise from north.
///
/// Coincident points hit `atan2(0, 0)` and come back as `0.0`; callers must
/// not read a heading into that value.
pub fn bearing(observer: &GeoPosition, target: &GeoPosition) -> f64 {
    let phi1 = observer.latitude().to_radians();
    let phi2 = target.latitude().to_radians();
    let d_lambda = (target.longitude() - observer.longitude()).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    let theta = y.atan2(x);
    // atan2(-0.0, negative) lands on -π; fold it onto π.
    if theta == -PI {
        PI
    } else {
        theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn cardinal_directions_from_equator() {
        let origin = GeoPosition::new(0.0, 0.0);
        assert_relative_eq!(bearing(&origin, &GeoPosition::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(bearing(&origin, &GeoPosition::new(0.0, 1.0)), FRAC_PI_2);
        assert_relative_eq!(bearing(&origin, &GeoPosition::new(0.0, -1.0)), -FRAC_PI_2);
        assert_relative_eq!(bearing(&origin, &GeoPosition::new(-1.0, 0.0)), PI);
    }

    #[test]
    fn coincident_points_do_not_panic() {
        let spot = GeoPosition::new(3.139, 101.6869);
        let theta = bearing(&spot, &spot);
        assert!(theta.is_finite());
        assert!(theta > -PI && theta <= PI);
    }

    #[test]
    fn bearing_stays_in_half_open_range() {
        let observer = GeoPosition::new(3.139, 101.6869);
        for step in 0..36 {
            let heading = f64::from(step) * 10f64.to_radians();
            let target = observer.offset_by(heading, 40.0);
            let theta = bearing(&observer, &target);
            assert!(theta > -PI && theta <= PI, "{theta} out of range");
        }
    }

    #[test]
    fn due_south_with_negative_zero_longitude_is_pi() {
        let observer = GeoPosition::new(10.0, 0.0);
        let target = GeoPosition::new(5.0, -0.0);
        assert_eq!(bearing(&observer, &target), PI);
    }
}
