use crate::geo::{distance, GeoPosition};
use crate::radar::config::{RadarConfig, RadarScope};
use crate::radar::projection::{place, ProjectedPoint};
use crate::tracking::{SignalTier, TrackedEntity};
use serde::{Deserialize, Serialize};

/// A device annotated with its distance from the observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub signal_strength: i32,
    pub distance_m: f64,
    pub in_range: bool,
}

impl RankedEntity {
    pub fn signal_tier(&self) -> SignalTier {
        SignalTier::classify(self.signal_strength)
    }
}

/// Output of one refresh: scope points and the nearest-first device list.
///
/// The two lists are independent artifacts. `points` honours the range
/// filter, `ranked` covers every device and flags the ones in range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadarFrame {
    #[serde(default)]
    pub observer: Option<GeoPosition>,
    pub points: Vec<ProjectedPoint>,
    pub ranked: Vec<RankedEntity>,
}

impl RadarFrame {
    /// `false` when the frame was produced without an observer fix.
    pub fn has_fix(&self) -> bool {
        self.observer.is_some()
    }

    pub fn ranked_within_range(&self) -> impl Iterator<Item = &RankedEntity> {
        self.ranked.iter().filter(|entry| entry.in_range)
    }

    pub fn point(&self, entity_id: &str) -> Option<&ProjectedPoint> {
        self.points.iter().find(|point| point.entity_id == entity_id)
    }
}

/// Recomputes the whole frame from the current device list and config.
///
/// Without an observer fix the frame is empty. Otherwise every device is
/// ranked by distance (ties keep input order) and the ones within range are
/// projected onto `scope` in input order.
pub fn recompute(
    entities: &[TrackedEntity],
    config: &RadarConfig,
    scope: &RadarScope,
) -> RadarFrame {
    let Some(observer) = config.observer() else {
        return RadarFrame::default();
    };
    let max_range_m = config.max_range_m();

    let mut points = Vec::new();
    let mut ranked = Vec::with_capacity(entities.len());

    for entity in entities {
        let distance_m = distance(&observer, &entity.position);
        if let Some(point) = place(&observer, entity, distance_m, max_range_m, scope) {
            points.push(point);
        }
        ranked.push(RankedEntity {
            entity_id: entity.id.clone(),
            display_name: entity.display_name.clone(),
            signal_strength: entity.signal_strength,
            distance_m,
            in_range: distance_m <= max_range_m,
        });
    }

    // `sort_by` is stable, so equal distances keep their input order.
    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

    RadarFrame {
        observer: Some(observer),
        points,
        ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::config::ScreenPoint;
    use std::f64::consts::FRAC_PI_2;

    const KUALA_LUMPUR: GeoPosition = GeoPosition::new(3.1390, 101.6869);

    fn scope() -> RadarScope {
        RadarScope::for_canvas(450.0, 20.0).unwrap()
    }

    fn config(range: f64) -> RadarConfig {
        RadarConfig::new(range, Some(KUALA_LUMPUR)).unwrap()
    }

    fn sweep() -> Vec<TrackedEntity> {
        vec![
            TrackedEntity::new("far", KUALA_LUMPUR.offset_by(0.3, 80.0), -88),
            TrackedEntity::new("near", KUALA_LUMPUR.offset_by(2.0, 4.0), -45)
                .with_display_name("Lobby"),
            TrackedEntity::new("mid", KUALA_LUMPUR.offset_by(-1.2, 9.0), -71),
            TrackedEntity::new("edge", KUALA_LUMPUR.offset_by(FRAC_PI_2, 30.0), -66),
        ]
    }

    #[test]
    fn no_fix_yields_empty_frame() {
        let no_fix = RadarConfig::new(50.0, None).unwrap();
        let frame = recompute(&sweep(), &no_fix, &scope());
        assert!(frame.points.is_empty());
        assert!(frame.ranked.is_empty());
        assert!(!frame.has_fix());
    }

    #[test]
    fn fix_without_devices_is_still_a_fix() {
        let frame = recompute(&[], &config(10.0), &scope());
        assert!(frame.has_fix());
        assert!(frame.ranked.is_empty());
    }

    #[test]
    fn observer_and_twenty_meters_north() {
        let entities = vec![
            TrackedEntity::new("A", KUALA_LUMPUR, -40),
            TrackedEntity::new("B", KUALA_LUMPUR.offset_by(0.0, 20.0), -60),
        ];
        let frame = recompute(&entities, &config(10.0), &scope());

        let plotted: Vec<_> = frame.points.iter().map(|p| p.entity_id.as_str()).collect();
        assert_eq!(plotted, vec!["A"]);

        let ranked: Vec<_> = frame.ranked.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ranked, vec!["A", "B"]);
        assert!(frame.ranked[0].in_range);
        assert!(!frame.ranked[1].in_range);
        assert!((frame.ranked[1].distance_m - 20.0).abs() < 0.01);
    }

    #[test]
    fn ranked_is_ascending_and_points_respect_range() {
        let frame = recompute(&sweep(), &config(10.0), &scope());

        let order: Vec<_> = frame.ranked.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(order, vec!["near", "mid", "edge", "far"]);
        assert!(frame
            .ranked
            .windows(2)
            .all(|pair| pair[0].distance_m <= pair[1].distance_m));

        // Points follow input order, not distance order.
        let plotted: Vec<_> = frame.points.iter().map(|p| p.entity_id.as_str()).collect();
        assert_eq!(plotted, vec!["near", "mid"]);
        assert!(frame.points.iter().all(|p| p.distance_m <= 10.0));
        assert_eq!(frame.ranked_within_range().count(), 2);
        assert_eq!(frame.ranked[0].display_name.as_deref(), Some("Lobby"));
    }

    #[test]
    fn widening_range_needs_no_new_input() {
        let entities = sweep();
        let narrow = recompute(&entities, &config(10.0), &scope());
        let wide = recompute(&entities, &config(100.0), &scope());
        assert_eq!(narrow.ranked.len(), wide.ranked.len());
        assert_eq!(wide.points.len(), entities.len());
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let entities = vec![
            TrackedEntity::new("first", KUALA_LUMPUR.offset_by(0.0, 12.0), -50),
            TrackedEntity::new("closest", KUALA_LUMPUR, -50),
            TrackedEntity::new("second", KUALA_LUMPUR.offset_by(0.0, 12.0), -70),
            TrackedEntity::new("third", KUALA_LUMPUR.offset_by(0.0, 12.0), -90),
        ];
        let frame = recompute(&entities, &config(50.0), &scope());
        let order: Vec<_> = frame.ranked.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(order, vec!["closest", "first", "second", "third"]);
    }

    #[test]
    fn recompute_is_idempotent() {
        let entities = sweep();
        let first = recompute(&entities, &config(25.0), &scope());
        let second = recompute(&entities, &config(25.0), &scope());
        assert_eq!(first, second);
        for (a, b) in first.points.iter().zip(&second.points) {
            assert_eq!(a.screen_x.to_bits(), b.screen_x.to_bits());
            assert_eq!(a.screen_y.to_bits(), b.screen_y.to_bits());
        }
    }

    #[test]
    fn point_lookup_by_id() {
        let frame = recompute(&sweep(), &config(10.0), &scope());
        assert!(frame.point("near").is_some());
        assert!(frame.point("far").is_none());
        let center = ScreenPoint::new(225.0, 225.0);
        let near = frame.point("near").unwrap();
        let offset = ScreenPoint::new(near.screen_x, near.screen_y).distance_to(&center);
        assert!((offset - 4.0 / 10.0 * 205.0).abs() < 1e-3);
    }

    #[test]
    fn antipodal_device_is_ranked_but_never_plotted() {
        let observer = GeoPosition::new(-87.5, -179.5);
        let config = RadarConfig::new(10.0, Some(observer)).unwrap();
        let entities = vec![
            TrackedEntity::new("here", observer, -40),
            TrackedEntity::new("antipode", GeoPosition::new(87.5, 0.5), -90),
        ];
        let frame = recompute(&entities, &config, &scope());

        assert_eq!(frame.points.len(), 1);
        assert_eq!(frame.points[0].entity_id, "here");
        let antipode = frame.ranked.iter().find(|r| r.entity_id == "antipode").unwrap();
        assert!(antipode.distance_m.is_finite());
        assert!(!antipode.in_range);
        for point in &frame.points {
            assert!(point.distance_m <= 10.0);
            assert!(point.screen_x.is_finite() && point.screen_y.is_finite());
        }
    }
}
