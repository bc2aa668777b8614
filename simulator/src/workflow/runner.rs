use crate::generator::profile::drift_sweep;
use crate::workflow::state::{HostState, SharedState};
use radarcore::telemetry::{LogManager, MetricsRecorder};
use radarcore::{recompute, RadarFrame, RadarScope};
use std::sync::Arc;

/// Drives the trigger → recompute cycle on behalf of the host.
#[derive(Clone)]
pub struct Runner {
    scope: RadarScope,
    metrics: Arc<MetricsRecorder>,
    logger: LogManager,
}

impl Runner {
    pub fn new(scope: RadarScope) -> Self {
        Self {
            scope,
            metrics: Arc::new(MetricsRecorder::new()),
            logger: LogManager::new("simulator"),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn execute(&self, state: &HostState) -> RadarFrame {
        let frame = recompute(&state.entities, &state.config, &self.scope);
        self.logger
            .record_frame(&frame, state.config.max_range_m());
        self.metrics.record_frame(&frame);
        frame
    }

    /// One periodic refresh: synthetic sweeps drift a little, then the frame
    /// is rebuilt and the status line updated.
    pub fn tick(&self, state: &SharedState, tick: u64) -> RadarFrame {
        let mut guard = state.write();
        let host = &mut *guard;
        if let Some(generator) = host.generator.as_ref() {
            host.entities = drift_sweep(&host.entities, generator, tick);
        }
        let frame = self.execute(host);
        host.status = summarize(&frame, host.config.max_range_m());
        frame
    }
}

pub fn summarize(frame: &RadarFrame, max_range_m: f64) -> String {
    if !frame.has_fix() {
        return "No GPS fix: radar idle".into();
    }
    match frame.ranked.first() {
        Some(nearest) => format!(
            "{} of {} devices within {:.0} m, nearest {} at {:.1} m",
            frame.points.len(),
            frame.ranked.len(),
            max_range_m,
            nearest.entity_id,
            nearest.distance_m
        ),
        None => "Fix acquired, no devices reported".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_sweep, GeneratorConfig};
    use radarcore::{GeoPosition, RadarConfig};

    fn runner() -> Runner {
        Runner::new(RadarScope::for_canvas(450.0, 20.0).unwrap())
    }

    #[test]
    fn runner_executes_refresh() {
        let generator = GeneratorConfig {
            devices: 12,
            spread_m: 30.0,
            ..Default::default()
        };
        let config = RadarConfig::new(15.0, Some(generator.center)).unwrap();
        let mut state = HostState::new(config);
        state.replace_entities(build_sweep(&generator).unwrap(), Some(generator));

        let runner = runner();
        let frame = runner.execute(&state);
        assert_eq!(frame.ranked.len(), 12);
        assert!(frame.points.iter().all(|p| p.distance_m <= 15.0));
        assert_eq!(runner.metrics().snapshot().frames, 1);
    }

    #[test]
    fn tick_drifts_synthetic_devices_and_sets_status() {
        let generator = GeneratorConfig::default();
        let config = RadarConfig::new(100.0, Some(generator.center)).unwrap();
        let mut host = HostState::new(config);
        host.replace_entities(build_sweep(&generator).unwrap(), Some(generator));
        let before = host.entities.clone();
        let shared = SharedState::new(host);

        let runner = runner();
        runner.tick(&shared, 1);

        let after = shared.read();
        assert_ne!(after.entities, before);
        assert!(after.status.contains("devices within 100 m"));
    }

    #[test]
    fn tick_without_fix_reports_idle() {
        let mut host = HostState::new(RadarConfig::new(10.0, None).unwrap());
        host.replace_entities(
            vec![radarcore::TrackedEntity::new("a", GeoPosition::new(0.0, 0.0), -50)],
            None,
        );
        let shared = SharedState::new(host);

        let frame = runner().tick(&shared, 0);
        assert!(frame.points.is_empty() && frame.ranked.is_empty());
        assert_eq!(shared.read().status, "No GPS fix: radar idle");
        assert_eq!(shared.read().entities.len(), 1);
    }
}
