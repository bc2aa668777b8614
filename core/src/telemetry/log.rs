use crate::radar::RadarFrame;
use log::{debug, info};

/// Frame-level logging shared by the host and the visualizer.
#[derive(Debug, Clone, Copy)]
pub struct LogManager {
    source: &'static str,
}

impl LogManager {
    pub fn new(source: &'static str) -> Self {
        Self { source }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.source, message);
    }

    pub fn record_frame(&self, frame: &RadarFrame, max_range_m: f64) {
        match frame.observer {
            Some(observer) => {
                info!(
                    "[{}] frame at {}: {} plotted / {} tracked within {:.0} m",
                    self.source,
                    observer,
                    frame.points.len(),
                    frame.ranked.len(),
                    max_range_m
                );
                if let Some(nearest) = frame.ranked.first() {
                    debug!(
                        "[{}] nearest {} at {:.1} m",
                        self.source, nearest.entity_id, nearest.distance_m
                    );
                }
            }
            None => debug!("[{}] no observer fix, frame left empty", self.source),
        }
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("radar")
    }
}
