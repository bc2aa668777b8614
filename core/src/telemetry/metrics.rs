use crate::radar::RadarFrame;
use std::sync::Mutex;

/// Host-side counters for refresh cycles. The engine itself keeps none.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub frames: usize,
    pub frames_without_fix: usize,
    pub points_plotted: usize,
    pub feed_rows_skipped: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_frame(&self, frame: &RadarFrame) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.frames += 1;
            if !frame.has_fix() {
                metrics.frames_without_fix += 1;
            }
            metrics.points_plotted += frame.points.len();
        }
    }

    pub fn record_skipped(&self, rows: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.feed_rows_skipped += rows;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
