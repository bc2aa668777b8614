use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use radarcore::{GeoPosition, RadarConfig, RadarScope};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub max_range_m: f64,
    pub canvas_size: f64,
    pub canvas_margin: f64,
    pub observer: Option<GeoPosition>,
    pub refresh_secs: u64,
    pub bind: SocketAddr,
    pub generator: GeneratorConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_range_m: 10.0,
            canvas_size: 450.0,
            canvas_margin: 20.0,
            observer: None,
            refresh_secs: 3,
            bind: SocketAddr::from(([127, 0, 0, 1], 9100)),
            generator: GeneratorConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        max_range_m: f64,
        canvas_size: f64,
        observer: Option<GeoPosition>,
        devices: usize,
        seed: u64,
    ) -> Self {
        let mut generator = GeneratorConfig {
            devices,
            seed,
            ..Default::default()
        };
        if let Some(position) = observer {
            generator.center = position;
        }
        Self {
            max_range_m,
            canvas_size,
            observer,
            generator,
            ..Default::default()
        }
    }

    pub fn to_radar_config(&self) -> anyhow::Result<RadarConfig> {
        let observer = self
            .observer
            .map(|position| GeoPosition::validated(position.latitude(), position.longitude()))
            .transpose()
            .context("validating observer position")?;
        RadarConfig::new(self.max_range_m, observer).context("validating radar range")
    }

    pub fn to_scope(&self) -> anyhow::Result<RadarScope> {
        RadarScope::for_canvas(self.canvas_size, self.canvas_margin)
            .context("validating canvas geometry")
    }
}
