use crate::generator::template;
use anyhow::{ensure, Context};
use radarcore::{GeoPosition, TrackedEntity};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Weakest and strongest readings the generator will report.
const SIGNAL_FLOOR_DBM: f64 = -100.0;
const SIGNAL_CEILING_DBM: f64 = -20.0;
/// Widest jitter band accepted for a sweep.
const MAX_NOISE_DB: f64 = 60.0;

/// Configuration for generating a synthetic device sweep around a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub devices: usize,
    pub spread_m: f64,
    pub center: GeoPosition,
    /// Received power at one metre.
    pub reference_dbm: f64,
    pub path_loss_exponent: f64,
    pub noise_db: f64,
    pub hidden_ratio: f64,
    /// Largest step a device may take between refreshes.
    pub drift_m: f64,
    pub seed: u64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            devices: 24,
            spread_m: 60.0,
            center: GeoPosition::new(3.1390, 101.6869),
            reference_dbm: -30.0,
            path_loss_exponent: 2.7,
            noise_db: 4.0,
            hidden_ratio: 0.2,
            drift_m: 1.5,
            seed: 0,
            description: None,
            scenario: None,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.center.is_valid(),
            "generator center {} is outside the coordinate domain",
            self.center
        );
        ensure!(
            self.spread_m.is_finite() && self.spread_m >= 0.0,
            "spread must be a non-negative distance, got {}",
            self.spread_m
        );
        ensure!(
            (0.0..=1.0).contains(&self.hidden_ratio),
            "hidden ratio must lie in [0, 1], got {}",
            self.hidden_ratio
        );
        ensure!(
            (0.0..=MAX_NOISE_DB).contains(&self.noise_db),
            "noise must lie in [0, {}] dB, got {}",
            MAX_NOISE_DB,
            self.noise_db
        );
        ensure!(
            self.reference_dbm.is_finite() && self.path_loss_exponent.is_finite(),
            "signal model must be finite, got {} dBm and exponent {}",
            self.reference_dbm,
            self.path_loss_exponent
        );
        ensure!(
            self.drift_m.is_finite(),
            "drift must be finite, got {}",
            self.drift_m
        );
        ensure!(
            self.devices <= usize::from(u16::MAX),
            "at most {} devices per sweep",
            u16::MAX
        );
        Ok(())
    }

    fn signal_at<R: Rng>(&self, rng: &mut R, distance_m: f64) -> i32 {
        let loss = 10.0 * self.path_loss_exponent * distance_m.max(1.0).log10();
        let jitter = if self.noise_db > 0.0 {
            rng.gen_range(-self.noise_db..self.noise_db)
        } else {
            0.0
        };
        (self.reference_dbm - loss + jitter)
            .clamp(SIGNAL_FLOOR_DBM, SIGNAL_CEILING_DBM)
            .round() as i32
    }
}

/// Scatters `devices` uniformly over a disc of radius `spread_m`.
pub fn build_sweep(config: &GeneratorConfig) -> anyhow::Result<Vec<TrackedEntity>> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut entities = Vec::with_capacity(config.devices);

    for index in 0..config.devices {
        let index = u16::try_from(index).context("device index overflow")?;
        let heading = rng.gen_range(0.0..TAU);
        // sqrt keeps the density uniform over the disc area.
        let distance_m = config.spread_m * rng.gen::<f64>().sqrt();
        let position = config.center.offset_by(heading, distance_m);

        let mut entity = TrackedEntity::new(
            template::mac_address(&mut rng, index),
            position,
            config.signal_at(&mut rng, distance_m),
        );
        if !rng.gen_bool(config.hidden_ratio) {
            entity = entity.with_display_name(template::ssid(&mut rng));
        }
        entities.push(entity);
    }

    Ok(entities)
}

/// Moves every device by a small random step, keeping ids and order.
pub fn drift_sweep(
    entities: &[TrackedEntity],
    config: &GeneratorConfig,
    tick: u64,
) -> Vec<TrackedEntity> {
    let mut rng = StdRng::seed_from_u64(config.seed ^ tick.rotate_left(32));
    entities
        .iter()
        .map(|entity| {
            let heading = rng.gen_range(0.0..TAU);
            let step = config.drift_m.max(0.0) * rng.gen::<f64>();
            let position = entity.position.offset_by(heading, step);
            let distance_m = radarcore::distance(&config.center, &position);
            TrackedEntity {
                position,
                signal_strength: config.signal_at(&mut rng, distance_m),
                ..entity.clone()
            }
        })
        .collect()
}
