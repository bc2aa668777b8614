use crate::generator::profile::GeneratorConfig;
use radarcore::{RadarConfig, TrackedEntity};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Everything the host knows between refreshes. The engine only ever sees
/// borrowed views of it.
#[derive(Debug, Clone)]
pub struct HostState {
    pub config: RadarConfig,
    pub entities: Vec<TrackedEntity>,
    /// Generator behind the current device list; `None` once the backend
    /// feed has replaced it. Refreshes drift synthetic sweeps with it.
    pub generator: Option<GeneratorConfig>,
    pub status: String,
}

impl HostState {
    pub fn new(config: RadarConfig) -> Self {
        Self {
            config,
            entities: Vec::new(),
            generator: None,
            status: "Waiting for devices...".into(),
        }
    }

    pub fn replace_entities(
        &mut self,
        entities: Vec<TrackedEntity>,
        generator: Option<GeneratorConfig>,
    ) {
        self.entities = entities;
        self.generator = generator;
    }
}

#[derive(Debug, Clone)]
pub struct SharedState(Arc<RwLock<HostState>>);

impl SharedState {
    pub fn new(state: HostState) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }

    // Writers only assign whole values, so a poisoned lock still holds a
    // consistent state.
    pub fn read(&self) -> RwLockReadGuard<'_, HostState> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, HostState> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}
