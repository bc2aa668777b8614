use crate::geo::GeoPosition;
use serde::{Deserialize, Serialize};

/// A device observed by the backend, keyed by hardware address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntity {
    pub id: String,
    pub position: GeoPosition,
    pub signal_strength: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl TrackedEntity {
    pub fn new(id: impl Into<String>, position: GeoPosition, signal_strength: i32) -> Self {
        Self {
            id: id.into(),
            position,
            signal_strength,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn signal_tier(&self) -> SignalTier {
        SignalTier::classify(self.signal_strength)
    }
}

/// Coarse received-signal bucket used to colour table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalTier {
    High,
    Medium,
    Low,
}

impl SignalTier {
    pub fn classify(dbm: i32) -> Self {
        if dbm > -60 {
            SignalTier::High
        } else if dbm > -80 {
            SignalTier::Medium
        } else {
            SignalTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalTier::High => "high",
            SignalTier::Medium => "med",
            SignalTier::Low => "low",
        }
    }
}
