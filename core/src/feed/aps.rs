use crate::feed::{FeedError, FeedResult};
use crate::geo::GeoPosition;
use crate::tracking::TrackedEntity;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Fallback when the backend reports no usable signal reading.
const UNKNOWN_SIGNAL_DBM: i32 = -100;

/// Signal column as the backend emits it: sometimes numeric, sometimes text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SignalValue {
    pub fn dbm(&self) -> Option<i32> {
        match self {
            SignalValue::Integer(value) => i32::try_from(*value).ok(),
            SignalValue::Float(value) if value.is_finite() => Some(value.round() as i32),
            SignalValue::Float(_) => None,
            SignalValue::Text(text) => text.trim().parse::<f64>().ok().map(|v| v.round() as i32),
        }
    }
}

/// One row of the backend access-point listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApRecord {
    #[serde(default)]
    pub devmac: Option<String>,
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub strongest_signal: Option<SignalValue>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl TryFrom<ApRecord> for TrackedEntity {
    type Error = FeedError;

    fn try_from(record: ApRecord) -> FeedResult<Self> {
        let id = record
            .devmac
            .filter(|mac| !mac.trim().is_empty())
            .ok_or(FeedError::MissingId)?;
        let (Some(lat), Some(lon)) = (record.lat, record.lon) else {
            return Err(FeedError::MissingPosition(id));
        };
        let position = match GeoPosition::validated(lat, lon) {
            Ok(position) => position,
            Err(source) => return Err(FeedError::Position { id, source }),
        };
        let signal_strength = record
            .strongest_signal
            .as_ref()
            .and_then(SignalValue::dbm)
            .unwrap_or(UNKNOWN_SIGNAL_DBM);

        Ok(TrackedEntity {
            id,
            position,
            signal_strength,
            display_name: record.ssid.filter(|ssid| !ssid.is_empty()),
        })
    }
}

/// Result of converting a listing: the usable devices and how many rows were
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct FeedBatch {
    pub entities: Vec<TrackedEntity>,
    pub skipped: usize,
}

pub fn entities_from_records(records: Vec<ApRecord>) -> FeedBatch {
    let total = records.len();
    let mut batch = FeedBatch::default();
    for record in records {
        match TrackedEntity::try_from(record) {
            Ok(entity) => batch.entities.push(entity),
            Err(err) => {
                warn!("dropping AP record: {}", err);
                batch.skipped += 1;
            }
        }
    }
    debug!(
        "AP listing decoded: {} of {} records usable",
        batch.entities.len(),
        total
    );
    batch
}

pub fn parse_ap_listing(json: &str) -> FeedResult<FeedBatch> {
    let records: Vec<ApRecord> = serde_json::from_str(json)?;
    Ok(entities_from_records(records))
}
