//! Decoding of the backend JSON the radar consumes: the AP listing and the
//! monitoring-path GPS fix.

pub mod aps;
pub mod gps;

pub use aps::{entities_from_records, parse_ap_listing, ApRecord, FeedBatch, SignalValue};
pub use gps::{parse_fix_report, GpsFixReport};

use crate::prelude::RadarError;

#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("malformed feed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record has no hardware address")]
    MissingId,
    #[error("record {0} has no coordinates")]
    MissingPosition(String),
    #[error("record {id}: {source}")]
    Position {
        id: String,
        #[source]
        source: RadarError,
    },
}

pub type FeedResult<T> = Result<T, FeedError>;
