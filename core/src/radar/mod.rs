pub mod config;
pub mod engine;
pub mod projection;
pub mod scope;
pub mod tooltip;

pub use config::{RadarConfig, RadarScope, ScreenPoint};
pub use engine::{recompute, RadarFrame, RankedEntity};
pub use hit_test::{find_nearest_point, DEFAULT_HIT_THRESHOLD_PX};
pub use projection::{project, ProjectedPoint};
pub use scope::{range_rings, RangeRing, DEFAULT_RING_COUNT};
pub use tooltip::{TooltipContent, TooltipLayout};
