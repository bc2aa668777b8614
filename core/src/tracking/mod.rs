pub mod entity;
pub mod selection;

pub use entity::{SignalTier, TrackedEntity};
pub use selection::retain_selection;
