pub mod elevation_augmenter;
pub mod elevation_merger;

pub use elevation_augmenter::{format_elevation, AugmentColumns, AugmentSummary, ElevationAugmenter};
pub use elevation_merger::{ElevationMerger, JoinOutcome};
