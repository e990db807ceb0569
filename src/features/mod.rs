//! Feature acquisition and normalization.
//!
//! - [`FeatureTable`]: id-keyed vectors with deterministic (sorted) row order
//! - [`FeatureFetcher`]: pulls every requested table, weights it, and joins
//!   the tables into one vector per item

mod fetch;
mod table;

pub use fetch::FeatureFetcher;
pub use table::FeatureTable;
