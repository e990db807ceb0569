//! Boundary to the external multimedia service.
//!
//! The generator only needs three things from the outside world: feature
//! vectors per table, raw object bytes per item, and the pixel dimensions of
//! those bytes. The first two are traits so the service client can be swapped
//! for the directory-backed sources in [`file`] or for test doubles.

pub mod file;
mod probe;

pub use self::file::{DirectoryFeatureSource, DirectoryObjectSource};
pub use self::probe::probe_dimensions;

use crate::error::Result;

/// Source of feature vectors.
pub trait FeatureSource: Send + Sync {
    /// Fetches `(item id, vector)` records of a feature table.
    ///
    /// `ids` restricts the result; an empty slice asks for every item. A table
    /// without data yields an empty vector, not an error.
    fn fetch_feature_table(&self, table: &str, ids: &[String]) -> Result<Vec<(String, Vec<f64>)>>;
}

/// Source of raw object content (image bytes).
pub trait ObjectSource: Send + Sync {
    /// Fetches the bytes of an item's object.
    fn fetch_object_bytes(&self, id: &str) -> Result<Vec<u8>>;
}

impl<T: FeatureSource + ?Sized> FeatureSource for &T {
    fn fetch_feature_table(&self, table: &str, ids: &[String]) -> Result<Vec<(String, Vec<f64>)>> {
        (**self).fetch_feature_table(table, ids)
    }
}

impl<T: ObjectSource + ?Sized> ObjectSource for &T {
    fn fetch_object_bytes(&self, id: &str) -> Result<Vec<u8>> {
        (**self).fetch_object_bytes(id)
    }
}
