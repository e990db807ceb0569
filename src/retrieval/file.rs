//! Directory-backed sources for offline generation.
//!
//! ## Layout
//!
//! ```text
//! features/
//!   <table>.json       [{"id": "v_001_1", "feature": [0.1, 0.2]}, ...]
//! objects/
//!   <id>.png | <id>.jpg | <id>.jpeg
//! ```

use crate::config::RetrievalConfig;
use crate::error::{Result, RoomgenError};
use crate::retrieval::{FeatureSource, ObjectSource};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// One record of a feature table file.
#[derive(Debug, Deserialize)]
struct FeatureRecord {
    id: String,
    feature: Vec<f64>,
}

/// Reads feature tables from `<root>/<table>.json`.
///
/// Requested ids match records with or without the segment suffix.
#[derive(Debug, Clone)]
pub struct DirectoryFeatureSource {
    root: PathBuf,
    config: RetrievalConfig,
}

impl DirectoryFeatureSource {
    /// Creates a source rooted at `root`, cleaning ids as `config` says.
    pub fn new(root: impl Into<PathBuf>, config: &RetrievalConfig) -> Self {
        Self {
            root: root.into(),
            config: config.clone(),
        }
    }

    fn table_path(&self, table: &str) -> Result<PathBuf> {
        if table.is_empty() || table.contains(['/', '\\']) || table == ".." {
            return Err(RoomgenError::Config(format!("Invalid table name '{}'", table)));
        }
        Ok(self.root.join(format!("{}.json", table)))
    }
}

impl FeatureSource for DirectoryFeatureSource {
    fn fetch_feature_table(&self, table: &str, ids: &[String]) -> Result<Vec<(String, Vec<f64>)>> {
        let path = self.table_path(table)?;
        if !path.exists() {
            debug!("No feature file for table '{}' at {}", table, path.display());
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| RoomgenError::Retrieval(format!("{}: {}", path.display(), e)))?;
        let records: Vec<FeatureRecord> = serde_json::from_str(&content)
            .map_err(|e| RoomgenError::Retrieval(format!("{}: {}", path.display(), e)))?;

        let wanted: HashSet<&str> = ids.iter().map(|id| self.config.clean_id(id)).collect();
        Ok(records
            .into_iter()
            .filter(|r| wanted.is_empty() || wanted.contains(self.config.clean_id(&r.id)))
            .map(|r| (r.id, r.feature))
            .collect())
    }
}

/// Reads object bytes from `<root>/<id>.<ext>`.
#[derive(Debug, Clone)]
pub struct DirectoryObjectSource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectoryObjectSource {
    /// Creates a source trying the extensions configured in `config`.
    pub fn new(root: impl Into<PathBuf>, config: &RetrievalConfig) -> Self {
        Self {
            root: root.into(),
            extensions: config.object_extensions.clone(),
        }
    }

    fn locate(&self, id: &str) -> Option<PathBuf> {
        self.extensions
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", id, ext)))
            .find(|p| p.is_file())
    }
}

impl ObjectSource for DirectoryObjectSource {
    fn fetch_object_bytes(&self, id: &str) -> Result<Vec<u8>> {
        if id.is_empty() || id.contains(['/', '\\']) {
            return Err(RoomgenError::Retrieval(format!("Invalid object id '{}'", id)));
        }
        let path = self.locate(id).ok_or_else(|| {
            RoomgenError::Retrieval(format!(
                "No object for '{}' in {}",
                id,
                self.root.display()
            ))
        })?;
        std::fs::read(&path).map_err(|e| RoomgenError::Retrieval(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_feature_table_from_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("color.json"),
            r#"[{"id": "a_1", "feature": [1.0, 2.0]}, {"id": "b_1", "feature": [3.0, 4.0]}]"#,
        )
        .unwrap();

        let source = DirectoryFeatureSource::new(dir.path(), &RetrievalConfig::default());
        let all = source.fetch_feature_table("color", &[]).unwrap();
        assert_eq!(all.len(), 2);

        let some = source.fetch_feature_table("color", &["b_1".to_string()]).unwrap();
        assert_eq!(some, vec![("b_1".to_string(), vec![3.0, 4.0])]);
    }

    #[test]
    fn test_clean_ids_match_service_ids() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("color.json"),
            r#"[{"id": "a_1", "feature": [1.0]}, {"id": "b_1", "feature": [2.0]}]"#,
        )
        .unwrap();

        let source = DirectoryFeatureSource::new(dir.path(), &RetrievalConfig::default());
        let some = source.fetch_feature_table("color", &["a".to_string()]).unwrap();
        assert_eq!(some, vec![("a_1".to_string(), vec![1.0])]);
    }

    #[test]
    fn test_missing_table_is_empty() {
        let dir = tempdir().unwrap();
        let source = DirectoryFeatureSource::new(dir.path(), &RetrievalConfig::default());
        assert!(source.fetch_feature_table("nothing", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_table_is_retrieval_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let source = DirectoryFeatureSource::new(dir.path(), &RetrievalConfig::default());
        let err = source.fetch_feature_table("bad", &[]).unwrap_err();
        assert!(matches!(err, RoomgenError::Retrieval(_)));
    }

    #[test]
    fn test_table_name_escape_rejected() {
        let source = DirectoryFeatureSource::new("/tmp", &RetrievalConfig::default());
        assert!(source.fetch_feature_table("../etc/passwd", &[]).is_err());
    }

    #[test]
    fn test_object_lookup_by_extension() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"jpg-bytes").unwrap();

        let source = DirectoryObjectSource::new(dir.path(), &RetrievalConfig::default());
        assert_eq!(source.fetch_object_bytes("a").unwrap(), b"jpg-bytes");

        let err = source.fetch_object_bytes("missing").unwrap_err();
        assert!(matches!(err, RoomgenError::Retrieval(_)));
    }
}
