//! Fetching, weighting and joining feature tables.

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::features::FeatureTable;
use crate::generation::FeatureWeight;
use crate::retrieval::FeatureSource;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Pulls feature tables from a [`FeatureSource`] and combines them.
pub struct FeatureFetcher<'a, S: FeatureSource> {
    source: S,
    config: &'a RetrievalConfig,
}

impl<'a, S: FeatureSource> FeatureFetcher<'a, S> {
    /// Creates a fetcher over `source`.
    pub fn new(source: S, config: &'a RetrievalConfig) -> Self {
        Self { source, config }
    }

    /// Fetches a single table, cleaning ids and restricting to `ids`.
    pub fn fetch_table(&self, table: &str, ids: &[String]) -> Result<FeatureTable> {
        let records = self.source.fetch_feature_table(table, ids)?;

        // Several service ids may clean to the same item; the first one wins
        let mut seen = HashSet::new();
        let mut cleaned = Vec::with_capacity(records.len());
        for (id, vector) in records {
            let clean = self.config.clean_id(&id).to_string();
            if seen.insert(clean.clone()) {
                cleaned.push((clean, vector));
            } else {
                warn!("Table '{}': duplicate item '{}' (from '{}') ignored", table, clean, id);
            }
        }
        let mut data = FeatureTable::from_records(table, cleaned)?;

        let clean_ids: Vec<String> = ids
            .iter()
            .map(|id| self.config.clean_id(id).to_string())
            .collect();
        data.filter_by_ids(&clean_ids);

        debug!(
            "Table '{}': {} samples, dimension {:?}",
            table,
            data.num_samples(),
            data.dimension()
        );
        Ok(data)
    }

    /// Fetches every table, scales it by its weight, and concatenates them.
    ///
    /// Any retrieval failure aborts the whole fetch. A table without data makes
    /// the result empty, since no item can then appear in every table.
    pub fn fetch(&self, tables: &[FeatureWeight], ids: &[String]) -> Result<FeatureTable> {
        let mut fetched = Vec::with_capacity(tables.len());
        for entry in tables {
            let mut data = self.fetch_table(&entry.table, ids)?;
            data.normalize(entry.weight)?;
            fetched.push(data);
        }

        let combined = FeatureTable::concatenate(&fetched);
        info!(
            "Fetched {} table(s): {} samples with {} features",
            fetched.len(),
            combined.num_samples(),
            combined.dimension().unwrap_or(0)
        );
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoomgenError;
    use std::collections::HashMap;

    struct MapSource(HashMap<String, Vec<(String, Vec<f64>)>>);

    impl FeatureSource for MapSource {
        fn fetch_feature_table(&self, table: &str, _ids: &[String]) -> Result<Vec<(String, Vec<f64>)>> {
            Ok(self.0.get(table).cloned().unwrap_or_default())
        }
    }

    struct DownSource;

    impl FeatureSource for DownSource {
        fn fetch_feature_table(&self, _table: &str, _ids: &[String]) -> Result<Vec<(String, Vec<f64>)>> {
            Err(RoomgenError::Retrieval("connection refused".to_string()))
        }
    }

    fn weight(table: &str, weight: f64) -> FeatureWeight {
        FeatureWeight {
            table: table.to_string(),
            weight,
        }
    }

    fn source() -> MapSource {
        let mut tables = HashMap::new();
        tables.insert(
            "color".to_string(),
            vec![
                ("a_1".to_string(), vec![1.0, 0.0]),
                ("b_1".to_string(), vec![0.0, 1.0]),
            ],
        );
        tables.insert(
            "semantic".to_string(),
            vec![("b_1".to_string(), vec![0.5]), ("c_1".to_string(), vec![0.25])],
        );
        MapSource(tables)
    }

    #[test]
    fn test_single_table_weighted() {
        let config = RetrievalConfig::default();
        let fetcher = FeatureFetcher::new(source(), &config);
        let data = fetcher.fetch(&[weight("color", 2.0)], &[]).unwrap();

        assert_eq!(data.sorted_ids(), vec!["a", "b"]);
        assert_eq!(data.get("a").unwrap(), &[2.0, 0.0]);
    }

    #[test]
    fn test_tables_joined_on_common_ids() {
        let config = RetrievalConfig::default();
        let fetcher = FeatureFetcher::new(source(), &config);
        let data = fetcher
            .fetch(&[weight("color", 1.0), weight("semantic", 4.0)], &[])
            .unwrap();

        assert_eq!(data.sorted_ids(), vec!["b"]);
        assert_eq!(data.get("b").unwrap(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_id_filter_accepts_service_ids() {
        let config = RetrievalConfig::default();
        let fetcher = FeatureFetcher::new(source(), &config);
        let data = fetcher.fetch(&[weight("color", 1.0)], &["b_1".to_string()]).unwrap();
        assert_eq!(data.sorted_ids(), vec!["b"]);
    }

    #[test]
    fn test_missing_table_yields_empty() {
        let config = RetrievalConfig::default();
        let fetcher = FeatureFetcher::new(source(), &config);
        let data = fetcher
            .fetch(&[weight("color", 1.0), weight("unknown", 1.0)], &[])
            .unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_duplicate_clean_ids_keep_first() {
        let mut tables = HashMap::new();
        tables.insert(
            "color".to_string(),
            vec![
                ("a_1".to_string(), vec![1.0]),
                ("a".to_string(), vec![9.0]),
                ("b_1".to_string(), vec![2.0]),
            ],
        );
        let config = RetrievalConfig::default();
        let fetcher = FeatureFetcher::new(MapSource(tables), &config);
        let data = fetcher.fetch_table("color", &[]).unwrap();

        assert_eq!(data.num_samples(), 2);
        assert_eq!(data.get("a").unwrap(), &[1.0]);
    }

    #[test]
    fn test_weight_overflow_is_config_error() {
        let tables = HashMap::from([("size".to_string(), vec![("a_1".to_string(), vec![1.0, 2.0])])]);
        let config = RetrievalConfig::default();
        let fetcher = FeatureFetcher::new(MapSource(tables), &config);
        let err = fetcher.fetch(&[weight("size", 1e308)], &[]).unwrap_err();
        assert!(matches!(err, RoomgenError::Config(_)));
    }

    #[test]
    fn test_source_failure_aborts() {
        let config = RetrievalConfig::default();
        let fetcher = FeatureFetcher::new(DownSource, &config);
        let err = fetcher.fetch(&[weight("color", 1.0)], &[]).unwrap_err();
        assert!(matches!(err, RoomgenError::Retrieval(_)));
    }
}
