//! Per-item feature vectors of one (or several concatenated) feature tables.

use crate::error::{Result, RoomgenError};
use std::collections::{BTreeMap, HashSet};

/// Feature vectors keyed by item id.
///
/// Ids are kept in a `BTreeMap`, so [`sorted_ids`](Self::sorted_ids) and
/// [`to_matrix`](Self::to_matrix) always walk the items in the same
/// lexicographic order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    name: String,
    samples: BTreeMap<String, Vec<f64>>,
}

impl FeatureTable {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: BTreeMap::new(),
        }
    }

    /// Builds a table from `(id, vector)` records, rejecting ragged vectors.
    pub fn from_records(
        name: impl Into<String>,
        records: impl IntoIterator<Item = (String, Vec<f64>)>,
    ) -> Result<Self> {
        let mut table = Self::new(name);
        for (id, vector) in records {
            table.add_sample(id, vector)?;
        }
        Ok(table)
    }

    /// Table name (concatenated tables join their names with `+`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds (or replaces) the vector for an item.
    pub fn add_sample(&mut self, id: String, vector: Vec<f64>) -> Result<()> {
        if let Some(dim) = self.dimension() {
            if vector.len() != dim {
                return Err(RoomgenError::Retrieval(format!(
                    "Table '{}': vector for '{}' has {} components, expected {}",
                    self.name,
                    id,
                    vector.len(),
                    dim
                )));
            }
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(RoomgenError::Retrieval(format!(
                "Table '{}': vector for '{}' contains non-finite values",
                self.name, id
            )));
        }
        self.samples.insert(id, vector);
        Ok(())
    }

    /// Vector of an item.
    pub fn get(&self, id: &str) -> Option<&[f64]> {
        self.samples.get(id).map(Vec::as_slice)
    }

    /// Number of items.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// True if the table holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Vector dimensionality, `None` for an empty table.
    pub fn dimension(&self) -> Option<usize> {
        self.samples.values().next().map(Vec::len)
    }

    /// Scales every component of every vector by `weight`.
    ///
    /// Fails if a scaled component overflows to infinity; the table is left
    /// partially scaled in that case.
    pub fn normalize(&mut self, weight: f64) -> Result<()> {
        for (id, vector) in self.samples.iter_mut() {
            for v in vector.iter_mut() {
                *v *= weight;
                if !v.is_finite() {
                    return Err(RoomgenError::Config(format!(
                        "Table '{}': weight {} overflows the vector of '{}'",
                        self.name, weight, id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Keeps only the listed items. An empty list keeps everything.
    pub fn filter_by_ids(&mut self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        let keep: HashSet<&str> = ids.iter().map(String::as_str).collect();
        self.samples.retain(|id, _| keep.contains(id.as_str()));
    }

    /// Item ids in lexicographic order.
    pub fn sorted_ids(&self) -> Vec<String> {
        self.samples.keys().cloned().collect()
    }

    /// Vectors as matrix rows, in the order of [`sorted_ids`](Self::sorted_ids).
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        self.samples.values().cloned().collect()
    }

    /// Per-dimension `(min, max)` over all items.
    pub fn feature_ranges(&self) -> Vec<(f64, f64)> {
        let Some(dim) = self.dimension() else {
            return Vec::new();
        };
        let mut ranges = vec![(f64::INFINITY, f64::NEG_INFINITY); dim];
        for vector in self.samples.values() {
            for (range, &v) in ranges.iter_mut().zip(vector.iter()) {
                range.0 = range.0.min(v);
                range.1 = range.1.max(v);
            }
        }
        ranges
    }

    /// Joins tables into one vector per item.
    ///
    /// Only items present in every table survive; each combined vector is the
    /// tables' vectors in argument order.
    pub fn concatenate(tables: &[FeatureTable]) -> FeatureTable {
        let name = tables
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join("+");

        let Some((first, rest)) = tables.split_first() else {
            return FeatureTable::new(name);
        };

        let samples = first
            .samples
            .iter()
            .filter_map(|(id, head)| {
                let mut combined = head.clone();
                for table in rest {
                    combined.extend_from_slice(table.samples.get(id)?);
                }
                Some((id.clone(), combined))
            })
            .collect();

        FeatureTable { name, samples }
    }
}
