//! Generation request.

use crate::error::{Result, RoomgenError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_weight() -> f64 {
    1.0
}

fn default_epochs() -> usize {
    100
}

/// A feature table and the factor its vectors are scaled by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    /// Table name at the feature source.
    pub table: String,
    /// Per-component scale factor.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl FeatureWeight {
    /// Creates a table/weight pair.
    pub fn new(table: impl Into<String>, weight: f64) -> Self {
        Self {
            table: table.into(),
            weight,
        }
    }
}

/// Parses `table` or `table:weight`.
impl FromStr for FeatureWeight {
    type Err = RoomgenError;

    fn from_str(s: &str) -> Result<Self> {
        let (table, weight) = match s.rsplit_once(':') {
            Some((table, weight)) => {
                let weight = weight.trim().parse::<f64>().map_err(|e| {
                    RoomgenError::Config(format!("Invalid weight in '{}': {}", s, e))
                })?;
                (table.trim(), weight)
            }
            None => (s.trim(), default_weight()),
        };
        if table.is_empty() {
            return Err(RoomgenError::Config(format!("Missing table name in '{}'", s)));
        }
        Ok(Self::new(table, weight))
    }
}

/// Everything one generation run needs besides the static [`Config`](crate::Config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Feature tables to combine, in concatenation order.
    pub features: Vec<FeatureWeight>,

    /// Items to restrict to; empty means all items.
    #[serde(default)]
    pub ids: Vec<String>,

    /// Seed for weight initialization and training order.
    #[serde(default)]
    pub seed: u64,

    /// Requested grid width (columns).
    pub width: usize,

    /// Requested grid height (rows).
    pub height: usize,

    /// Number of training epochs.
    #[serde(default = "default_epochs")]
    pub epochs: usize,
}

impl GenerationRequest {
    /// Creates a request over `features` with default epochs, seed 0 and no id filter.
    pub fn new(features: Vec<FeatureWeight>, width: usize, height: usize) -> Self {
        Self {
            features,
            ids: Vec::new(),
            seed: 0,
            width,
            height,
            epochs: default_epochs(),
        }
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the epoch count.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Restricts the run to the given items.
    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = ids;
        self
    }

    /// Rejects requests that cannot produce a grid, before anything is fetched.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RoomgenError::Config(format!(
                "Grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.epochs == 0 {
            return Err(RoomgenError::Config("Epoch count must be positive".to_string()));
        }
        if self.features.is_empty() {
            return Err(RoomgenError::Config("No feature tables requested".to_string()));
        }
        if let Some(f) = self.features.iter().find(|f| !f.weight.is_finite()) {
            return Err(RoomgenError::Config(format!(
                "Weight of table '{}' is not finite",
                f.table
            )));
        }
        Ok(())
    }
}
