//! Configuration for the room generator.

use crate::error::{Result, RoomgenError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SOM (Self-Organizing Map) configuration.
    pub som: SomConfig,

    /// Wall placement and exhibit sizing configuration.
    pub layout: LayoutConfig,

    /// Identifiers and naming used against the multimedia service.
    pub retrieval: RetrievalConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RoomgenError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would produce a degenerate layout or schedule.
    pub fn validate(&self) -> Result<()> {
        self.som.validate()?;
        self.layout.validate()
    }
}

/// Self-Organizing Map configuration.
///
/// Grid shape, seed and epoch count come with each request; this holds the
/// parts that stay fixed across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SomConfig {
    /// Learning rate at epoch 0, decays linearly to 0.
    /// Default: 0.9.
    pub initial_learning_rate: f64,

    /// Initial neighborhood radius as a fraction of the grid diagonal.
    /// Default: 0.25.
    pub radius_factor: f64,

    /// Lower bound for the neighborhood radius.
    /// Default: 0.55.
    pub min_radius: f64,

    /// Wrap the grid around its rows (height axis).
    /// Default: false.
    pub wrap_rows: bool,

    /// Wrap the grid around its columns (width axis).
    /// Default: true.
    pub wrap_columns: bool,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            initial_learning_rate: 0.9,
            radius_factor: 0.25,
            min_radius: 0.55,
            wrap_rows: false,
            wrap_columns: true,
        }
    }
}

impl SomConfig {
    /// Initial neighborhood radius for a grid of the given shape.
    #[inline]
    pub fn initial_radius(&self, width: usize, height: usize) -> f64 {
        let (w, h) = (width as f64, height as f64);
        self.radius_factor * (w * w + h * h).sqrt()
    }

    fn validate(&self) -> Result<()> {
        if !(self.initial_learning_rate > 0.0 && self.initial_learning_rate.is_finite()) {
            return Err(RoomgenError::Config(format!(
                "initial_learning_rate must be positive, got {}",
                self.initial_learning_rate
            )));
        }
        if !(self.radius_factor > 0.0 && self.radius_factor.is_finite()) {
            return Err(RoomgenError::Config(format!(
                "radius_factor must be positive, got {}",
                self.radius_factor
            )));
        }
        if !(self.min_radius > 0.0 && self.min_radius.is_finite()) {
            return Err(RoomgenError::Config(format!(
                "min_radius must be positive, got {}",
                self.min_radius
            )));
        }
        Ok(())
    }
}

/// What happens to exhibits left over when the grid width is not a multiple
/// of the wall count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Leave them unplaced.
    #[default]
    Drop,
    /// Continue the last wall's final row with them.
    AppendToLastWall,
}

/// Wall placement and exhibit sizing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Spacing towards other exhibits and wall edges.
    /// Default: 1.5.
    pub padding: f64,

    /// Offset of the first row towards the ground.
    /// Default: 2.0.
    pub base_height: f64,

    /// Slot length reserved per exhibit along the wall.
    /// Default: 2.0.
    pub longer_side_length: f64,

    /// Physical length of an exhibit's longer side.
    /// Default: 2.0.
    pub default_long_side: f64,

    /// Width and height of placeholder exhibits.
    /// Default: 1.0.
    pub placeholder_size: f64,

    /// Material tag given to every generated wall.
    /// Default: "CONCRETE".
    pub wall_material: String,

    /// Handling of exhibits that do not fill a complete wall run.
    /// Default: drop.
    pub remainder_policy: RemainderPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 1.5,
            base_height: 2.0,
            longer_side_length: 2.0,
            default_long_side: 2.0,
            placeholder_size: 1.0,
            wall_material: "CONCRETE".to_string(),
            remainder_policy: RemainderPolicy::Drop,
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<()> {
        let checks = [
            ("padding", self.padding, false),
            ("base_height", self.base_height, false),
            ("longer_side_length", self.longer_side_length, true),
            ("default_long_side", self.default_long_side, true),
            ("placeholder_size", self.placeholder_size, true),
        ];
        for (name, value, strictly_positive) in checks {
            let ok = value.is_finite() && if strictly_positive { value > 0.0 } else { value >= 0.0 };
            if !ok {
                return Err(RoomgenError::Config(format!("{} is out of range: {}", name, value)));
            }
        }
        Ok(())
    }
}

/// Identifier conventions of the multimedia service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Suffix the service appends to object ids to address their segment.
    /// Default: "_1".
    pub segment_suffix: String,

    /// Suffix marking an exhibit path as served from the remote service.
    /// Default: ".remote".
    pub url_id_suffix: String,

    /// File extensions tried, in order, by the directory object source.
    /// Default: png, jpg, jpeg.
    pub object_extensions: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            segment_suffix: "_1".to_string(),
            url_id_suffix: ".remote".to_string(),
            object_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }
}

impl RetrievalConfig {
    /// Strips the segment suffix from a service id, if present.
    pub fn clean_id<'a>(&self, id: &'a str) -> &'a str {
        if self.segment_suffix.is_empty() {
            return id;
        }
        id.strip_suffix(self.segment_suffix.as_str()).unwrap_or(id)
    }

    /// Content path for an exhibit showing the given item.
    pub fn exhibit_path(&self, clean_id: &str) -> String {
        format!("{}{}", clean_id, self.url_id_suffix)
    }
}
