//! # Roomgen - SOM Exhibition Room Generator
//!
//! Roomgen lays out virtual exhibition rooms so that similar items hang next
//! to each other. Items are described by feature vectors; a Self-Organizing
//! Map clusters them onto a grid, and every grid node becomes one exhibit on
//! the room's walls.
//!
//! ## Overview
//!
//! The grid is a cylinder: columns wrap around, rows do not. Its columns are
//! split evenly across the four walls of the room, so the wraparound closes
//! the loop from the last wall back to the first.
//!
//! ## Key Features
//!
//! - **Weighted feature joins** over any number of feature tables
//! - **Deterministic SOM training** from a single seed
//! - **Grid fitting** that shrinks requested grids towards the item count
//! - **Node maps** ranking all items per node, for alternate exhibits
//! - **Aspect-correct exhibit sizing** from image headers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomgen::{
//!     Config, DirectoryFeatureSource, DirectoryObjectSource, FeatureWeight, GenerationRequest,
//!     SomRoomGenerator,
//! };
//!
//! let config = Config::default();
//! let features = DirectoryFeatureSource::new("features", &config.retrieval);
//! let objects = DirectoryObjectSource::new("objects", &config.retrieval);
//! let generator = SomRoomGenerator::new(&config, features, objects);
//!
//! let request = GenerationRequest::new(vec![FeatureWeight::new("color", 1.0)], 8, 2)
//!     .with_seed(42);
//! let exhibition = generator.generate_exhibition(&request)?;
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`retrieval`] - Feature and object sources, image probing
//! - [`features`] - Feature tables, weighting and joins
//! - [`som`] - Self-Organizing Map implementation
//! - [`generation`] - Grid fitting, node maps, layout and room assembly
//! - [`model`] - Exhibition, room, wall and exhibit types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod features;
pub mod generation;
pub mod model;
pub mod retrieval;
pub mod som;

// Re-export commonly used types
pub use config::{Config, LayoutConfig, RemainderPolicy, RetrievalConfig, SomConfig};
pub use error::{Result, RoomgenError};
pub use features::{FeatureFetcher, FeatureTable};
pub use generation::{
    Candidate, FeatureWeight, GenerationRequest, GridSize, LayoutEngine, NodeMap, SomRoomGenerator,
};
pub use model::{Direction, Exhibit, Exhibition, MetadataKey, Room, Vector3, Wall};
pub use retrieval::{DirectoryFeatureSource, DirectoryObjectSource, FeatureSource, ObjectSource};
pub use som::{ClusteringEngine, GridTopology, Prediction, Som, SomTrainer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
