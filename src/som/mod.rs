//! Self-Organizing Map (SOM) module for clustering feature vectors.
//!
//! - [`GridTopology`]: rectangular grid with per-axis wraparound
//! - [`Som`]: row-major grid of [`Neuron`]s, BMU search and prediction
//! - [`SomTrainer`]: epoch-based online training behind [`ClusteringEngine`]

mod map;
mod neuron;
mod topology;
pub mod training;

pub use map::{Prediction, Som};
pub use neuron::Neuron;
pub use topology::{GridPosition, GridTopology};
pub use training::{ClusteringEngine, SomTrainer};
