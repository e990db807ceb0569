//! Ranked assignment of items to grid nodes.

use crate::error::{Result, RoomgenError};
use crate::som::Prediction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An item assigned to a node, with its distance to the node's weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Item id.
    pub id: String,
    /// Distance to the node (smaller = more similar).
    pub distance: f64,
}

/// Mapping from every node index to its candidates, closest first.
///
/// Serializes as `{"map": {"0": [{"id": ..., "distance": ...}], ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMap {
    map: BTreeMap<usize, Vec<Candidate>>,
}

impl NodeMap {
    /// Builds the map from parallel `ids` / `predictions`.
    ///
    /// Every node in `0..node_count` gets an entry, possibly empty. Within a
    /// node, candidates are ordered by ascending distance; equal distances keep
    /// their input order.
    pub fn from_predictions(node_count: usize, ids: &[String], predictions: &[Prediction]) -> Result<Self> {
        if ids.len() != predictions.len() {
            return Err(RoomgenError::Som(format!(
                "{} ids but {} predictions",
                ids.len(),
                predictions.len()
            )));
        }

        let mut map: BTreeMap<usize, Vec<Candidate>> =
            (0..node_count).map(|node| (node, Vec::new())).collect();

        for (id, prediction) in ids.iter().zip(predictions) {
            let candidates = map.get_mut(&prediction.node).ok_or_else(|| {
                RoomgenError::Som(format!(
                    "Predicted node {} outside grid of {} nodes",
                    prediction.node, node_count
                ))
            })?;
            candidates.push(Candidate {
                id: id.clone(),
                distance: prediction.distance,
            });
        }

        for candidates in map.values_mut() {
            candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        }

        Ok(Self { map })
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if the grid has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Candidates of a node, closest first.
    pub fn candidates(&self, node: usize) -> &[Candidate] {
        self.map.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Closest candidate of a node, if any.
    pub fn representative(&self, node: usize) -> Option<&Candidate> {
        self.candidates(node).first()
    }

    /// Nodes and their candidates in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Candidate])> {
        self.map.iter().map(|(&node, c)| (node, c.as_slice()))
    }

    /// Number of nodes with at least one candidate.
    pub fn occupied_nodes(&self) -> usize {
        self.map.values().filter(|c| !c.is_empty()).count()
    }

    /// JSON form of the whole map.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
