//! Self-Organizing Map (SOM) grid.

use crate::error::{Result, RoomgenError};
use crate::som::{GridTopology, Neuron};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Best matching node of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Row-major index of the best matching node.
    pub node: usize,
    /// Euclidean distance between the sample and that node's weights.
    pub distance: f64,
}

/// A Self-Organizing Map over a rectangular grid.
///
/// Neurons are stored row-major, so neuron `i` sits at row `i / width`,
/// column `i % width`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Som {
    /// Grid shape and wraparound.
    pub topology: GridTopology,
    /// The neurons in the grid (row-major order).
    pub neurons: Vec<Neuron>,
    /// Weight vector dimensionality.
    pub weight_dim: usize,
}

impl Som {
    /// Creates a SOM whose weights are drawn uniformly from `ranges`, one
    /// `(min, max)` pair per input dimension.
    ///
    /// Every range must be finite, including its width `max - min`.
    pub fn with_ranges(topology: GridTopology, ranges: &[(f64, f64)], seed: u64) -> Result<Self> {
        Self::check_shape(&topology)?;
        if ranges.is_empty() {
            return Err(RoomgenError::Som("Feature ranges are empty".to_string()));
        }
        if let Some((dim, (lo, hi))) = ranges
            .iter()
            .enumerate()
            .find(|(_, (lo, hi))| lo > hi || !(hi - lo).is_finite())
        {
            return Err(RoomgenError::Som(format!(
                "Feature range of dimension {} is not usable: [{}, {}]",
                dim, lo, hi
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let width = topology.width();
        let neurons: Vec<Neuron> = (0..topology.node_count())
            .map(|i| Neuron::new_in_ranges(i / width, i % width, ranges, &mut rng))
            .collect();

        Ok(Self {
            topology,
            neurons,
            weight_dim: ranges.len(),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_zeros(topology: GridTopology, weight_dim: usize) -> Result<Self> {
        Self::check_shape(&topology)?;
        let width = topology.width();
        let neurons: Vec<Neuron> = (0..topology.node_count())
            .map(|i| Neuron {
                row: i / width,
                col: i % width,
                weights: vec![0.0; weight_dim],
            })
            .collect();

        Ok(Self {
            topology,
            neurons,
            weight_dim,
        })
    }

    fn check_shape(topology: &GridTopology) -> Result<()> {
        if topology.width() == 0 || topology.height() == 0 {
            return Err(RoomgenError::Config(format!(
                "Grid dimensions must be positive, got {}x{}",
                topology.width(),
                topology.height()
            )));
        }
        Ok(())
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.topology.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.topology.height()
    }

    /// Returns the total number of neurons.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Gets a neuron by its 1D index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.weight_dim {
            return Err(RoomgenError::Som(format!(
                "Input dimension {} does not match weight dimension {}",
                input.len(),
                self.weight_dim
            )));
        }
        Ok(())
    }

    /// Finds the Best Matching Unit (BMU) for an input vector.
    ///
    /// Returns the BMU index and its squared distance. Ties go to the lowest
    /// index.
    pub fn find_bmu(&self, input: &[f64]) -> Result<(usize, f64)> {
        self.check_input(input)?;

        self.neurons
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.distance_squared(input)))
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .ok_or_else(|| RoomgenError::Som("Empty SOM".to_string()))
    }

    /// Maps every sample to its best matching node. Does not touch the weights.
    pub fn predict(&self, samples: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        samples
            .par_iter()
            .map(|sample| -> Result<Prediction> {
                let (node, dist_sq) = self.find_bmu(sample)?;
                Ok(Prediction {
                    node,
                    distance: dist_sq.sqrt(),
                })
            })
            .collect()
    }

    /// Gaussian neighborhood influence at `grid_dist` from the BMU.
    #[inline]
    fn neighborhood(grid_dist: f64, radius: f64) -> f64 {
        (-grid_dist * grid_dist / (2.0 * radius * radius)).exp()
    }

    /// Updates all neurons in response to an input.
    ///
    /// `bmu_idx` is the index of the Best Matching Unit.
    /// `learning_rate` is the current learning rate.
    /// `radius` is the current neighborhood radius.
    pub fn update(&mut self, input: &[f64], bmu_idx: usize, learning_rate: f64, radius: f64) {
        let topology = self.topology;

        for (i, neuron) in self.neurons.iter_mut().enumerate() {
            let grid_dist = topology.distance(bmu_idx, i);

            // Negligible influence past three radii
            if grid_dist <= radius * 3.0 {
                neuron.update_weights(input, learning_rate, Self::neighborhood(grid_dist, radius));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges() -> Vec<(f64, f64)> {
        vec![(0.0, 1.0); 3]
    }

    #[test]
    fn test_som_creation() {
        let som = Som::with_ranges(GridTopology::cylinder(8, 2), &ranges(), 42).unwrap();

        assert_eq!(som.width(), 8);
        assert_eq!(som.height(), 2);
        assert_eq!(som.total_neurons(), 16);
        assert_eq!(som.weight_dim, 3);
    }

    #[test]
    fn test_same_seed_same_weights() {
        let a = Som::with_ranges(GridTopology::cylinder(4, 2), &ranges(), 7).unwrap();
        let b = Som::with_ranges(GridTopology::cylinder(4, 2), &ranges(), 7).unwrap();
        for (na, nb) in a.neurons.iter().zip(b.neurons.iter()) {
            assert_eq!(na.weights, nb.weights);
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = Som::new_zeros(GridTopology::cylinder(0, 2), 3).unwrap_err();
        assert!(matches!(err, RoomgenError::Config(_)));
    }

    #[test]
    fn test_neuron_positions() {
        let som = Som::new_zeros(GridTopology::cylinder(4, 3), 2).unwrap();

        for i in 0..som.total_neurons() {
            let neuron = som.get(i).unwrap();
            assert_eq!(neuron.row, i / 4);
            assert_eq!(neuron.col, i % 4);
        }
        assert!(som.get(12).is_none());
    }

    #[test]
    fn test_find_bmu() {
        let mut som = Som::new_zeros(GridTopology::cylinder(4, 4), 3).unwrap();
        som.neurons[5].weights = vec![1.0, 0.0, 0.0];

        let (bmu_idx, dist) = som.find_bmu(&[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(bmu_idx, 5);
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_find_bmu_dimension_mismatch() {
        let som = Som::new_zeros(GridTopology::cylinder(4, 4), 3).unwrap();
        assert!(matches!(som.find_bmu(&[1.0]), Err(RoomgenError::Som(_))));
    }

    #[test]
    fn test_predict_reports_distance() {
        let mut som = Som::new_zeros(GridTopology::cylinder(4, 1), 2).unwrap();
        som.neurons[2].weights = vec![3.0, 4.0];

        let predictions = som.predict(&[vec![3.0, 4.0], vec![0.0, 0.0], vec![6.0, 8.0]]).unwrap();
        assert_eq!(predictions[0], Prediction { node: 2, distance: 0.0 });
        assert_eq!(predictions[1], Prediction { node: 0, distance: 0.0 });
        assert_eq!(predictions[2].node, 2);
        assert!((predictions[2].distance - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_update_wraps_columns() {
        let mut som = Som::new_zeros(GridTopology::cylinder(8, 2), 1).unwrap();
        som.update(&[1.0], 0, 1.0, 2.0);

        assert!((som.neurons[0].weights[0] - 1.0).abs() < 1e-10);
        // Column 7 is adjacent to column 0 across the seam.
        assert!((som.neurons[7].weights[0] - som.neurons[1].weights[0]).abs() < 1e-10);
        assert!(som.neurons[7].weights[0] > som.neurons[3].weights[0]);
    }

    #[test]
    fn test_update_ignores_beyond_three_radii() {
        let mut som = Som::new_zeros(GridTopology::new(8, 1, false, false), 1).unwrap();
        som.update(&[1.0], 0, 1.0, 1.0);

        assert!(som.neurons[3].weights[0] > 0.0);
        assert_eq!(som.neurons[4].weights[0], 0.0);
    }

    #[test]
    fn test_overflowing_range_rejected() {
        let ranges = vec![(-1.5e308, 1.5e308)];
        let err = Som::with_ranges(GridTopology::cylinder(4, 1), &ranges, 1).unwrap_err();
        assert!(matches!(err, RoomgenError::Som(_)));
    }

    #[test]
    fn test_degenerate_range_accepted() {
        let som = Som::with_ranges(GridTopology::cylinder(4, 1), &[(2.0, 2.0)], 1).unwrap();
        assert!(som.neurons.iter().all(|n| n.weights == vec![2.0]));
    }

    #[test]
    fn test_update() {
        let mut som = Som::new_zeros(GridTopology::cylinder(4, 4), 3).unwrap();
        let input = vec![1.0, 1.0, 1.0];

        som.update(&input, 0, 0.5, 2.0);

        // BMU should have moved towards input
        assert!((som.neurons[0].weights[0] - 0.5).abs() < 1e-10);
        assert!(som.neurons[1].weights[0] < som.neurons[0].weights[0]);
    }
}
