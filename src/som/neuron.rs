//! Neuron representation for the Self-Organizing Map.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A neuron in the Self-Organizing Map.
///
/// Each neuron has a position on the 2D grid and a weight vector living in
/// the same space as the input features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    /// Row position on the grid.
    pub row: usize,
    /// Column position on the grid.
    pub col: usize,
    /// Weight vector (the node's cluster centroid after training).
    pub weights: Vec<f64>,
}

impl Neuron {
    /// Creates a neuron with weights drawn uniformly from per-dimension ranges.
    pub fn new_in_ranges<R: Rng>(row: usize, col: usize, ranges: &[(f64, f64)], rng: &mut R) -> Self {
        let weights = ranges
            .iter()
            .map(|&(lo, hi)| if lo < hi { rng.gen_range(lo..=hi) } else { lo })
            .collect();

        Self { row, col, weights }
    }

    /// Computes the squared Euclidean distance (faster, avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, input: &[f64]) -> f64 {
        debug_assert_eq!(
            self.weights.len(),
            input.len(),
            "Weight and input dimensions must match"
        );

        self.weights
            .iter()
            .zip(input.iter())
            .map(|(w, i)| (w - i).powi(2))
            .sum()
    }

    /// Updates the neuron's weights towards an input vector.
    ///
    /// `learning_rate` is the overall learning rate.
    /// `neighborhood` is the neighborhood influence (0.0 to 1.0).
    pub fn update_weights(&mut self, input: &[f64], learning_rate: f64, neighborhood: f64) {
        let influence = learning_rate * neighborhood;

        for (w, i) in self.weights.iter_mut().zip(input.iter()) {
            *w += influence * (i - *w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn neuron(weights: Vec<f64>) -> Neuron {
        Neuron { row: 0, col: 0, weights }
    }

    #[test]
    fn test_range_initialization() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let ranges = [(0.0, 1.0), (-5.0, -4.0), (3.0, 3.0)];
        for _ in 0..50 {
            let neuron = Neuron::new_in_ranges(2, 5, &ranges, &mut rng);
            assert_eq!((neuron.row, neuron.col), (2, 5));
            assert!((0.0..=1.0).contains(&neuron.weights[0]));
            assert!((-5.0..=-4.0).contains(&neuron.weights[1]));
            assert_eq!(neuron.weights[2], 3.0);
        }
    }

    #[test]
    fn test_distance_squared() {
        let n = neuron(vec![1.0, 0.0, 0.0]);
        assert!((n.distance_squared(&[0.0, 1.0, 0.0]) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_update_weights() {
        let mut n = neuron(vec![0.0, 0.0, 0.0]);
        n.update_weights(&[1.0, 1.0, 1.0], 0.5, 1.0);
        assert!((n.weights[0] - 0.5).abs() < 1e-10);

        n.update_weights(&[1.0, 1.0, 1.0], 0.5, 0.0);
        assert!((n.weights[0] - 0.5).abs() < 1e-10);
    }
}
