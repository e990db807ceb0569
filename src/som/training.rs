//! SOM training with epoch-based decay schedules.
//!
//! Both schedules decay linearly over the run:
//!
//! ```text
//! alpha(t) = alpha0 * (T - t) / T
//! sigma(t) = max(sigma0 * (T - t) / T, sigma_min)
//! ```
//!
//! where `T` is the epoch count and `sigma0` scales with the grid diagonal.

use crate::config::SomConfig;
use crate::error::{Result, RoomgenError};
use crate::som::{Prediction, Som};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Training and prediction over a [`Som`] grid.
///
/// The generator only depends on this trait, so the bundled trainer can be
/// replaced by another clustering backend.
pub trait ClusteringEngine {
    /// Fits the grid weights to `samples` in place.
    fn train(&mut self, som: &mut Som, samples: &[Vec<f64>], epochs: usize) -> Result<()>;

    /// Best matching node and distance for each sample, in input order.
    fn predict(&self, som: &Som, samples: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        som.predict(samples)
    }
}

/// SOM trainer with configurable hyperparameters.
pub struct SomTrainer {
    initial_learning_rate: f64,
    initial_radius: f64,
    min_radius: f64,
    rng: ChaCha8Rng,
}

impl SomTrainer {
    /// Creates a trainer for a `width` x `height` grid.
    pub fn new(config: &SomConfig, width: usize, height: usize, seed: u64) -> Self {
        Self {
            initial_learning_rate: config.initial_learning_rate,
            initial_radius: config.initial_radius(width, height),
            min_radius: config.min_radius,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[inline]
    fn remaining(epoch: usize, epochs: usize) -> f64 {
        if epochs == 0 {
            return 0.0;
        }
        epochs.saturating_sub(epoch) as f64 / epochs as f64
    }

    /// Computes the learning rate at a given epoch.
    #[inline]
    pub fn learning_rate(&self, epoch: usize, epochs: usize) -> f64 {
        self.initial_learning_rate * Self::remaining(epoch, epochs)
    }

    /// Computes the neighborhood radius at a given epoch.
    #[inline]
    pub fn radius(&self, epoch: usize, epochs: usize) -> f64 {
        (self.initial_radius * Self::remaining(epoch, epochs)).max(self.min_radius)
    }
}

impl ClusteringEngine for SomTrainer {
    fn train(&mut self, som: &mut Som, samples: &[Vec<f64>], epochs: usize) -> Result<()> {
        if samples.is_empty() {
            return Err(RoomgenError::Som("No training samples provided".to_string()));
        }
        if let Some(bad) = samples.iter().find(|s| s.len() != som.weight_dim) {
            return Err(RoomgenError::Som(format!(
                "Sample dimension {} does not match weight dimension {}",
                bad.len(),
                som.weight_dim
            )));
        }

        info!(
            "Training SOM: {} samples, {}x{} neurons, {} dim, {} epochs",
            samples.len(),
            som.width(),
            som.height(),
            som.weight_dim,
            epochs
        );

        let mut order: Vec<usize> = (0..samples.len()).collect();
        let log_every = (epochs / 10).max(1);

        for epoch in 0..epochs {
            let lr = self.learning_rate(epoch, epochs);
            let radius = self.radius(epoch, epochs);
            order.shuffle(&mut self.rng);

            for &idx in &order {
                let input = &samples[idx];
                let (bmu_idx, _) = som.find_bmu(input)?;
                som.update(input, bmu_idx, lr, radius);
            }

            if epoch % log_every == 0 || epoch + 1 == epochs {
                debug!(
                    "Epoch {}/{}: lr={:.4}, radius={:.2}",
                    epoch + 1,
                    epochs,
                    lr,
                    radius
                );
            }
        }

        info!("SOM training completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::som::GridTopology;

    fn trainer(width: usize, height: usize) -> SomTrainer {
        SomTrainer::new(&SomConfig::default(), width, height, 42)
    }

    #[test]
    fn test_learning_rate_decay() {
        let trainer = trainer(4, 4);

        let initial = trainer.learning_rate(0, 100);
        let later = trainer.learning_rate(50, 100);
        let last = trainer.learning_rate(99, 100);

        assert!((initial - 0.9).abs() < 1e-12);
        assert!((later - 0.45).abs() < 1e-12);
        assert!(last < later && last > 0.0);
    }

    #[test]
    fn test_radius_decay_has_floor() {
        // sigma0 = 0.25 * sqrt(12^2 + 16^2) = 5
        let trainer = trainer(12, 16);

        assert!((trainer.radius(0, 10) - 5.0).abs() < 1e-12);
        assert!((trainer.radius(5, 10) - 2.5).abs() < 1e-12);
        assert!((trainer.radius(9, 10) - 0.55).abs() < 1e-12);

        let mut previous = f64::INFINITY;
        for epoch in 0..10 {
            let r = trainer.radius(epoch, 10);
            assert!(r <= previous);
            assert!(r >= 0.55);
            previous = r;
        }
    }

    #[test]
    fn test_train_separates_clusters() {
        let samples = vec![
            vec![0.0, 0.0],
            vec![0.05, 0.0],
            vec![1.0, 1.0],
            vec![0.95, 1.0],
        ];
        let ranges = vec![(0.0, 1.0), (0.0, 1.0)];
        let mut som = Som::with_ranges(GridTopology::cylinder(4, 1), &ranges, 42).unwrap();
        let mut trainer = trainer(4, 1);

        trainer.train(&mut som, &samples, 50).unwrap();
        let predictions = trainer.predict(&som, &samples).unwrap();

        assert_eq!(predictions.len(), 4);
        assert_ne!(predictions[0].node, predictions[2].node);
    }

    #[test]
    fn test_train_is_deterministic() {
        let samples = vec![vec![0.1, 0.9], vec![0.8, 0.2], vec![0.4, 0.4]];
        let ranges = vec![(0.0, 1.0), (0.0, 1.0)];

        let run = || {
            let mut som = Som::with_ranges(GridTopology::cylinder(4, 2), &ranges, 3).unwrap();
            let mut trainer = SomTrainer::new(&SomConfig::default(), 4, 2, 3);
            trainer.train(&mut som, &samples, 20).unwrap();
            som.neurons.into_iter().map(|n| n.weights).collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_train_rejects_bad_input() {
        let mut som = Som::new_zeros(GridTopology::cylinder(4, 1), 2).unwrap();
        let mut trainer = trainer(4, 1);

        assert!(trainer.train(&mut som, &[], 10).is_err());
        assert!(trainer.train(&mut som, &[vec![1.0]], 10).is_err());
    }
}
