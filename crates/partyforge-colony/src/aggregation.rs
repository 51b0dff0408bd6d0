//! Combining per-objective scores into one fitness value.
//!
//! The orchestrator scores every team under every objective and reduces the scores with an
//! [`AggregateFitness`] strategy. The combined value drives elite selection and pheromone
//! deposit in every colony.
//!
//! ```text
//! WeightedSum:     fitness = Σ_i w_i × f_i
//! WeightedProduct: fitness = Π_i f_i^(w_i / Σ_j w_j)
//! ```
//!
//! `w_i` is the deposit constant of objective `i`. The weighted product is a weighted geometric
//! mean: it punishes a team that scores near zero on any objective, where the weighted sum
//! lets a strong objective compensate for a weak one.

use std::fmt;

/// Reduces per-objective scores to one fitness value. Higher is better.
pub trait AggregateFitness: fmt::Debug + Send + Sync {
    /// `scores[i]` and `weights[i]` belong to the same objective.
    fn aggregate(&self, scores: &[f64], weights: &[f64]) -> f64;
}

pub type BoxedAggregateFitness = Box<dyn AggregateFitness>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedSum;

impl AggregateFitness for WeightedSum {
    fn aggregate(&self, scores: &[f64], weights: &[f64]) -> f64 {
        scores.iter().zip(weights).map(|(f, w)| f * w).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedProduct;

impl AggregateFitness for WeightedProduct {
    fn aggregate(&self, scores: &[f64], weights: &[f64]) -> f64 {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        scores
            .iter()
            .zip(weights)
            .map(|(f, w)| f.max(0.0).powf(w / total))
            .product()
    }
}
