//! Weight vector operations shared by sampling and probability updates.
//!
//! - **Normalization**: [`normalize_l1`] scales non-negative weights to sum to 1.0, falling back
//!   to a uniform distribution when nothing is left to normalize
//! - **Sampling**: [`roulette`] draws an index with probability proportional to its weight
//!
//! Weights are plain `f64` slices. Negative and non-finite entries never win a draw.

use rand::Rng;

/// Scales `weights` in place so they sum to 1.0.
///
/// If the sum is zero or not finite, every entry becomes `1 / len` instead. Empty slices are
/// left untouched.
///
/// ```
/// use partyforge_colony::weights;
///
/// let mut weights = vec![1.0, 3.0];
/// weights::normalize_l1(&mut weights);
/// assert_eq!(weights, vec![0.25, 0.75]);
///
/// let mut weights = vec![0.0; 4];
/// weights::normalize_l1(&mut weights);
/// assert_eq!(weights, vec![0.25; 4]);
/// ```
pub fn normalize_l1(weights: &mut [f64]) {
    if weights.is_empty() {
        return;
    }
    let sum: f64 = weights.iter().map(|&w| usable(w)).sum();
    if sum > 0.0 && sum.is_finite() {
        for w in weights {
            *w = usable(*w) / sum;
        }
    } else {
        #[expect(clippy::cast_precision_loss)]
        let uniform = 1.0 / weights.len() as f64;
        weights.fill(uniform);
    }
}

/// Draws an index with probability proportional to its weight.
///
/// Returns `None` if no entry has positive weight.
pub fn roulette<R>(rng: &mut R, weights: &[f64]) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let total: f64 = weights.iter().map(|&w| usable(w)).sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }
    let mut target = rng.random::<f64>() * total;
    let mut last = None;
    for (i, &w) in weights.iter().enumerate() {
        let w = usable(w);
        if w <= 0.0 {
            continue;
        }
        if target < w {
            return Some(i);
        }
        target -= w;
        last = Some(i);
    }
    // rounding can leave a sliver past the final positive entry
    last
}

fn usable(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 { w } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_normalize_ignores_invalid_entries() {
        let mut weights = vec![2.0, -1.0, f64::NAN, 2.0];
        normalize_l1(&mut weights);
        assert_eq!(weights, vec![0.5, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let mut weights = (0..37_u32)
            .map(|i| f64::from(i * i) + 0.1)
            .collect::<Vec<_>>();
        normalize_l1(&mut weights);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_roulette_never_picks_zero_weight() {
        let mut rng = Pcg64::seed_from_u64(7);
        let weights = [0.0, 1.0, 0.0, 3.0, 0.0];
        let mut hits = [0_u32; 5];
        for _ in 0..2000 {
            hits[roulette(&mut rng, &weights).unwrap()] += 1;
        }
        assert_eq!(hits[0] + hits[2] + hits[4], 0);
        assert!(hits[3] > hits[1] * 2);
    }

    #[test]
    fn test_roulette_without_weight() {
        let mut rng = Pcg64::seed_from_u64(7);
        assert_eq!(roulette(&mut rng, &[]), None);
        assert_eq!(roulette(&mut rng, &[0.0, -2.0, f64::NAN]), None);
    }
}
