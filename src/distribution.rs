//! Distributions over the vector encoding of discrete domains.
//!
//! A categorical domain of size `n` is encoded as the indices `0..n`. The
//! [`VectorDistribution`] decides how those indices are drawn: uniformly, or
//! proportionally to a normalized probability vector.

/// Distribution over the indices `0..size` of a discrete domain.
#[derive(Clone, Debug, PartialEq)]
pub enum VectorDistribution {
    /// Every index is equally likely.
    Uniform {
        /// Number of indices.
        size: usize,
    },
    /// Index `i` is drawn with probability `probabilities[i]`.
    Weighted {
        /// Normalized probabilities, summing to one.
        probabilities: Vec<f64>,
        /// Running sums of `probabilities`, last entry is one.
        cumulative: Vec<f64>,
    },
}

impl VectorDistribution {
    /// Creates a uniform distribution over `0..size`.
    #[must_use]
    pub fn uniform(size: usize) -> Self {
        Self::Uniform { size }
    }

    /// Creates a weighted distribution from normalized probabilities.
    #[must_use]
    pub fn weighted(probabilities: Vec<f64>) -> Self {
        let mut total = 0.0;
        let cumulative = probabilities
            .iter()
            .map(|p| {
                total += p;
                total
            })
            .collect();
        Self::Weighted {
            probabilities,
            cumulative,
        }
    }

    /// Number of indices in the support.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Uniform { size } => *size,
            Self::Weighted { probabilities, .. } => probabilities.len(),
        }
    }

    /// Probability mass at `index`, zero outside the support.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pdf(&self, index: usize) -> f64 {
        match self {
            Self::Uniform { size } if index < *size => 1.0 / *size as f64,
            Self::Uniform { .. } => 0.0,
            Self::Weighted { probabilities, .. } => {
                probabilities.get(index).copied().unwrap_or(0.0)
            }
        }
    }

    /// Draws one index.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> usize {
        match self {
            Self::Uniform { size } => rng.usize(0..*size),
            Self::Weighted {
                probabilities,
                cumulative,
            } => {
                let threshold = rng.f64() * cumulative.last().copied().unwrap_or(1.0);
                // Strict comparison so zero-probability entries are never hit.
                if let Some(index) = cumulative.iter().position(|&c| c > threshold) {
                    return index;
                }
                probabilities
                    .iter()
                    .rposition(|&p| p > 0.0)
                    .unwrap_or(probabilities.len().saturating_sub(1))
            }
        }
    }

    /// Draws `n` indices.
    pub fn sample_n(&self, n: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn uniform_samples_stay_in_range() {
        let dist = VectorDistribution::uniform(7);
        let mut rng = fastrand::Rng::with_seed(42);
        for index in dist.sample_n(500, &mut rng) {
            assert!(index < 7);
        }
        assert_eq!(dist.pdf(3), 1.0 / 7.0);
        assert_eq!(dist.pdf(7), 0.0);
    }

    #[test]
    fn weighted_never_draws_zero_probability() {
        let dist = VectorDistribution::weighted(vec![0.0, 0.25, 0.0, 0.75]);
        let mut rng = fastrand::Rng::with_seed(7);
        let mut counts = [0usize; 4];
        for index in dist.sample_n(4000, &mut rng) {
            counts[index] += 1;
        }
        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);
        let ratio = counts[3] as f64 / counts[1] as f64;
        assert!((2.4..3.6).contains(&ratio), "ratio {ratio} should be near 3");
    }

    #[test]
    fn weighted_is_reproducible_with_seed() {
        let dist = VectorDistribution::weighted(vec![0.2, 0.3, 0.5]);
        let a = dist.sample_n(32, &mut fastrand::Rng::with_seed(3));
        let b = dist.sample_n(32, &mut fastrand::Rng::with_seed(3));
        assert_eq!(a, b);
    }
}
