//! Constant-time categorical sampling via the Vose alias method.
//!
//! Construction partitions the normalized weights into "small" and "large"
//! piles and pairs them into `N` buckets, each covering a `1/N` slice of
//! the unit interval with at most two outcomes. Sampling is a single
//! uniform draw: pick the bucket by truncation, then compare against its
//! threshold. O(n) build, O(1) per sample.

use rand::Rng;

#[derive(Clone, Copy, Debug)]
struct Bucket {
    small: usize,
    large: usize,
    threshold: f64,
}

pub struct CategoricalSampler {
    buckets: Vec<Bucket>,
}

impl CategoricalSampler {
    /// Builds the alias table. Empty or all-zero weight vectors fall back
    /// to the uniform distribution.
    pub fn new(weights: &[f64]) -> Self {
        let n = weights.len();
        if n == 0 {
            return Self {
                buckets: vec![Bucket {
                    small: 0,
                    large: 0,
                    threshold: 0.0,
                }],
            };
        }

        let sum: f64 = weights.iter().sum();
        let probabilities: Vec<f64> = if sum > 0.0 && sum.is_finite() {
            weights.iter().map(|w| w / sum).collect()
        } else {
            vec![1.0 / n as f64; n]
        };

        let cutoff = 1.0 / n as f64;
        let mut small: Vec<(f64, usize)> = Vec::new();
        let mut large: Vec<(f64, usize)> = Vec::new();
        for (i, &p) in probabilities.iter().enumerate() {
            if p < cutoff {
                small.push((p, i));
            } else {
                large.push((p, i));
            }
        }

        let mut buckets = Vec::with_capacity(n);
        while let (Some(&(ps, is)), Some(&(pl, il))) = (small.last(), large.last()) {
            small.pop();
            large.pop();

            // Mixed bucket: mass `ps` goes to the small index, the rest of
            // the 1/N slice to the large one.
            buckets.push(Bucket {
                small: is,
                large: il,
                threshold: ps + buckets.len() as f64 / n as f64,
            });

            let left_over = ps + pl - cutoff;
            if left_over < cutoff {
                small.push((left_over, il));
            } else {
                large.push((left_over, il));
            }
        }

        // Remaining singletons become pure buckets.
        while let Some((_, i)) = large.pop() {
            buckets.push(Bucket {
                small: i,
                large: i,
                threshold: 0.0,
            });
        }
        // Only reachable through floating-point round-off.
        while let Some((_, i)) = small.pop() {
            buckets.push(Bucket {
                small: i,
                large: i,
                threshold: 0.0,
            });
        }

        Self { buckets }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let u: f64 = rng.gen();
        let mut index = (self.buckets.len() as f64 * u) as usize;
        if index >= self.buckets.len() {
            index = self.buckets.len() - 1;
        }
        let bucket = self.buckets[index];
        if u < bucket.threshold {
            bucket.small
        } else {
            bucket.large
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frequencies(weights: &[f64], draws: usize, seed: u64) -> Vec<f64> {
        let sampler = CategoricalSampler::new(weights);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = vec![0usize; weights.len().max(1)];
        for _ in 0..draws {
            counts[sampler.sample(&mut rng)] += 1;
        }
        counts.iter().map(|&c| c as f64 / draws as f64).collect()
    }

    #[test]
    fn empirical_frequencies_match_the_weights() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let total: f64 = weights.iter().sum();
        let freq = frequencies(&weights, 200_000, 0xC0FFEE);
        for (i, &w) in weights.iter().enumerate() {
            let expected = w / total;
            assert!(
                (freq[i] - expected).abs() < 0.01,
                "index {i}: expected {expected:.3}, got {:.3}",
                freq[i]
            );
        }
    }

    #[test]
    fn skewed_weights_sample_the_heavy_index() {
        let freq = frequencies(&[0.001, 0.001, 10.0], 50_000, 42);
        assert!(freq[2] > 0.99);
    }

    #[test]
    fn zero_weights_fall_back_to_uniform() {
        let freq = frequencies(&[0.0, 0.0, 0.0], 60_000, 7);
        for &f in &freq {
            assert!((f - 1.0 / 3.0).abs() < 0.02);
        }
    }

    #[test]
    fn single_weight_always_wins() {
        let sampler = CategoricalSampler::new(&[5.0]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut rng), 0);
        }
    }

    #[test]
    fn empty_weights_do_not_panic() {
        let sampler = CategoricalSampler::new(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sampler.sample(&mut rng), 0);
    }
}
