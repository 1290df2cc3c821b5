//! Random parameter source shared by every effect.
//!
//! Effects never own a generator: `set_random_params` and constructors borrow a
//! `&mut dyn RandomSource` for the duration of the reroll, which keeps per-pixel
//! evaluation free of hidden state.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy> NumberRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl NumberRange<f32> {
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

pub trait RandomSource {
    /// Uniform in `[0, 1)`.
    fn unit_f32(&mut self) -> f32;

    /// Uniform in `[0, 1)` with double precision, used for weighted selection.
    fn unit_f64(&mut self) -> f64;

    /// Uniform integer in `[min, max)`. `min < max` is required.
    fn rand_u32_in(&mut self, min: u32, max: u32) -> u32;

    /// Uniform float in `[min, max]`.
    fn rand_in_range(&mut self, range: NumberRange<f32>) -> f32 {
        let v = range.min + self.unit_f32() * (range.max - range.min);
        v.clamp(range.min.min(range.max), range.max.max(range.min))
    }

    fn probability_of(&mut self, prob: f32) -> bool {
        if prob <= 0.0 {
            return false;
        }
        if prob >= 1.0 {
            return true;
        }
        self.unit_f32() < prob
    }
}

/// Process RNG backed by `fastrand`.
#[derive(Clone, Debug)]
pub struct GoomRand {
    rng: fastrand::Rng,
    seed: u64,
}

impl GoomRand {
    pub fn new() -> Self {
        Self::with_seed(fastrand::u64(..))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for GoomRand {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for GoomRand {
    fn unit_f32(&mut self) -> f32 {
        self.rng.f32()
    }

    fn unit_f64(&mut self) -> f64 {
        self.rng.f64()
    }

    fn rand_u32_in(&mut self, min: u32, max: u32) -> u32 {
        assert!(min < max, "empty integer range {min}..{max}");
        self.rng.u32(min..max)
    }
}

/// Seeds the calling thread's `fastrand` stream. Noise draws from this stream.
pub fn seed_thread_stream(seed: u64) {
    fastrand::seed(seed);
}

/// Per-thread uniform draw in `[min, max)`. Only used by per-pixel noise.
pub fn thread_rand_in_range(range: NumberRange<f32>) -> f32 {
    range.min + fastrand::f32() * (range.max - range.min)
}

/// Draws `x` from `range`, then `y` equal to `x` with `prob_equal`, else an independent draw.
pub fn random_xy_pair(
    rand: &mut dyn RandomSource,
    range: NumberRange<f32>,
    prob_equal: f32,
) -> (f32, f32) {
    let x = rand.rand_in_range(range);
    let y = if rand.probability_of(prob_equal) {
        x
    } else {
        rand.rand_in_range(range)
    };
    (x, y)
}

/// Weighted choice over a closed set of keys.
#[derive(Clone, Debug)]
pub struct Weights<E> {
    entries: Vec<(E, f64)>,
    sum: f64,
}

impl<E: Copy + PartialEq> Weights<E> {
    pub fn new(entries: &[(E, f32)]) -> Self {
        let entries: Vec<(E, f64)> = entries
            .iter()
            .map(|&(key, w)| {
                assert!(w >= 0.0, "negative weight");
                (key, w as f64)
            })
            .collect();
        let sum = entries.iter().map(|(_, w)| *w).sum::<f64>();
        assert!(sum > 0.0, "weights must not all be zero");
        Self { entries, sum }
    }

    pub fn sum_of_weights(&self) -> f64 {
        self.sum
    }

    pub fn weight(&self, key: E) -> f64 {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    pub fn random_weighted(&self, rand: &mut dyn RandomSource) -> E {
        let mut target = rand.unit_f64() * self.sum;
        for &(key, w) in &self.entries {
            if target < w {
                return key;
            }
            target -= w;
        }
        // Rounding can leave a sliver past the last bucket.
        self.entries
            .iter()
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map(|(k, _)| *k)
            .unwrap_or(self.entries[0].0)
    }

    /// Weighted choice with each weight scaled by `multiplier(key)`. Falls back to the plain
    /// weights when every scaled weight is zero.
    pub fn random_weighted_with(
        &self,
        rand: &mut dyn RandomSource,
        multiplier: impl Fn(E) -> f64,
    ) -> E {
        let scaled: Vec<(E, f64)> = self
            .entries
            .iter()
            .map(|&(key, w)| (key, w * multiplier(key).max(0.0)))
            .collect();
        let sum = scaled.iter().map(|(_, w)| *w).sum::<f64>();
        if sum <= 0.0 {
            return self.random_weighted(rand);
        }
        let mut target = rand.unit_f64() * sum;
        for &(key, w) in &scaled {
            if target < w {
                return key;
            }
            target -= w;
        }
        scaled
            .iter()
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map(|(k, _)| *k)
            .unwrap_or(self.entries[0].0)
    }

    /// Like `random_weighted`, but never returns `excluded` when another key has weight.
    pub fn random_weighted_excluding(&self, rand: &mut dyn RandomSource, excluded: E) -> E {
        let remaining = self.sum - self.weight(excluded);
        if remaining <= 0.0 {
            return excluded;
        }
        let mut target = rand.unit_f64() * remaining;
        for &(key, w) in &self.entries {
            if key == excluded {
                continue;
            }
            if target < w {
                return key;
            }
            target -= w;
        }
        self.entries
            .iter()
            .rev()
            .find(|(k, w)| *k != excluded && *w > 0.0)
            .map(|(k, _)| *k)
            .unwrap_or(excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rand_in_range_stays_inside() {
        let mut rand = GoomRand::with_seed(7);
        let range = NumberRange::new(-1.5f32, 2.25);
        for _ in 0..10_000 {
            let v = rand.rand_in_range(range);
            assert!(range.contains(v), "{v} escaped range");
        }
    }

    #[test]
    fn zero_weight_is_never_chosen() {
        let weights = Weights::new(&[(0u8, 0.0), (1u8, 1.0), (2u8, 3.0)]);
        let mut rand = GoomRand::with_seed(11);
        for _ in 0..5_000 {
            assert_ne!(weights.random_weighted(&mut rand), 0);
        }
    }

    #[test]
    fn zero_multiplier_blocks_a_key() {
        let weights = Weights::new(&[(0u8, 5.0), (1u8, 1.0), (2u8, 1.0)]);
        let mut rand = GoomRand::with_seed(19);
        for _ in 0..1_000 {
            let key = weights.random_weighted_with(&mut rand, |k| if k == 0 { 0.0 } else { 1.0 });
            assert_ne!(key, 0);
        }
    }

    #[test]
    fn excluding_skips_the_current_key() {
        let weights = Weights::new(&[(0u8, 5.0), (1u8, 1.0)]);
        let mut rand = GoomRand::with_seed(3);
        for _ in 0..1_000 {
            assert_eq!(weights.random_weighted_excluding(&mut rand, 0), 1);
        }
    }
}
