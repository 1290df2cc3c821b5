use crate::filter_fx::common_types::SMALL_FLOAT;
use crate::goom_rand::{NumberRange, RandomSource, thread_rand_in_range};
use crate::name_value::{NameValuePairs, get_pair};
use crate::point2d::Vec2dFlt;

pub const NOISE_MIN: f32 = 40.0;
pub const NOISE_MAX: f32 = 120.0;
pub const NOISE_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.001, 0.1);

const NOISE_DIVISOR_RANGE: NumberRange<f32> = NumberRange::new(NOISE_MIN, NOISE_MAX);
const DEFAULT_NOISE_FACTOR: f32 = 0.01;

/// Random jitter. The only after-effect that draws while evaluating; it uses the
/// calling thread's stream so workers never contend on a shared generator.
#[derive(Clone, Debug)]
pub struct Noise {
    noise_factor: f32,
}

impl Default for Noise {
    fn default() -> Self {
        Self::new()
    }
}

impl Noise {
    pub fn new() -> Self {
        Self {
            noise_factor: DEFAULT_NOISE_FACTOR,
        }
    }

    pub fn noise_factor(&self) -> f32 {
        self.noise_factor
    }

    pub fn set_noise_factor(&mut self, noise_factor: f32) {
        self.noise_factor = noise_factor;
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        self.noise_factor = rand.rand_in_range(NOISE_FACTOR_RANGE);
    }

    pub fn velocity(&self) -> Vec2dFlt {
        if self.noise_factor < SMALL_FLOAT {
            return Vec2dFlt::ZERO;
        }
        let amp = 0.5 * self.noise_factor / thread_rand_in_range(NOISE_DIVISOR_RANGE);
        let range = NumberRange::new(-amp, amp);
        Vec2dFlt::new(thread_rand_in_range(range), thread_rand_in_range(range))
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        vec![get_pair(group, "noise factor", self.noise_factor)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_factor_gives_no_noise() {
        let mut noise = Noise::new();
        noise.set_noise_factor(0.0);
        assert_eq!(noise.velocity(), Vec2dFlt::ZERO);
    }

    #[test]
    fn noise_is_bounded_by_its_amplitude() {
        let mut noise = Noise::new();
        noise.set_noise_factor(0.1);
        let max_amp = 0.5 * 0.1 / NOISE_MIN;
        for _ in 0..1_000 {
            let v = noise.velocity();
            assert!(v.x.abs() <= max_amp && v.y.abs() <= max_amp, "{v:?}");
        }
    }
}
