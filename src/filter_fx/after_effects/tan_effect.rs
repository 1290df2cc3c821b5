use crate::filter_fx::common_types::{Amplitude, HALF_PI};
use crate::goom_rand::{NumberRange, RandomSource, Weights, random_xy_pair};
use crate::name_value::{NameValuePairs, get_pair, get_xy_pair};
use crate::point2d::Vec2dFlt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TanType {
    TanOnly,
    CotOnly,
    CotMix,
}

pub const COT_MIX_RANGE: NumberRange<f32> = NumberRange::new(0.6, 1.6);
pub const AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.10, 1.11);
pub const LIMITING_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.10, 0.85);

const DEFAULT_COT_MIX: f32 = 1.1;
const DEFAULT_AMPLITUDE: f32 = 1.0;
const DEFAULT_LIMITING_FACTOR: f32 = 0.75;
const PROB_XY_AMPLITUDES_EQUAL: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TanParams {
    pub tan_type: TanType,
    pub cot_mix: f32,
    pub amplitude: Amplitude,
    pub limiting_factor: f32,
}

impl Default for TanParams {
    fn default() -> Self {
        Self {
            tan_type: TanType::TanOnly,
            cot_mix: DEFAULT_COT_MIX,
            amplitude: Amplitude::new(DEFAULT_AMPLITUDE, DEFAULT_AMPLITUDE),
            limiting_factor: DEFAULT_LIMITING_FACTOR,
        }
    }
}

/// Scales the zoom velocity by a tangent of the squared distance.
#[derive(Clone, Debug)]
pub struct TanEffect {
    tan_type_weights: Weights<TanType>,
    params: TanParams,
}

impl Default for TanEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl TanEffect {
    pub fn new() -> Self {
        Self {
            tan_type_weights: Weights::new(&[
                (TanType::TanOnly, 500.0),
                (TanType::CotOnly, 1.0),
                (TanType::CotMix, 50.0),
            ]),
            params: TanParams::default(),
        }
    }

    pub fn params(&self) -> &TanParams {
        &self.params
    }

    pub fn set_params(&mut self, params: TanParams) {
        self.params = params;
    }

    pub fn tan_type_weights(&self) -> &Weights<TanType> {
        &self.tan_type_weights
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        let tan_type = self.tan_type_weights.random_weighted(rand);
        let cot_mix = rand.rand_in_range(COT_MIX_RANGE);
        let (ax, ay) = random_xy_pair(rand, AMPLITUDE_RANGE, PROB_XY_AMPLITUDES_EQUAL);
        let limiting_factor = rand.rand_in_range(LIMITING_FACTOR_RANGE);
        self.params = TanParams {
            tan_type,
            cot_mix,
            amplitude: Amplitude::new(ax, ay),
            limiting_factor,
        };
    }

    /// The tangent argument is `sq_dist mod π/2`, clamped to `±limiting_factor * π/2`.
    pub fn velocity(&self, sq_dist_from_zero: f32, velocity: Vec2dFlt) -> Vec2dFlt {
        let tan_arg = self.clamped_arg(sq_dist_from_zero);
        let tan_value = match self.params.tan_type {
            TanType::TanOnly => tan_arg.tan(),
            TanType::CotOnly => (HALF_PI - tan_arg).tan(),
            TanType::CotMix => (self.params.cot_mix * HALF_PI - tan_arg).tan(),
        };
        Vec2dFlt::new(
            self.params.amplitude.x * tan_value * velocity.x,
            self.params.amplitude.y * tan_value * velocity.y,
        )
    }

    fn clamped_arg(&self, sq_dist_from_zero: f32) -> f32 {
        let limit = self.params.limiting_factor * HALF_PI;
        (sq_dist_from_zero % HALF_PI).clamp(-limit, limit)
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        let p = &self.params;
        vec![
            get_pair(group, "tan type", format_args!("{:?}", p.tan_type)),
            get_pair(group, "cot mix", p.cot_mix),
            get_xy_pair(group, "tan amplitude", p.amplitude.x, p.amplitude.y),
            get_pair(group, "tan limiting factor", p.limiting_factor),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_sq_dist_stays_finite() {
        let effect = TanEffect::new();
        let v = effect.velocity(1.0e6, Vec2dFlt::new(0.3, -0.2));
        assert!(v.is_finite());
    }

    #[test]
    fn argument_is_clamped_to_limit() {
        let mut effect = TanEffect::new();
        effect.set_params(TanParams {
            limiting_factor: 0.5,
            ..TanParams::default()
        });
        let arg = effect.clamped_arg(1.5);
        assert!((arg - 0.5 * HALF_PI).abs() < 1e-6);
    }
}
