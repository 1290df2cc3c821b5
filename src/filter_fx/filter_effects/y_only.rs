use crate::filter_fx::common_types::{Amplitude, FrequencyFactor};
use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::goom_rand::{NumberRange, RandomSource, random_xy_pair};
use crate::name_value::{NameValuePairs, get_pair, get_xy_pair};
use crate::point2d::Vec2dFlt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YOnlyEffect {
    XSinYSin,
    XSinYCos,
    XCosYSin,
    XCosYCos,
}

const ALL_EFFECTS: [YOnlyEffect; 4] = [
    YOnlyEffect::XSinYSin,
    YOnlyEffect::XSinYCos,
    YOnlyEffect::XCosYSin,
    YOnlyEffect::XCosYCos,
];

pub const FREQ_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(-50.0, 50.01);
pub const AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.010, 1.011);

const PROB_Y_ONLY_STRICT: f32 = 0.9;
const PROB_FREQ_EQUAL: f32 = 0.9;
const PROB_AMPLITUDE_EQUAL: f32 = 0.9;

/// Separable sin/cos product. A `None` y effect makes y copy the x coefficient.
#[derive(Clone, Debug)]
pub struct YOnly {
    x_effect: YOnlyEffect,
    y_effect: Option<YOnlyEffect>,
    frequency_factor: FrequencyFactor,
    amplitude: Amplitude,
}

impl YOnly {
    pub fn new(rand: &mut dyn RandomSource) -> Self {
        let mut y_only = Self {
            x_effect: YOnlyEffect::XSinYSin,
            y_effect: None,
            frequency_factor: FrequencyFactor::new(1.0, 10.0),
            amplitude: Amplitude::new(1.0, 1.0),
        };
        y_only.set_random_params(rand);
        y_only
    }

    pub fn x_effect(&self) -> YOnlyEffect {
        self.x_effect
    }

    pub fn y_effect(&self) -> Option<YOnlyEffect> {
        self.y_effect
    }

    pub fn frequency_factor(&self) -> FrequencyFactor {
        self.frequency_factor
    }

    pub fn amplitude(&self) -> Amplitude {
        self.amplitude
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        self.x_effect = random_effect(rand);
        self.y_effect = if rand.probability_of(PROB_Y_ONLY_STRICT) {
            None
        } else {
            Some(random_effect(rand))
        };

        let (fx, fy) = random_xy_pair(rand, FREQ_FACTOR_RANGE, PROB_FREQ_EQUAL);
        self.frequency_factor = FrequencyFactor::new(fx, fy);
        let (ax, ay) = random_xy_pair(rand, AMPLITUDE_RANGE, PROB_AMPLITUDE_EQUAL);
        self.amplitude = Amplitude::new(ax, ay);
    }

    pub fn speed_coefficients(&self, coords: NormalizedCoords, base: Vec2dFlt) -> Vec2dFlt {
        let x = base.x * self.amplitude.x * self.multiplier(self.x_effect, coords);
        let y = match self.y_effect {
            None => x,
            Some(effect) => base.y * self.amplitude.y * self.multiplier(effect, coords),
        };
        Vec2dFlt::new(x, y)
    }

    fn multiplier(&self, effect: YOnlyEffect, coords: NormalizedCoords) -> f32 {
        let x_arg = self.frequency_factor.x * coords.x();
        let y_arg = self.frequency_factor.y * coords.y();
        match effect {
            YOnlyEffect::XSinYSin => x_arg.sin() * y_arg.sin(),
            YOnlyEffect::XSinYCos => x_arg.sin() * y_arg.cos(),
            YOnlyEffect::XCosYSin => x_arg.cos() * y_arg.sin(),
            YOnlyEffect::XCosYCos => x_arg.cos() * y_arg.cos(),
        }
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        vec![
            get_pair(group, "effects", format_args!("{:?}/{:?}", self.x_effect, self.y_effect)),
            get_xy_pair(group, "freq factor", self.frequency_factor.x, self.frequency_factor.y),
            get_xy_pair(group, "amplitude", self.amplitude.x, self.amplitude.y),
        ]
    }
}

fn random_effect(rand: &mut dyn RandomSource) -> YOnlyEffect {
    ALL_EFFECTS[rand.rand_u32_in(0, ALL_EFFECTS.len() as u32) as usize]
}
