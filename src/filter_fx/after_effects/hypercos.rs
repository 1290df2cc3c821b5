use crate::filter_fx::common_types::{Amplitude, FrequencyFactor};
use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::goom_rand::{NumberRange, RandomSource, Weights, random_xy_pair};
use crate::name_value::{NameValuePairs, get_pair};
use crate::point2d::{Vec2dFlt, lerp};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HypercosOverlayMode {
    #[default]
    None,
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HypercosEffect {
    None,
    SinCurlSwirl,
    CosCurlSwirl,
    SinCosCurlSwirl,
    CosSinCurlSwirl,
    SinTanCurlSwirl,
    CosTanCurlSwirl,
    SinRectangular,
    CosRectangular,
    SinOfCosSwirl,
    CosOfSinSwirl,
}

pub const DEFAULT_AMPLITUDE: f32 = 1.0 / 120.0;
pub const AMPLITUDE_RANGE: NumberRange<f32> =
    NumberRange::new(0.1 * DEFAULT_AMPLITUDE, 1.1 * DEFAULT_AMPLITUDE);
pub const BIG_AMPLITUDE_RANGE: NumberRange<f32> =
    NumberRange::new(0.1 * DEFAULT_AMPLITUDE, 10.1 * DEFAULT_AMPLITUDE);

const DEFAULT_FREQUENCY_FACTOR: f32 = 10.0;
pub const FREQUENCY_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(5.0, 100.0);
pub const BIG_FREQUENCY_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(5.0, 500.0);
pub const VERY_BIG_FREQUENCY_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(1000.0, 10000.0);

const PROB_FREQUENCY_FACTORS_EQUAL: f32 = 0.5;
const PROB_REVERSE: f32 = 0.5;
const PROB_AMPLITUDES_EQUAL: f32 = 0.5;
const PROB_BIG_AMPLITUDE_RANGE: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HypercosParams {
    pub amplitude: Amplitude,
    pub frequency_factor: FrequencyFactor,
    pub overlay: HypercosOverlayMode,
    pub effect: HypercosEffect,
    pub reverse: bool,
}

impl Default for HypercosParams {
    fn default() -> Self {
        Self {
            amplitude: Amplitude::new(DEFAULT_AMPLITUDE, DEFAULT_AMPLITUDE),
            frequency_factor: FrequencyFactor::new(DEFAULT_FREQUENCY_FACTOR, DEFAULT_FREQUENCY_FACTOR),
            overlay: HypercosOverlayMode::None,
            effect: HypercosEffect::None,
            reverse: false,
        }
    }
}

/// Trigonometric swirl overlay.
#[derive(Clone, Debug)]
pub struct Hypercos {
    effect_weights: Weights<HypercosEffect>,
    params: HypercosParams,
}

impl Default for Hypercos {
    fn default() -> Self {
        Self::new()
    }
}

impl Hypercos {
    pub fn new() -> Self {
        Self {
            effect_weights: Weights::new(&[
                (HypercosEffect::None, 0.0),
                (HypercosEffect::SinCurlSwirl, 15.0),
                (HypercosEffect::CosCurlSwirl, 15.0),
                (HypercosEffect::SinCosCurlSwirl, 15.0),
                (HypercosEffect::CosSinCurlSwirl, 15.0),
                (HypercosEffect::SinTanCurlSwirl, 5.0),
                (HypercosEffect::CosTanCurlSwirl, 5.0),
                (HypercosEffect::SinRectangular, 5.0),
                (HypercosEffect::CosRectangular, 5.0),
                (HypercosEffect::SinOfCosSwirl, 15.0),
                (HypercosEffect::CosOfSinSwirl, 15.0),
            ]),
            params: HypercosParams::default(),
        }
    }

    pub fn params(&self) -> &HypercosParams {
        &self.params
    }

    pub fn set_params(&mut self, params: HypercosParams) {
        self.params = params;
    }

    pub fn set_default_params(&mut self) {
        self.params = HypercosParams::default();
    }

    /// Rolls parameters for `overlay`; `None` restores the defaults.
    pub fn set_random_params(&mut self, overlay: HypercosOverlayMode, rand: &mut dyn RandomSource) {
        match overlay {
            HypercosOverlayMode::None => self.set_default_params(),
            HypercosOverlayMode::Mode0 => self.set_mode0_random_params(rand),
            HypercosOverlayMode::Mode1 => self.set_mode1_random_params(rand),
            HypercosOverlayMode::Mode2 => self.set_mode2_random_params(rand),
            HypercosOverlayMode::Mode3 => self.set_mode3_random_params(rand),
        }
    }

    pub fn set_mode0_random_params(&mut self, rand: &mut dyn RandomSource) {
        let max = lerp(FREQUENCY_FACTOR_RANGE.min, FREQUENCY_FACTOR_RANGE.max, 0.15);
        self.params = self.random_params(
            rand,
            HypercosOverlayMode::Mode0,
            NumberRange::new(FREQUENCY_FACTOR_RANGE.min, max),
            AMPLITUDE_RANGE,
        );
    }

    pub fn set_mode1_random_params(&mut self, rand: &mut dyn RandomSource) {
        let min = lerp(FREQUENCY_FACTOR_RANGE.min, FREQUENCY_FACTOR_RANGE.max, 0.20);
        self.params = self.random_params(
            rand,
            HypercosOverlayMode::Mode1,
            NumberRange::new(min, FREQUENCY_FACTOR_RANGE.max),
            AMPLITUDE_RANGE,
        );
    }

    pub fn set_mode2_random_params(&mut self, rand: &mut dyn RandomSource) {
        let amplitude_range = if rand.probability_of(PROB_BIG_AMPLITUDE_RANGE) {
            BIG_AMPLITUDE_RANGE
        } else {
            AMPLITUDE_RANGE
        };
        let min = lerp(FREQUENCY_FACTOR_RANGE.min, FREQUENCY_FACTOR_RANGE.max, 0.50);
        self.params = self.random_params(
            rand,
            HypercosOverlayMode::Mode2,
            NumberRange::new(min, BIG_FREQUENCY_FACTOR_RANGE.max),
            amplitude_range,
        );
    }

    pub fn set_mode3_random_params(&mut self, rand: &mut dyn RandomSource) {
        self.params = self.random_params(
            rand,
            HypercosOverlayMode::Mode3,
            VERY_BIG_FREQUENCY_FACTOR_RANGE,
            AMPLITUDE_RANGE,
        );
    }

    fn random_params(
        &self,
        rand: &mut dyn RandomSource,
        overlay: HypercosOverlayMode,
        freq_range: NumberRange<f32>,
        amplitude_range: NumberRange<f32>,
    ) -> HypercosParams {
        let (ax, ay) = random_xy_pair(rand, amplitude_range, PROB_AMPLITUDES_EQUAL);
        let (fx, fy) = random_xy_pair(rand, freq_range, PROB_FREQUENCY_FACTORS_EQUAL);
        let reverse = rand.probability_of(PROB_REVERSE);
        HypercosParams {
            amplitude: Amplitude::new(ax, ay),
            frequency_factor: FrequencyFactor::new(fx, fy),
            overlay,
            effect: self.effect_weights.random_weighted(rand),
            reverse,
        }
    }

    pub fn velocity(&self, coords: NormalizedCoords) -> Vec2dFlt {
        let sign = if self.params.reverse { -1.0 } else { 1.0 };
        let fx = sign * self.params.frequency_factor.x;
        let fy = sign * self.params.frequency_factor.y;
        let (x, y) = (coords.x(), coords.y());

        let (x_val, y_val) = match self.params.effect {
            HypercosEffect::None => (0.0, 0.0),
            HypercosEffect::SinRectangular => ((fx * x).sin(), (fy * y).sin()),
            HypercosEffect::CosRectangular => ((fx * x).cos(), (fy * y).cos()),
            HypercosEffect::SinCurlSwirl => ((fy * y).sin(), (fx * x).sin()),
            HypercosEffect::CosCurlSwirl => ((fy * y).cos(), (fx * x).cos()),
            HypercosEffect::SinCosCurlSwirl => ((fx * y).sin(), (fy * x).cos()),
            HypercosEffect::CosSinCurlSwirl => ((fy * y).cos(), (fx * x).sin()),
            HypercosEffect::SinTanCurlSwirl => ((fy * y).tan().sin(), (fx * x).tan().cos()),
            HypercosEffect::CosTanCurlSwirl => ((fy * y).tan().cos(), (fx * x).tan().sin()),
            HypercosEffect::SinOfCosSwirl => ((PI * (fy * y).cos()).sin(), (PI * (fx * x).sin()).cos()),
            HypercosEffect::CosOfSinSwirl => ((PI * (fy * y).sin()).cos(), (PI * (fx * x).cos()).sin()),
        };

        Vec2dFlt::new(x_val * self.params.amplitude.x, y_val * self.params.amplitude.y)
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        let p = &self.params;
        if p.overlay == HypercosOverlayMode::None {
            return vec![get_pair(group, "hypercos overlay", "None")];
        }
        vec![get_pair(
            group,
            "hypercos",
            format_args!(
                "({:.3}, {:.3}), ({:.1}, {:.1}), {:?}, {:?}, reverse={}",
                p.amplitude.x,
                p.amplitude.y,
                p.frequency_factor.x,
                p.frequency_factor.y,
                p.overlay,
                p.effect,
                p.reverse
            ),
        )]
    }
}
