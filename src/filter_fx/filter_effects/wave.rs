use crate::filter_fx::common_types::HALF_PI;
use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::filter_fx::viewport::{RandomViewport, SideBounds, Viewport, ViewportBounds};
use crate::goom_rand::{NumberRange, RandomSource, Weights};
use crate::name_value::{NameValuePairs, get_pair};
use crate::point2d::{Vec2dFlt, lerp};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveMode {
    SqDistAngleMode0,
    SqDistAngleMode1,
    AtanAngleMode0,
    AtanAngleMode1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveEffect {
    Sin,
    Cos,
    SinCos,
    Tan,
    TanSin,
    TanCos,
    Cot,
    CotSin,
    CotCos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleEffect {
    SqDist,
    Atan,
}

const SQ_DIST_POWER_RANGE: NumberRange<f32> = NumberRange::new(0.15, 1.1);

const DEFAULT_PERIODIC_FACTOR: f32 = 1.0;
const DEFAULT_SIN_COS_PERIODIC_FACTOR: f32 = 0.5;
pub const PERIODIC_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.5, 1.0);
const SIN_COS_PERIODIC_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.1, 0.9);
pub const FREQ_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(1.0, 50.0);
pub const AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.001, 0.25);
pub const REDUCER_COEFF_RANGE: NumberRange<f32> = NumberRange::new(0.95, 1.5);
const TAN_REDUCER_COEFF_RANGE: NumberRange<f32> = NumberRange::new(4.0, 10.0);
const MODIFIED_ATAN_ANGLE_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.1, 10.0);

// Odd but interesting waves, only allowed in the mode 1 variants.
const SMALL_FREQ_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.001, 0.1);
const BIG_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(1.0, 50.0);
const BIG_PERIODIC_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(50.0, 100.0);
const BIG_SIN_COS_PERIODIC_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(10.0, 90.0);

const PROB_ALLOW_STRANGE_WAVE_VALUES: f32 = 0.1;
const PROB_WAVE_XY_EFFECTS_EQUAL: f32 = 0.75;
const PROB_NO_PERIODIC_FACTOR: f32 = 0.2;
const PROB_PERIODIC_FACTOR_USES_X_WAVE_EFFECT: f32 = 0.9;
const PROB_USE_MODIFIED_ATAN_ANGLE: f32 = 0.5;
const PROB_NO_VIEWPORT: f32 = 0.5;

/// Largest magnitude handed to `tan`, keeps the tangent family finite.
const TAN_ARG_LIMIT: f32 = 0.95 * HALF_PI;

struct RangeSet {
    freq_factor: NumberRange<f32>,
    amplitude: NumberRange<f32>,
    periodic_factor: NumberRange<f32>,
    sin_cos_periodic_factor: NumberRange<f32>,
}

const NORMAL_RANGES: RangeSet = RangeSet {
    freq_factor: FREQ_FACTOR_RANGE,
    amplitude: AMPLITUDE_RANGE,
    periodic_factor: PERIODIC_FACTOR_RANGE,
    sin_cos_periodic_factor: SIN_COS_PERIODIC_FACTOR_RANGE,
};
const STRANGE_RANGES: RangeSet = RangeSet {
    freq_factor: SMALL_FREQ_FACTOR_RANGE,
    amplitude: BIG_AMPLITUDE_RANGE,
    periodic_factor: BIG_PERIODIC_FACTOR_RANGE,
    sin_cos_periodic_factor: BIG_SIN_COS_PERIODIC_FACTOR_RANGE,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    pub x_wave_effect: WaveEffect,
    pub y_wave_effect: WaveEffect,
    pub angle_effect: AngleEffect,
    pub sq_dist_power: f32,
    pub freq_factor: f32,
    pub amplitude: f32,
    pub periodic_factor: f32,
    pub reducer_coeff: f32,
    pub use_modified_atan_angle: bool,
    pub modified_atan_angle_factor: f32,
}

/// Damped periodic ripple added to the base coefficient.
#[derive(Clone, Debug)]
pub struct Wave {
    mode: WaveMode,
    random_viewport: RandomViewport,
    weighted_effects: Weights<WaveEffect>,
    viewport: Viewport,
    params: WaveParams,
}

impl Wave {
    pub fn new(mode: WaveMode, rand: &mut dyn RandomSource) -> Self {
        let mut random_viewport = RandomViewport::new(ViewportBounds {
            min_side_length: 0.1,
            prob_use_centred_sides: 1.0,
            sides: SideBounds {
                min_max_width: NumberRange::new(2.0, 10.0),
                min_max_height: NumberRange::new(2.0, 10.0),
            },
            ..ViewportBounds::default()
        });
        random_viewport.set_prob_no_viewport(PROB_NO_VIEWPORT);

        let weighted_effects = Weights::new(&[
            (WaveEffect::Sin, 200.0),
            (WaveEffect::Cos, 200.0),
            (WaveEffect::SinCos, 150.0),
            (WaveEffect::Tan, 10.0),
            (WaveEffect::TanSin, 10.0),
            (WaveEffect::TanCos, 10.0),
            (WaveEffect::Cot, 1.0),
            (WaveEffect::CotSin, 1.0),
            (WaveEffect::CotCos, 1.0),
        ]);

        let mut wave = Self {
            mode,
            random_viewport,
            weighted_effects,
            viewport: Viewport::whole(),
            params: WaveParams {
                x_wave_effect: WaveEffect::Sin,
                y_wave_effect: WaveEffect::Sin,
                angle_effect: AngleEffect::SqDist,
                sq_dist_power: 1.0,
                freq_factor: 10.0,
                amplitude: 0.1,
                periodic_factor: DEFAULT_PERIODIC_FACTOR,
                reducer_coeff: 1.0,
                use_modified_atan_angle: false,
                modified_atan_angle_factor: 1.0,
            },
        };
        wave.set_random_params(rand);
        wave
    }

    pub fn mode(&self) -> WaveMode {
        self.mode
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        let (angle_effect, allow_strange) = match self.mode {
            WaveMode::SqDistAngleMode0 => (AngleEffect::SqDist, false),
            WaveMode::SqDistAngleMode1 => (AngleEffect::SqDist, true),
            WaveMode::AtanAngleMode0 => (AngleEffect::Atan, false),
            WaveMode::AtanAngleMode1 => (AngleEffect::Atan, true),
        };
        let ranges = if allow_strange && rand.probability_of(PROB_ALLOW_STRANGE_WAVE_VALUES) {
            &STRANGE_RANGES
        } else {
            &NORMAL_RANGES
        };

        self.viewport = self.random_viewport.random_viewport(rand);

        let x_wave_effect = self.weighted_effects.random_weighted(rand);
        let y_wave_effect = if rand.probability_of(PROB_WAVE_XY_EFFECTS_EQUAL) {
            x_wave_effect
        } else {
            self.weighted_effects.random_weighted(rand)
        };

        let sq_dist_power = rand.rand_in_range(SQ_DIST_POWER_RANGE);
        let periodic_factor = random_periodic_factor(rand, x_wave_effect, y_wave_effect, ranges);
        let freq_factor = rand.rand_in_range(ranges.freq_factor);
        let amplitude = rand.rand_in_range(ranges.amplitude);
        let reducer_coeff = random_reducer_coeff(rand, x_wave_effect, periodic_factor);
        let use_modified_atan_angle = rand.probability_of(PROB_USE_MODIFIED_ATAN_ANGLE);
        let modified_atan_angle_factor = rand.rand_in_range(MODIFIED_ATAN_ANGLE_FACTOR_RANGE);

        self.params = WaveParams {
            x_wave_effect,
            y_wave_effect,
            angle_effect,
            sq_dist_power,
            freq_factor,
            amplitude,
            periodic_factor,
            reducer_coeff,
            use_modified_atan_angle,
            modified_atan_angle_factor,
        };
    }

    pub fn speed_coefficients(
        &self,
        coords: NormalizedCoords,
        sq_dist_from_zero: f32,
        base: Vec2dFlt,
    ) -> Vec2dFlt {
        let angle = self.params.freq_factor * self.angle(coords, sq_dist_from_zero);
        let reducer = (-self.params.reducer_coeff * sq_dist_from_zero).exp();
        let scale = reducer * self.params.amplitude;
        Vec2dFlt::new(
            base.x + scale * periodic_part(self.params.x_wave_effect, angle, self.params.periodic_factor),
            base.y + scale * periodic_part(self.params.y_wave_effect, angle, self.params.periodic_factor),
        )
    }

    fn angle(&self, coords: NormalizedCoords, sq_dist_from_zero: f32) -> f32 {
        match self.params.angle_effect {
            AngleEffect::SqDist => sq_dist_from_zero.powf(self.params.sq_dist_power),
            AngleEffect::Atan => {
                let atan_angle = coords.y().atan2(coords.x());
                if self.params.use_modified_atan_angle {
                    (self.params.modified_atan_angle_factor * atan_angle).sin() * atan_angle
                } else {
                    atan_angle
                }
            }
        }
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        let p = &self.params;
        vec![
            get_pair(group, "mode", format_args!("{:?}", self.mode)),
            get_pair(group, "effects", format_args!("{:?}/{:?}", p.x_wave_effect, p.y_wave_effect)),
            get_pair(group, "freq factor", p.freq_factor),
            get_pair(group, "amplitude", p.amplitude),
            get_pair(group, "periodic factor", p.periodic_factor),
            get_pair(group, "reducer coeff", p.reducer_coeff),
        ]
    }
}

fn random_periodic_factor(
    rand: &mut dyn RandomSource,
    x_wave_effect: WaveEffect,
    y_wave_effect: WaveEffect,
    ranges: &RangeSet,
) -> f32 {
    if rand.probability_of(PROB_NO_PERIODIC_FACTOR) {
        return if x_wave_effect == WaveEffect::SinCos {
            DEFAULT_SIN_COS_PERIODIC_FACTOR
        } else {
            DEFAULT_PERIODIC_FACTOR
        };
    }
    let effect = if rand.probability_of(PROB_PERIODIC_FACTOR_USES_X_WAVE_EFFECT) {
        x_wave_effect
    } else {
        y_wave_effect
    };
    if effect == WaveEffect::SinCos {
        rand.rand_in_range(ranges.sin_cos_periodic_factor)
    } else {
        rand.rand_in_range(ranges.periodic_factor)
    }
}

fn random_reducer_coeff(rand: &mut dyn RandomSource, x_wave_effect: WaveEffect, periodic_factor: f32) -> f32 {
    match x_wave_effect {
        WaveEffect::Sin | WaveEffect::Cos | WaveEffect::SinCos => rand.rand_in_range(REDUCER_COEFF_RANGE),
        WaveEffect::Tan | WaveEffect::Cot => rand.rand_in_range(TAN_REDUCER_COEFF_RANGE),
        WaveEffect::TanSin | WaveEffect::TanCos | WaveEffect::CotSin | WaveEffect::CotCos => {
            let tan_reducer = rand.rand_in_range(TAN_REDUCER_COEFF_RANGE);
            let reducer = rand.rand_in_range(REDUCER_COEFF_RANGE);
            lerp(tan_reducer, reducer, periodic_factor)
        }
    }
}

/// `tan` with its argument folded into `(-π/2, π/2)` and kept off the poles.
pub fn clamped_tan(angle: f32) -> f32 {
    let folded = (angle + HALF_PI).rem_euclid(PI) - HALF_PI;
    folded.clamp(-TAN_ARG_LIMIT, TAN_ARG_LIMIT).tan()
}

fn periodic_part(effect: WaveEffect, angle: f32, periodic_factor: f32) -> f32 {
    let cot = || clamped_tan(HALF_PI - angle);
    let value = match effect {
        WaveEffect::Sin => angle.sin(),
        WaveEffect::Cos => angle.cos(),
        WaveEffect::SinCos => lerp(angle.sin(), angle.cos(), periodic_factor),
        WaveEffect::Tan => clamped_tan(angle),
        WaveEffect::TanSin => lerp(clamped_tan(angle), angle.sin(), periodic_factor),
        WaveEffect::TanCos => lerp(clamped_tan(angle), angle.cos(), periodic_factor),
        WaveEffect::Cot => cot(),
        WaveEffect::CotSin => lerp(cot(), angle.sin(), periodic_factor),
        WaveEffect::CotCos => lerp(cot(), angle.cos(), periodic_factor),
    };
    periodic_factor * value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_tan_is_finite_at_the_poles() {
        for k in -4..=4 {
            let pole = HALF_PI + k as f32 * PI;
            assert!(clamped_tan(pole).is_finite());
            assert!(clamped_tan(pole).abs() <= TAN_ARG_LIMIT.tan() + 1e-3);
        }
    }

    #[test]
    fn clamped_tan_matches_tan_away_from_poles() {
        for angle in [-1.0f32, -0.3, 0.0, 0.4, 1.2] {
            assert!((clamped_tan(angle) - angle.tan()).abs() < 1e-4);
        }
    }
}
