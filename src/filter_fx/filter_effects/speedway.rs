use crate::filter_fx::common_types::Amplitude;
use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::goom_rand::{NumberRange, RandomSource};
use crate::name_value::{NameValuePairs, get_pair, get_xy_pair};
use crate::point2d::Vec2dFlt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedwayMode {
    /// y amplitude pinned to +1 or -1.
    Mode0,
    /// y amplitude drawn independently of x.
    Mode1,
    /// y amplitude usually equal to x, tangent-coupled y output.
    Mode2,
}

pub const X_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(1.0, 8.0);
pub const MODE1_Y_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(-2.0, 2.0);
const PROB_MODE0_Y_POSITIVE: f32 = 0.5;
const PROB_MODE2_XY_EQUAL: f32 = 0.75;

const SQ_DIST_FACTOR: f32 = 0.01;
const PROB_FLIP_X_ADD: f32 = 0.5;
const PROB_RANDOM_X_ADD: f32 = 0.5;
const PROB_NEGATIVE_X_ADD: f32 = 0.5;
const NEGATIVE_X_ADD_RANGE: NumberRange<f32> = NumberRange::new(-1.9, -0.5);
const POSITIVE_X_ADD_RANGE: NumberRange<f32> = NumberRange::new(0.5, 1.9);
const X_WARP_MULTIPLIER: f32 = 0.1;
const AMPLITUDE_MULTIPLIER: f32 = 0.25;

/// Lane-shaped zoom. The mode is fixed for the effect's lifetime.
#[derive(Clone, Debug)]
pub struct Speedway {
    mode: SpeedwayMode,
    amplitude: Amplitude,
    x_add_sign: f32,
    mode1_x_add: f32,
}

impl Speedway {
    pub fn new(mode: SpeedwayMode, rand: &mut dyn RandomSource) -> Self {
        let mut speedway = Self {
            mode,
            amplitude: Amplitude::new(4.0, 1.0),
            x_add_sign: 1.0,
            mode1_x_add: -1.0,
        };
        speedway.set_random_params(rand);
        speedway
    }

    pub fn mode(&self) -> SpeedwayMode {
        self.mode
    }

    pub fn amplitude(&self) -> Amplitude {
        self.amplitude
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        let x_amp = rand.rand_in_range(X_AMPLITUDE_RANGE);
        let y_amp = match self.mode {
            SpeedwayMode::Mode0 => {
                if rand.probability_of(PROB_MODE0_Y_POSITIVE) {
                    1.0
                } else {
                    -1.0
                }
            }
            SpeedwayMode::Mode1 => rand.rand_in_range(MODE1_Y_AMPLITUDE_RANGE),
            SpeedwayMode::Mode2 => {
                if rand.probability_of(PROB_MODE2_XY_EQUAL) {
                    x_amp
                } else {
                    rand.rand_in_range(X_AMPLITUDE_RANGE)
                }
            }
        };
        self.amplitude = Amplitude::new(x_amp, y_amp);

        self.x_add_sign = if rand.probability_of(PROB_FLIP_X_ADD) { -1.0 } else { 1.0 };
        self.mode1_x_add = if rand.probability_of(PROB_RANDOM_X_ADD) {
            if rand.probability_of(PROB_NEGATIVE_X_ADD) {
                rand.rand_in_range(NEGATIVE_X_ADD_RANGE)
            } else {
                rand.rand_in_range(POSITIVE_X_ADD_RANGE)
            }
        } else {
            -self.x_add_sign
        };
    }

    pub fn speed_coefficients(
        &self,
        coords: NormalizedCoords,
        sq_dist_from_zero: f32,
        base: Vec2dFlt,
    ) -> Vec2dFlt {
        match self.mode {
            SpeedwayMode::Mode0 => {
                let x = self.lane_x_coeff(coords, sq_dist_from_zero, base);
                Vec2dFlt::new(x, self.amplitude.y * x)
            }
            SpeedwayMode::Mode1 => {
                let x_add = self.mode1_x_add;
                let x_diff = coords.x() - x_add;
                let sign = if x_diff < 0.0 { -1.0 } else { 1.0 };
                let x_warp = X_WARP_MULTIPLIER * (x_add + sign * x_diff * x_diff / x_add);
                let amplitude = AMPLITUDE_MULTIPLIER * (1.0 - sq_dist_from_zero);
                let x = amplitude * base.x * self.amplitude.x * x_warp;
                Vec2dFlt::new(x, amplitude * self.amplitude.y * x)
            }
            SpeedwayMode::Mode2 => {
                let x = self.lane_x_coeff(coords, sq_dist_from_zero, base);
                let y = (SQ_DIST_FACTOR * sq_dist_from_zero).tan() * self.amplitude.y * x;
                Vec2dFlt::new(x, y)
            }
        }
    }

    fn lane_x_coeff(&self, coords: NormalizedCoords, sq_dist_from_zero: f32, base: Vec2dFlt) -> f32 {
        let x_add = self.x_add_sign * SQ_DIST_FACTOR * sq_dist_from_zero;
        base.x * (self.amplitude.x * (coords.y() + x_add))
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        vec![
            get_pair(group, "mode", format_args!("{:?}", self.mode)),
            get_xy_pair(group, "amplitude", self.amplitude.x, self.amplitude.y),
        ]
    }
}
