use crate::goom_rand::{NumberRange, RandomSource, Weights};
use crate::name_value::{NameValuePairs, get_pair};
use crate::point2d::{Vec2dFlt, lerp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XYLerpMode {
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

pub const T_FREQ_RANGE: NumberRange<f32> = NumberRange::new(1.0, 10.0);
pub const MODE3_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.95, 1.05);

const MODE2_OFFSET: f32 = 5.5;
const MODE2_FREQ: f32 = 2.0;
const PROB_FLIP_Y: f32 = 0.5;
const PROB_FLIP_XY: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XYLerpParams {
    pub mode: XYLerpMode,
    pub t_freq: f32,
    /// Drawn once per roll; only Mode3 reads it.
    pub mode3_factor: f32,
    pub flip_y: bool,
    pub flip_xy: bool,
}

impl Default for XYLerpParams {
    fn default() -> Self {
        Self {
            mode: XYLerpMode::Mode0,
            t_freq: 1.0,
            mode3_factor: 1.0,
            flip_y: false,
            flip_xy: false,
        }
    }
}

/// Blends the x and y velocity components into each other.
#[derive(Clone, Debug)]
pub struct XYLerpEffect {
    mode_weights: Weights<XYLerpMode>,
    params: XYLerpParams,
}

impl Default for XYLerpEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl XYLerpEffect {
    pub fn new() -> Self {
        Self {
            mode_weights: Weights::new(&[
                (XYLerpMode::Mode0, 10.0),
                (XYLerpMode::Mode1, 10.0),
                (XYLerpMode::Mode2, 10.0),
                (XYLerpMode::Mode3, 10_000_000_000.0),
            ]),
            params: XYLerpParams::default(),
        }
    }

    pub fn params(&self) -> &XYLerpParams {
        &self.params
    }

    pub fn set_params(&mut self, params: XYLerpParams) {
        self.params = params;
    }

    pub fn mode_weights(&self) -> &Weights<XYLerpMode> {
        &self.mode_weights
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        self.params = XYLerpParams {
            mode: self.mode_weights.random_weighted(rand),
            t_freq: rand.rand_in_range(T_FREQ_RANGE),
            mode3_factor: rand.rand_in_range(MODE3_FACTOR_RANGE),
            flip_y: rand.probability_of(PROB_FLIP_Y),
            flip_xy: rand.probability_of(PROB_FLIP_XY),
        };
    }

    pub fn velocity(&self, sq_dist_from_zero: f32, velocity: Vec2dFlt) -> Vec2dFlt {
        let t = self.t(sq_dist_from_zero);
        let x = lerp(velocity.x, velocity.y, t);
        let mut y = lerp(velocity.y, velocity.x, t);
        if self.params.flip_y {
            y = -y;
        }
        if self.params.flip_xy {
            return Vec2dFlt::new(y, x);
        }
        Vec2dFlt::new(x, y)
    }

    fn t(&self, sq_dist_from_zero: f32) -> f32 {
        let p = &self.params;
        match p.mode {
            XYLerpMode::Mode0 => 0.0,
            XYLerpMode::Mode1 => 1.0,
            XYLerpMode::Mode2 => (p.t_freq * sq_dist_from_zero
                + MODE2_OFFSET
                + (MODE2_FREQ * sq_dist_from_zero).sin())
            .cos(),
            XYLerpMode::Mode3 => (p.t_freq * sq_dist_from_zero * p.mode3_factor).cos(),
        }
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        let p = &self.params;
        vec![
            get_pair(group, "xy lerp mode", format_args!("{:?}", p.mode)),
            get_pair(group, "xy lerp t freq", p.t_freq),
            get_pair(group, "xy lerp flips", format_args!("y={} xy={}", p.flip_y, p.flip_xy)),
        ]
    }
}
