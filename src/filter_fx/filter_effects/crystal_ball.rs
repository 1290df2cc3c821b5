use crate::filter_fx::viewport::{RandomViewport, Viewport, ViewportBounds};
use crate::goom_rand::{NumberRange, RandomSource, random_xy_pair};
use crate::name_value::{NameValuePairs, get_pair, get_xy_pair};
use crate::point2d::Vec2dFlt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrystalBallMode {
    Mode0,
    Mode1,
}

struct ModeRanges {
    amplitude: NumberRange<f32>,
    sq_dist_mult: NumberRange<f32>,
    sq_dist_offset: NumberRange<f32>,
}

const MODE0_RANGES: ModeRanges = ModeRanges {
    amplitude: NumberRange::new(0.001, 0.501),
    sq_dist_mult: NumberRange::new(0.001, 0.051),
    sq_dist_offset: NumberRange::new(0.001, 0.11),
};
const MODE1_RANGES: ModeRanges = ModeRanges {
    amplitude: NumberRange::new(0.500, 1.001),
    sq_dist_mult: NumberRange::new(0.050, 0.101),
    sq_dist_offset: NumberRange::new(0.100, 1.01),
};

const PROB_XY_AMPLITUDES_EQUAL: f32 = 1.0;
const PROB_XY_SQ_DIST_MULT_EQUAL: f32 = 1.0;
const PROB_XY_SQ_DIST_OFFSET_EQUAL: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrystalBallParams {
    pub x_amplitude: f32,
    pub y_amplitude: f32,
    pub x_sq_dist_mult: f32,
    pub y_sq_dist_mult: f32,
    pub x_sq_dist_offset: f32,
    pub y_sq_dist_offset: f32,
}

impl Default for CrystalBallParams {
    fn default() -> Self {
        Self {
            x_amplitude: 0.1,
            y_amplitude: 0.1,
            x_sq_dist_mult: 0.025,
            y_sq_dist_mult: 0.025,
            x_sq_dist_offset: 0.05,
            y_sq_dist_offset: 0.05,
        }
    }
}

/// Lens-like bulge: the coefficient drops off linearly in the squared distance.
#[derive(Clone, Debug)]
pub struct CrystalBall {
    mode: CrystalBallMode,
    random_viewport: RandomViewport,
    viewport: Viewport,
    params: CrystalBallParams,
}

impl CrystalBall {
    pub fn new(mode: CrystalBallMode, rand: &mut dyn RandomSource) -> Self {
        let mut crystal_ball = Self {
            mode,
            random_viewport: RandomViewport::new(ViewportBounds::default()),
            viewport: Viewport::whole(),
            params: CrystalBallParams::default(),
        };
        crystal_ball.set_random_params(rand);
        crystal_ball
    }

    pub fn mode(&self) -> CrystalBallMode {
        self.mode
    }

    pub fn params(&self) -> &CrystalBallParams {
        &self.params
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        let ranges = match self.mode {
            CrystalBallMode::Mode0 => &MODE0_RANGES,
            CrystalBallMode::Mode1 => &MODE1_RANGES,
        };
        self.viewport = self.random_viewport.random_viewport(rand);

        let (x_amplitude, y_amplitude) =
            random_xy_pair(rand, ranges.amplitude, PROB_XY_AMPLITUDES_EQUAL);
        let (x_sq_dist_mult, y_sq_dist_mult) =
            random_xy_pair(rand, ranges.sq_dist_mult, PROB_XY_SQ_DIST_MULT_EQUAL);
        let (x_sq_dist_offset, y_sq_dist_offset) =
            random_xy_pair(rand, ranges.sq_dist_offset, PROB_XY_SQ_DIST_OFFSET_EQUAL);

        self.params = CrystalBallParams {
            x_amplitude,
            y_amplitude,
            x_sq_dist_mult,
            y_sq_dist_mult,
            x_sq_dist_offset,
            y_sq_dist_offset,
        };
    }

    pub fn speed_coefficients(&self, base: Vec2dFlt, sq_dist_from_zero: f32) -> Vec2dFlt {
        let p = &self.params;
        Vec2dFlt::new(
            speed_coefficient(base.x, sq_dist_from_zero, p.x_amplitude, p.x_sq_dist_mult, p.x_sq_dist_offset),
            speed_coefficient(base.y, sq_dist_from_zero, p.y_amplitude, p.y_sq_dist_mult, p.y_sq_dist_offset),
        )
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        let p = &self.params;
        vec![
            get_pair(group, "mode", format_args!("{:?}", self.mode)),
            get_xy_pair(group, "amplitude", p.x_amplitude, p.y_amplitude),
            get_xy_pair(group, "sq dist mult", p.x_sq_dist_mult, p.y_sq_dist_mult),
            get_xy_pair(group, "sq dist offset", p.x_sq_dist_offset, p.y_sq_dist_offset),
        ]
    }
}

fn speed_coefficient(base: f32, sq_dist: f32, amplitude: f32, sq_dist_mult: f32, sq_dist_offset: f32) -> f32 {
    base - amplitude * (sq_dist_mult * sq_dist - sq_dist_offset)
}
