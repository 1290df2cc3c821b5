use crate::filter_fx::common_types::Amplitude;
use crate::filter_fx::viewport::{RandomViewport, Viewport, ViewportBounds};
use crate::goom_rand::{NumberRange, RandomSource};
use crate::name_value::{NameValuePairs, get_xy_pair};
use crate::point2d::Vec2dFlt;

pub const X_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.05, 0.2);
pub const Y_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.5, 1.0);

/// Non-radial scaling where y always follows x.
#[derive(Clone, Debug)]
pub struct Scrunch {
    random_viewport: RandomViewport,
    viewport: Viewport,
    amplitude: Amplitude,
}

impl Scrunch {
    pub fn new(rand: &mut dyn RandomSource) -> Self {
        let mut scrunch = Self {
            random_viewport: RandomViewport::new(ViewportBounds::default()),
            viewport: Viewport::whole(),
            amplitude: Amplitude::new(0.1, 0.64),
        };
        scrunch.set_random_params(rand);
        scrunch
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        self.viewport = self.random_viewport.random_viewport(rand);
        self.amplitude = Amplitude::new(
            rand.rand_in_range(X_AMPLITUDE_RANGE),
            rand.rand_in_range(Y_AMPLITUDE_RANGE),
        );
    }

    pub fn amplitude(&self) -> Amplitude {
        self.amplitude
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn speed_coefficients(&self, base: Vec2dFlt, sq_dist_from_zero: f32) -> Vec2dFlt {
        let x = base.x + self.amplitude.x * sq_dist_from_zero;
        Vec2dFlt::new(x, self.amplitude.y * x)
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        vec![get_xy_pair(group, "amplitude", self.amplitude.x, self.amplitude.y)]
    }
}
