use crate::filter_fx::common_types::Amplitude;
use crate::filter_fx::viewport::{RandomViewport, SideBounds, Viewport, ViewportBounds};
use crate::goom_rand::{NumberRange, RandomSource, random_xy_pair};
use crate::name_value::{NameValuePairs, get_xy_pair};
use crate::point2d::Vec2dFlt;

pub const AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.5, 4.0);
const PROB_XY_AMPLITUDES_EQUAL: f32 = 0.98;
const PROB_NO_VIEWPORT: f32 = 0.5;

/// Radial zoom: the coefficient grows with the squared distance from the centre.
#[derive(Clone, Debug)]
pub struct Amulet {
    random_viewport: RandomViewport,
    viewport: Viewport,
    amplitude: Amplitude,
}

impl Amulet {
    pub fn new(rand: &mut dyn RandomSource) -> Self {
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

        let mut amulet = Self {
            random_viewport,
            viewport: Viewport::whole(),
            amplitude: Amplitude::new(1.0, 1.0),
        };
        amulet.set_random_params(rand);
        amulet
    }

    pub fn with_params(amplitude: Amplitude, viewport: Viewport) -> Self {
        Self {
            random_viewport: RandomViewport::new(ViewportBounds::default()),
            viewport,
            amplitude,
        }
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        self.viewport = self.random_viewport.random_viewport(rand);
        let (x, y) = random_xy_pair(rand, AMPLITUDE_RANGE, PROB_XY_AMPLITUDES_EQUAL);
        self.amplitude = Amplitude::new(x, y);
    }

    pub fn amplitude(&self) -> Amplitude {
        self.amplitude
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn speed_coefficients(&self, base: Vec2dFlt, sq_dist_from_zero: f32) -> Vec2dFlt {
        Vec2dFlt::new(
            base.x + self.amplitude.x * sq_dist_from_zero,
            base.y + self.amplitude.y * sq_dist_from_zero,
        )
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        vec![get_xy_pair(group, "amplitude", self.amplitude.x, self.amplitude.y)]
    }
}
