use crate::filter_fx::common_types::Amplitude;
use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::goom_rand::{NumberRange, RandomSource, Weights};
use crate::name_value::{NameValuePairs, get_pair, get_xy_pair};
use crate::point2d::{Point2dInt, Vec2dFlt};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneEffectEvent {
    Zero,
    Small,
    Medium,
    Large,
    VeryLarge,
    PosHorizontalNegVerticalVeryLarge,
    PosVerticalNegHorizontalVeryLarge,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaneSwirlType {
    #[default]
    None,
    SinCurlSwirl,
    CosCurlSwirl,
    SinCosCurlSwirl,
    CosSinCurlSwirl,
    SinOfCosSwirl,
    CosOfSinSwirl,
}

const SWIRL_TYPES: [PlaneSwirlType; 6] = [
    PlaneSwirlType::SinCurlSwirl,
    PlaneSwirlType::CosCurlSwirl,
    PlaneSwirlType::SinCosCurlSwirl,
    PlaneSwirlType::CosSinCurlSwirl,
    PlaneSwirlType::SinOfCosSwirl,
    PlaneSwirlType::CosOfSinSwirl,
];

// Integer ranges are [min, max).
const SMALL_EFFECTS_RANGE: (i32, i32) = (-2, 3);
const MEDIUM_EFFECTS_RANGE: (i32, i32) = (-5, 6);
const LARGE_EFFECTS_RANGE: (i32, i32) = (-7, 8);
const VERY_LARGE_EFFECTS_RANGE: (i32, i32) = (-9, 10);
const VERY_LARGE_POS_EFFECTS_RANGE: (i32, i32) = (5, 13);

const PROB_ZERO_HORIZONTAL_FOR_VERY_LARGE_RANGE: f32 = 0.2;
const PROB_ZERO_VERTICAL_FOR_LARGE_RANGE: f32 = 0.2;
const PROB_OPPOSITES_FOR_SMALL_EFFECTS: f32 = 0.1;
const PROB_OPPOSITES_FOR_MEDIUM_EFFECTS: f32 = 0.9;

pub const HORIZONTAL_EFFECTS_MULTIPLIER_RANGE: NumberRange<f32> = NumberRange::new(0.0015, 0.0035);
pub const HORIZONTAL_EFFECTS_SPIRALLING_MULTIPLIER_RANGE: NumberRange<f32> =
    NumberRange::new(0.0015, 0.0351);
pub const VERTICAL_EFFECTS_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.0015, 0.0035);
pub const VERTICAL_EFFECTS_SPIRALLING_AMPLITUDE_RANGE: NumberRange<f32> =
    NumberRange::new(0.0015, 0.0351);

const HORIZONTAL_SWIRL_FREQ_RANGE: NumberRange<f32> = NumberRange::new(0.1, 5.01);
const HORIZONTAL_SWIRL_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.1, 5.01);
const VERTICAL_SWIRL_FREQ_RANGE: NumberRange<f32> = NumberRange::new(0.1, 30.01);
const VERTICAL_SWIRL_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.1, 30.01);

const PROB_PLANE_AMPLITUDES_EQUAL: f32 = 0.75;
const PROB_ZERO_HORIZONTAL_PLANE_EFFECT: f32 = 0.50;
const PROB_MUCH_SPIRALLING: f32 = 0.20;
const PROB_NO_SWIRL: f32 = 0.95;
const PROB_SWIRL_AMPLITUDES_EQUAL: f32 = 0.70;
const PROB_SWIRL_FREQ_EQUAL: f32 = 0.70;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaneEffects {
    pub horizontal_active: bool,
    pub vertical_active: bool,
    pub amplitude: Amplitude,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneSwirlEffects {
    pub swirl_type: PlaneSwirlType,
    pub frequency: Vec2dFlt,
    pub amplitude: Amplitude,
}

impl Default for PlaneSwirlEffects {
    fn default() -> Self {
        Self {
            swirl_type: PlaneSwirlType::None,
            frequency: Vec2dFlt::new(1.0, 1.0),
            amplitude: Amplitude::new(1.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanesParams {
    pub plane_effects: PlaneEffects,
    pub swirl_effects: PlaneSwirlEffects,
}

/// Shears the picture along horizontal and vertical planes, optionally swirled.
#[derive(Clone, Debug)]
pub struct Planes {
    event_weights: Weights<PlaneEffectEvent>,
    params: PlanesParams,
}

impl Default for Planes {
    fn default() -> Self {
        Self::new()
    }
}

impl Planes {
    pub fn new() -> Self {
        Self {
            event_weights: Weights::new(&[
                (PlaneEffectEvent::Zero, 2.0),
                (PlaneEffectEvent::Small, 1.0),
                (PlaneEffectEvent::Medium, 4.0),
                (PlaneEffectEvent::Large, 1.0),
                (PlaneEffectEvent::VeryLarge, 1.0),
                (PlaneEffectEvent::PosVerticalNegHorizontalVeryLarge, 1.0),
                (PlaneEffectEvent::PosHorizontalNegVerticalVeryLarge, 1.0),
            ]),
            params: PlanesParams::default(),
        }
    }

    pub fn params(&self) -> &PlanesParams {
        &self.params
    }

    pub fn set_params(&mut self, params: PlanesParams) {
        self.params = params;
    }

    pub fn is_horizontal_active(&self) -> bool {
        self.params.plane_effects.horizontal_active
    }

    pub fn is_vertical_active(&self) -> bool {
        self.params.plane_effects.vertical_active
    }

    /// A midpoint hugging the left or right edge kills the vertical plane and, half the
    /// time, the horizontal one as well.
    pub fn set_random_params(
        &mut self,
        rand: &mut dyn RandomSource,
        zoom_midpoint: Point2dInt,
        screen_width: u32,
    ) {
        let event = self.event_weights.random_weighted(rand);
        let much_spiralling = rand.probability_of(PROB_MUCH_SPIRALLING);

        let (mut int_x, mut int_y) = random_int_amplitudes(rand, event);
        if zoom_midpoint.x == 1 || zoom_midpoint.x == screen_width as i32 - 1 {
            int_y = 0;
            if rand.probability_of(PROB_ZERO_HORIZONTAL_PLANE_EFFECT) {
                int_x = 0;
            }
        }

        let multipliers = random_effect_multipliers(rand, much_spiralling);
        let plane_effects = PlaneEffects {
            horizontal_active: int_x != 0,
            vertical_active: int_y != 0,
            amplitude: Amplitude::new(multipliers.x * int_x as f32, multipliers.y * int_y as f32),
        };

        let swirl_effects = if much_spiralling || rand.probability_of(PROB_NO_SWIRL) {
            PlaneSwirlEffects {
                swirl_type: PlaneSwirlType::None,
                frequency: Vec2dFlt::ZERO,
                amplitude: Amplitude::new(0.0, 0.0),
            }
        } else {
            random_swirl_effects(rand)
        };

        self.params = PlanesParams {
            plane_effects,
            swirl_effects,
        };
    }

    /// Contribution only; zero on an inactive axis.
    pub fn velocity(&self, coords: NormalizedCoords) -> Vec2dFlt {
        let plane = &self.params.plane_effects;
        let swirl = &self.params.swirl_effects;
        let x = if plane.horizontal_active {
            let offset = swirl.amplitude.x * self.horizontal_swirl_factor(coords.y());
            plane.amplitude.x * (coords.y() + offset)
        } else {
            0.0
        };
        let y = if plane.vertical_active {
            let offset = swirl.amplitude.y * self.vertical_swirl_factor(coords.x());
            plane.amplitude.y * (coords.x() + offset)
        } else {
            0.0
        };
        Vec2dFlt::new(x, y)
    }

    fn horizontal_swirl_factor(&self, value: f32) -> f32 {
        let arg = self.params.swirl_effects.frequency.x * value;
        match self.params.swirl_effects.swirl_type {
            PlaneSwirlType::None => 0.0,
            PlaneSwirlType::SinCurlSwirl | PlaneSwirlType::SinCosCurlSwirl => arg.sin(),
            PlaneSwirlType::CosCurlSwirl | PlaneSwirlType::CosSinCurlSwirl => arg.cos(),
            PlaneSwirlType::SinOfCosSwirl => (PI * arg.cos()).sin(),
            PlaneSwirlType::CosOfSinSwirl => (PI * arg.sin()).cos(),
        }
    }

    fn vertical_swirl_factor(&self, value: f32) -> f32 {
        let arg = self.params.swirl_effects.frequency.y * value;
        match self.params.swirl_effects.swirl_type {
            PlaneSwirlType::None => 0.0,
            PlaneSwirlType::SinCurlSwirl | PlaneSwirlType::SinCosCurlSwirl => arg.cos(),
            PlaneSwirlType::CosCurlSwirl | PlaneSwirlType::CosSinCurlSwirl => arg.sin(),
            PlaneSwirlType::SinOfCosSwirl => (PI * arg.cos()).cos(),
            PlaneSwirlType::CosOfSinSwirl => (PI * arg.sin()).sin(),
        }
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        let p = &self.params;
        vec![
            get_xy_pair(
                group,
                "plane amplitudes",
                p.plane_effects.amplitude.x,
                p.plane_effects.amplitude.y,
            ),
            get_pair(group, "swirl type", format_args!("{:?}", p.swirl_effects.swirl_type)),
            get_xy_pair(
                group,
                "swirl frequencies",
                p.swirl_effects.frequency.x,
                p.swirl_effects.frequency.y,
            ),
            get_xy_pair(
                group,
                "swirl amplitudes",
                p.swirl_effects.amplitude.x,
                p.swirl_effects.amplitude.y,
            ),
        ]
    }
}

fn rand_i32_in(rand: &mut dyn RandomSource, (min, max): (i32, i32)) -> i32 {
    min + rand.rand_u32_in(0, (max - min) as u32) as i32
}

fn random_int_amplitudes(rand: &mut dyn RandomSource, event: PlaneEffectEvent) -> (i32, i32) {
    match event {
        PlaneEffectEvent::Zero => (0, 0),
        PlaneEffectEvent::Small => {
            let x = rand_i32_in(rand, SMALL_EFFECTS_RANGE);
            let y = if rand.probability_of(PROB_OPPOSITES_FOR_SMALL_EFFECTS) {
                -x + 1
            } else {
                rand_i32_in(rand, SMALL_EFFECTS_RANGE)
            };
            (x, y)
        }
        PlaneEffectEvent::Medium => {
            let x = rand_i32_in(rand, MEDIUM_EFFECTS_RANGE);
            let y = if rand.probability_of(PROB_OPPOSITES_FOR_MEDIUM_EFFECTS) {
                -x + 1
            } else {
                rand_i32_in(rand, MEDIUM_EFFECTS_RANGE)
            };
            (x, y)
        }
        PlaneEffectEvent::Large => {
            let x = rand_i32_in(rand, LARGE_EFFECTS_RANGE);
            let y = if rand.probability_of(PROB_ZERO_VERTICAL_FOR_LARGE_RANGE) {
                0
            } else {
                rand_i32_in(rand, LARGE_EFFECTS_RANGE)
            };
            (x, y)
        }
        PlaneEffectEvent::VeryLarge => {
            let x = if rand.probability_of(PROB_ZERO_HORIZONTAL_FOR_VERY_LARGE_RANGE) {
                0
            } else {
                rand_i32_in(rand, VERY_LARGE_EFFECTS_RANGE)
            };
            (x, rand_i32_in(rand, VERY_LARGE_EFFECTS_RANGE))
        }
        PlaneEffectEvent::PosVerticalNegHorizontalVeryLarge => {
            let y = rand_i32_in(rand, VERY_LARGE_POS_EFFECTS_RANGE);
            (-y + 1, y)
        }
        PlaneEffectEvent::PosHorizontalNegVerticalVeryLarge => {
            let x = rand_i32_in(rand, VERY_LARGE_POS_EFFECTS_RANGE);
            (x, -x + 1)
        }
    }
}

fn random_effect_multipliers(rand: &mut dyn RandomSource, much_spiralling: bool) -> Vec2dFlt {
    let x = if much_spiralling {
        rand.rand_in_range(HORIZONTAL_EFFECTS_SPIRALLING_MULTIPLIER_RANGE)
    } else {
        rand.rand_in_range(HORIZONTAL_EFFECTS_MULTIPLIER_RANGE)
    };
    let y = if rand.probability_of(PROB_PLANE_AMPLITUDES_EQUAL) {
        x
    } else if much_spiralling {
        rand.rand_in_range(VERTICAL_EFFECTS_SPIRALLING_AMPLITUDE_RANGE)
    } else {
        rand.rand_in_range(VERTICAL_EFFECTS_AMPLITUDE_RANGE)
    };
    Vec2dFlt::new(x, y)
}

fn random_swirl_effects(rand: &mut dyn RandomSource) -> PlaneSwirlEffects {
    let swirl_type = SWIRL_TYPES[rand.rand_u32_in(0, SWIRL_TYPES.len() as u32) as usize];

    let fx = rand.rand_in_range(HORIZONTAL_SWIRL_FREQ_RANGE);
    let fy = if rand.probability_of(PROB_SWIRL_FREQ_EQUAL) {
        fx
    } else {
        rand.rand_in_range(VERTICAL_SWIRL_FREQ_RANGE)
    };
    let ax = rand.rand_in_range(HORIZONTAL_SWIRL_AMPLITUDE_RANGE);
    let ay = if rand.probability_of(PROB_SWIRL_AMPLITUDES_EQUAL) {
        ax
    } else {
        rand.rand_in_range(VERTICAL_SWIRL_AMPLITUDE_RANGE)
    };

    PlaneSwirlEffects {
        swirl_type,
        frequency: Vec2dFlt::new(fx, fy),
        amplitude: Amplitude::new(ax, ay),
    }
}
