//! Per-pixel zoom point: adjustment effect, multiplier ripple, then after-effects.

use crate::filter_fx::after_effects::ZoomVectorAfterEffects;
use crate::filter_fx::common_types::CoordsAndVelocity;
use crate::filter_fx::image_displacement::ImageDisplacementList;
use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::filter_fx::settings::{FilterEffectsSettings, MultiplierEffectSettings};
use crate::goom_rand::RandomSource;
use crate::name_value::{NameValuePairs, get_pair, get_xy_pair, move_name_value_pairs};
use crate::point2d::{Point2dInt, Vec2dFlt, lerp};

const PARAM_GROUP: &str = "ZoomVector";

/// Scales `1 + relative_speed` into the base speed coefficient.
pub const BASE_SPEED_COEFF_FACTOR: f32 = 1.0 / 50.0;

#[derive(Clone, Debug)]
pub struct FilterZoomVector {
    settings: FilterEffectsSettings,
    base_speed_coeffs: Vec2dFlt,
    after_effects: ZoomVectorAfterEffects,
}

impl FilterZoomVector {
    pub fn new(screen_width: u32, images: ImageDisplacementList) -> Self {
        let settings = FilterEffectsSettings::new(Point2dInt::new(0, 0));
        let base_speed_coeffs = base_speed_coeffs(&settings);
        Self {
            settings,
            base_speed_coeffs,
            after_effects: ZoomVectorAfterEffects::new(screen_width, images),
        }
    }

    pub fn settings(&self) -> &FilterEffectsSettings {
        &self.settings
    }

    pub fn after_effects(&self) -> &ZoomVectorAfterEffects {
        &self.after_effects
    }

    pub fn base_speed_coeffs(&self) -> Vec2dFlt {
        self.base_speed_coeffs
    }

    /// Takes a new settings epoch and rolls the enabled after-effects for it.
    pub fn set_filter_effects_settings(
        &mut self,
        settings: &FilterEffectsSettings,
        rand: &mut dyn RandomSource,
    ) {
        self.settings = settings.clone();
        self.base_speed_coeffs = base_speed_coeffs(settings);
        self.after_effects
            .set_after_effects_settings(&settings.after_effects, settings.zoom_midpoint, rand);
    }

    pub fn zoom_point(&self, coords: NormalizedCoords) -> NormalizedCoords {
        let zoom_adjustment = self.settings.zoom_adjustment_effect.zoom_adjustment(
            coords,
            self.base_speed_coeffs,
            self.settings.max_zoom_adjustment,
        );
        let multiplier = multiplier_effect(&self.settings.multiplier_effect, coords, zoom_adjustment);
        let zoom_velocity = -(multiplier * zoom_adjustment);
        let filter_point = coords + zoom_velocity;

        let after = self.after_effects.velocity(
            CoordsAndVelocity {
                coords,
                velocity: (coords - filter_point).to_vec(),
            },
            coords.sq_distance_from_zero(),
        );

        filter_point - after * self.settings.after_effects_velocity_multiplier
    }

    pub fn name_value_params(&self) -> NameValuePairs {
        let s = &self.settings;
        let mut pairs = vec![
            get_pair(PARAM_GROUP, "filter mode", s.filter_mode),
            get_pair(PARAM_GROUP, "vitesse", s.vitesse.vitesse()),
            get_pair(PARAM_GROUP, "reverse", s.vitesse.is_reverse()),
            get_xy_pair(PARAM_GROUP, "base speed", self.base_speed_coeffs.x, self.base_speed_coeffs.y),
            get_pair(PARAM_GROUP, "max zoom adjustment", format_args!("{:.3}", s.max_zoom_adjustment)),
            get_pair(
                PARAM_GROUP,
                "after effects multiplier",
                format_args!("{:.3}", s.after_effects_velocity_multiplier),
            ),
            get_pair(
                PARAM_GROUP,
                "zoom midpoint",
                format_args!("({}, {})", s.zoom_midpoint.x, s.zoom_midpoint.y),
            ),
        ];
        let m = &s.multiplier_effect;
        if m.is_active {
            pairs.push(get_xy_pair(PARAM_GROUP, "multiplier freq", m.x_frequency, m.y_frequency));
            pairs.push(get_xy_pair(PARAM_GROUP, "multiplier amp", m.x_amplitude, m.y_amplitude));
        } else {
            pairs.push(get_pair(PARAM_GROUP, "multiplier", "off"));
        }
        move_name_value_pairs(s.zoom_adjustment_effect.name_value_params(), &mut pairs);
        pairs
    }

    pub fn after_effects_name_value_params(&self) -> NameValuePairs {
        self.after_effects.name_value_params()
    }
}

fn base_speed_coeffs(settings: &FilterEffectsSettings) -> Vec2dFlt {
    let coeff = BASE_SPEED_COEFF_FACTOR
        * (1.0 + settings.vitesse.relative_speed())
        * settings.base_zoom_adjustment_multiplier;
    Vec2dFlt::new(coeff, coeff)
}

/// `(1, 1)` when inactive.
pub fn multiplier_effect(
    settings: &MultiplierEffectSettings,
    coords: NormalizedCoords,
    zoom_adjustment: Vec2dFlt,
) -> Vec2dFlt {
    if !settings.is_active {
        return Vec2dFlt::new(1.0, 1.0);
    }
    let t = settings.lerp_to_coords_t;
    let x_arg = settings.x_frequency * lerp(zoom_adjustment.x, coords.x(), t);
    let y_arg = settings.y_frequency * lerp(zoom_adjustment.y, coords.y(), t);
    Vec2dFlt::new(
        1.0 - settings.x_amplitude * x_arg.sin(),
        1.0 - settings.y_amplitude * y_arg.cos(),
    )
}
