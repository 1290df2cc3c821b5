//! Optional velocity perturbations applied on top of the zoom-adjustment effect.

pub mod after_effects_states;
pub mod hypercos;
pub mod image_velocity;
pub mod noise;
pub mod planes;
pub mod rotation;
pub mod tan_effect;
pub mod xy_lerp;

use crate::filter_fx::common_types::CoordsAndVelocity;
use crate::filter_fx::image_displacement::ImageDisplacementList;
use crate::goom_rand::RandomSource;
use crate::name_value::{NameValuePairs, get_pair, move_name_value_pairs};
use crate::point2d::{Point2dInt, Vec2dFlt};
use std::ops::{Index, IndexMut};

use hypercos::{Hypercos, HypercosOverlayMode};
use image_velocity::ImageVelocity;
use noise::Noise;
use planes::Planes;
use rotation::{Rotation, RotationAdjustmentType, RotationAdjustments};
use tan_effect::TanEffect;
use xy_lerp::XYLerpEffect;

const PARAM_GROUP: &str = "AfterEffects";

/// Declaration order is evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AfterEffectsType {
    ImageVelocity,
    Rotation,
    Tan,
    Noise,
    Hypercos,
    Planes,
    XYLerp,
}

impl AfterEffectsType {
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::ImageVelocity,
        Self::Rotation,
        Self::Tan,
        Self::Noise,
        Self::Hypercos,
        Self::Planes,
        Self::XYLerp,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// One value per after-effect, indexed by [`AfterEffectsType`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AfterEffectsMap<T> {
    values: [T; AfterEffectsType::COUNT],
}

impl<T> AfterEffectsMap<T> {
    pub fn from_fn(mut f: impl FnMut(AfterEffectsType) -> T) -> Self {
        Self {
            values: AfterEffectsType::ALL.map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AfterEffectsType, &T)> {
        AfterEffectsType::ALL.into_iter().zip(self.values.iter())
    }
}

impl<T: Copy> AfterEffectsMap<T> {
    pub fn filled(value: T) -> Self {
        Self {
            values: [value; AfterEffectsType::COUNT],
        }
    }
}

impl<T: Default> Default for AfterEffectsMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<AfterEffectsType> for AfterEffectsMap<T> {
    type Output = T;
    fn index(&self, effect: AfterEffectsType) -> &T {
        &self.values[effect.index()]
    }
}

impl<T> IndexMut<AfterEffectsType> for AfterEffectsMap<T> {
    fn index_mut(&mut self, effect: AfterEffectsType) -> &mut T {
        &mut self.values[effect.index()]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AfterEffectsSettings {
    pub hypercos_overlay_mode: HypercosOverlayMode,
    pub is_active: AfterEffectsMap<bool>,
    pub rotation_adjustments: RotationAdjustments,
}

impl AfterEffectsSettings {
    pub fn is_active(&self, effect: AfterEffectsType) -> bool {
        self.is_active[effect]
    }
}

/// The after-effect instances, rolled together whenever new settings arrive.
#[derive(Clone, Debug)]
pub struct ZoomVectorAfterEffects {
    screen_width: u32,
    settings: AfterEffectsSettings,
    hypercos: Hypercos,
    image_velocity: ImageVelocity,
    images: ImageDisplacementList,
    noise: Noise,
    planes: Planes,
    rotation: Rotation,
    tan: TanEffect,
    xy_lerp: XYLerpEffect,
}

impl ZoomVectorAfterEffects {
    pub fn new(screen_width: u32, images: ImageDisplacementList) -> Self {
        Self {
            screen_width,
            settings: AfterEffectsSettings::default(),
            hypercos: Hypercos::new(),
            image_velocity: ImageVelocity::new(),
            images,
            noise: Noise::new(),
            planes: Planes::new(),
            rotation: Rotation::new(),
            tan: TanEffect::new(),
            xy_lerp: XYLerpEffect::new(),
        }
    }

    pub fn settings(&self) -> &AfterEffectsSettings {
        &self.settings
    }

    pub fn hypercos(&self) -> &Hypercos {
        &self.hypercos
    }

    pub fn planes(&self) -> &Planes {
        &self.planes
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn tan(&self) -> &TanEffect {
        &self.tan
    }

    pub fn xy_lerp(&self) -> &XYLerpEffect {
        &self.xy_lerp
    }

    /// Rolls fresh parameters for every active after-effect.
    pub fn set_after_effects_settings(
        &mut self,
        settings: &AfterEffectsSettings,
        zoom_midpoint: Point2dInt,
        rand: &mut dyn RandomSource,
    ) {
        self.settings = *settings;

        self.hypercos.set_random_params(settings.hypercos_overlay_mode, rand);
        if settings.is_active(AfterEffectsType::ImageVelocity) {
            self.image_velocity.set_random_params(rand, &mut self.images);
        }
        if settings.is_active(AfterEffectsType::Noise) {
            self.noise.set_random_params(rand);
        }
        if settings.is_active(AfterEffectsType::Planes) {
            self.planes.set_random_params(rand, zoom_midpoint, self.screen_width);
        }
        if settings.is_active(AfterEffectsType::Rotation) {
            self.set_random_rotation_params(rand);
        }
        if settings.is_active(AfterEffectsType::Tan) {
            self.tan.set_random_params(rand);
        }
        if settings.is_active(AfterEffectsType::XYLerp) {
            self.xy_lerp.set_random_params(rand);
        }
    }

    fn set_random_rotation_params(&mut self, rand: &mut dyn RandomSource) {
        let adjustments = self.settings.rotation_adjustments;
        match adjustments.adjustment_type() {
            RotationAdjustmentType::None => self.rotation.set_random_params(rand),
            RotationAdjustmentType::InsteadOfRandom => {
                self.rotation.apply_adjustments(&adjustments);
            }
            RotationAdjustmentType::AfterRandom => {
                self.rotation.set_random_params(rand);
                self.rotation.apply_adjustments(&adjustments);
            }
        }
    }

    /// Sum of the enabled contributions. Every effect sees the same input velocity.
    pub fn velocity(&self, input: CoordsAndVelocity, sq_dist_from_zero: f32) -> Vec2dFlt {
        let mut total = Vec2dFlt::ZERO;
        for effect in AfterEffectsType::ALL {
            if self.settings.is_active(effect) {
                total = total + self.contribution(effect, input, sq_dist_from_zero);
            }
        }
        total
    }

    fn contribution(
        &self,
        effect: AfterEffectsType,
        input: CoordsAndVelocity,
        sq_dist_from_zero: f32,
    ) -> Vec2dFlt {
        match effect {
            AfterEffectsType::ImageVelocity => self.image_velocity.velocity(input.coords),
            AfterEffectsType::Rotation => self.rotation.velocity(input.velocity),
            AfterEffectsType::Tan => self.tan.velocity(sq_dist_from_zero, input.velocity),
            AfterEffectsType::Noise => self.noise.velocity(),
            AfterEffectsType::Hypercos => {
                if self.settings.hypercos_overlay_mode == HypercosOverlayMode::None {
                    Vec2dFlt::ZERO
                } else {
                    self.hypercos.velocity(input.coords)
                }
            }
            AfterEffectsType::Planes => self.planes.velocity(input.coords),
            AfterEffectsType::XYLerp => self.xy_lerp.velocity(sq_dist_from_zero, input.velocity),
        }
    }

    pub fn name_value_params(&self) -> NameValuePairs {
        let mut pairs = NameValuePairs::new();
        for effect in AfterEffectsType::ALL {
            let active = self.settings.is_active(effect);
            pairs.push(get_pair(PARAM_GROUP, &format!("{effect:?}"), active));
            if !active {
                continue;
            }
            let params = match effect {
                AfterEffectsType::ImageVelocity => self.image_velocity.name_value_params(PARAM_GROUP),
                AfterEffectsType::Rotation => self.rotation.name_value_params(PARAM_GROUP),
                AfterEffectsType::Tan => self.tan.name_value_params(PARAM_GROUP),
                AfterEffectsType::Noise => self.noise.name_value_params(PARAM_GROUP),
                AfterEffectsType::Hypercos => self.hypercos.name_value_params(PARAM_GROUP),
                AfterEffectsType::Planes => self.planes.name_value_params(PARAM_GROUP),
                AfterEffectsType::XYLerp => self.xy_lerp.name_value_params(PARAM_GROUP),
            };
            move_name_value_pairs(params, &mut pairs);
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_indexes_by_effect() {
        let mut map = AfterEffectsMap::filled(0u32);
        map[AfterEffectsType::Planes] = 3;
        assert_eq!(map[AfterEffectsType::Planes], 3);
        assert_eq!(map.iter().filter(|(_, v)| **v == 0).count(), 6);
    }

    #[test]
    fn nothing_active_means_no_velocity() {
        let after_effects = ZoomVectorAfterEffects::new(64, ImageDisplacementList::default());
        let input = CoordsAndVelocity {
            coords: crate::filter_fx::normalized_coords::NormalizedCoords::new(0.5, 0.5),
            velocity: Vec2dFlt::new(0.1, 0.1),
        };
        assert_eq!(after_effects.velocity(input, 0.5), Vec2dFlt::ZERO);
    }
}
