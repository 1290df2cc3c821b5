use crate::goom_rand::{NumberRange, RandomSource};
use crate::name_value::{NameValuePairs, get_pair};
use crate::point2d::Vec2dFlt;

pub const ROTATE_SPEED_RANGE: NumberRange<f32> = NumberRange::new(-0.5, 0.5);
const DEFAULT_ROTATE_SPEED: f32 = 0.0;
const DEFAULT_MULTIPLY_FACTOR: f32 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationAdjustmentType {
    /// No pending adjustment: the next roll is plain random.
    #[default]
    None,
    InsteadOfRandom,
    AfterRandom,
}

/// Pending changes to the rotation requested between filter-mode rolls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationAdjustments {
    adjustment_type: RotationAdjustmentType,
    multiply_factor: f32,
    toggle: bool,
}

impl Default for RotationAdjustments {
    fn default() -> Self {
        Self {
            adjustment_type: RotationAdjustmentType::None,
            multiply_factor: DEFAULT_MULTIPLY_FACTOR,
            toggle: false,
        }
    }
}

impl RotationAdjustments {
    pub fn adjustment_type(&self) -> RotationAdjustmentType {
        self.adjustment_type
    }

    pub fn multiply_factor(&self) -> f32 {
        self.multiply_factor
    }

    pub fn is_toggle(&self) -> bool {
        self.toggle
    }

    pub fn set_multiply_factor(&mut self, factor: f32, adjustment_type: RotationAdjustmentType) {
        self.multiply_factor = factor;
        self.adjustment_type = adjustment_type;
    }

    pub fn toggle(&mut self, adjustment_type: RotationAdjustmentType) {
        self.toggle = true;
        self.adjustment_type = adjustment_type;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Swirls the zoom velocity around the midpoint.
#[derive(Clone, Debug)]
pub struct Rotation {
    rotate_speed: f32,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new()
    }
}

impl Rotation {
    pub fn new() -> Self {
        Self {
            rotate_speed: DEFAULT_ROTATE_SPEED,
        }
    }

    pub fn rotate_speed(&self) -> f32 {
        self.rotate_speed
    }

    pub fn set_rotate_speed(&mut self, rotate_speed: f32) {
        self.rotate_speed = rotate_speed;
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        self.rotate_speed = rand.rand_in_range(ROTATE_SPEED_RANGE);
    }

    pub fn apply_adjustments(&mut self, adjustments: &RotationAdjustments) {
        self.rotate_speed *= adjustments.multiply_factor();
        if adjustments.is_toggle() {
            self.rotate_speed = -self.rotate_speed;
        }
    }

    pub fn velocity(&self, velocity: Vec2dFlt) -> Vec2dFlt {
        let rs = self.rotate_speed;
        if rs < 0.0 {
            return Vec2dFlt::new(-rs * (velocity.x - velocity.y), -rs * (velocity.x + velocity.y));
        }
        Vec2dFlt::new(rs * (velocity.y + velocity.x), rs * (velocity.y - velocity.x))
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        vec![get_pair(group, "rotate speed", self.rotate_speed)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_direction() {
        let mut rotation = Rotation::new();
        rotation.set_rotate_speed(0.25);
        let mut adjustments = RotationAdjustments::default();
        adjustments.set_multiply_factor(2.0, RotationAdjustmentType::InsteadOfRandom);
        adjustments.toggle(RotationAdjustmentType::InsteadOfRandom);
        rotation.apply_adjustments(&adjustments);
        assert_eq!(rotation.rotate_speed(), -0.5);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut adjustments = RotationAdjustments::default();
        adjustments.toggle(RotationAdjustmentType::AfterRandom);
        adjustments.reset();
        assert_eq!(adjustments, RotationAdjustments::default());
    }
}
