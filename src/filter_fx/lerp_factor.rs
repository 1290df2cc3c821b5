//! How far the transform buffers have moved from the old zoom field to the new one.

pub const MAX_TRAN_LERP_EXP: u32 = 16;
pub const MAX_TRAN_LERP_VALUE: u32 = 1 << MAX_TRAN_LERP_EXP;
pub const DEFAULT_TRAN_LERP_INCREMENT: f32 = 0.002;
pub const DEFAULT_SWITCH_MULT: f32 = 1.0;

/// A `[0, 1]` lerp factor advanced once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformBufferLerpData {
    increment: f32,
    switch_mult: f32,
    lerp_factor: f32,
}

impl Default for TransformBufferLerpData {
    fn default() -> Self {
        Self::new(DEFAULT_TRAN_LERP_INCREMENT)
    }
}

impl TransformBufferLerpData {
    pub fn new(increment: f32) -> Self {
        Self {
            increment,
            switch_mult: DEFAULT_SWITCH_MULT,
            lerp_factor: 0.0,
        }
    }

    pub fn increment(&self) -> f32 {
        self.increment
    }

    pub fn set_increment(&mut self, increment: f32) {
        self.increment = increment;
    }

    pub fn switch_mult(&self) -> f32 {
        self.switch_mult
    }

    /// Values below one pull the factor towards the end on every update.
    pub fn set_switch_mult(&mut self, switch_mult: f32) {
        self.switch_mult = switch_mult.clamp(0.0, 1.0);
    }

    pub fn lerp_factor(&self) -> f32 {
        self.lerp_factor
    }

    pub fn is_at_end(&self) -> bool {
        self.lerp_factor >= 1.0
    }

    pub fn reset(&mut self) {
        self.lerp_factor = 0.0;
        self.switch_mult = DEFAULT_SWITCH_MULT;
    }

    pub fn set_lerp_to_end(&mut self) {
        self.lerp_factor = 1.0;
    }

    pub fn update(&mut self) {
        let mut t = (self.lerp_factor + self.increment).clamp(0.0, 1.0);
        if self.switch_mult < DEFAULT_SWITCH_MULT {
            t = 1.0 + self.switch_mult * (t - 1.0);
        }
        self.lerp_factor = t;
    }

    /// The factor in transform-buffer fixed point, `[0, MAX_TRAN_LERP_VALUE]`.
    pub fn tran_lerp_value(&self) -> u32 {
        (self.lerp_factor * MAX_TRAN_LERP_VALUE as f32).round() as u32
    }
}
