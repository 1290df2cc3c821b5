//! Filter modes and the settings snapshot pushed from the settings service to the zoom
//! vector.

use crate::filter_fx::after_effects::AfterEffectsSettings;
use crate::filter_fx::filter_effects::ZoomAdjustmentEffect;
use crate::filter_fx::lerp_factor::TransformBufferLerpData;
use crate::point2d::Point2dInt;
use clap::ValueEnum;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum ZoomFilterMode {
    Amulet,
    #[value(name = "crystal-ball0", alias = "cb0")]
    CrystalBall0,
    #[value(name = "crystal-ball1", alias = "cb1")]
    CrystalBall1,
    #[value(alias = "hyp0")]
    Hypercos0,
    #[value(alias = "hyp1")]
    Hypercos1,
    #[value(alias = "hyp2")]
    Hypercos2,
    #[value(alias = "hyp3")]
    Hypercos3,
    #[value(name = "image", alias = "image-displacement")]
    ImageDisplacement,
    Normal,
    Scrunch,
    Speedway0,
    Speedway1,
    Speedway2,
    #[value(name = "wave-sq-dist0")]
    WaveSqDistAngle0,
    #[value(name = "wave-sq-dist1")]
    WaveSqDistAngle1,
    #[value(name = "wave-atan0")]
    WaveAtanAngle0,
    #[value(name = "wave-atan1")]
    WaveAtanAngle1,
    #[value(name = "y-only", alias = "yonly")]
    YOnly,
}

impl ZoomFilterMode {
    pub const COUNT: usize = 18;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Amulet,
        Self::CrystalBall0,
        Self::CrystalBall1,
        Self::Hypercos0,
        Self::Hypercos1,
        Self::Hypercos2,
        Self::Hypercos3,
        Self::ImageDisplacement,
        Self::Normal,
        Self::Scrunch,
        Self::Speedway0,
        Self::Speedway1,
        Self::Speedway2,
        Self::WaveSqDistAngle0,
        Self::WaveSqDistAngle1,
        Self::WaveAtanAngle0,
        Self::WaveAtanAngle1,
        Self::YOnly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Amulet => "Amulet",
            Self::CrystalBall0 => "Crystal Ball Mode 0",
            Self::CrystalBall1 => "Crystal Ball Mode 1",
            Self::Hypercos0 => "Hypercos Mode 0",
            Self::Hypercos1 => "Hypercos Mode 1",
            Self::Hypercos2 => "Hypercos Mode 2",
            Self::Hypercos3 => "Hypercos Mode 3",
            Self::ImageDisplacement => "Image Displacement",
            Self::Normal => "Normal",
            Self::Scrunch => "Scrunch",
            Self::Speedway0 => "Speedway Mode 0",
            Self::Speedway1 => "Speedway Mode 1",
            Self::Speedway2 => "Speedway Mode 2",
            Self::WaveSqDistAngle0 => "Wave Sq Dist Mode 0",
            Self::WaveSqDistAngle1 => "Wave Sq Dist Mode 1",
            Self::WaveAtanAngle0 => "Wave Atan Mode 0",
            Self::WaveAtanAngle1 => "Wave Atan Mode 1",
            Self::YOnly => "Y Only",
        }
    }

    pub fn is_crystal_ball(self) -> bool {
        matches!(self, Self::CrystalBall0 | Self::CrystalBall1)
    }

    pub fn is_hypercos(self) -> bool {
        matches!(
            self,
            Self::Hypercos0 | Self::Hypercos1 | Self::Hypercos2 | Self::Hypercos3
        )
    }

    pub fn is_speedway(self) -> bool {
        matches!(self, Self::Speedway0 | Self::Speedway1 | Self::Speedway2)
    }

    pub fn is_wave_sq_dist(self) -> bool {
        matches!(self, Self::WaveSqDistAngle0 | Self::WaveSqDistAngle1)
    }

    pub fn is_wave_atan(self) -> bool {
        matches!(self, Self::WaveAtanAngle0 | Self::WaveAtanAngle1)
    }

    pub fn is_wave(self) -> bool {
        self.is_wave_sq_dist() || self.is_wave_atan()
    }
}

impl fmt::Display for ZoomFilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zoom speed. `STOP_SPEED` freezes the picture, `FASTEST_SPEED` zooms hardest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitesse {
    vitesse: u32,
    reverse: bool,
}

impl Vitesse {
    pub const MAX_VITESSE: u32 = 128;
    pub const STOP_SPEED: u32 = Self::MAX_VITESSE;
    pub const FASTEST_SPEED: u32 = 0;
    pub const DEFAULT_VITESSE: u32 = Self::MAX_VITESSE - 1;

    pub fn vitesse(&self) -> u32 {
        self.vitesse
    }

    pub fn set_vitesse(&mut self, vitesse: u32) {
        self.vitesse = vitesse.min(Self::MAX_VITESSE);
    }

    pub fn set_default(&mut self) {
        self.vitesse = Self::DEFAULT_VITESSE;
        self.reverse = true;
    }

    pub fn go_slower_by(&mut self, amount: u32) {
        self.set_vitesse(self.vitesse.saturating_add(amount));
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    pub fn toggle_reverse(&mut self) {
        self.reverse = !self.reverse;
    }

    /// `-1` at full speed, `0` when stopped; reverse flips the sign.
    pub fn relative_speed(&self) -> f32 {
        let speed = (self.vitesse as f32 - Self::MAX_VITESSE as f32) / Self::MAX_VITESSE as f32;
        if self.reverse { -speed } else { speed }
    }
}

impl Default for Vitesse {
    fn default() -> Self {
        Self {
            vitesse: Self::DEFAULT_VITESSE,
            reverse: true,
        }
    }
}

/// Modulates the zoom adjustment with a sin/cos ripple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MultiplierEffectSettings {
    pub is_active: bool,
    pub x_frequency: f32,
    pub y_frequency: f32,
    pub x_amplitude: f32,
    pub y_amplitude: f32,
    pub lerp_to_coords_t: f32,
}

impl Default for MultiplierEffectSettings {
    fn default() -> Self {
        Self {
            is_active: false,
            x_frequency: 1.0,
            y_frequency: 1.0,
            x_amplitude: 0.0,
            y_amplitude: 0.0,
            lerp_to_coords_t: 0.5,
        }
    }
}

pub const DEFAULT_MAX_ZOOM_ADJUSTMENT: f32 = 2.01;
pub const DEFAULT_BASE_ZOOM_ADJUSTMENT_MULTIPLIER: f32 = 1.0;
pub const DEFAULT_AFTER_EFFECTS_VELOCITY_MULTIPLIER: f32 = 0.5;

/// Everything the zoom vector needs for one settings epoch.
#[derive(Clone, Debug)]
pub struct FilterEffectsSettings {
    pub filter_mode: ZoomFilterMode,
    pub vitesse: Vitesse,
    pub max_zoom_adjustment: f32,
    pub base_zoom_adjustment_multiplier: f32,
    pub after_effects_velocity_multiplier: f32,
    pub zoom_adjustment_effect: ZoomAdjustmentEffect,
    pub zoom_midpoint: Point2dInt,
    pub multiplier_effect: MultiplierEffectSettings,
    pub after_effects: AfterEffectsSettings,
}

impl FilterEffectsSettings {
    pub fn new(zoom_midpoint: Point2dInt) -> Self {
        Self {
            filter_mode: ZoomFilterMode::Normal,
            vitesse: Vitesse::default(),
            max_zoom_adjustment: DEFAULT_MAX_ZOOM_ADJUSTMENT,
            base_zoom_adjustment_multiplier: DEFAULT_BASE_ZOOM_ADJUSTMENT_MULTIPLIER,
            after_effects_velocity_multiplier: DEFAULT_AFTER_EFFECTS_VELOCITY_MULTIPLIER,
            zoom_adjustment_effect: ZoomAdjustmentEffect::Uniform,
            zoom_midpoint,
            multiplier_effect: MultiplierEffectSettings::default(),
            after_effects: AfterEffectsSettings::default(),
        }
    }
}

/// Service-side state: the snapshot plus the buffer lerp that rides alongside it.
#[derive(Clone, Debug)]
pub struct FilterSettings {
    pub filter_effects_settings_have_changed: bool,
    pub filter_effects_settings: FilterEffectsSettings,
    pub transform_buffer_lerp_data: TransformBufferLerpData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_mode_once() {
        for (i, mode) in ZoomFilterMode::ALL.iter().enumerate() {
            assert_eq!(ZoomFilterMode::ALL.iter().position(|m| m == mode), Some(i));
        }
        assert_eq!(ZoomFilterMode::value_variants().len(), ZoomFilterMode::COUNT);
    }

    #[test]
    fn stopped_vitesse_has_no_speed() {
        let mut vitesse = Vitesse::default();
        vitesse.set_vitesse(Vitesse::STOP_SPEED);
        assert_eq!(vitesse.relative_speed(), 0.0);
        vitesse.set_vitesse(1_000);
        assert_eq!(vitesse.vitesse(), Vitesse::MAX_VITESSE);
    }
}
