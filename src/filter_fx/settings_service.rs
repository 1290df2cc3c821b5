//! Chooses filter modes and rolls the settings snapshot for each one.
//!
//! The service is driven from the control thread: `set_new_random_filter` on a mode change,
//! `new_cycle` once per frame, and `notify_updated_filter_effects_settings` after the snapshot
//! has been pushed to the zoom vector.

use crate::filter_fx::after_effects::after_effects_states::{
    AfterEffectsProbabilities, AfterEffectsStates,
};
use crate::filter_fx::after_effects::hypercos::HypercosOverlayMode;
use crate::filter_fx::after_effects::rotation::RotationAdjustmentType;
use crate::filter_fx::after_effects::{AfterEffectsMap, AfterEffectsType};
use crate::filter_fx::filter_effects::ZoomAdjustmentEffect;
use crate::filter_fx::image_displacement::ImageDisplacementList;
use crate::filter_fx::lerp_factor::{DEFAULT_TRAN_LERP_INCREMENT, TransformBufferLerpData};
use crate::filter_fx::settings::{
    FilterEffectsSettings, FilterSettings, MultiplierEffectSettings, Vitesse, ZoomFilterMode,
};
use crate::goom_rand::{NumberRange, RandomSource, Weights, random_xy_pair};
use crate::point2d::{Dimensions, Point2dInt};

const PROB_HIGH: f32 = 0.9;
const PROB_HALF: f32 = 0.5;
const PROB_LOW: f32 = 0.1;
const PROB_ZERO: f32 = 0.0;

const PROB_CRYSTAL_BALL_IN_MIDDLE: f32 = 0.8;
const PROB_WAVE_IN_MIDDLE: f32 = 0.5;
const PROB_CHANGE_SPEED: f32 = 0.5;
const PROB_REVERSE_SPEED: f32 = 0.5;
const WAVE_PROB_PLANE: f32 = 0.8;

pub const MAX_MAX_ZOOM_ADJUSTMENT: f32 = 4.01;
const MAX_ZOOM_ADJUSTMENT_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.5, 1.0);
const PROB_CALM_DOWN: f32 = 0.8;
pub const BASE_ZOOM_ADJUSTMENT_MULTIPLIER_RANGE: NumberRange<f32> = NumberRange::new(0.1, 5.0);
pub const AFTER_EFFECTS_VELOCITY_MULTIPLIER_RANGE: NumberRange<f32> = NumberRange::new(0.1, 1.0);

pub const MULTIPLIER_EFFECT_FREQ_RANGE: NumberRange<f32> = NumberRange::new(0.5, 20.0);
pub const MULTIPLIER_EFFECT_AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.0, 0.03);
const PROB_ACTIVE_MULTIPLIER_EFFECT: f32 = 0.3;
const PROB_MULTIPLIER_EFFECT_FREQUENCIES_EQUAL: f32 = 0.95;
const PROB_MULTIPLIER_EFFECT_AMPLITUDES_EQUAL: f32 = 0.95;
const LERP_TO_COORDS_RANGE: NumberRange<f32> = NumberRange::new(0.0, 1.0);

const HEIGHT_MARGIN: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomMidpointEvent {
    Bottom,
    Top,
    Left,
    Right,
    Centre,
    BottomLeftQuarter,
    TopLeftQuarter,
    BottomRightQuarter,
    TopRightQuarter,
}

impl ZoomMidpointEvent {
    fn is_edge(self) -> bool {
        matches!(self, Self::Bottom | Self::Top | Self::Left | Self::Right)
    }
}

fn filter_mode_weight(mode: ZoomFilterMode) -> f32 {
    match mode {
        ZoomFilterMode::Amulet => 10.0,
        ZoomFilterMode::CrystalBall0 => 4.0,
        ZoomFilterMode::CrystalBall1 => 2.0,
        ZoomFilterMode::Hypercos0 => 8.0,
        ZoomFilterMode::Hypercos1 => 4.0,
        ZoomFilterMode::Hypercos2 => 2.0,
        ZoomFilterMode::Hypercos3 => 1.0,
        ZoomFilterMode::ImageDisplacement => 5.0,
        ZoomFilterMode::Normal => 10.0,
        ZoomFilterMode::Scrunch => 6.0,
        ZoomFilterMode::Speedway0 => 2.0,
        ZoomFilterMode::Speedway1 => 1.0,
        ZoomFilterMode::Speedway2 => 5.0,
        ZoomFilterMode::WaveSqDistAngle0 => 5.0,
        ZoomFilterMode::WaveSqDistAngle1 => 4.0,
        ZoomFilterMode::WaveAtanAngle0 => 5.0,
        ZoomFilterMode::WaveAtanAngle1 => 4.0,
        ZoomFilterMode::YOnly => 5.0,
    }
}

/// Weight multiplier for `next` following `previous`. Sibling modes may not follow each
/// other, except that plain Hypercos Mode 0 may follow the other Hypercos modes.
pub fn successor_multiplier(previous: ZoomFilterMode, next: ZoomFilterMode) -> f64 {
    use ZoomFilterMode as M;
    let blocked = match previous {
        M::CrystalBall0 | M::CrystalBall1 => next.is_crystal_ball(),
        M::Hypercos0 => next.is_hypercos(),
        M::Hypercos1 | M::Hypercos2 | M::Hypercos3 => next.is_hypercos() && next != M::Hypercos0,
        M::Speedway0 | M::Speedway1 | M::Speedway2 => next.is_speedway(),
        M::WaveSqDistAngle0 | M::WaveSqDistAngle1 => next.is_wave_sq_dist(),
        M::WaveAtanAngle0 | M::WaveAtanAngle1 => next.is_wave_atan(),
        _ => false,
    };
    if blocked { 0.0 } else { 1.0 }
}

fn hypercos_overlay_weights(mode: ZoomFilterMode) -> [f32; 5] {
    use ZoomFilterMode as M;
    match mode {
        M::Amulet => [20.0, 1.0, 5.0, 1.0, 1.0],
        M::CrystalBall0 => [5.0, 10.0, 1.0, 1.0, 1.0],
        M::CrystalBall1 => [5.0, 1.0, 99.0, 1.0, 1.0],
        M::Hypercos0 => [1.0, 1.0, 2.0, 2.0, 2.0],
        M::Hypercos1 => [1.0, 2.0, 1.0, 2.0, 2.0],
        M::Hypercos2 => [1.0, 2.0, 2.0, 1.0, 2.0],
        M::Hypercos3 => [1.0, 2.0, 2.0, 2.0, 1.0],
        M::ImageDisplacement => [10.0, 1.0, 5.0, 1.0, 1.0],
        M::Normal => [10.0, 5.0, 1.0, 1.0, 0.0],
        M::Scrunch => [10.0, 1.0, 5.0, 1.0, 1.0],
        M::Speedway0 | M::Speedway1 | M::Speedway2 => [10.0, 5.0, 1.0, 1.0, 1.0],
        M::WaveSqDistAngle0 => [10.0, 5.0, 1.0, 1.0, 1.0],
        M::WaveSqDistAngle1 => [10.0, 1.0, 5.0, 1.0, 1.0],
        M::WaveAtanAngle0 => [10.0, 5.0, 1.0, 1.0, 1.0],
        M::WaveAtanAngle1 => [10.0, 1.0, 5.0, 1.0, 1.0],
        M::YOnly => [10.0, 1.0, 5.0, 1.0, 1.0],
    }
}

fn after_effects_probabilities(mode: ZoomFilterMode) -> AfterEffectsMap<f32> {
    use ZoomFilterMode as M;
    let mut probs = AfterEffectsMap::filled(0.0);
    probs[AfterEffectsType::Hypercos] = 0.9;
    probs[AfterEffectsType::ImageVelocity] = 0.1;
    probs[AfterEffectsType::Noise] = 0.1;
    probs[AfterEffectsType::Planes] = 0.7;
    probs[AfterEffectsType::Rotation] = 0.0;
    probs[AfterEffectsType::Tan] = 0.2;
    probs[AfterEffectsType::XYLerp] = 0.2;

    probs[AfterEffectsType::Rotation] = match mode {
        M::Amulet | M::CrystalBall0 | M::CrystalBall1 | M::Speedway1 | M::Speedway2 => PROB_HIGH,
        M::WaveSqDistAngle0 | M::WaveSqDistAngle1 | M::WaveAtanAngle0 | M::WaveAtanAngle1 => {
            PROB_HIGH
        }
        M::Hypercos0 | M::Hypercos1 | M::Hypercos2 | M::Hypercos3 => PROB_LOW,
        M::Scrunch | M::Speedway0 | M::YOnly => PROB_HALF,
        M::ImageDisplacement | M::Normal => PROB_ZERO,
    };
    if mode.is_wave() {
        probs[AfterEffectsType::Planes] = WAVE_PROB_PLANE;
    }
    probs
}

fn repeat_probabilities() -> AfterEffectsMap<f32> {
    let mut probs = AfterEffectsMap::filled(0.0);
    probs[AfterEffectsType::Hypercos] = 0.5;
    probs[AfterEffectsType::ImageVelocity] = 0.8;
    probs[AfterEffectsType::XYLerp] = 0.1;
    probs
}

fn off_times() -> AfterEffectsMap<u32> {
    let mut times = AfterEffectsMap::filled(100);
    times[AfterEffectsType::Rotation] = 0;
    times
}

fn forced_overlay(mode: ZoomFilterMode) -> Option<HypercosOverlayMode> {
    match mode {
        ZoomFilterMode::Hypercos0 => Some(HypercosOverlayMode::Mode0),
        ZoomFilterMode::Hypercos1 => Some(HypercosOverlayMode::Mode1),
        ZoomFilterMode::Hypercos2 => Some(HypercosOverlayMode::Mode2),
        ZoomFilterMode::Hypercos3 => Some(HypercosOverlayMode::Mode3),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct ZoomFilterModeInfo {
    pub name: &'static str,
    pub zoom_adjustment_effect: ZoomAdjustmentEffect,
    pub after_effects_probabilities: AfterEffectsProbabilities,
}

pub struct FilterSettingsService {
    dimensions: Dimensions,
    screen_centre: Point2dInt,
    images: ImageDisplacementList,
    after_effects_states: AfterEffectsStates,
    filter_mode: ZoomFilterMode,
    previous_filter_mode: ZoomFilterMode,
    filter_mode_at_last_update: ZoomFilterMode,
    filter_mode_data: Vec<ZoomFilterModeInfo>,
    filter_mode_weights: Weights<ZoomFilterMode>,
    zoom_midpoint_weights: Weights<ZoomMidpointEvent>,
    filter_settings: FilterSettings,
}

impl FilterSettingsService {
    pub fn new(
        dimensions: Dimensions,
        rand: &mut dyn RandomSource,
        mut images: ImageDisplacementList,
    ) -> Self {
        let filter_mode_data = ZoomFilterMode::ALL
            .iter()
            .map(|&mode| {
                let [none, m0, m1, m2, m3] = hypercos_overlay_weights(mode);
                ZoomFilterModeInfo {
                    name: mode.name(),
                    zoom_adjustment_effect: ZoomAdjustmentEffect::new(mode, rand, &mut images),
                    after_effects_probabilities: AfterEffectsProbabilities {
                        hypercos_mode_weights: Weights::new(&[
                            (HypercosOverlayMode::None, none),
                            (HypercosOverlayMode::Mode0, m0),
                            (HypercosOverlayMode::Mode1, m1),
                            (HypercosOverlayMode::Mode2, m2),
                            (HypercosOverlayMode::Mode3, m3),
                        ]),
                        probabilities: after_effects_probabilities(mode),
                    },
                }
            })
            .collect();

        let mode_weights: Vec<(ZoomFilterMode, f32)> = ZoomFilterMode::ALL
            .iter()
            .map(|&mode| {
                let weight = if mode == ZoomFilterMode::ImageDisplacement && images.is_empty() {
                    0.0
                } else {
                    filter_mode_weight(mode)
                };
                (mode, weight)
            })
            .collect();

        let screen_centre = dimensions.centre_point();
        let mut transform_buffer_lerp_data = TransformBufferLerpData::new(DEFAULT_TRAN_LERP_INCREMENT);
        transform_buffer_lerp_data.reset();

        Self {
            dimensions,
            screen_centre,
            images,
            after_effects_states: AfterEffectsStates::new(&repeat_probabilities(), &off_times()),
            filter_mode: ZoomFilterMode::Normal,
            previous_filter_mode: ZoomFilterMode::Normal,
            filter_mode_at_last_update: ZoomFilterMode::Normal,
            filter_mode_data,
            filter_mode_weights: Weights::new(&mode_weights),
            zoom_midpoint_weights: Weights::new(&[
                (ZoomMidpointEvent::Bottom, 3.0),
                (ZoomMidpointEvent::Top, 3.0),
                (ZoomMidpointEvent::Left, 2.0),
                (ZoomMidpointEvent::Right, 2.0),
                (ZoomMidpointEvent::Centre, 18.0),
                (ZoomMidpointEvent::BottomLeftQuarter, 10.0),
                (ZoomMidpointEvent::TopLeftQuarter, 10.0),
                (ZoomMidpointEvent::BottomRightQuarter, 10.0),
                (ZoomMidpointEvent::TopRightQuarter, 10.0),
            ]),
            filter_settings: FilterSettings {
                filter_effects_settings_have_changed: false,
                filter_effects_settings: FilterEffectsSettings::new(screen_centre),
                transform_buffer_lerp_data,
            },
        }
    }

    pub fn start(&mut self, rand: &mut dyn RandomSource) {
        self.set_new_random_filter(rand);
    }

    /// Once per frame: advances the buffer lerp and the after-effect off-timers.
    pub fn new_cycle(&mut self) {
        self.filter_mode_at_last_update = self.filter_mode;
        self.filter_settings.transform_buffer_lerp_data.update();
        self.after_effects_states.increment_timers();
    }

    pub fn notify_updated_filter_effects_settings(&mut self) {
        self.filter_settings.filter_effects_settings_have_changed = false;
        self.filter_settings
            .filter_effects_settings
            .after_effects
            .rotation_adjustments
            .reset();
        self.after_effects_states.check_for_pending_off_timers();
    }

    pub fn has_filter_mode_changed_since_last_update(&self) -> bool {
        self.filter_mode_at_last_update != self.filter_mode
    }

    pub fn has_changed(&self) -> bool {
        self.filter_settings.filter_effects_settings_have_changed
    }

    pub fn current_filter_mode(&self) -> ZoomFilterMode {
        self.filter_mode
    }

    pub fn current_filter_mode_name(&self) -> &'static str {
        self.mode_info(self.filter_mode).name
    }

    pub fn previous_filter_mode_name(&self) -> &'static str {
        self.mode_info(self.previous_filter_mode).name
    }

    pub fn filter_mode_weights(&self) -> &Weights<ZoomFilterMode> {
        &self.filter_mode_weights
    }

    pub fn filter_settings(&self) -> &FilterSettings {
        &self.filter_settings
    }

    pub fn filter_effects_settings(&self) -> &FilterEffectsSettings {
        &self.filter_settings.filter_effects_settings
    }

    pub fn images(&self) -> &ImageDisplacementList {
        &self.images
    }

    pub fn vitesse(&self) -> &Vitesse {
        &self.filter_settings.filter_effects_settings.vitesse
    }

    /// Marks the snapshot as changed.
    pub fn vitesse_mut(&mut self) -> &mut Vitesse {
        self.filter_settings.filter_effects_settings_have_changed = true;
        &mut self.filter_settings.filter_effects_settings.vitesse
    }

    pub fn set_new_random_filter(&mut self, rand: &mut dyn RandomSource) {
        let previous = self.filter_mode;
        let next = self
            .filter_mode_weights
            .random_weighted_with(rand, |mode| successor_multiplier(previous, mode));
        self.set_filter_mode(next, rand);
    }

    pub fn set_filter_mode(&mut self, filter_mode: ZoomFilterMode, rand: &mut dyn RandomSource) {
        self.filter_settings.filter_effects_settings_have_changed = true;
        self.previous_filter_mode = self.filter_mode;
        self.filter_mode = filter_mode;
        log::info!(
            "filter mode: {} -> {}",
            self.previous_filter_mode_name(),
            self.current_filter_mode_name()
        );
        self.set_random_settings_for_new_filter_mode(rand);
    }

    fn set_random_settings_for_new_filter_mode(&mut self, rand: &mut dyn RandomSource) {
        self.set_default_settings();
        self.set_random_zoom_midpoint(rand);
        self.set_filter_mode_random_effects(rand);
        self.reset_random_multiplier_effect(rand);
        self.set_filter_mode_after_effects(rand);
        self.update_filter_settings_from_after_effects();
    }

    fn mode_info(&self, mode: ZoomFilterMode) -> &ZoomFilterModeInfo {
        let index = ZoomFilterMode::ALL
            .iter()
            .position(|&m| m == mode)
            .unwrap_or_default();
        &self.filter_mode_data[index]
    }

    fn mode_info_mut(&mut self, mode: ZoomFilterMode) -> &mut ZoomFilterModeInfo {
        let index = ZoomFilterMode::ALL
            .iter()
            .position(|&m| m == mode)
            .unwrap_or_default();
        &mut self.filter_mode_data[index]
    }

    fn set_default_settings(&mut self) {
        let settings = &mut self.filter_settings.filter_effects_settings;
        settings.filter_mode = self.filter_mode;
        settings.zoom_midpoint = self.screen_centre;
        settings.vitesse.set_default();
        self.after_effects_states.set_defaults();
    }

    fn set_filter_mode_random_effects(&mut self, rand: &mut dyn RandomSource) {
        let mode = self.filter_mode;
        let effect = &mut self.mode_info_mut(mode).zoom_adjustment_effect;
        effect.set_random_params(rand);
        let effect = effect.clone();
        self.filter_settings.filter_effects_settings.zoom_adjustment_effect = effect;
    }

    fn set_filter_mode_after_effects(&mut self, rand: &mut dyn RandomSource) {
        self.set_randomized_after_effects(rand);
        self.set_wave_mode_after_effects(rand);
    }

    fn set_randomized_after_effects(&mut self, rand: &mut dyn RandomSource) {
        let info = self.mode_info(self.filter_mode);
        let probabilities = info.after_effects_probabilities.clone();
        self.after_effects_states.reset_all_states(rand, &probabilities);

        self.filter_settings
            .filter_effects_settings
            .after_effects
            .rotation_adjustments
            .set_multiply_factor(
                probabilities.probabilities[AfterEffectsType::Rotation],
                RotationAdjustmentType::AfterRandom,
            );
    }

    fn set_wave_mode_after_effects(&mut self, rand: &mut dyn RandomSource) {
        if !self.filter_mode.is_wave() {
            return;
        }
        self.after_effects_states.turn_plane_effect_on(rand);

        let vitesse = &mut self.filter_settings.filter_effects_settings.vitesse;
        vitesse.set_reverse(rand.probability_of(PROB_REVERSE_SPEED));
        if rand.probability_of(PROB_CHANGE_SPEED) {
            vitesse.set_vitesse((Vitesse::DEFAULT_VITESSE + vitesse.vitesse()) / 2);
        }
    }

    fn update_filter_settings_from_after_effects(&mut self) {
        self.filter_settings.filter_effects_settings_have_changed = true;
        let after_effects = &mut self.filter_settings.filter_effects_settings.after_effects;
        self.after_effects_states.update_settings_from_states(after_effects);

        if let Some(overlay) = forced_overlay(self.filter_mode) {
            after_effects.hypercos_overlay_mode = overlay;
            after_effects.is_active[AfterEffectsType::Hypercos] = true;
        }
    }

    pub fn reset_random_multiplier_effect(&mut self, rand: &mut dyn RandomSource) {
        let multiplier = &mut self.filter_settings.filter_effects_settings.multiplier_effect;
        if rand.probability_of(PROB_ACTIVE_MULTIPLIER_EFFECT) {
            let (x_frequency, y_frequency) = random_xy_pair(
                rand,
                MULTIPLIER_EFFECT_FREQ_RANGE,
                PROB_MULTIPLIER_EFFECT_FREQUENCIES_EQUAL,
            );
            let (x_amplitude, y_amplitude) = random_xy_pair(
                rand,
                MULTIPLIER_EFFECT_AMPLITUDE_RANGE,
                PROB_MULTIPLIER_EFFECT_AMPLITUDES_EQUAL,
            );
            *multiplier = MultiplierEffectSettings {
                is_active: true,
                x_frequency,
                y_frequency,
                x_amplitude,
                y_amplitude,
                lerp_to_coords_t: multiplier.lerp_to_coords_t,
            };
        } else {
            multiplier.is_active = false;
        }
        multiplier.lerp_to_coords_t = rand.rand_in_range(LERP_TO_COORDS_RANGE);
    }

    pub fn reset_random_after_effects(&mut self, rand: &mut dyn RandomSource) {
        let probabilities = self
            .mode_info(self.filter_mode)
            .after_effects_probabilities
            .clone();
        self.after_effects_states.reset_standard_states(rand, &probabilities);
        self.update_filter_settings_from_after_effects();
    }

    pub fn change_milieu(&mut self, rand: &mut dyn RandomSource) {
        self.filter_settings.filter_effects_settings_have_changed = true;
        self.set_max_zoom_adjustment(rand);
        self.reset_random_multiplier_effect(rand);
        self.set_base_zoom_adjustment_multiplier(rand);
        self.set_after_effects_velocity_multiplier(rand);
        self.set_random_zoom_midpoint(rand);
    }

    fn set_max_zoom_adjustment(&mut self, rand: &mut dyn RandomSource) {
        self.filter_settings.filter_effects_settings.max_zoom_adjustment =
            rand.rand_in_range(MAX_ZOOM_ADJUSTMENT_FACTOR_RANGE) * MAX_MAX_ZOOM_ADJUSTMENT;
    }

    fn set_base_zoom_adjustment_multiplier(&mut self, rand: &mut dyn RandomSource) {
        let multiplier = if rand.probability_of(PROB_CALM_DOWN) {
            1.0
        } else {
            rand.rand_in_range(BASE_ZOOM_ADJUSTMENT_MULTIPLIER_RANGE)
        };
        self.filter_settings.filter_effects_settings.base_zoom_adjustment_multiplier = multiplier;
    }

    fn set_after_effects_velocity_multiplier(&mut self, rand: &mut dyn RandomSource) {
        self.filter_settings.filter_effects_settings.after_effects_velocity_multiplier =
            rand.rand_in_range(AFTER_EFFECTS_VELOCITY_MULTIPLIER_RANGE);
    }

    fn set_random_zoom_midpoint(&mut self, rand: &mut dyn RandomSource) {
        if self.is_zoom_midpoint_in_the_middle(rand) {
            self.filter_settings.filter_effects_settings.zoom_midpoint = self.screen_centre;
            return;
        }
        let allow_edge_points = !self.filter_mode.is_wave();
        let event = self.random_midpoint_event(rand, allow_edge_points);
        self.filter_settings.filter_effects_settings.zoom_midpoint = self.midpoint_for(event);
    }

    fn is_zoom_midpoint_in_the_middle(&self, rand: &mut dyn RandomSource) -> bool {
        let mode = self.filter_mode;
        if mode == ZoomFilterMode::Amulet {
            return true;
        }
        if mode.is_crystal_ball() && rand.probability_of(PROB_CRYSTAL_BALL_IN_MIDDLE) {
            return true;
        }
        mode.is_wave() && rand.probability_of(PROB_WAVE_IN_MIDDLE)
    }

    fn random_midpoint_event(
        &self,
        rand: &mut dyn RandomSource,
        allow_edge_points: bool,
    ) -> ZoomMidpointEvent {
        if allow_edge_points {
            return self.zoom_midpoint_weights.random_weighted(rand);
        }
        self.zoom_midpoint_weights
            .random_weighted_with(rand, |event| if event.is_edge() { 0.0 } else { 1.0 })
    }

    /// Screen position of a midpoint event.
    pub fn midpoint_for(&self, event: ZoomMidpointEvent) -> Point2dInt {
        let w = self.dimensions.width as i32;
        let h = self.dimensions.height as i32;
        match event {
            ZoomMidpointEvent::Bottom => Point2dInt::new(w / 2, h - HEIGHT_MARGIN),
            ZoomMidpointEvent::Top => Point2dInt::new(w / 2, 1),
            ZoomMidpointEvent::Left => Point2dInt::new(1, h / 2),
            ZoomMidpointEvent::Right => Point2dInt::new(w - HEIGHT_MARGIN, h / 2),
            ZoomMidpointEvent::Centre => self.screen_centre,
            ZoomMidpointEvent::BottomLeftQuarter => Point2dInt::new(w / 4, 3 * h / 4),
            ZoomMidpointEvent::TopLeftQuarter => Point2dInt::new(w / 4, h / 4),
            ZoomMidpointEvent::BottomRightQuarter => Point2dInt::new(3 * w / 4, 3 * h / 4),
            ZoomMidpointEvent::TopRightQuarter => Point2dInt::new(3 * w / 4, h / 4),
        }
    }

    pub fn turn_off_rotation(&mut self) {
        let after_effects = &mut self.filter_settings.filter_effects_settings.after_effects;
        if !after_effects.is_active(AfterEffectsType::Rotation) {
            return;
        }
        self.filter_settings.filter_effects_settings_have_changed = true;
        after_effects.is_active[AfterEffectsType::Rotation] = false;
    }

    pub fn multiply_rotation(&mut self, factor: f32) {
        let after_effects = &mut self.filter_settings.filter_effects_settings.after_effects;
        if !after_effects.is_active(AfterEffectsType::Rotation) {
            return;
        }
        self.filter_settings.filter_effects_settings_have_changed = true;
        after_effects
            .rotation_adjustments
            .set_multiply_factor(factor, RotationAdjustmentType::InsteadOfRandom);
    }

    pub fn toggle_rotation_direction(&mut self) {
        let after_effects = &mut self.filter_settings.filter_effects_settings.after_effects;
        if !after_effects.is_active(AfterEffectsType::Rotation) {
            return;
        }
        self.filter_settings.filter_effects_settings_have_changed = true;
        after_effects
            .rotation_adjustments
            .toggle(RotationAdjustmentType::InsteadOfRandom);
    }

    pub fn reset_transform_buffer_lerp_data(&mut self) {
        self.filter_settings.transform_buffer_lerp_data.reset();
    }

    pub fn set_transform_buffer_lerp_increment(&mut self, value: f32) {
        self.filter_settings.transform_buffer_lerp_data.set_increment(value);
    }

    pub fn set_default_transform_buffer_lerp_increment(&mut self) {
        self.set_transform_buffer_lerp_increment(DEFAULT_TRAN_LERP_INCREMENT);
    }

    pub fn multiply_transform_buffer_lerp_increment(&mut self, factor: f32) {
        let data = &mut self.filter_settings.transform_buffer_lerp_data;
        data.set_increment(data.increment() * factor);
    }

    pub fn set_transform_buffer_lerp_to_end(&mut self) {
        self.filter_settings.transform_buffer_lerp_data.set_lerp_to_end();
    }
}
