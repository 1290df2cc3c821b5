use goom_zoom::filter_fx::after_effects::after_effects_states::{
    AfterEffectsProbabilities, AfterEffectsStates,
};
use goom_zoom::filter_fx::after_effects::hypercos::HypercosOverlayMode;
use goom_zoom::filter_fx::after_effects::planes::Planes;
use goom_zoom::filter_fx::after_effects::rotation::{
    ROTATE_SPEED_RANGE, Rotation, RotationAdjustmentType, RotationAdjustments,
};
use goom_zoom::filter_fx::after_effects::tan_effect::{TanEffect, TanParams};
use goom_zoom::filter_fx::after_effects::xy_lerp::{XYLerpEffect, XYLerpMode, XYLerpParams};
use goom_zoom::filter_fx::after_effects::{AfterEffectsMap, AfterEffectsType};
use goom_zoom::filter_fx::common_types::Amplitude;
use goom_zoom::filter_fx::filter_effects::amulet::Amulet;
use goom_zoom::filter_fx::filter_effects::scrunch::{self, Scrunch};
use goom_zoom::filter_fx::filter_effects::speedway::{self, Speedway, SpeedwayMode};
use goom_zoom::filter_fx::filter_effects::{MIN_SPEED_COEFF, ZoomAdjustmentEffect};
use goom_zoom::filter_fx::image_displacement::{ImageDisplacement, ImageDisplacementList};
use goom_zoom::filter_fx::normalized_coords::NormalizedCoords;
use goom_zoom::filter_fx::settings::ZoomFilterMode;
use goom_zoom::filter_fx::viewport::Viewport;
use goom_zoom::goom_rand::{GoomRand, NumberRange, RandomSource, Weights};
use goom_zoom::image_io::ImageBitmap;
use goom_zoom::point2d::{Point2dInt, Vec2dFlt};
use std::collections::VecDeque;
use std::sync::Arc;

/// Replays queued values, then falls back to a seeded generator. Range draws pop an
/// absolute value (clamped into the range) so a test can force a parameter directly.
struct ScriptedRand {
    values: VecDeque<f32>,
    fallback: GoomRand,
}

impl ScriptedRand {
    fn new(values: &[f32]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            fallback: GoomRand::with_seed(99),
        }
    }
}

impl RandomSource for ScriptedRand {
    fn unit_f32(&mut self) -> f32 {
        self.values
            .pop_front()
            .unwrap_or_else(|| self.fallback.unit_f32())
    }

    fn unit_f64(&mut self) -> f64 {
        self.fallback.unit_f64()
    }

    fn rand_u32_in(&mut self, min: u32, max: u32) -> u32 {
        self.fallback.rand_u32_in(min, max)
    }

    fn rand_in_range(&mut self, range: NumberRange<f32>) -> f32 {
        match self.values.pop_front() {
            Some(v) => v.clamp(range.min, range.max),
            None => self.fallback.rand_in_range(range),
        }
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn sample_coords() -> impl Iterator<Item = NormalizedCoords> {
    (-8..=8).flat_map(|i| {
        (-8..=8).map(move |j| NormalizedCoords::new(i as f32 * 0.25, j as f32 * 0.25))
    })
}

// ── Zoom-adjustment effects ─────────────────────────────────────────────────

#[test]
fn amulet_adds_scaled_sq_dist() {
    let amulet = Amulet::with_params(Amplitude::new(1.0, 1.0), Viewport::whole());
    let coeffs = amulet.speed_coefficients(Vec2dFlt::new(0.5, 0.0), 0.25);
    assert_eq!(coeffs, Vec2dFlt::new(0.75, 0.25));
}

#[test]
fn amulet_is_radially_symmetric() {
    let amulet = Amulet::with_params(Amplitude::new(2.0, 2.0), Viewport::whole());
    let effect = ZoomAdjustmentEffect::Amulet(amulet);
    let base = Vec2dFlt::new(0.02, 0.02);
    let a = effect.zoom_adjustment(NormalizedCoords::new(0.5, 0.25), base, 4.01);
    let b = effect.zoom_adjustment(NormalizedCoords::new(-0.5, -0.25), base, 4.01);
    assert!(close(a.x, -b.x) && close(a.y, -b.y), "{a:?} vs {b:?}");
}

#[test]
fn scrunch_y_follows_x() {
    let mut rand = GoomRand::with_seed(11);
    let scrunch = Scrunch::new(&mut rand);
    let amp = scrunch.amplitude();
    assert!(scrunch::X_AMPLITUDE_RANGE.contains(amp.x));
    assert!(scrunch::Y_AMPLITUDE_RANGE.contains(amp.y));
    let coeffs = scrunch.speed_coefficients(Vec2dFlt::new(0.1, 0.3), 0.5);
    assert!(close(coeffs.y, amp.y * coeffs.x));
}

#[test]
fn speedway_mode0_forced_draws() {
    let mut rand = ScriptedRand::new(&[4.0, 0.1]);
    let speedway = Speedway::new(SpeedwayMode::Mode0, &mut rand);
    assert_eq!(speedway.amplitude(), Amplitude::new(4.0, 1.0));

    let mut rand = ScriptedRand::new(&[2.5, 0.9]);
    let speedway = Speedway::new(SpeedwayMode::Mode0, &mut rand);
    assert_eq!(speedway.amplitude(), Amplitude::new(2.5, -1.0));
}

#[test]
fn speedway_mode0_y_is_always_unit() {
    let mut rand = GoomRand::with_seed(5);
    let mut speedway = Speedway::new(SpeedwayMode::Mode0, &mut rand);
    for _ in 0..200 {
        speedway.set_random_params(&mut rand);
        let amp = speedway.amplitude();
        assert!(amp.y == 1.0 || amp.y == -1.0, "y amplitude {}", amp.y);
        assert!(speedway::X_AMPLITUDE_RANGE.contains(amp.x));
    }
}

#[test]
fn speedway_mode1_y_within_range() {
    let mut rand = GoomRand::with_seed(6);
    let mut speedway = Speedway::new(SpeedwayMode::Mode1, &mut rand);
    for _ in 0..200 {
        speedway.set_random_params(&mut rand);
        assert!(speedway::MODE1_Y_AMPLITUDE_RANGE.contains(speedway.amplitude().y));
    }
}

#[test]
fn speedway_mode1_warps_around_x_add() {
    // Unit amplitudes, no flip, then a positive x_add of exactly 1.
    let mut rand = ScriptedRand::new(&[1.0, 1.0, 0.9, 0.1, 0.9, 1.0]);
    let speedway = Speedway::new(SpeedwayMode::Mode1, &mut rand);
    assert_eq!(speedway.amplitude(), Amplitude::new(1.0, 1.0));
    let base = Vec2dFlt::new(1.0, 1.0);

    // Left of x_add: sign follows x - x_add, so the warp cancels at the origin.
    let at_origin = speedway.speed_coefficients(NormalizedCoords::new(0.0, 0.0), 0.0, base);
    assert!(close(at_origin.x, 0.0) && close(at_origin.y, 0.0), "{at_origin:?}");

    // warp 0.1 * (1 + 0.25) = 0.125, amplitude 0.25 * (1 - 0.25) = 0.1875
    let right = speedway.speed_coefficients(NormalizedCoords::new(1.5, 0.0), 0.25, base);
    assert!(close(right.x, 0.1875 * 0.125), "{right:?}");
    assert!(close(right.y, 0.1875 * right.x));

    // warp 0.1 * (1 - 4) = -0.3, amplitude 0.25 * (1 - 0.5) = 0.125
    let left = speedway.speed_coefficients(NormalizedCoords::new(-1.0, 0.0), 0.5, base);
    assert!(close(left.x, 0.125 * -0.3), "{left:?}");
    assert!(close(left.y, 0.125 * left.x));
}

#[test]
fn uniform_effect_scales_coords_by_base() {
    let effect = ZoomAdjustmentEffect::Uniform;
    let base = Vec2dFlt::new(0.02, 0.02);
    let adj = effect.zoom_adjustment(NormalizedCoords::new(1.0, -2.0), base, 2.01);
    assert!(close(adj.x, 0.02) && close(adj.y, -0.04));
}

#[test]
fn speed_coefficients_are_clamped() {
    let amulet = Amulet::with_params(Amplitude::new(100.0, -100.0), Viewport::whole());
    let effect = ZoomAdjustmentEffect::Amulet(amulet);
    let coords = NormalizedCoords::new(1.0, 1.0);
    let adj = effect.zoom_adjustment(coords, Vec2dFlt::ZERO, 2.5);
    assert!(close(adj.x, 2.5));
    assert!(close(adj.y, MIN_SPEED_COEFF));
}

#[test]
fn every_mode_stays_finite_over_many_rolls() {
    let mut rand = GoomRand::with_seed(2024);
    let mut images = ImageDisplacementList::builtin();
    for mode in ZoomFilterMode::ALL {
        let mut effect = ZoomAdjustmentEffect::new(mode, &mut rand, &mut images);
        for _ in 0..40 {
            effect.set_random_params(&mut rand);
            for coords in sample_coords() {
                let adj = effect.zoom_adjustment(coords, Vec2dFlt::new(0.02, 0.02), 4.01);
                assert!(adj.is_finite(), "{mode:?} at {coords:?} gave {adj:?}");
            }
        }
    }
}

#[test]
fn rolled_parameters_stay_in_their_ranges() {
    use goom_zoom::filter_fx::after_effects::tan_effect;
    use goom_zoom::filter_fx::filter_effects::amulet;

    let mut rand = GoomRand::with_seed(10_000);
    let mut amulet = Amulet::new(&mut rand);
    let mut scrunch = Scrunch::new(&mut rand);
    let mut speedway = Speedway::new(SpeedwayMode::Mode2, &mut rand);
    let mut tan = TanEffect::new();
    for _ in 0..10_000 {
        amulet.set_random_params(&mut rand);
        assert!(amulet::AMPLITUDE_RANGE.contains(amulet.amplitude().x));
        assert!(amulet::AMPLITUDE_RANGE.contains(amulet.amplitude().y));

        scrunch.set_random_params(&mut rand);
        assert!(scrunch::X_AMPLITUDE_RANGE.contains(scrunch.amplitude().x));
        assert!(scrunch::Y_AMPLITUDE_RANGE.contains(scrunch.amplitude().y));

        speedway.set_random_params(&mut rand);
        assert!(speedway::X_AMPLITUDE_RANGE.contains(speedway.amplitude().x));
        assert!(speedway::X_AMPLITUDE_RANGE.contains(speedway.amplitude().y));

        tan.set_random_params(&mut rand);
        let params = tan.params();
        assert!(tan_effect::AMPLITUDE_RANGE.contains(params.amplitude.x));
        assert!(tan_effect::LIMITING_FACTOR_RANGE.contains(params.limiting_factor));
    }
}

#[test]
fn same_seed_same_effect() {
    let mut images_a = ImageDisplacementList::builtin();
    let mut images_b = ImageDisplacementList::builtin();
    for mode in ZoomFilterMode::ALL {
        let a = ZoomAdjustmentEffect::new(mode, &mut GoomRand::with_seed(8), &mut images_a);
        let b = ZoomAdjustmentEffect::new(mode, &mut GoomRand::with_seed(8), &mut images_b);
        for coords in sample_coords() {
            let base = Vec2dFlt::new(0.02, 0.02);
            assert_eq!(
                a.zoom_adjustment(coords, base, 4.01),
                b.zoom_adjustment(coords, base, 4.01),
                "{mode:?} diverged"
            );
        }
    }
}

// ── Image displacement ──────────────────────────────────────────────────────

#[test]
fn image_displacement_is_zero_outside_the_bitmap() {
    let bitmap = ImageBitmap::from_rgba(4, 4, vec![255; 4 * 4 * 4]);
    let mut image = ImageDisplacement::new("white", Arc::new(bitmap));
    image.set_zoom_factor(1.0, 1.0);
    image.set_amplitude(Amplitude::new(1.0, 1.0));
    image.set_xy_color_cutoffs(0.5, 0.5);

    let inside = image.displacement_vector(NormalizedCoords::ORIGIN);
    assert!(close(inside.x, 0.5) && close(inside.y, 0.5));
    assert_eq!(image.displacement_vector(NormalizedCoords::new(5.0, 0.0)), Vec2dFlt::ZERO);
    assert_eq!(image.displacement_vector(NormalizedCoords::new(0.0, -4.0)), Vec2dFlt::ZERO);
}

#[test]
#[should_panic]
fn image_displacement_rejects_non_positive_zoom() {
    let bitmap = ImageBitmap::from_rgba(2, 2, vec![0; 16]);
    let mut image = ImageDisplacement::new("black", Arc::new(bitmap));
    image.set_zoom_factor(0.0, 1.0);
}

#[test]
fn builtin_images_are_available() {
    let images = ImageDisplacementList::builtin();
    assert!(!images.is_empty());
    assert!(images.current().is_some());
    assert!(ImageDisplacementList::default().current().is_none());
}

// ── After-effects ───────────────────────────────────────────────────────────

#[test]
fn tan_effect_stays_finite_for_huge_distances() {
    let mut rand = GoomRand::with_seed(17);
    let mut tan = TanEffect::new();
    for _ in 0..100 {
        tan.set_random_params(&mut rand);
        for sq_dist in [0.0, 1.0, 1.57, 1e3, 1e6, 1e9] {
            let v = tan.velocity(sq_dist, Vec2dFlt::new(1.0, -1.0));
            assert!(v.is_finite(), "{:?} at {sq_dist} gave {v:?}", tan.params());
        }
    }
}

#[test]
fn tan_only_at_zero_distance_is_zero() {
    let mut tan = TanEffect::new();
    tan.set_params(TanParams::default());
    assert_eq!(tan.velocity(0.0, Vec2dFlt::new(2.0, 3.0)), Vec2dFlt::ZERO);
}

#[test]
fn xy_lerp_mode3_weight_dominates() {
    let effect = XYLerpEffect::new();
    let weights = effect.mode_weights();
    assert_eq!(weights.weight(XYLerpMode::Mode3), 1e10);
    assert_eq!(weights.weight(XYLerpMode::Mode0), 10.0);
    assert_eq!(weights.weight(XYLerpMode::Mode3) / weights.weight(XYLerpMode::Mode1), 1e9);
}

#[test]
fn xy_lerp_fixed_modes_swap_or_keep_components() {
    let mut effect = XYLerpEffect::new();
    let v = Vec2dFlt::new(1.0, 2.0);
    effect.set_params(XYLerpParams {
        mode: XYLerpMode::Mode0,
        ..XYLerpParams::default()
    });
    assert_eq!(effect.velocity(0.7, v), v);
    effect.set_params(XYLerpParams {
        mode: XYLerpMode::Mode1,
        ..XYLerpParams::default()
    });
    assert_eq!(effect.velocity(0.7, v), Vec2dFlt::new(2.0, 1.0));
    effect.set_params(XYLerpParams {
        mode: XYLerpMode::Mode1,
        flip_y: true,
        ..XYLerpParams::default()
    });
    assert_eq!(effect.velocity(0.7, v), Vec2dFlt::new(2.0, -1.0));
}

#[test]
fn rotation_speed_within_range_and_adjustable() {
    let mut rand = GoomRand::with_seed(4);
    let mut rotation = Rotation::new();
    rotation.set_random_params(&mut rand);
    let speed = rotation.rotate_speed();
    assert!(ROTATE_SPEED_RANGE.contains(speed));

    let mut adjustments = RotationAdjustments::default();
    adjustments.set_multiply_factor(2.0, RotationAdjustmentType::InsteadOfRandom);
    adjustments.toggle(RotationAdjustmentType::InsteadOfRandom);
    rotation.apply_adjustments(&adjustments);
    assert!(close(rotation.rotate_speed(), -2.0 * speed));

    adjustments.reset();
    assert_eq!(adjustments.adjustment_type(), RotationAdjustmentType::None);
    assert!(!adjustments.is_toggle());
}

#[test]
fn stopped_rotation_has_no_velocity() {
    let mut rotation = Rotation::new();
    rotation.set_rotate_speed(0.0);
    assert_eq!(rotation.velocity(Vec2dFlt::new(1.0, 1.0)), Vec2dFlt::ZERO);
}

#[test]
fn planes_edge_midpoint_kills_vertical_plane() {
    let mut rand = GoomRand::with_seed(12);
    let mut planes = Planes::new();
    for _ in 0..200 {
        planes.set_random_params(&mut rand, Point2dInt::new(1, 40), 160);
        assert!(!planes.is_vertical_active());
        planes.set_random_params(&mut rand, Point2dInt::new(159, 40), 160);
        assert!(!planes.is_vertical_active());
    }
}

#[test]
fn inactive_planes_contribute_nothing() {
    let planes = Planes::new();
    assert!(!planes.is_horizontal_active() && !planes.is_vertical_active());
    assert_eq!(planes.velocity(NormalizedCoords::new(1.0, 1.0)), Vec2dFlt::ZERO);
}

// ── After-effect states ─────────────────────────────────────────────────────

fn probabilities(prob: f32, overlay: HypercosOverlayMode) -> AfterEffectsProbabilities {
    AfterEffectsProbabilities {
        hypercos_mode_weights: Weights::new(&[(overlay, 1.0)]),
        probabilities: AfterEffectsMap::filled(prob),
    }
}

#[test]
fn hypercos_on_only_with_an_overlay() {
    let mut rand = GoomRand::with_seed(1);
    let mut states = AfterEffectsStates::new(&AfterEffectsMap::filled(1.0), &AfterEffectsMap::filled(0));

    states.reset_all_states(&mut rand, &probabilities(1.0, HypercosOverlayMode::None));
    assert!(!states.is_turned_on(AfterEffectsType::Hypercos));
    assert!(states.is_turned_on(AfterEffectsType::Tan));

    // Hypercos was rolled on and then forced off, so its (zero) off-timer must restart.
    states.check_for_pending_off_timers();
    states.reset_all_states(&mut rand, &probabilities(1.0, HypercosOverlayMode::Mode2));
    assert!(states.is_turned_on(AfterEffectsType::Hypercos));
    assert_eq!(states.hypercos_overlay_mode(), HypercosOverlayMode::Mode2);
}

#[test]
fn turned_off_effect_waits_out_its_off_timer() {
    let mut rand = GoomRand::with_seed(2);
    let mut states = AfterEffectsStates::new(&AfterEffectsMap::filled(0.0), &AfterEffectsMap::filled(3));
    let always = probabilities(1.0, HypercosOverlayMode::None);

    states.reset_standard_states(&mut rand, &always);
    assert!(states.is_turned_on(AfterEffectsType::Noise));

    // Repeat probability zero: it turns off and its timer starts on the next check.
    states.reset_standard_states(&mut rand, &always);
    assert!(!states.is_turned_on(AfterEffectsType::Noise));
    states.check_for_pending_off_timers();
    assert!(!states.is_off_timer_finished(AfterEffectsType::Noise));

    states.reset_standard_states(&mut rand, &always);
    assert!(!states.is_turned_on(AfterEffectsType::Noise));

    for _ in 0..3 {
        states.increment_timers();
    }
    assert!(states.is_off_timer_finished(AfterEffectsType::Noise));
    states.reset_standard_states(&mut rand, &always);
    assert!(states.is_turned_on(AfterEffectsType::Noise));
}
