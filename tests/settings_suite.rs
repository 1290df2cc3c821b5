use goom_zoom::filter_fx::after_effects::AfterEffectsType;
use goom_zoom::filter_fx::after_effects::hypercos::HypercosOverlayMode;
use goom_zoom::filter_fx::after_effects::rotation::RotationAdjustmentType;
use goom_zoom::filter_fx::filter_effects::ZoomAdjustmentEffect;
use goom_zoom::filter_fx::image_displacement::ImageDisplacementList;
use goom_zoom::filter_fx::lerp_factor::DEFAULT_TRAN_LERP_INCREMENT;
use goom_zoom::filter_fx::settings::{Vitesse, ZoomFilterMode};
use goom_zoom::filter_fx::settings_service::{
    AFTER_EFFECTS_VELOCITY_MULTIPLIER_RANGE, BASE_ZOOM_ADJUSTMENT_MULTIPLIER_RANGE,
    FilterSettingsService, MAX_MAX_ZOOM_ADJUSTMENT, MULTIPLIER_EFFECT_AMPLITUDE_RANGE,
    MULTIPLIER_EFFECT_FREQ_RANGE, ZoomMidpointEvent, successor_multiplier,
};
use goom_zoom::goom_rand::GoomRand;
use goom_zoom::point2d::{Dimensions, Point2dInt};

const DIMS: Dimensions = Dimensions::new(160, 96);

fn service(seed: u64) -> (FilterSettingsService, GoomRand) {
    let mut rand = GoomRand::with_seed(seed);
    let service = FilterSettingsService::new(DIMS, &mut rand, ImageDisplacementList::builtin());
    (service, rand)
}

fn edge_midpoints(service: &FilterSettingsService) -> Vec<Point2dInt> {
    [
        ZoomMidpointEvent::Bottom,
        ZoomMidpointEvent::Top,
        ZoomMidpointEvent::Left,
        ZoomMidpointEvent::Right,
    ]
    .into_iter()
    .map(|event| service.midpoint_for(event))
    .collect()
}

// ── Lifecycle ───────────────────────────────────────────────────────────────

#[test]
fn start_marks_settings_changed() {
    let (mut service, mut rand) = service(1);
    assert!(!service.has_changed());
    service.start(&mut rand);
    assert!(service.has_changed());
    assert_eq!(service.filter_effects_settings().filter_mode, service.current_filter_mode());

    service.notify_updated_filter_effects_settings();
    assert!(!service.has_changed());
}

#[test]
fn new_cycle_advances_the_lerp() {
    let (mut service, mut rand) = service(2);
    service.start(&mut rand);
    service.reset_transform_buffer_lerp_data();
    assert_eq!(service.filter_settings().transform_buffer_lerp_data.lerp_factor(), 0.0);
    service.new_cycle();
    let t = service.filter_settings().transform_buffer_lerp_data.lerp_factor();
    assert!((t - DEFAULT_TRAN_LERP_INCREMENT).abs() < 1e-6);

    service.set_transform_buffer_lerp_to_end();
    assert!(service.filter_settings().transform_buffer_lerp_data.is_at_end());
}

#[test]
fn lerp_increment_can_be_scaled_and_reset() {
    let (mut service, _) = service(3);
    service.set_transform_buffer_lerp_increment(0.01);
    service.multiply_transform_buffer_lerp_increment(2.0);
    assert!((service.filter_settings().transform_buffer_lerp_data.increment() - 0.02).abs() < 1e-6);
    service.set_default_transform_buffer_lerp_increment();
    assert_eq!(
        service.filter_settings().transform_buffer_lerp_data.increment(),
        DEFAULT_TRAN_LERP_INCREMENT
    );
}

#[test]
fn mode_change_is_reported_until_the_next_cycle() {
    let (mut service, mut rand) = service(4);
    service.set_filter_mode(ZoomFilterMode::Scrunch, &mut rand);
    assert!(service.has_filter_mode_changed_since_last_update());
    assert_eq!(service.current_filter_mode_name(), ZoomFilterMode::Scrunch.name());
    assert_eq!(service.previous_filter_mode_name(), ZoomFilterMode::Normal.name());
    service.new_cycle();
    assert!(!service.has_filter_mode_changed_since_last_update());
}

// ── Mode selection ──────────────────────────────────────────────────────────

#[test]
fn siblings_never_follow_each_other() {
    let (mut service, mut rand) = service(5);
    service.start(&mut rand);
    for _ in 0..500 {
        let previous = service.current_filter_mode();
        service.set_new_random_filter(&mut rand);
        let next = service.current_filter_mode();
        assert_eq!(successor_multiplier(previous, next), 1.0, "{previous:?} -> {next:?}");
    }
}

#[test]
fn image_mode_has_no_weight_without_images() {
    let mut rand = GoomRand::with_seed(6);
    let service = FilterSettingsService::new(DIMS, &mut rand, ImageDisplacementList::default());
    assert_eq!(service.filter_mode_weights().weight(ZoomFilterMode::ImageDisplacement), 0.0);

    let (with_images, _) = self::service(6);
    assert!(with_images.filter_mode_weights().weight(ZoomFilterMode::ImageDisplacement) > 0.0);
}

#[test]
fn hypercos_modes_force_their_overlay() {
    let (mut service, mut rand) = service(7);
    let cases = [
        (ZoomFilterMode::Hypercos0, HypercosOverlayMode::Mode0),
        (ZoomFilterMode::Hypercos1, HypercosOverlayMode::Mode1),
        (ZoomFilterMode::Hypercos2, HypercosOverlayMode::Mode2),
        (ZoomFilterMode::Hypercos3, HypercosOverlayMode::Mode3),
    ];
    for (mode, overlay) in cases {
        service.set_filter_mode(mode, &mut rand);
        let settings = service.filter_effects_settings();
        assert_eq!(settings.after_effects.hypercos_overlay_mode, overlay);
        assert!(settings.after_effects.is_active(AfterEffectsType::Hypercos));
        assert!(matches!(settings.zoom_adjustment_effect, ZoomAdjustmentEffect::Uniform));
    }
}

#[test]
fn normal_mode_never_rotates() {
    let (mut service, mut rand) = service(8);
    for _ in 0..50 {
        service.set_filter_mode(ZoomFilterMode::Normal, &mut rand);
        let after_effects = &service.filter_effects_settings().after_effects;
        assert!(!after_effects.is_active(AfterEffectsType::Rotation));
        service.notify_updated_filter_effects_settings();
        for _ in 0..120 {
            service.new_cycle();
        }
    }
}

// ── Midpoint ────────────────────────────────────────────────────────────────

#[test]
fn amulet_midpoint_is_centred() {
    let (mut service, mut rand) = service(9);
    for _ in 0..50 {
        service.set_filter_mode(ZoomFilterMode::Amulet, &mut rand);
        assert_eq!(service.filter_effects_settings().zoom_midpoint, DIMS.centre_point());
        service.change_milieu(&mut rand);
        assert_eq!(service.filter_effects_settings().zoom_midpoint, DIMS.centre_point());
    }
}

#[test]
fn wave_modes_never_use_edge_midpoints() {
    let (mut service, mut rand) = service(10);
    let edges = edge_midpoints(&service);
    let waves = [
        ZoomFilterMode::WaveSqDistAngle0,
        ZoomFilterMode::WaveSqDistAngle1,
        ZoomFilterMode::WaveAtanAngle0,
        ZoomFilterMode::WaveAtanAngle1,
    ];
    for _ in 0..100 {
        for mode in waves {
            service.set_filter_mode(mode, &mut rand);
            let midpoint = service.filter_effects_settings().zoom_midpoint;
            assert!(!edges.contains(&midpoint), "{mode:?} used edge midpoint {midpoint:?}");
            service.change_milieu(&mut rand);
            let midpoint = service.filter_effects_settings().zoom_midpoint;
            assert!(!edges.contains(&midpoint), "{mode:?} milieu used edge {midpoint:?}");
        }
    }
}

#[test]
fn midpoint_events_land_on_the_screen() {
    let (service, _) = service(11);
    assert_eq!(service.midpoint_for(ZoomMidpointEvent::Centre), Point2dInt::new(80, 48));
    assert_eq!(service.midpoint_for(ZoomMidpointEvent::Top), Point2dInt::new(80, 1));
    assert_eq!(service.midpoint_for(ZoomMidpointEvent::Right), Point2dInt::new(158, 48));
    assert_eq!(service.midpoint_for(ZoomMidpointEvent::TopRightQuarter), Point2dInt::new(120, 24));
}

// ── Milieu ──────────────────────────────────────────────────────────────────

#[test]
fn change_milieu_stays_in_range() {
    let (mut service, mut rand) = service(12);
    service.start(&mut rand);
    for _ in 0..500 {
        service.change_milieu(&mut rand);
        assert!(service.has_changed());
        let s = service.filter_effects_settings();
        assert!(s.max_zoom_adjustment >= 0.5 * MAX_MAX_ZOOM_ADJUSTMENT - 1e-4);
        assert!(s.max_zoom_adjustment <= MAX_MAX_ZOOM_ADJUSTMENT + 1e-4);
        assert!(
            s.base_zoom_adjustment_multiplier == 1.0
                || BASE_ZOOM_ADJUSTMENT_MULTIPLIER_RANGE.contains(s.base_zoom_adjustment_multiplier)
        );
        assert!(AFTER_EFFECTS_VELOCITY_MULTIPLIER_RANGE.contains(s.after_effects_velocity_multiplier));
        let m = &s.multiplier_effect;
        if m.is_active {
            assert!(MULTIPLIER_EFFECT_FREQ_RANGE.contains(m.x_frequency));
            assert!(MULTIPLIER_EFFECT_AMPLITUDE_RANGE.contains(m.y_amplitude));
        }
        assert!((0.0..=1.0).contains(&m.lerp_to_coords_t));
    }
}

// ── Speed ───────────────────────────────────────────────────────────────────

#[test]
fn vitesse_changes_mark_settings_changed() {
    let (mut service, mut rand) = service(13);
    service.start(&mut rand);
    service.notify_updated_filter_effects_settings();
    service.vitesse_mut().go_slower_by(1000);
    assert!(service.has_changed());
    assert_eq!(service.vitesse().vitesse(), Vitesse::STOP_SPEED);
}

// ── Rotation controls ───────────────────────────────────────────────────────

fn service_with_rotation() -> (FilterSettingsService, GoomRand) {
    let (mut service, mut rand) = service(14);
    for _ in 0..200 {
        service.set_filter_mode(ZoomFilterMode::Amulet, &mut rand);
        if service
            .filter_effects_settings()
            .after_effects
            .is_active(AfterEffectsType::Rotation)
        {
            service.notify_updated_filter_effects_settings();
            return (service, rand);
        }
        service.notify_updated_filter_effects_settings();
        for _ in 0..200 {
            service.new_cycle();
        }
    }
    panic!("rotation never turned on");
}

#[test]
fn rotation_controls_queue_adjustments() {
    let (mut service, _) = service_with_rotation();

    service.multiply_rotation(1.5);
    assert!(service.has_changed());
    let adjustments = service.filter_effects_settings().after_effects.rotation_adjustments;
    assert_eq!(adjustments.adjustment_type(), RotationAdjustmentType::InsteadOfRandom);
    assert_eq!(adjustments.multiply_factor(), 1.5);

    service.toggle_rotation_direction();
    assert!(service.filter_effects_settings().after_effects.rotation_adjustments.is_toggle());

    service.notify_updated_filter_effects_settings();
    let adjustments = service.filter_effects_settings().after_effects.rotation_adjustments;
    assert_eq!(adjustments.adjustment_type(), RotationAdjustmentType::None);

    service.turn_off_rotation();
    assert!(service.has_changed());
    assert!(
        !service
            .filter_effects_settings()
            .after_effects
            .is_active(AfterEffectsType::Rotation)
    );
}

#[test]
fn rotation_controls_ignore_inactive_rotation() {
    let (mut service, mut rand) = service(15);
    service.set_filter_mode(ZoomFilterMode::Normal, &mut rand);
    service.notify_updated_filter_effects_settings();
    service.multiply_rotation(2.0);
    service.toggle_rotation_direction();
    service.turn_off_rotation();
    assert!(!service.has_changed());
}

// ── Frame driver ────────────────────────────────────────────────────────────

#[test]
fn zoom_filter_fx_pushes_settings_once() {
    use goom_zoom::parallel::Parallel;
    use goom_zoom::zoom_filter_fx::ZoomFilterFx;

    let dims = Dimensions::new(32, 24);
    let mut rand = GoomRand::with_seed(16);
    let mut fx = ZoomFilterFx::new(dims, Parallel::new(1), ImageDisplacementList::builtin(), &mut rand);
    fx.start(&mut rand);
    assert!(!fx.settings_service().has_changed());
    assert!(!fx.update_filter_settings(&mut rand));

    fx.set_filter_mode(Some(ZoomFilterMode::Scrunch), &mut rand);
    assert!(fx.update_filter_settings(&mut rand));
    assert!(!fx.update_filter_settings(&mut rand));

    let src = vec![[90, 60, 30, 255]; dims.size()];
    let mut dst = vec![[0; 4]; dims.size()];
    fx.zoom_frame(&src, &mut dst);
    assert!(dst.iter().all(|p| p[3] == 255));
    assert!(fx.settings_service().filter_settings().transform_buffer_lerp_data.lerp_factor() > 0.0);
    assert!(fx.name_value_params().iter().any(|(name, _)| name.contains("filter mode")));
}
