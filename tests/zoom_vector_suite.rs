use goom_zoom::filter_fx::after_effects::AfterEffectsType;
use goom_zoom::filter_fx::image_displacement::ImageDisplacementList;
use goom_zoom::filter_fx::normalized_coords::NormalizedCoords;
use goom_zoom::filter_fx::settings::{FilterEffectsSettings, MultiplierEffectSettings, ZoomFilterMode};
use goom_zoom::filter_fx::settings_service::FilterSettingsService;
use goom_zoom::filter_fx::zoom_vector::{BASE_SPEED_COEFF_FACTOR, FilterZoomVector, multiplier_effect};
use goom_zoom::goom_rand::GoomRand;
use goom_zoom::point2d::{Dimensions, Point2dInt, Vec2dFlt};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn uniform_settings() -> FilterEffectsSettings {
    FilterEffectsSettings::new(Point2dInt::new(32, 32))
}

// ── Base speed ──────────────────────────────────────────────────────────────

#[test]
fn base_speed_follows_vitesse_and_multiplier() {
    let mut settings = uniform_settings();
    settings.vitesse.set_vitesse(0);
    settings.vitesse.set_reverse(false);
    settings.base_zoom_adjustment_multiplier = 2.0;

    let mut zoom_vector = FilterZoomVector::new(64, ImageDisplacementList::default());
    zoom_vector.set_filter_effects_settings(&settings, &mut GoomRand::with_seed(1));

    // Full speed forwards: relative speed -1, so the coefficient collapses to zero.
    assert_eq!(zoom_vector.base_speed_coeffs(), Vec2dFlt::ZERO);

    settings.vitesse.set_reverse(true);
    zoom_vector.set_filter_effects_settings(&settings, &mut GoomRand::with_seed(1));
    let expected = BASE_SPEED_COEFF_FACTOR * 2.0 * 2.0;
    assert!(close(zoom_vector.base_speed_coeffs().x, expected));
    assert!(close(zoom_vector.base_speed_coeffs().y, expected));
}

// ── Zoom point ──────────────────────────────────────────────────────────────

#[test]
fn uniform_zoom_point_formula() {
    let mut settings = uniform_settings();
    settings.vitesse.set_vitesse(64);
    settings.vitesse.set_reverse(true);
    let mut zoom_vector = FilterZoomVector::new(64, ImageDisplacementList::default());
    zoom_vector.set_filter_effects_settings(&settings, &mut GoomRand::with_seed(2));

    let base = zoom_vector.base_speed_coeffs().x;
    assert!(close(base, BASE_SPEED_COEFF_FACTOR * 1.5));
    let coords = NormalizedCoords::new(0.8, -0.4);
    let point = zoom_vector.zoom_point(coords);
    assert!(close(point.x(), coords.x() * (1.0 - base)));
    assert!(close(point.y(), coords.y() * (1.0 - base)));
}

#[test]
fn origin_is_a_fixed_point_without_after_effects() {
    let zoom_vector = FilterZoomVector::new(64, ImageDisplacementList::default());
    assert_eq!(zoom_vector.zoom_point(NormalizedCoords::ORIGIN), NormalizedCoords::ORIGIN);
}

#[test]
fn zoom_point_is_deterministic_after_noise_free_roll() {
    let dims = Dimensions::new(96, 64);
    let mut rand = GoomRand::with_seed(31);
    let mut service = FilterSettingsService::new(dims, &mut rand, ImageDisplacementList::builtin());
    service.start(&mut rand);

    let mut settings = service.filter_effects_settings().clone();
    settings.after_effects.is_active[AfterEffectsType::Noise] = false;

    let mut a = FilterZoomVector::new(dims.width, ImageDisplacementList::builtin());
    let mut b = FilterZoomVector::new(dims.width, ImageDisplacementList::builtin());
    a.set_filter_effects_settings(&settings, &mut GoomRand::with_seed(5));
    b.set_filter_effects_settings(&settings, &mut GoomRand::with_seed(5));

    for i in -4..=4 {
        for j in -4..=4 {
            let coords = NormalizedCoords::new(i as f32 * 0.45, j as f32 * 0.45);
            let pa = a.zoom_point(coords);
            assert!(pa.is_finite(), "{coords:?} gave {pa:?}");
            assert_eq!(pa, b.zoom_point(coords));
        }
    }
}

#[test]
fn every_mode_produces_finite_zoom_points() {
    let dims = Dimensions::new(64, 48);
    let mut rand = GoomRand::with_seed(77);
    let mut service = FilterSettingsService::new(dims, &mut rand, ImageDisplacementList::builtin());
    let mut zoom_vector = FilterZoomVector::new(dims.width, ImageDisplacementList::builtin());
    for mode in ZoomFilterMode::ALL {
        for _ in 0..5 {
            service.set_filter_mode(mode, &mut rand);
            service.change_milieu(&mut rand);
            zoom_vector.set_filter_effects_settings(service.filter_effects_settings(), &mut rand);
            for i in -5..=5 {
                for j in -5..=5 {
                    let coords = NormalizedCoords::new(i as f32 * 0.4, j as f32 * 0.4);
                    let point = zoom_vector.zoom_point(coords);
                    assert!(point.is_finite(), "{mode:?} at {coords:?} gave {point:?}");
                }
            }
        }
    }
}

// ── After-effects ───────────────────────────────────────────────────────────

fn close_rel(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * (1.0 + b.abs())
}

/// Uniform zoom with the given after-effects switched on at half strength.
fn vectors_with_after_effects(
    effects: &[AfterEffectsType],
) -> (FilterZoomVector, FilterZoomVector) {
    let mut settings = uniform_settings();
    settings.vitesse.set_vitesse(64);
    settings.vitesse.set_reverse(true);
    settings.after_effects_velocity_multiplier = 0.5;

    let mut plain = FilterZoomVector::new(64, ImageDisplacementList::default());
    plain.set_filter_effects_settings(&settings, &mut GoomRand::with_seed(11));

    for &effect in effects {
        settings.after_effects.is_active[effect] = true;
    }
    let mut with_effects = FilterZoomVector::new(64, ImageDisplacementList::default());
    with_effects.set_filter_effects_settings(&settings, &mut GoomRand::with_seed(11));
    (plain, with_effects)
}

fn sample_coords() -> impl Iterator<Item = NormalizedCoords> {
    [(0.8, -0.4), (-0.3, 0.6), (0.1, 0.1), (-1.2, -0.9)]
        .into_iter()
        .map(|(x, y)| NormalizedCoords::new(x, y))
}

#[test]
fn tan_after_effect_is_scaled_by_the_velocity_multiplier() {
    let (plain, zoom_vector) = vectors_with_after_effects(&[AfterEffectsType::Tan]);
    let tan = zoom_vector.after_effects().tan();

    for coords in sample_coords() {
        let filter_point = plain.zoom_point(coords);
        let velocity = (coords - filter_point).to_vec();
        let contribution = tan.velocity(coords.sq_distance_from_zero(), velocity);

        let point = zoom_vector.zoom_point(coords);
        assert!(close_rel(point.x(), filter_point.x() - 0.5 * contribution.x), "{coords:?}");
        assert!(close_rel(point.y(), filter_point.y() - 0.5 * contribution.y), "{coords:?}");
    }
}

#[test]
fn enabled_after_effects_are_summed_from_the_same_velocity() {
    let (plain, zoom_vector) =
        vectors_with_after_effects(&[AfterEffectsType::Rotation, AfterEffectsType::Tan]);
    let effects = zoom_vector.after_effects();
    assert_ne!(effects.rotation().rotate_speed(), 0.0);

    for coords in sample_coords() {
        let filter_point = plain.zoom_point(coords);
        let velocity = (coords - filter_point).to_vec();
        let rotation = effects.rotation().velocity(velocity);
        let tan = effects.tan().velocity(coords.sq_distance_from_zero(), velocity);

        let point = zoom_vector.zoom_point(coords);
        let expected_x = filter_point.x() - 0.5 * (rotation.x + tan.x);
        let expected_y = filter_point.y() - 0.5 * (rotation.y + tan.y);
        assert!(close_rel(point.x(), expected_x), "{coords:?}: {} vs {expected_x}", point.x());
        assert!(close_rel(point.y(), expected_y), "{coords:?}: {} vs {expected_y}", point.y());
    }
}

// ── Multiplier effect ───────────────────────────────────────────────────────

#[test]
fn active_multiplier_ripples_around_one() {
    let settings = MultiplierEffectSettings {
        is_active: true,
        x_frequency: 2.0,
        y_frequency: 2.0,
        x_amplitude: 0.03,
        y_amplitude: 0.03,
        lerp_to_coords_t: 1.0,
    };
    let coords = NormalizedCoords::new(0.25, 0.0);
    let m = multiplier_effect(&settings, coords, Vec2dFlt::new(9.0, 9.0));
    assert!(close(m.x, 1.0 - 0.03 * 0.5f32.sin()));
    assert!(close(m.y, 1.0 - 0.03));
}

#[test]
fn name_value_params_cover_mode_and_after_effects() {
    let zoom_vector = FilterZoomVector::new(64, ImageDisplacementList::default());
    let pairs = zoom_vector.name_value_params();
    assert!(pairs.iter().any(|(name, _)| name.contains("filter mode")));
    assert!(!zoom_vector.after_effects_name_value_params().is_empty());
}
