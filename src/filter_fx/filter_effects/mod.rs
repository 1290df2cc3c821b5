//! Zoom-adjustment effects: one per filter mode, each producing per-axis speed coefficients.

pub mod amulet;
pub mod crystal_ball;
pub mod scrunch;
pub mod speedway;
pub mod wave;
pub mod y_only;

use crate::filter_fx::image_displacement::{ImageDisplacement, ImageDisplacementList};
use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::filter_fx::settings::ZoomFilterMode;
use crate::filter_fx::viewport::Viewport;
use crate::goom_rand::RandomSource;
use crate::name_value::{NameValuePairs, get_pair};
use crate::point2d::Vec2dFlt;

use amulet::Amulet;
use crystal_ball::{CrystalBall, CrystalBallMode};
use scrunch::Scrunch;
use speedway::{Speedway, SpeedwayMode};
use wave::{Wave, WaveMode};
use y_only::YOnly;

pub const MIN_SPEED_COEFF: f32 = -4.01;
pub const MAX_MAX_SPEED_COEFF: f32 = 4.01;

const PARAM_GROUP: &str = "ZoomAdjustment";

/// The active zoom-adjustment effect. Closed set, dispatched by `match`.
#[derive(Clone, Debug)]
pub enum ZoomAdjustmentEffect {
    Amulet(Amulet),
    CrystalBall(CrystalBall),
    ImageDisplacement(ImageDisplacement),
    Scrunch(Scrunch),
    Speedway(Speedway),
    /// Base coefficient unchanged. Used by Normal and the Hypercos modes.
    Uniform,
    Wave(Wave),
    YOnly(YOnly),
}

impl ZoomAdjustmentEffect {
    pub fn new(
        mode: ZoomFilterMode,
        rand: &mut dyn RandomSource,
        images: &mut ImageDisplacementList,
    ) -> Self {
        match mode {
            ZoomFilterMode::Amulet => Self::Amulet(Amulet::new(rand)),
            ZoomFilterMode::CrystalBall0 => {
                Self::CrystalBall(CrystalBall::new(CrystalBallMode::Mode0, rand))
            }
            ZoomFilterMode::CrystalBall1 => {
                Self::CrystalBall(CrystalBall::new(CrystalBallMode::Mode1, rand))
            }
            ZoomFilterMode::Hypercos0
            | ZoomFilterMode::Hypercos1
            | ZoomFilterMode::Hypercos2
            | ZoomFilterMode::Hypercos3
            | ZoomFilterMode::Normal => Self::Uniform,
            ZoomFilterMode::ImageDisplacement => {
                images.set_random_image_displacement(rand);
                match images.current_mut() {
                    Some(image) => {
                        image.set_random_params(rand);
                        Self::ImageDisplacement(image.clone())
                    }
                    None => {
                        log::warn!("no displacement images loaded, using a uniform zoom");
                        Self::Uniform
                    }
                }
            }
            ZoomFilterMode::Scrunch => Self::Scrunch(Scrunch::new(rand)),
            ZoomFilterMode::Speedway0 => Self::Speedway(Speedway::new(SpeedwayMode::Mode0, rand)),
            ZoomFilterMode::Speedway1 => Self::Speedway(Speedway::new(SpeedwayMode::Mode1, rand)),
            ZoomFilterMode::Speedway2 => Self::Speedway(Speedway::new(SpeedwayMode::Mode2, rand)),
            ZoomFilterMode::WaveSqDistAngle0 => Self::Wave(Wave::new(WaveMode::SqDistAngleMode0, rand)),
            ZoomFilterMode::WaveSqDistAngle1 => Self::Wave(Wave::new(WaveMode::SqDistAngleMode1, rand)),
            ZoomFilterMode::WaveAtanAngle0 => Self::Wave(Wave::new(WaveMode::AtanAngleMode0, rand)),
            ZoomFilterMode::WaveAtanAngle1 => Self::Wave(Wave::new(WaveMode::AtanAngleMode1, rand)),
            ZoomFilterMode::YOnly => Self::YOnly(YOnly::new(rand)),
        }
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        match self {
            Self::Amulet(e) => e.set_random_params(rand),
            Self::CrystalBall(e) => e.set_random_params(rand),
            Self::ImageDisplacement(e) => e.set_random_params(rand),
            Self::Scrunch(e) => e.set_random_params(rand),
            Self::Speedway(e) => e.set_random_params(rand),
            Self::Uniform => {}
            Self::Wave(e) => e.set_random_params(rand),
            Self::YOnly(e) => e.set_random_params(rand),
        }
    }

    pub fn viewport(&self) -> Viewport {
        match self {
            Self::Amulet(e) => e.viewport(),
            Self::CrystalBall(e) => e.viewport(),
            Self::Scrunch(e) => e.viewport(),
            Self::Wave(e) => e.viewport(),
            Self::ImageDisplacement(_) | Self::Speedway(_) | Self::Uniform | Self::YOnly(_) => {
                Viewport::whole()
            }
        }
    }

    /// Raw per-axis speed coefficients, before clamping.
    pub fn speed_coefficients(
        &self,
        coords: NormalizedCoords,
        sq_dist_from_zero: f32,
        base: Vec2dFlt,
    ) -> Vec2dFlt {
        match self {
            Self::Amulet(e) => e.speed_coefficients(base, sq_dist_from_zero),
            Self::CrystalBall(e) => e.speed_coefficients(base, sq_dist_from_zero),
            Self::Scrunch(e) => e.speed_coefficients(base, sq_dist_from_zero),
            Self::Speedway(e) => e.speed_coefficients(coords, sq_dist_from_zero, base),
            Self::Wave(e) => e.speed_coefficients(coords, sq_dist_from_zero, base),
            Self::YOnly(e) => e.speed_coefficients(coords, base),
            Self::ImageDisplacement(_) | Self::Uniform => base,
        }
    }

    /// Zoom adjustment vector at `coords`: clamped speed coefficients times the viewport
    /// coords, or the bitmap displacement for the image mode.
    pub fn zoom_adjustment(
        &self,
        coords: NormalizedCoords,
        base: Vec2dFlt,
        max_speed_coeff: f32,
    ) -> Vec2dFlt {
        if let Self::ImageDisplacement(image) = self {
            return image.displacement_vector(coords);
        }

        let viewport_coords = self.viewport().viewport_coords(coords);
        let sq_dist = viewport_coords.sq_distance_from_zero();
        let coeffs = self.speed_coefficients(viewport_coords, sq_dist, base);
        let clamped = Vec2dFlt::new(
            coeffs.x.clamp(MIN_SPEED_COEFF, max_speed_coeff),
            coeffs.y.clamp(MIN_SPEED_COEFF, max_speed_coeff),
        );
        clamped * viewport_coords.to_vec()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Amulet(_) => "Amulet",
            Self::CrystalBall(_) => "Crystal Ball",
            Self::ImageDisplacement(_) => "Image Displacement",
            Self::Scrunch(_) => "Scrunch",
            Self::Speedway(_) => "Speedway",
            Self::Uniform => "Uniform",
            Self::Wave(_) => "Wave",
            Self::YOnly(_) => "Y Only",
        }
    }

    pub fn name_value_params(&self) -> NameValuePairs {
        let mut pairs = vec![get_pair(PARAM_GROUP, "effect", self.name())];
        pairs.extend(match self {
            Self::Amulet(e) => e.name_value_params(PARAM_GROUP),
            Self::CrystalBall(e) => e.name_value_params(PARAM_GROUP),
            Self::ImageDisplacement(e) => e.name_value_params(PARAM_GROUP),
            Self::Scrunch(e) => e.name_value_params(PARAM_GROUP),
            Self::Speedway(e) => e.name_value_params(PARAM_GROUP),
            Self::Uniform => NameValuePairs::new(),
            Self::Wave(e) => e.name_value_params(PARAM_GROUP),
            Self::YOnly(e) => e.name_value_params(PARAM_GROUP),
        });
        if let Some(rect) = self.viewport().rect() {
            pairs.push(get_pair(
                PARAM_GROUP,
                "viewport",
                format_args!(
                    "({:.2}, {:.2})..({:.2}, {:.2})",
                    rect.bottom_left.x, rect.bottom_left.y, rect.top_right.x, rect.top_right.y
                ),
            ));
        }
        pairs
    }
}
