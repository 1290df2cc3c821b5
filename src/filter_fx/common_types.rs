use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::point2d::Vec2dFlt;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Amplitude {
    pub x: f32,
    pub y: f32,
}

impl Amplitude {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrequencyFactor {
    pub x: f32,
    pub y: f32,
}

impl FrequencyFactor {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Per-pixel input handed to each after-effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordsAndVelocity {
    pub coords: NormalizedCoords,
    pub velocity: Vec2dFlt,
}

pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;
pub const SMALL_FLOAT: f32 = 0.000_01;
