use crate::point2d::{Dimensions, Point2dFlt, Point2dInt, Vec2dFlt};
use std::ops::{Add, Mul, Sub};

pub const MIN_COORD: f32 = -2.0;
pub const MAX_COORD: f32 = 2.0;
pub const COORD_WIDTH: f32 = MAX_COORD - MIN_COORD;

/// A point in the resolution independent filter space, centred on the screen middle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedCoords {
    x: f32,
    y: f32,
}

impl NormalizedCoords {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn to_vec(self) -> Vec2dFlt {
        Vec2dFlt::new(self.x, self.y)
    }

    pub fn sq_distance_from_zero(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn sq_distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vec2dFlt> for NormalizedCoords {
    fn from(v: Vec2dFlt) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Add for NormalizedCoords {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<Vec2dFlt> for NormalizedCoords {
    type Output = Self;
    fn add(self, rhs: Vec2dFlt) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for NormalizedCoords {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<Vec2dFlt> for NormalizedCoords {
    type Output = Self;
    fn sub(self, rhs: Vec2dFlt) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for NormalizedCoords {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2dFlt> for NormalizedCoords {
    type Output = Self;
    fn mul(self, rhs: Vec2dFlt) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

/// Maps screen pixels to normalized coords and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedCoordsConverter {
    x_ratio_screen_to_norm: f32,
    y_ratio_screen_to_norm: f32,
}

impl NormalizedCoordsConverter {
    /// With `do_not_scale` both axes share the ratio of the longer side, so circles stay
    /// round on non-square screens.
    pub fn new(dimensions: Dimensions, do_not_scale: bool) -> Self {
        assert!(
            dimensions.width > 1 && dimensions.height > 1,
            "converter needs at least 2x2 pixels, got {}x{}",
            dimensions.width,
            dimensions.height
        );
        let w_minus_1 = (dimensions.width - 1) as f32;
        let h_minus_1 = (dimensions.height - 1) as f32;
        if do_not_scale {
            let ratio = COORD_WIDTH / w_minus_1.max(h_minus_1);
            return Self {
                x_ratio_screen_to_norm: ratio,
                y_ratio_screen_to_norm: ratio,
            };
        }
        Self {
            x_ratio_screen_to_norm: COORD_WIDTH / w_minus_1,
            y_ratio_screen_to_norm: COORD_WIDTH / h_minus_1,
        }
    }

    pub fn x_ratio_screen_to_norm(&self) -> f32 {
        self.x_ratio_screen_to_norm
    }

    pub fn y_ratio_screen_to_norm(&self) -> f32 {
        self.y_ratio_screen_to_norm
    }

    pub fn to_normalized(&self, point: Point2dInt) -> NormalizedCoords {
        self.flt_to_normalized(point.to_flt())
    }

    pub fn flt_to_normalized(&self, point: Point2dFlt) -> NormalizedCoords {
        NormalizedCoords::new(
            MIN_COORD + self.x_ratio_screen_to_norm * point.x,
            MIN_COORD + self.y_ratio_screen_to_norm * point.y,
        )
    }

    pub fn to_screen_flt(&self, coords: NormalizedCoords) -> Point2dFlt {
        Point2dFlt::new(
            (coords.x() - MIN_COORD) / self.x_ratio_screen_to_norm,
            (coords.y() - MIN_COORD) / self.y_ratio_screen_to_norm,
        )
    }

    pub fn to_image_point(&self, coords: NormalizedCoords) -> Point2dInt {
        self.to_screen_flt(coords).to_int()
    }

    /// Converts a screen-space delta (not a position) into normalized units.
    pub fn screen_delta_to_normalized(&self, dx: f32, dy: f32) -> Vec2dFlt {
        Vec2dFlt::new(
            dx * self.x_ratio_screen_to_norm,
            dy * self.y_ratio_screen_to_norm,
        )
    }
}
