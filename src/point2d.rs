use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2dInt {
    pub x: i32,
    pub y: i32,
}

impl Point2dInt {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_flt(self) -> Point2dFlt {
        Point2dFlt::new(self.x as f32, self.y as f32)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2dFlt {
    pub x: f32,
    pub y: f32,
}

impl Point2dFlt {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Nearest integer point, ties away from zero.
    pub fn to_int(self) -> Point2dInt {
        Point2dInt::new(self.x.round() as i32, self.y.round() as i32)
    }
}

/// Velocity / displacement vector in normalized space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2dFlt {
    pub x: f32,
    pub y: f32,
}

impl Vec2dFlt {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2dFlt {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2dFlt {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2dFlt {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2dFlt {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul for Vec2dFlt {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn centre_point(self) -> Point2dInt {
        Point2dInt::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
