use crate::filter_fx::normalized_coords::{COORD_WIDTH, NormalizedCoords};
use crate::goom_rand::{NumberRange, RandomSource};
use crate::point2d::{Point2dFlt, Vec2dFlt, lerp};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub bottom_left: Point2dFlt,
    pub top_right: Point2dFlt,
}

impl Rectangle {
    pub fn width(&self) -> f32 {
        self.top_right.x - self.bottom_left.x
    }

    pub fn height(&self) -> f32 {
        self.top_right.y - self.bottom_left.y
    }
}

/// Region of normalized space an adjustment effect is scoped to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    rect: Option<Rectangle>,
}

impl Viewport {
    pub const fn whole() -> Self {
        Self { rect: None }
    }

    pub fn new(bottom_left: Point2dFlt, top_right: Point2dFlt) -> Self {
        assert!(
            bottom_left.x < top_right.x && bottom_left.y < top_right.y,
            "degenerate viewport {bottom_left:?} .. {top_right:?}"
        );
        Self {
            rect: Some(Rectangle {
                bottom_left,
                top_right,
            }),
        }
    }

    pub fn is_whole(&self) -> bool {
        self.rect.is_none()
    }

    pub fn rect(&self) -> Option<Rectangle> {
        self.rect
    }

    /// Maps the whole normalized space onto this viewport's rectangle.
    pub fn viewport_coords(&self, coords: NormalizedCoords) -> NormalizedCoords {
        let Some(rect) = self.rect else {
            return coords;
        };
        let x_scale = rect.width() / COORD_WIDTH;
        let y_scale = rect.height() / COORD_WIDTH;
        let x_centre = 0.5 * (rect.bottom_left.x + rect.top_right.x);
        let y_centre = 0.5 * (rect.bottom_left.y + rect.top_right.y);
        NormalizedCoords::new(
            x_centre + x_scale * coords.x(),
            y_centre + y_scale * coords.y(),
        )
    }

    pub fn contains(&self, coords: NormalizedCoords) -> bool {
        let Some(rect) = self.rect else {
            return true;
        };
        coords.x() >= rect.bottom_left.x
            && coords.x() <= rect.top_right.x
            && coords.y() >= rect.bottom_left.y
            && coords.y() <= rect.top_right.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectBounds {
    pub min_max_x_min: NumberRange<f32>,
    pub min_max_x_max: NumberRange<f32>,
    pub min_max_y_min: NumberRange<f32>,
    pub min_max_y_max: NumberRange<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideBounds {
    pub min_max_width: NumberRange<f32>,
    pub min_max_height: NumberRange<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBounds {
    pub min_side_length: f32,
    pub prob_use_centred_sides: f32,
    pub rect: RectBounds,
    pub sides: SideBounds,
}

pub const MARGIN: f32 = 0.05;
const TWO_MARGINS: f32 = 2.0 * MARGIN;

impl Default for ViewportBounds {
    fn default() -> Self {
        let max_side = COORD_WIDTH - TWO_MARGINS;
        Self {
            min_side_length: 1.5,
            prob_use_centred_sides: 0.5,
            rect: RectBounds {
                min_max_x_min: NumberRange::new(-2.0 + MARGIN, -0.5),
                min_max_x_max: NumberRange::new(0.5, 2.0 - MARGIN),
                min_max_y_min: NumberRange::new(-2.0 + MARGIN, -0.5),
                min_max_y_max: NumberRange::new(0.5, 2.0 - MARGIN),
            },
            sides: SideBounds {
                min_max_width: NumberRange::new(1.5, max_side),
                min_max_height: NumberRange::new(1.5, max_side),
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct RandomViewport {
    bounds: ViewportBounds,
    prob_no_viewport: f32,
    prob_square_viewport: f32,
}

impl RandomViewport {
    pub const DEFAULT_PROB_NO_VIEWPORT: f32 = 0.1;
    pub const DEFAULT_PROB_SQUARE_VIEWPORT: f32 = 0.8;

    pub fn new(bounds: ViewportBounds) -> Self {
        assert!(bounds.min_side_length > 0.0, "viewport min side must be positive");
        Self {
            bounds,
            prob_no_viewport: Self::DEFAULT_PROB_NO_VIEWPORT,
            prob_square_viewport: Self::DEFAULT_PROB_SQUARE_VIEWPORT,
        }
    }

    pub fn bounds(&self) -> &ViewportBounds {
        &self.bounds
    }

    pub fn prob_no_viewport(&self) -> f32 {
        self.prob_no_viewport
    }

    pub fn set_prob_no_viewport(&mut self, prob: f32) {
        self.prob_no_viewport = prob;
    }

    pub fn prob_square_viewport(&self) -> f32 {
        self.prob_square_viewport
    }

    pub fn set_prob_square_viewport(&mut self, prob: f32) {
        self.prob_square_viewport = prob;
    }

    pub fn random_viewport(&self, rand: &mut dyn RandomSource) -> Viewport {
        if rand.probability_of(self.prob_no_viewport) {
            return Viewport::whole();
        }
        if rand.probability_of(self.bounds.prob_use_centred_sides) {
            return self.random_centred_viewport(rand);
        }
        self.random_uncentred_viewport(rand)
    }

    fn random_centred_viewport(&self, rand: &mut dyn RandomSource) -> Viewport {
        let square = rand.probability_of(self.prob_square_viewport);
        let width = rand.rand_in_range(self.bounds.sides.min_max_width);
        let height = if square {
            width
        } else {
            rand.rand_in_range(self.bounds.sides.min_max_height)
        };
        let half_w = 0.5 * width;
        let half_h = 0.5 * height;
        Viewport::new(
            Point2dFlt::new(-half_w, -half_h),
            Point2dFlt::new(half_w, half_h),
        )
    }

    fn random_uncentred_viewport(&self, rand: &mut dyn RandomSource) -> Viewport {
        let square = rand.probability_of(self.prob_square_viewport);
        let rect = &self.bounds.rect;
        let min_side = self.bounds.min_side_length;

        let x_min = rand.rand_in_range(rect.min_max_x_min);
        let x_max = (x_min + min_side).max(rand.rand_in_range(rect.min_max_x_max));
        let (y_min, y_max) = if square {
            (x_min, x_max)
        } else {
            let y_min = rand.rand_in_range(rect.min_max_y_min);
            let y_max = (y_min + min_side).max(rand.rand_in_range(rect.min_max_y_max));
            (y_min, y_max)
        };
        Viewport::new(Point2dFlt::new(x_min, y_min), Point2dFlt::new(x_max, y_max))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LerpToOneTs {
    pub x_lerp_t: f32,
    pub y_lerp_t: f32,
}

/// Scales `velocity` by the coords pulled towards one: `t == 1` leaves it untouched.
pub fn velocity_by_zoom_lerped_to_one(
    coords: NormalizedCoords,
    ts: LerpToOneTs,
    velocity: Vec2dFlt,
) -> Vec2dFlt {
    Vec2dFlt::new(
        lerp(coords.x(), 1.0, ts.x_lerp_t) * velocity.x,
        lerp(coords.y(), 1.0, ts.y_lerp_t) * velocity.y,
    )
}

/// Same as `velocity_by_zoom_lerped_to_one` but on absolute coords, keeping the sign.
pub fn velocity_by_zoom_lerped_to_neg_one(
    coords: NormalizedCoords,
    ts: LerpToOneTs,
    velocity: Vec2dFlt,
) -> Vec2dFlt {
    let x_abs = lerp(coords.x().abs(), 1.0, ts.x_lerp_t);
    let y_abs = lerp(coords.y().abs(), 1.0, ts.y_lerp_t);
    let x_factor = if coords.x() < 0.0 { -x_abs } else { x_abs };
    let y_factor = if coords.y() < 0.0 { -y_abs } else { y_abs };
    Vec2dFlt::new(x_factor * velocity.x, y_factor * velocity.y)
}
