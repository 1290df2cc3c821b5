use crate::filter_fx::image_displacement::{ImageDisplacement, ImageDisplacementList};
use crate::filter_fx::normalized_coords::NormalizedCoords;
use crate::goom_rand::RandomSource;
use crate::name_value::{NameValuePairs, get_pair};
use crate::point2d::Vec2dFlt;

/// Pushes the zoom velocity along a displacement bitmap.
#[derive(Clone, Debug, Default)]
pub struct ImageVelocity {
    image: Option<ImageDisplacement>,
}

impl ImageVelocity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&ImageDisplacement> {
        self.image.as_ref()
    }

    /// Picks a bitmap and rolls its mapping. With no bitmaps the effect stays inert.
    pub fn set_random_params(
        &mut self,
        rand: &mut dyn RandomSource,
        images: &mut ImageDisplacementList,
    ) {
        images.set_random_image_displacement(rand);
        self.image = images.current_mut().map(|image| {
            image.set_random_params(rand);
            image.clone()
        });
    }

    pub fn velocity(&self, coords: NormalizedCoords) -> Vec2dFlt {
        match &self.image {
            Some(image) => image.displacement_vector(coords),
            None => Vec2dFlt::ZERO,
        }
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        match &self.image {
            Some(image) => image.name_value_params(group),
            None => vec![get_pair(group, "image velocity", "no image")],
        }
    }
}
