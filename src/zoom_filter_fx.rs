//! Frame driver tying the settings service, the zoom vector and the transform buffers
//! together.

use crate::filter_buffers::{Pixel, ZoomFilterBuffers};
use crate::filter_fx::image_displacement::ImageDisplacementList;
use crate::filter_fx::settings::ZoomFilterMode;
use crate::filter_fx::settings_service::FilterSettingsService;
use crate::filter_fx::zoom_vector::FilterZoomVector;
use crate::goom_rand::RandomSource;
use crate::name_value::{NameValuePairs, move_name_value_pairs};
use crate::parallel::Parallel;
use crate::point2d::Dimensions;
use std::time::Instant;

pub struct ZoomFilterFx {
    parallel: Parallel,
    settings_service: FilterSettingsService,
    zoom_vector: FilterZoomVector,
    buffers: ZoomFilterBuffers,
    frames_since_update: u64,
}

impl ZoomFilterFx {
    pub fn new(
        dimensions: Dimensions,
        parallel: Parallel,
        images: ImageDisplacementList,
        rand: &mut dyn RandomSource,
    ) -> Self {
        Self {
            parallel,
            settings_service: FilterSettingsService::new(dimensions, rand, images.clone()),
            zoom_vector: FilterZoomVector::new(dimensions.width, images),
            buffers: ZoomFilterBuffers::new(dimensions),
            frames_since_update: 0,
        }
    }

    pub fn settings_service(&self) -> &FilterSettingsService {
        &self.settings_service
    }

    pub fn settings_service_mut(&mut self) -> &mut FilterSettingsService {
        &mut self.settings_service
    }

    pub fn zoom_vector(&self) -> &FilterZoomVector {
        &self.zoom_vector
    }

    pub fn buffers(&self) -> &ZoomFilterBuffers {
        &self.buffers
    }

    pub fn start(&mut self, rand: &mut dyn RandomSource) {
        self.buffers.start();
        self.settings_service.start(rand);
        self.update_filter_settings(rand);
    }

    pub fn set_filter_mode(&mut self, mode: Option<ZoomFilterMode>, rand: &mut dyn RandomSource) {
        match mode {
            Some(mode) => self.settings_service.set_filter_mode(mode, rand),
            None => self.settings_service.set_new_random_filter(rand),
        }
    }

    /// Pushes a changed settings snapshot into the zoom vector and rebuilds the destination
    /// transform. Returns whether anything was pushed.
    pub fn update_filter_settings(&mut self, rand: &mut dyn RandomSource) -> bool {
        if !self.settings_service.has_changed() {
            return false;
        }
        let settings = self.settings_service.filter_effects_settings().clone();
        self.zoom_vector.set_filter_effects_settings(&settings, rand);
        self.buffers.set_buff_midpoint(settings.zoom_midpoint);
        self.buffers.set_noise_seed(noise_seed(rand));

        let started = Instant::now();
        self.buffers.update(&self.zoom_vector, &self.parallel);
        log::debug!(
            "rebuilt transform buffers in {:.2} ms after {} frames",
            started.elapsed().as_secs_f32() * 1000.0,
            self.frames_since_update
        );

        self.settings_service.reset_transform_buffer_lerp_data();
        self.settings_service.notify_updated_filter_effects_settings();
        self.frames_since_update = 0;
        true
    }

    /// Resamples `src` into `dst` and advances the per-frame state.
    pub fn zoom_frame(&mut self, src: &[Pixel], dst: &mut [Pixel]) {
        let lerp_value = self
            .settings_service
            .filter_settings()
            .transform_buffer_lerp_data
            .tran_lerp_value();
        self.buffers.set_tran_lerp_factor(lerp_value);
        self.buffers.zoom(&self.parallel, src, dst);
        self.settings_service.new_cycle();
        self.frames_since_update += 1;
    }

    pub fn name_value_params(&self) -> NameValuePairs {
        let mut pairs = self.zoom_vector.name_value_params();
        move_name_value_pairs(self.zoom_vector.after_effects_name_value_params(), &mut pairs);
        pairs
    }
}

fn noise_seed(rand: &mut dyn RandomSource) -> u64 {
    let high = u64::from(rand.rand_u32_in(0, u32::MAX));
    let low = u64::from(rand.rand_u32_in(0, u32::MAX));
    (high << 32) | low
}
