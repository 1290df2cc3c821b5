use crate::filter_fx::common_types::Amplitude;
use crate::filter_fx::normalized_coords::{NormalizedCoords, NormalizedCoordsConverter};
use crate::goom_rand::{NumberRange, RandomSource, random_xy_pair};
use crate::image_io::{ImageBitmap, ImageError};
use crate::name_value::{NameValuePairs, get_pair, get_xy_pair};
use crate::point2d::{Dimensions, Vec2dFlt};
use std::path::Path;
use std::sync::Arc;

pub const IMAGE_DISPLACEMENT_DIR: &str = "displacement";

const AMPLITUDE_RANGE: NumberRange<f32> = NumberRange::new(0.0025, 0.1);
const COLOR_CUTOFF_RANGE: NumberRange<f32> = NumberRange::new(0.1, 0.9);
const ZOOM_FACTOR_RANGE: NumberRange<f32> = NumberRange::new(0.1, 1.0);
const PROB_XY_AMPLITUDES_EQUAL: f32 = 0.5;
const PROB_XY_COLOR_CUTOFFS_EQUAL: f32 = 0.5;
const PROB_XY_ZOOM_FACTORS_EQUAL: f32 = 0.5;

const INITIAL_CUTOFF: f32 = 0.5;

/// Turns a bitmap's red/green channels into a displacement field.
#[derive(Clone, Debug)]
pub struct ImageDisplacement {
    name: String,
    image: Arc<ImageBitmap>,
    x_max: i32,
    y_max: i32,
    converter: NormalizedCoordsConverter,
    x_zoom_factor: f32,
    y_zoom_factor: f32,
    amplitude: Amplitude,
    x_color_cutoff: f32,
    y_color_cutoff: f32,
}

impl ImageDisplacement {
    pub fn new(name: impl Into<String>, image: Arc<ImageBitmap>) -> Self {
        let dims = Dimensions::new(image.width().max(2), image.height().max(2));
        Self {
            name: name.into(),
            x_max: image.width() as i32 - 1,
            y_max: image.height() as i32 - 1,
            converter: NormalizedCoordsConverter::new(dims, false),
            image,
            x_zoom_factor: 1.0,
            y_zoom_factor: 1.0,
            amplitude: Amplitude::new(1.0, 1.0),
            x_color_cutoff: INITIAL_CUTOFF,
            y_color_cutoff: INITIAL_CUTOFF,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amplitude(&self) -> Amplitude {
        self.amplitude
    }

    pub fn set_amplitude(&mut self, amplitude: Amplitude) {
        assert!(amplitude.x > 0.0 && amplitude.y > 0.0, "amplitude must be positive");
        self.amplitude = amplitude;
    }

    pub fn color_cutoffs(&self) -> (f32, f32) {
        (self.x_color_cutoff, self.y_color_cutoff)
    }

    pub fn set_xy_color_cutoffs(&mut self, x_cutoff: f32, y_cutoff: f32) {
        self.x_color_cutoff = x_cutoff;
        self.y_color_cutoff = y_cutoff;
    }

    pub fn zoom_factors(&self) -> (f32, f32) {
        (self.x_zoom_factor, self.y_zoom_factor)
    }

    pub fn set_zoom_factor(&mut self, x_zoom: f32, y_zoom: f32) {
        assert!(x_zoom > 0.0 && y_zoom > 0.0, "zoom factor must be positive");
        self.x_zoom_factor = x_zoom;
        self.y_zoom_factor = y_zoom;
    }

    pub fn set_random_params(&mut self, rand: &mut dyn RandomSource) {
        let (ax, ay) = random_xy_pair(rand, AMPLITUDE_RANGE, PROB_XY_AMPLITUDES_EQUAL);
        self.set_amplitude(Amplitude::new(ax, ay));
        let (cx, cy) = random_xy_pair(rand, COLOR_CUTOFF_RANGE, PROB_XY_COLOR_CUTOFFS_EQUAL);
        self.set_xy_color_cutoffs(cx, cy);
        let (zx, zy) = random_xy_pair(rand, ZOOM_FACTOR_RANGE, PROB_XY_ZOOM_FACTORS_EQUAL);
        self.set_zoom_factor(zx, zy);
    }

    /// Zero outside the bitmap: no wraparound, no edge clamping.
    pub fn displacement_vector(&self, coords: NormalizedCoords) -> Vec2dFlt {
        let zoomed = NormalizedCoords::new(
            self.x_zoom_factor * coords.x(),
            self.y_zoom_factor * coords.y(),
        );
        let p = self.converter.to_image_point(zoomed);
        if p.x < 0 || p.x > self.x_max || p.y < 0 || p.y > self.y_max {
            return Vec2dFlt::ZERO;
        }
        let [r, g, _, _] = self.image.pixel(p.x as u32, p.y as u32);
        Vec2dFlt::new(
            (r as f32 / 255.0 - self.x_color_cutoff) * self.amplitude.x,
            (g as f32 / 255.0 - self.y_color_cutoff) * self.amplitude.y,
        )
    }

    pub fn name_value_params(&self, group: &str) -> NameValuePairs {
        vec![
            get_pair(group, "image", &self.name),
            get_xy_pair(group, "zoom factor", self.x_zoom_factor, self.y_zoom_factor),
            get_xy_pair(group, "amplitude", self.amplitude.x, self.amplitude.y),
            get_xy_pair(group, "cutoff", self.x_color_cutoff, self.y_color_cutoff),
        ]
    }
}

/// The displacement bitmaps available to the image filter mode and the image velocity
/// after-effect.
#[derive(Clone, Debug, Default)]
pub struct ImageDisplacementList {
    displacements: Vec<ImageDisplacement>,
    current: usize,
}

impl ImageDisplacementList {
    pub fn new(displacements: Vec<ImageDisplacement>) -> Self {
        Self {
            displacements,
            current: 0,
        }
    }

    /// Loads every `*.ppm` under `<resources>/displacement`, sorted by file name.
    pub fn load(resources_dir: &Path) -> Result<Self, ImageError> {
        let dir = resources_dir.join(IMAGE_DISPLACEMENT_DIR);
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| ImageError::Io(format!("{}: {e}", dir.display())))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ImageError::Io(e.to_string()))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("ppm")) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut displacements = Vec::with_capacity(paths.len());
        for path in &paths {
            let image = ImageBitmap::load(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            log::debug!("loaded displacement image {name} ({}x{})", image.width(), image.height());
            displacements.push(ImageDisplacement::new(name, Arc::new(image)));
        }
        if displacements.is_empty() {
            return Err(ImageError::Empty(dir.display().to_string()));
        }
        Ok(Self::new(displacements))
    }

    /// Procedural stand-ins used when no resources directory is configured.
    pub fn builtin() -> Self {
        Self::new(vec![
            ImageDisplacement::new("checkerboard", Arc::new(checkerboard_bitmap(128, 16))),
            ImageDisplacement::new("concentric", Arc::new(concentric_bitmap(128, 9.0))),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.displacements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.displacements.len()
    }

    pub fn set_random_image_displacement(&mut self, rand: &mut dyn RandomSource) {
        if self.displacements.len() > 1 {
            self.current = rand.rand_u32_in(0, self.displacements.len() as u32) as usize;
        }
    }

    pub fn current(&self) -> Option<&ImageDisplacement> {
        self.displacements.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut ImageDisplacement> {
        self.displacements.get_mut(self.current)
    }
}

fn checkerboard_bitmap(size: u32, cell: u32) -> ImageBitmap {
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let r = if on { 255 } else { 0 };
            let g = if (x / cell) % 2 == 0 { 255 } else { 0 };
            rgba.extend_from_slice(&[r, g, 128, 255]);
        }
    }
    ImageBitmap::from_rgba(size, size, rgba)
}

fn concentric_bitmap(size: u32, rings: f32) -> ImageBitmap {
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    let half = size as f32 * 0.5;
    for y in 0..size {
        for x in 0..size {
            let dx = (x as f32 - half) / half;
            let dy = (y as f32 - half) / half;
            let d = (dx * dx + dy * dy).sqrt();
            let r = ((d * rings * std::f32::consts::PI).sin() * 0.5 + 0.5) * 255.0;
            let g = ((dy.atan2(dx) * 3.0).cos() * 0.5 + 0.5) * 255.0;
            rgba.extend_from_slice(&[r as u8, g as u8, 64, 255]);
        }
    }
    ImageBitmap::from_rgba(size, size, rgba)
}
