//! Fixed-point transform buffers and the resampler that applies them.
//!
//! Every destination pixel stores a "tran" point: the source position scaled by
//! `DIM_FILTER_COEFFS`, so the high bits select the source pixel and the low bits select one
//! of the precomputed bilinear neighbourhood weights. Frames move from `tran_src` to
//! `tran_dest` by a fixed-point lerp, so a new zoom field fades in over several frames.

use crate::filter_fx::lerp_factor::{MAX_TRAN_LERP_EXP, MAX_TRAN_LERP_VALUE};
use crate::filter_fx::normalized_coords::{NormalizedCoords, NormalizedCoordsConverter};
use crate::filter_fx::zoom_vector::FilterZoomVector;
use crate::goom_rand::seed_thread_stream;
use crate::parallel::Parallel;
use crate::point2d::{Dimensions, Point2dFlt, Point2dInt};

pub type Pixel = [u8; 4];

pub const DIM_FILTER_COEFFS_EXP: u32 = 4;
pub const DIM_FILTER_COEFFS: u32 = 1 << DIM_FILTER_COEFFS_EXP;
const COEFF_INDEX_MASK: i32 = DIM_FILTER_COEFFS as i32 - 1;

pub const MAX_CHANNEL_VALUE: u32 = 255;
/// Every neighbourhood sums to this, so mixing divides by a shift.
pub const COEFF_SUM: u32 = MAX_CHANNEL_VALUE + 1;
const COEFF_SUM_EXP: u32 = 8;

/// Weights for the top-left, top-right, bottom-left and bottom-right neighbours.
pub type NeighborhoodCoeffs = [u32; 4];

pub const PRECOMPUTED_COEFFS: [[NeighborhoodCoeffs; DIM_FILTER_COEFFS as usize];
    DIM_FILTER_COEFFS as usize] = precompute_coeffs();

const fn precompute_coeffs()
-> [[NeighborhoodCoeffs; DIM_FILTER_COEFFS as usize]; DIM_FILTER_COEFFS as usize] {
    let n = DIM_FILTER_COEFFS;
    let mut table = [[[0; 4]; DIM_FILTER_COEFFS as usize]; DIM_FILTER_COEFFS as usize];
    let mut h = 0;
    while h < n {
        let mut v = 0;
        while v < n {
            table[h as usize][v as usize] =
                [(n - h) * (n - v), h * (n - v), (n - h) * v, h * v];
            v += 1;
        }
        h += 1;
    }
    table
}

pub fn screen_to_tran_point(screen: Point2dFlt) -> Point2dInt {
    let scale = DIM_FILTER_COEFFS as f32;
    Point2dInt::new((screen.x * scale).round() as i32, (screen.y * scale).round() as i32)
}

pub fn tran_to_screen_point(tran: Point2dInt) -> Point2dInt {
    Point2dInt::new(tran.x >> DIM_FILTER_COEFFS_EXP, tran.y >> DIM_FILTER_COEFFS_EXP)
}

pub fn tran_to_coeff_indexes(tran: Point2dInt) -> (usize, usize) {
    ((tran.x & COEFF_INDEX_MASK) as usize, (tran.y & COEFF_INDEX_MASK) as usize)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcePointInfo {
    pub screen_point: Point2dInt,
    pub coeffs: NeighborhoodCoeffs,
    pub is_clipped: bool,
}

/// Weighted mix of the 2x2 neighbourhood at `info.screen_point`. Neighbours past the
/// buffer edge are clamped onto it. Alpha is always opaque.
pub fn mixed_color(src: &[Pixel], dimensions: Dimensions, info: &SourcePointInfo) -> Pixel {
    let max_x = dimensions.width as i32 - 1;
    let max_y = dimensions.height as i32 - 1;
    let x0 = info.screen_point.x.clamp(0, max_x);
    let y0 = info.screen_point.y.clamp(0, max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let at = |x: i32, y: i32| src[y as usize * dimensions.width as usize + x as usize];
    let neighbours = [at(x0, y0), at(x1, y0), at(x0, y1), at(x1, y1)];

    let mut mixed = [0, 0, 0, MAX_CHANNEL_VALUE as u8];
    for (channel, out) in mixed.iter_mut().take(3).enumerate() {
        let sum: u32 = neighbours
            .iter()
            .zip(info.coeffs)
            .map(|(pixel, weight)| weight * pixel[channel] as u32)
            .sum();
        *out = (sum >> COEFF_SUM_EXP) as u8;
    }
    mixed
}

/// Source and destination tran buffers plus the fixed-point lerp between them.
#[derive(Clone, Debug)]
pub struct ZoomTransformBuffers {
    dimensions: Dimensions,
    max_tran_point_minus_1: Point2dInt,
    tran_src: Vec<Point2dInt>,
    tran_dest: Vec<Point2dInt>,
    tran_lerp_factor: u32,
}

impl ZoomTransformBuffers {
    pub fn new(dimensions: Dimensions) -> Self {
        let max_tran_point = screen_to_tran_point(Point2dFlt::new(
            (dimensions.width - 1) as f32,
            (dimensions.height - 1) as f32,
        ));
        let identity = identity_tran_buffer(dimensions);
        Self {
            dimensions,
            max_tran_point_minus_1: Point2dInt::new(max_tran_point.x - 1, max_tran_point.y - 1),
            tran_src: identity.clone(),
            tran_dest: identity,
            tran_lerp_factor: 0,
        }
    }

    pub fn set_src_tran_to_identity(&mut self) {
        self.tran_src = identity_tran_buffer(self.dimensions);
    }

    pub fn tran_src(&self, pos: usize) -> Point2dInt {
        self.tran_src[pos]
    }

    pub fn tran_dest(&self, pos: usize) -> Point2dInt {
        self.tran_dest[pos]
    }

    pub fn tran_dest_mut(&mut self) -> &mut [Point2dInt] {
        &mut self.tran_dest
    }

    pub fn tran_lerp_factor(&self) -> u32 {
        self.tran_lerp_factor
    }

    pub fn set_tran_lerp_factor(&mut self, value: u32) {
        self.tran_lerp_factor = value.min(MAX_TRAN_LERP_VALUE);
    }

    /// Freezes the current blend into `tran_src` so a new destination starts from what is
    /// on screen.
    pub fn freeze_lerp_into_src(&mut self) {
        let t = self.tran_lerp_factor;
        for (src, dest) in self.tran_src.iter_mut().zip(&self.tran_dest) {
            *src = lerp_tran_point(*src, *dest, t);
        }
        self.tran_lerp_factor = 0;
    }

    /// The blended point for `pos`, clamped inside the buffer. The flag is set when clamping
    /// was needed.
    pub fn lerped_point(&self, pos: usize) -> (Point2dInt, bool) {
        let p = lerp_tran_point(self.tran_src[pos], self.tran_dest[pos], self.tran_lerp_factor);
        let max = self.max_tran_point_minus_1;
        let clamped = Point2dInt::new(p.x.clamp(0, max.x), p.y.clamp(0, max.y));
        (clamped, clamped != p)
    }
}

/// `src + (dest - src) * t / MAX_TRAN_LERP_VALUE` per axis, in 64-bit to avoid overflow.
pub fn lerp_tran_point(src: Point2dInt, dest: Point2dInt, t: u32) -> Point2dInt {
    Point2dInt::new(lerp_tran_value(src.x, dest.x, t), lerp_tran_value(src.y, dest.y, t))
}

fn lerp_tran_value(src: i32, dest: i32, t: u32) -> i32 {
    let diff = dest as i64 - src as i64;
    let numerator = t as i64 * diff;
    let rounding = 1i64 << (MAX_TRAN_LERP_EXP - 1);
    (src as i64 + ((numerator + rounding) >> MAX_TRAN_LERP_EXP)) as i32
}

fn identity_tran_buffer(dimensions: Dimensions) -> Vec<Point2dInt> {
    let width = dimensions.width as usize;
    (0..dimensions.size())
        .map(|pos| {
            let x = (pos % width) as i32;
            let y = (pos / width) as i32;
            Point2dInt::new(x << DIM_FILTER_COEFFS_EXP, y << DIM_FILTER_COEFFS_EXP)
        })
        .collect()
}

/// Owns the transform buffers for one screen size and fills them from a zoom vector.
#[derive(Clone, Debug)]
pub struct ZoomFilterBuffers {
    dimensions: Dimensions,
    converter: NormalizedCoordsConverter,
    buff_midpoint: Point2dInt,
    transform_buffers: ZoomTransformBuffers,
    noise_seed: u64,
}

impl ZoomFilterBuffers {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            converter: NormalizedCoordsConverter::new(dimensions, true),
            buff_midpoint: dimensions.centre_point(),
            transform_buffers: ZoomTransformBuffers::new(dimensions),
            noise_seed: 0,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn buff_midpoint(&self) -> Point2dInt {
        self.buff_midpoint
    }

    pub fn set_buff_midpoint(&mut self, midpoint: Point2dInt) {
        let max_x = self.dimensions.width as i32 - 1;
        let max_y = self.dimensions.height as i32 - 1;
        self.buff_midpoint = Point2dInt::new(midpoint.x.clamp(0, max_x), midpoint.y.clamp(0, max_y));
    }

    /// Seed for the per-pixel noise streams. Each chunk of `update` reseeds its worker's
    /// stream from this and the chunk start, so a rebuild only depends on the seed and the
    /// thread count.
    pub fn set_noise_seed(&mut self, seed: u64) {
        self.noise_seed = seed;
    }

    pub fn transform_buffers(&self) -> &ZoomTransformBuffers {
        &self.transform_buffers
    }

    pub fn tran_lerp_factor(&self) -> u32 {
        self.transform_buffers.tran_lerp_factor()
    }

    pub fn set_tran_lerp_factor(&mut self, value: u32) {
        self.transform_buffers.set_tran_lerp_factor(value);
    }

    pub fn start(&mut self) {
        self.transform_buffers = ZoomTransformBuffers::new(self.dimensions);
    }

    /// Recomputes `tran_dest` for every pixel, centred on the buffer midpoint, and restarts
    /// the lerp from the currently displayed blend.
    pub fn update(&mut self, zoom_vector: &FilterZoomVector, parallel: &Parallel) {
        self.transform_buffers.freeze_lerp_into_src();

        let width = self.dimensions.width as usize;
        let converter = self.converter;
        let midpoint = converter.to_normalized(self.buff_midpoint);
        let noise_seed = self.noise_seed;
        parallel.for_each_chunk_mut(self.transform_buffers.tran_dest_mut(), |start, chunk| {
            seed_thread_stream(noise_seed.wrapping_add(start as u64));
            for (offset, tran) in chunk.iter_mut().enumerate() {
                let pos = start + offset;
                let screen = Point2dInt::new((pos % width) as i32, (pos / width) as i32);
                *tran = tran_point_for(&converter, midpoint, screen, zoom_vector);
            }
        });
    }

    pub fn source_point_info(&self, pos: usize) -> SourcePointInfo {
        let (tran, is_clipped) = self.transform_buffers.lerped_point(pos);
        let (h, v) = tran_to_coeff_indexes(tran);
        SourcePointInfo {
            screen_point: tran_to_screen_point(tran),
            coeffs: PRECOMPUTED_COEFFS[h][v],
            is_clipped,
        }
    }

    /// Resamples `src` into `dst` through the current blended transform.
    pub fn zoom(&self, parallel: &Parallel, src: &[Pixel], dst: &mut [Pixel]) {
        assert_eq!(src.len(), self.dimensions.size(), "source buffer size mismatch");
        assert_eq!(dst.len(), self.dimensions.size(), "destination buffer size mismatch");
        let dimensions = self.dimensions;
        parallel.for_each_chunk_mut(dst, |start, chunk| {
            for (offset, out) in chunk.iter_mut().enumerate() {
                let info = self.source_point_info(start + offset);
                *out = mixed_color(src, dimensions, &info);
            }
        });
    }
}

fn tran_point_for(
    converter: &NormalizedCoordsConverter,
    midpoint: NormalizedCoords,
    screen: Point2dInt,
    zoom_vector: &FilterZoomVector,
) -> Point2dInt {
    let centred = converter.to_normalized(screen) - midpoint;
    let zoom_point = zoom_vector.zoom_point(centred);
    screen_to_tran_point(converter.to_screen_flt(midpoint + zoom_point))
}
