//! The zoom filter: effects, their settings, and the per-pixel zoom vector built from them.

pub mod after_effects;
pub mod common_types;
pub mod filter_effects;
pub mod image_displacement;
pub mod lerp_factor;
pub mod normalized_coords;
pub mod settings;
pub mod settings_service;
pub mod viewport;
pub mod zoom_vector;

pub use normalized_coords::{NormalizedCoords, NormalizedCoordsConverter};
pub use settings::{FilterEffectsSettings, ZoomFilterMode};
pub use settings_service::FilterSettingsService;
pub use zoom_vector::FilterZoomVector;
