pub mod app;
pub mod config;
pub mod filter_buffers;
pub mod filter_fx;
pub mod goom_rand;
pub mod image_io;
pub mod name_value;
pub mod parallel;
pub mod point2d;
pub mod render;
pub mod terminal;
pub mod zoom_filter_fx;
