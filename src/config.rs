use crate::filter_fx::lerp_factor::DEFAULT_TRAN_LERP_INCREMENT;
use crate::filter_fx::settings::ZoomFilterMode;
use crate::point2d::Dimensions;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "goom-zoom", version, about = "GOOM zoom-filter engine with a terminal preview")]
pub struct Config {
    #[arg(long, default_value_t = 160)]
    pub width: u32,

    #[arg(long, default_value_t = 96)]
    pub height: u32,

    #[arg(long, default_value_t = 300)]
    pub frames: u32,

    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Pool size; zero or negative is an offset from the hardware thread count.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub threads: i32,

    /// Seed for every random choice, noise included. Noise also depends on `--threads`.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum)]
    pub filter_mode: Option<ZoomFilterMode>,

    #[arg(long, default_value_t = 120)]
    pub mode_frames: u32,

    #[arg(long, value_enum, default_value_t = OutputMode::Preview)]
    pub output: OutputMode,

    #[arg(long, default_value = "frames")]
    pub out_dir: PathBuf,

    #[arg(long)]
    pub resources: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_TRAN_LERP_INCREMENT)]
    pub lerp_increment: f32,

    #[arg(long, default_value_t = false)]
    pub show_params: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    #[value(alias = "tui", alias = "halfblock")]
    Preview,
    #[value(alias = "frames")]
    Ppm,
    #[value(alias = "off")]
    None,
}

impl Config {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.width < 2 || self.height < 2 {
            anyhow::bail!("render size must be at least 2x2, got {}x{}", self.width, self.height);
        }
        if self.mode_frames == 0 {
            anyhow::bail!("--mode-frames must be positive");
        }
        if !(self.lerp_increment > 0.0 && self.lerp_increment <= 1.0) {
            anyhow::bail!("--lerp-increment must be in (0, 1], got {}", self.lerp_increment);
        }
        Ok(())
    }
}
