use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cfg = goom_zoom::config::Config::parse();
    goom_zoom::app::run(cfg)
}
