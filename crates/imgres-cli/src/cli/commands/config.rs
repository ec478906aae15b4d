//! `imgres config` – show config path and effective settings.

use anyhow::Result;
use imgres_core::config::{self, ImgresConfig};

pub fn run_config(cfg: &ImgresConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
