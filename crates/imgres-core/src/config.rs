use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::image_url::{BackendOrigin, ImageResolver, DEFAULT_FALLBACK};
use crate::records::DEFAULT_IMAGE_FIELDS;

/// Global configuration loaded from `~/.config/imgres/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImgresConfig {
    /// Origin of the backend that serves uploaded media (root-relative references are joined onto it).
    pub backend_origin: BackendOrigin,
    /// Image shown when a reference is empty or fails to load.
    pub fallback: String,
    /// Record fields holding image references; if missing, `["imageUrl"]` is used.
    #[serde(default)]
    pub image_fields: Option<Vec<String>>,
}

impl Default for ImgresConfig {
    fn default() -> Self {
        Self {
            backend_origin: BackendOrigin::default(),
            fallback: DEFAULT_FALLBACK.to_string(),
            image_fields: None,
        }
    }
}

impl ImgresConfig {
    pub fn resolver(&self) -> ImageResolver {
        ImageResolver::new(self.backend_origin.clone(), self.fallback.clone())
    }

    pub fn image_fields(&self) -> Vec<String> {
        match &self.image_fields {
            Some(fields) if !fields.is_empty() => fields.clone(),
            _ => DEFAULT_IMAGE_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgres")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImgresConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ImgresConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<ImgresConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ImgresConfig = toml::from_str(&data)
        .with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
