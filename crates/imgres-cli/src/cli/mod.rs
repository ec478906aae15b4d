//! CLI for imgres.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgres_core::config::{self, ImgresConfig};
use imgres_core::image_url::{BackendOrigin, ImageResolver};
use std::path::PathBuf;

use commands::{run_config, run_resolve, run_rewrite};

/// Top-level CLI for imgres.
#[derive(Debug, Parser)]
#[command(name = "imgres")]
#[command(about = "imgres: normalize gallery image references", long_about = None)]
pub struct Cli {
    /// Backend origin for root-relative references (overrides config.toml, and
    /// lets the command run even when config.toml is invalid).
    #[arg(long, global = true, value_name = "ORIGIN")]
    pub origin: Option<BackendOrigin>,

    /// Fallback image for empty references (overrides config.toml).
    #[arg(long, global = true, value_name = "URL")]
    pub fallback: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve one or more image references and print one URL per line.
    Resolve {
        /// Raw image references, as stored by the backend. An empty string resolves to the fallback.
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,
    },

    /// Rewrite image fields in a JSON file returned by the backend.
    Rewrite {
        /// Path to the JSON file (single record, list, or envelope).
        path: PathBuf,

        /// Field holding an image reference; repeatable. Defaults to config or `imageUrl`.
        #[arg(long = "field", value_name = "NAME")]
        fields: Vec<String>,

        /// Write the result here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show the config file location and effective settings.
    Config,
}

/// Applies command-line overrides on top of the loaded configuration.
pub(crate) fn effective_config(
    mut cfg: ImgresConfig,
    origin: Option<BackendOrigin>,
    fallback: Option<String>,
) -> ImgresConfig {
    if let Some(origin) = origin {
        cfg.backend_origin = origin;
    }
    if let Some(fallback) = fallback {
        cfg.fallback = fallback;
    }
    cfg
}

/// Combines the config file load result with command-line overrides.
///
/// An unreadable or invalid config file is tolerated only when `--origin` is
/// given; the built-in defaults then stand in for the file.
pub(crate) fn config_with_overrides(
    loaded: Result<ImgresConfig>,
    origin: Option<BackendOrigin>,
    fallback: Option<String>,
) -> Result<ImgresConfig> {
    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(err) if origin.is_some() => {
            tracing::warn!("ignoring config file ({:#}); using defaults with --origin", err);
            ImgresConfig::default()
        }
        Err(err) => return Err(err),
    };
    Ok(effective_config(cfg, origin, fallback))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config_with_overrides(config::load_or_init(), cli.origin, cli.fallback)?;
        tracing::debug!("effective config: {:?}", cfg);
        let resolver: ImageResolver = cfg.resolver();

        match cli.command {
            CliCommand::Resolve { urls } => run_resolve(&resolver, &urls)?,
            CliCommand::Rewrite {
                path,
                fields,
                output,
            } => {
                let fields = if fields.is_empty() {
                    cfg.image_fields()
                } else {
                    fields
                };
                run_rewrite(&resolver, &path, &fields, output.as_deref()).await?;
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
