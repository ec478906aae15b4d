//! `imgres rewrite <path>` – normalize image fields in backend JSON.

use anyhow::{Context, Result};
use imgres_core::image_url::ImageResolver;
use imgres_core::records;
use std::path::Path;

pub async fn run_rewrite(
    resolver: &ImageResolver,
    path: &Path,
    fields: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let (rendered, count) = rewrite_file(resolver, path, fields).await?;
    match output {
        Some(out) => {
            tokio::fs::write(out, rendered.as_bytes())
                .await
                .with_context(|| format!("write output: {}", out.display()))?;
        }
        None => println!("{}", rendered),
    }
    eprintln!("rewrote {} image field(s) in {}", count, path.display());
    Ok(())
}

/// Reads `path`, rewrites image fields and returns pretty JSON plus the count.
pub(crate) async fn rewrite_file(
    resolver: &ImageResolver,
    path: &Path,
    fields: &[String],
) -> Result<(String, usize)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read JSON file: {}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse JSON: {}", path.display()))?;

    let count = records::rewrite_image_fields(resolver, &mut value, fields);
    tracing::info!(path = %path.display(), count, "rewrote image fields");

    let rendered = serde_json::to_string_pretty(&value)?;
    Ok((rendered, count))
}
