//! `imgres resolve <url>...` – print normalized image URLs.

use anyhow::Result;
use imgres_core::image_url::ImageResolver;
use std::io::{self, Write};

pub fn run_resolve(resolver: &ImageResolver, urls: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_resolved(resolver, urls, &mut out)?;
    Ok(())
}

pub(crate) fn write_resolved<W: Write>(
    resolver: &ImageResolver,
    urls: &[String],
    out: &mut W,
) -> io::Result<()> {
    for url in urls {
        let resolved = resolver.resolve(Some(url.as_str()));
        tracing::debug!(input = %url, resolved = %resolved, "resolved image reference");
        writeln!(out, "{}", resolved)?;
    }
    out.flush()
}
