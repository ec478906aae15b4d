//! Image reference normalization.
//!
//! Turns whatever the backend stored in an image field (empty, root-relative,
//! bare host, `http;//` corrupted, data URI, absolute URL) into something an
//! image loader can fetch as-is. Every consumer goes through [`resolve`] so the
//! repair rules live in one place.

mod origin;
mod repair;

pub use origin::{BackendOrigin, OriginError, DEFAULT_BACKEND_ORIGIN};
pub use repair::repair_scheme_separator;

/// Placeholder asset served by the storefront itself.
pub const DEFAULT_FALLBACK: &str = "/placeholder.svg";

/// Resolves image references against a fixed backend origin and fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    origin: BackendOrigin,
    fallback: String,
}

impl ImageResolver {
    pub fn new(origin: BackendOrigin, fallback: impl Into<String>) -> Self {
        Self {
            origin,
            fallback: fallback.into(),
        }
    }

    pub fn origin(&self) -> &BackendOrigin {
        &self.origin
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolves `url` using the configured fallback.
    pub fn resolve(&self, url: Option<&str>) -> String {
        resolve(&self.origin, url, &self.fallback)
    }

    /// Resolves `url`, substituting `fallback` for this call only.
    pub fn resolve_or(&self, url: Option<&str>, fallback: &str) -> String {
        resolve(&self.origin, url, fallback)
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(BackendOrigin::default(), DEFAULT_FALLBACK)
    }
}

/// Normalizes an image reference into a directly loadable URL.
///
/// Rules, first match wins:
/// 1. empty or absent: `fallback`
/// 2. first `;` in scheme position becomes `:` (then keep going)
/// 3. root-relative (`/...`): prefixed with `origin`
/// 4. `data:` URI: unchanged
/// 5. no `http://` / `https://` scheme: prefixed with `http://`
/// 6. otherwise unchanged
///
/// A reference equal to `fallback` is returned verbatim; the placeholder is a
/// storefront asset, not backend media.
///
/// # Examples
///
/// - `resolve(&origin, Some("http;//example.com/a.png"), "/placeholder.svg")` → `"http://example.com/a.png"`
/// - `resolve(&origin, Some("/static/img.png"), "/placeholder.svg")` → `"http://localhost:8000/static/img.png"`
/// - `resolve(&origin, None, "/placeholder.svg")` → `"/placeholder.svg"`
pub fn resolve(origin: &BackendOrigin, url: Option<&str>, fallback: &str) -> String {
    let url = match url {
        Some(u) if !u.is_empty() => u,
        _ => return fallback.to_string(),
    };
    if url == fallback {
        return url.to_string();
    }

    let url = repair_scheme_separator(url);

    if url.starts_with('/') {
        return origin.join_root_relative(&url);
    }
    if has_prefix_ignore_ascii_case(&url, "data:") {
        return url.into_owned();
    }
    if !has_prefix_ignore_ascii_case(&url, "http://")
        && !has_prefix_ignore_ascii_case(&url, "https://")
    {
        return format!("http://{url}");
    }
    url.into_owned()
}

fn has_prefix_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
