//! Repair of the `http;//host` scheme-separator defect emitted upstream.

use std::borrow::Cow;

/// Replaces the first `;` with `:` when it sits where a scheme separator is
/// expected, i.e. no `:` occurs before it.
///
/// A reference that already has a `:` ahead of its first `;` (such as
/// `data:image/png;base64,...` or `https://host/a;b`) is returned untouched.
/// Only the first semicolon is ever corrected.
pub fn repair_scheme_separator(url: &str) -> Cow<'_, str> {
    let Some(semi) = url.find(';') else {
        return Cow::Borrowed(url);
    };
    if url[..semi].contains(':') {
        return Cow::Borrowed(url);
    }

    let mut fixed = String::with_capacity(url.len());
    fixed.push_str(&url[..semi]);
    fixed.push(':');
    fixed.push_str(&url[semi + 1..]);
    tracing::debug!(original = url, repaired = %fixed, "repaired scheme separator");
    Cow::Owned(fixed)
}
