//! Applying the resolver to exhibition/artwork JSON from the backend.
//!
//! Detail endpoints return a single object, list endpoints an array, and some
//! responses wrap either in an envelope (`{"data": [...]}`). The walk is
//! recursive so all three shapes are handled the same way.

use serde_json::Value;

use crate::image_url::ImageResolver;

/// Field names that hold image references in backend records.
pub const DEFAULT_IMAGE_FIELDS: &[&str] = &["imageUrl"];

/// Rewrites every image field under `value` in place and returns how many
/// fields were rewritten.
///
/// String values are resolved; `null` becomes the fallback. Any other value
/// under an image field is left untouched.
pub fn rewrite_image_fields<S: AsRef<str>>(
    resolver: &ImageResolver,
    value: &mut Value,
    fields: &[S],
) -> usize {
    match value {
        Value::Array(items) => items
            .iter_mut()
            .map(|item| rewrite_image_fields(resolver, item, fields))
            .sum(),
        Value::Object(map) => {
            let mut count = 0;
            for (key, child) in map.iter_mut() {
                if fields.iter().any(|f| f.as_ref() == key.as_str()) {
                    // Image fields are never descended into.
                    if let Some(resolved) = resolve_field(resolver, child) {
                        *child = Value::String(resolved);
                        count += 1;
                    }
                    continue;
                }
                count += rewrite_image_fields(resolver, child, fields);
            }
            count
        }
        _ => 0,
    }
}

fn resolve_field(resolver: &ImageResolver, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(resolver.resolve(Some(s.as_str()))),
        Value::Null => Some(resolver.resolve(None)),
        _ => None,
    }
}
