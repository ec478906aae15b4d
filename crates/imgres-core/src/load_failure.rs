//! Fallback substitution when an image surface reports a load failure.
//!
//! The handler is terminal: one substitution per failure event, and nothing at
//! all once the surface already shows the fallback, so a broken placeholder
//! cannot trigger an endless error/replace cycle.

use crate::image_url::DEFAULT_FALLBACK;

/// Anything that displays an image from a source reference.
pub trait ImageSurface {
    fn source(&self) -> &str;
    fn set_source(&mut self, src: String);
}

/// A bare source string is the simplest surface.
impl ImageSurface for String {
    fn source(&self) -> &str {
        self
    }

    fn set_source(&mut self, src: String) {
        *self = src;
    }
}

/// What the handler did for one failure event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// The surface source was replaced by the fallback.
    Substituted,
    /// The surface was already showing the fallback; left unchanged.
    FallbackFailed,
}

/// Handler attached to an image surface's failure signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailureHandler {
    original_url: String,
    fallback: String,
}

impl LoadFailureHandler {
    pub fn new(original_url: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            fallback: fallback.into(),
        }
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Handles one failure event reported by `surface`.
    pub fn handle<S: ImageSurface + ?Sized>(&self, surface: &mut S) -> FailureOutcome {
        if surface.source() == self.fallback {
            tracing::warn!(
                original_url = %self.original_url,
                fallback = %self.fallback,
                "fallback image failed to load; giving up"
            );
            return FailureOutcome::FallbackFailed;
        }

        tracing::error!(
            original_url = %self.original_url,
            failed_source = surface.source(),
            "image failed to load"
        );
        surface.set_source(self.fallback.clone());
        FailureOutcome::Substituted
    }

    /// Consumes the handler into a plain callback for surfaces wired through closures.
    pub fn into_callback<S: ImageSurface + ?Sized>(self) -> impl Fn(&mut S) -> FailureOutcome {
        move |surface: &mut S| self.handle(surface)
    }
}

/// Builds a failure handler for `original_url`, falling back to `fallback`
/// (or `/placeholder.svg` when `None`).
pub fn on_load_failure(original_url: &str, fallback: Option<&str>) -> LoadFailureHandler {
    LoadFailureHandler::new(original_url, fallback.unwrap_or(DEFAULT_FALLBACK))
}
