//! Backend origin: the scheme+host+port that serves uploaded media.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Origin used when nothing else is configured.
pub const DEFAULT_BACKEND_ORIGIN: &str = "http://localhost:8000";

/// Reasons a configured backend origin is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OriginError {
    #[error("invalid backend origin {input:?}: {reason}")]
    Parse { input: String, reason: url::ParseError },
    #[error("backend origin {0:?} must use http or https")]
    UnsupportedScheme(String),
    #[error("backend origin {0:?} has no host")]
    MissingHost(String),
    #[error("backend origin {0:?} must not carry a path, query or fragment")]
    NotAnOrigin(String),
    #[error("backend origin {0:?} must not carry credentials")]
    Credentials(String),
}

/// Validated backend origin, stored without a trailing slash so that a
/// root-relative path can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendOrigin(String);

impl BackendOrigin {
    /// Parses and validates an origin such as `http://localhost:8000`.
    ///
    /// A single trailing `/` is accepted and dropped.
    pub fn parse(input: &str) -> Result<Self, OriginError> {
        let trimmed = input.trim();
        let parsed = url::Url::parse(trimmed).map_err(|reason| OriginError::Parse {
            input: input.to_string(),
            reason,
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(OriginError::UnsupportedScheme(input.to_string()));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(OriginError::MissingHost(input.to_string()));
        }
        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(OriginError::Credentials(input.to_string()));
        }
        if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(OriginError::NotAnOrigin(input.to_string()));
        }

        // `Url` normalizes scheme/host case and drops default ports.
        let serialized = parsed.as_str().trim_end_matches('/').to_string();
        Ok(Self(serialized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins a root-relative path (leading `/`) onto this origin.
    pub(crate) fn join_root_relative(&self, path: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + path.len());
        out.push_str(&self.0);
        out.push_str(path);
        out
    }
}

impl Default for BackendOrigin {
    fn default() -> Self {
        Self(DEFAULT_BACKEND_ORIGIN.to_string())
    }
}

impl fmt::Display for BackendOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BackendOrigin {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for BackendOrigin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BackendOrigin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
