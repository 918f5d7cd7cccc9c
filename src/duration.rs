//! Flux duration tokens
//!
//! A duration token is a compact string encoding a time span, e.g. `"1h30m"`:
//! one or more `<digits><unit>` groups with unit one of
//! `ns`, `us`, `ms`, `s`, `m`, `h`, `d`, `w`, `mo`, `y`.
//!
//! Validation is deferred to render time: stages hold whatever literal they
//! were given and only check it when the duration is about to be emitted.

use crate::error::{FluxError, FluxResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Anchored: partial matches like "5mins" or "m5" must not pass.
    Regex::new(r"^(\d+(ns|us|ms|s|m|h|d|w|mo|y))+$").expect("duration grammar regex is valid")
});

/// A string-backed Flux duration literal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration(String);

impl Duration {
    /// Create a duration from a raw token without validating it
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the token against the duration grammar
    pub fn validate(&self) -> FluxResult<()> {
        if DURATION_RE.is_match(&self.0) {
            Ok(())
        } else {
            Err(FluxError::MalformedDuration(self.0.clone()))
        }
    }
}

impl From<&str> for Duration {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Duration {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
