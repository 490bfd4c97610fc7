//! Distil API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the Distil API to use. Version limits are carried on the enum itself
//! rather than as free-floating globals, so version negotiation always works
//! from the same immutable record.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Distil API version.
///
/// Version 2 is the current API; version 1 is still accepted for parsing but
/// is past its support window.
///
/// # Example
///
/// ```rust
/// use distil_api::ApiVersion;
///
/// let version: ApiVersion = "2".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2);
/// assert_eq!(version.path_segment(), "v2");
/// assert_eq!(format!("{}", version), "2");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApiVersion {
    /// API version 1 (deprecated).
    V1,
    /// API version 2.
    #[default]
    V2,
}

impl ApiVersion {
    /// Returns the latest API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2
    }

    /// Returns the oldest version this client still accepts.
    #[must_use]
    pub const fn minimum_supported() -> Self {
        Self::V2
    }

    /// Returns `true` if this version is past its support window.
    ///
    /// # Example
    ///
    /// ```rust
    /// use distil_api::ApiVersion;
    ///
    /// assert!(ApiVersion::V1.is_deprecated());
    /// assert!(!ApiVersion::V2.is_deprecated());
    /// ```
    #[must_use]
    pub fn is_deprecated(self) -> bool {
        self < Self::minimum_supported()
    }

    /// Returns the URL path segment for this version (e.g., `"v2"`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("1"),
            Self::V2 => f.write_str("2"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    /// Parses a version selector.
    ///
    /// Both the bare number (`"2"`) and the path form (`"v2"`) are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedApiVersion`] for anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "v1" => Ok(Self::V1),
            "2" | "v2" => Ok(Self::V2),
            other => Err(ConfigError::UnsupportedApiVersion {
                version: other.to_string(),
            }),
        }
    }
}
