//! Error types for configuration and icon manifests.

use std::fmt;

/// Errors that can occur while building a [`FieldConfig`](crate::FieldConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The options JSON could not be parsed.
    Parse(serde_json::Error),
    /// An option holds a value the simulation cannot run with.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Failed to parse options: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid option: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur while loading an icon manifest.
#[derive(Debug)]
pub enum ManifestError {
    /// The manifest JSON could not be parsed.
    Parse(serde_json::Error),
    /// The manifest lists no icons.
    Empty,
    /// More icons than an [`IconKind`](crate::IconKind) can index.
    TooMany(usize),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Parse(e) => write!(f, "Failed to parse icon manifest: {}", e),
            ManifestError::Empty => write!(f, "Icon manifest contains no icons"),
            ManifestError::TooMany(n) => write!(f, "Icon manifest has {} icons (max 255)", n),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(e: serde_json::Error) -> Self {
        ManifestError::Parse(e)
    }
}
