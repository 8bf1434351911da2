//! Error types shared across the vibesettings crates.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the core crate can produce.
///
/// Animation code never surfaces errors to the user; failures there degrade
/// to "skip the visual" and are logged by the caller. The variants here cover
/// configuration loading and the bitmap work the shell does on our behalf.
#[derive(Debug, Error)]
pub enum Error {
    /// An explicitly requested config file does not exist.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Strict validation failed; carries every problem found, not just the first.
    #[error("invalid configuration:\n  - {}", .0.join("\n  - "))]
    ConfigValidation(Vec<String>),

    /// Reading a config file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing or deserialization failed.
    #[error("failed to parse configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A tile image could not be loaded or sliced.
    #[error("failed to load image {path}: {message}")]
    Image { path: PathBuf, message: String },
}
