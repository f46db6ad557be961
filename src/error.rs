//! Error types for the raycaster.
//!
//! The per-frame core never fails; only loading settings and maps and
//! opening the window can.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Raycaster error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error while reading a settings or map file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for [`crate::config::Settings`]
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Settings parsed but describe an unusable setup
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Map grid is empty, ragged or contains unknown cells
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// Window or GPU texture creation failed
    #[error("Window error: {0}")]
    Window(String),
}
