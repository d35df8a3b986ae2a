//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! The pure presentation operations (formatting, aggregation, binning,
//! consensus) never return these; they degrade to empty results instead.

use thiserror::Error;

/// Errors raised while decoding raw API payloads
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid payload format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while loading display configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
