//! Error types for VCURSOR.

use std::io;

/// Errors produced by the virtual cursor framework.
///
/// Nothing on the per-frame path returns these. They only surface when a
/// cursor is bound to a user the host does not know about, or when a
/// settings file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    #[error("invalid owner: host has no local user {0}")]
    InvalidOwner(u32),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CursorError>;
