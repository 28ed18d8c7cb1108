//! Error types for vdb-rs.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for vdb-rs operations.
#[derive(Error, Debug)]
pub enum VdbError {
    /// The settings file could not be written.
    #[error("failed to write settings to '{}': {source}", path.display())]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The graphics API reported an error. Never recovered from.
    #[error("graphics error 0x{code:04X} ({name})")]
    Graphics { code: u32, name: &'static str },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for vdb-rs operations.
pub type Result<T> = std::result::Result<T, VdbError>;
