//! Reader and writer for the `vdb.ini` settings file.
//!
//! The file is a flat list of `key=value` lines. A `[vdb]` block holds the
//! global settings, and every `[frame]=<label>` line opens a section of
//! per-breakpoint settings that runs until the next `[frame]` line.
//!
//! ```text
//! [vdb]
//! window_pos=-1,-1
//! global_theme=dark
//!
//! [frame]=physics step
//! camera_type=turntable
//! turntable_radius=4
//! ```
//!
//! Reading is forgiving: missing files, unknown keys and malformed values all
//! leave the affected settings at their defaults. Only fields that were
//! changed from their defaults are written back.

mod cursor;
mod parser;
mod writer;

use std::path::Path;

pub use cursor::Cursor;
pub use parser::{parse_into, FRAME_SECTION};
pub use writer::write_settings;

use crate::error::{Result, VdbError};
use crate::settings::Settings;

impl Settings {
    /// Parses settings file text on top of default settings.
    pub fn parse(text: &str) -> Self {
        let mut settings = Self::new();
        settings.apply_text(text);
        settings
    }

    /// Applies settings file text on top of these settings.
    pub fn apply_text(&mut self, text: &str) {
        parse_into(self, text);
    }

    /// Reads the settings file at `path`.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Reads the settings file at `path`, or returns defaults if it cannot be read.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read_from(path) {
            Ok(settings) => {
                log::debug!(
                    "loaded settings from '{}' ({} breakpoint sections)",
                    path.display(),
                    settings.frames.len()
                );
                settings
            }
            Err(err) => {
                log::debug!("using default settings, could not read '{}': {err}", path.display());
                Self::new()
            }
        }
    }

    /// Formats these settings as settings file text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Formatting into a String cannot fail.
        let _ = write_settings(&mut out, self);
        out
    }

    /// Writes these settings to `path`, replacing the file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text()).map_err(|source| VdbError::SettingsWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes these settings to `path`, logging a warning on failure.
    ///
    /// Returns whether the file was written.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        match self.write_to(path) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to save settings: {err}");
                false
            }
        }
    }
}
