//! Debugger configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "./vdb.ini";

/// How a [`Debugger`](crate::Debugger) persists settings and paces its ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebuggerConfig {
    /// Settings file read on the first breakpoint and written on save.
    pub settings_path: PathBuf,

    /// Rendered ticks between automatic saves. Zero disables periodic saving.
    pub save_period_ticks: u32,

    /// Ticks per second assumed when converting the auto-step delay to ticks.
    pub tick_rate_hz: u32,

    /// Frames rendered without waiting for input after something happened.
    pub settle_frames: u32,

    /// Exit the process when the user quits. Otherwise the debugger stops
    /// rendering and every later breakpoint is skipped.
    pub exit_on_quit: bool,

    /// Exit the process with a failure status on a graphics error. Otherwise
    /// the debugger stops the same way it does after a quit.
    pub exit_on_fatal_error: bool,
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            save_period_ticks: 300,
            tick_rate_hz: 60,
            settle_frames: 3,
            exit_on_quit: true,
            exit_on_fatal_error: true,
        }
    }
}

impl DebuggerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the settings file path.
    #[must_use]
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }

    /// Sets the number of rendered ticks between automatic saves.
    #[must_use]
    pub fn with_save_period_ticks(mut self, ticks: u32) -> Self {
        self.save_period_ticks = ticks;
        self
    }

    /// Sets the assumed tick rate.
    #[must_use]
    pub fn with_tick_rate_hz(mut self, hz: u32) -> Self {
        self.tick_rate_hz = hz;
        self
    }

    /// Sets the number of settle frames.
    #[must_use]
    pub fn with_settle_frames(mut self, frames: u32) -> Self {
        self.settle_frames = frames;
        self
    }

    /// Sets whether quitting exits the process.
    #[must_use]
    pub fn with_exit_on_quit(mut self, exit: bool) -> Self {
        self.exit_on_quit = exit;
        self
    }

    /// Sets whether graphics errors exit the process.
    #[must_use]
    pub fn with_exit_on_fatal_error(mut self, exit: bool) -> Self {
        self.exit_on_fatal_error = exit;
        self
    }

    /// A configuration that never exits the process, for embedding in tests.
    #[must_use]
    pub fn non_exiting(self) -> Self {
        self.with_exit_on_quit(false).with_exit_on_fatal_error(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebuggerConfig::default();
        assert_eq!(config.settings_path, PathBuf::from("./vdb.ini"));
        assert_eq!(config.save_period_ticks, 300);
        assert_eq!(config.tick_rate_hz, 60);
        assert_eq!(config.settle_frames, 3);
        assert!(config.exit_on_quit);
        assert!(config.exit_on_fatal_error);
    }

    #[test]
    fn test_builder() {
        let config = DebuggerConfig::new()
            .with_settings_path("/tmp/x.ini")
            .with_save_period_ticks(0)
            .with_tick_rate_hz(30)
            .non_exiting();
        assert_eq!(config.settings_path, PathBuf::from("/tmp/x.ini"));
        assert_eq!(config.save_period_ticks, 0);
        assert_eq!(config.tick_rate_hz, 30);
        assert!(!config.exit_on_quit);
        assert!(!config.exit_on_fatal_error);
    }
}
