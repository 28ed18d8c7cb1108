//! The debugger context driven by the host's breakpoint calls.

use std::panic::Location;

use vdb_core::{FrameId, FrameSettings, Hint, HintQueue, Key, Settings};

use crate::config::DebuggerConfig;
use crate::keys::KeyTable;
use crate::platform::{graphics_error, Platform, UiLayer};
use crate::scheduler::{BreakpointScheduler, Decision, FrameEntry, StepInput};
use crate::view::FrameView;

/// Key that steps once.
pub const STEP_ONCE_KEY: Key = Key::F10;

/// Key that steps over the current label.
pub const STEP_OVER_KEY: Key = Key::F5;

/// Debugger lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Settings not loaded and no window yet.
    Uninitialized,
    Running,
    /// Quit or failed; every breakpoint is skipped from now on.
    Stopped,
}

/// An in-process visual debugger.
///
/// The host brackets each breakpoint with [`Debugger::begin_break`] and
/// [`Debugger::end_break`], and keeps looping while `begin_break` returns
/// true:
///
/// ```no_run
/// use vdb::{Debugger, DebuggerConfig, HeadlessPlatform, HeadlessUi};
///
/// let mut vdb = Debugger::new(DebuggerConfig::default(), HeadlessPlatform::new(), HeadlessUi::new());
/// for _ in 0..100 {
///     // advance the simulation
///     while vdb.begin_break("simulation step") {
///         // draw the simulation state
///         vdb.end_break();
///     }
/// }
/// ```
///
/// Settings are loaded and the window is created on the first breakpoint.
pub struct Debugger<P: Platform, U: UiLayer> {
    config: DebuggerConfig,
    platform: P,
    ui: U,
    state: State,
    settings: Settings,
    hints: HintQueue,
    scheduler: BreakpointScheduler,
    keys: KeyTable,
    entry: FrameEntry,
    frame: Option<FrameId>,
    view: Option<FrameView>,
    font_size_px: Option<u32>,
    font_reloads: u32,
}

impl<P: Platform, U: UiLayer> Debugger<P, U> {
    /// Creates a debugger. Nothing is loaded until the first breakpoint.
    pub fn new(config: DebuggerConfig, platform: P, ui: U) -> Self {
        crate::init_logging();
        Self {
            config,
            platform,
            ui,
            state: State::Uninitialized,
            settings: Settings::new(),
            hints: HintQueue::new(),
            scheduler: BreakpointScheduler::new(),
            keys: KeyTable::new(),
            entry: FrameEntry::default(),
            frame: None,
            view: None,
            font_size_px: None,
            font_reloads: 0,
        }
    }

    #[track_caller]
    fn initialize(&mut self) -> bool {
        self.settings = Settings::load_or_default(&self.config.settings_path);
        match self.platform.create_context(self.settings.global.window) {
            Ok(()) => {
                self.state = State::Running;
                log::info!("vdb initialized");
                true
            }
            Err(err) => {
                self.fail(&err, Location::caller());
                false
            }
        }
    }

    /// Starts a breakpoint frame for `label`.
    ///
    /// Returns true if the host should draw and call [`Debugger::end_break`],
    /// false if it should continue past the breakpoint.
    #[track_caller]
    pub fn begin_break(&mut self, label: &str) -> bool {
        if self.state == State::Stopped {
            return false;
        }
        let Some(entry) = self.scheduler.enter(label) else {
            return false;
        };
        if self.state == State::Uninitialized && !self.initialize() {
            return false;
        }
        self.entry = entry;
        self.view = None;

        if !self.platform.is_window_visible() {
            self.platform.show_window();
        }

        let font_size_px = self.settings.global.effective_font_size();
        if self.font_size_px != Some(font_size_px) {
            self.ui.load_fonts(font_size_px);
            self.font_size_px = Some(font_size_px);
            self.font_reloads += 1;
        }

        if entry.is_first_frame || entry.is_different_label {
            self.frame = Some(self.settings.frames.get_or_create(label));
        }

        self.keys.clear_edges();
        if self.settings.global.can_idle && !self.scheduler.is_auto_stepping() {
            self.platform.wait_events(&mut self.keys);
        } else {
            self.platform.poll_events(&mut self.keys);
        }
        if self.keys.any_down() {
            self.platform.keep_awake(self.config.settle_frames);
        }

        let input = StepInput {
            step_once: self.keys.was_pressed(STEP_ONCE_KEY),
            step_over: self.keys.was_pressed(STEP_OVER_KEY),
        };
        let decision = self.scheduler.decide(
            input,
            self.settings.global.auto_step_delay_ms,
            self.config.tick_rate_hz,
        );
        if decision != Decision::Render {
            log::debug!("{decision:?} from '{label}'");
            self.save_settings();
            self.platform.keep_awake(self.config.settle_frames);
            return false;
        }

        if self.platform.should_quit() {
            self.quit();
            return false;
        }

        if self.scheduler.save_due(self.config.save_period_ticks) {
            self.save_settings();
        }

        let Settings { global, frames } = &mut self.settings;
        if let Some(id) = self.frame {
            if let Some(frame) = frames.get_mut(id) {
                self.hints.apply(frame, global);
                self.view = Some(FrameView::new(frame, self.platform.framebuffer_size()));
            }
        }

        self.ui.begin_frame();
        self.check_graphics_error()
    }

    /// Finishes and presents the frame started by [`Debugger::begin_break`].
    #[track_caller]
    pub fn end_break(&mut self) {
        if self.state != State::Running {
            return;
        }
        self.ui.end_frame();
        if self.keys.any_down() {
            self.platform.keep_awake(1);
        }
        self.platform.swap_buffers();
        self.check_graphics_error();
        self.keys.clear_edges();
    }

    /// Stages `hint` for the next rendered frame. Returns false if rejected.
    pub fn hint(&mut self, hint: Hint) -> bool {
        self.hints.stage(hint)
    }

    /// Saves settings, closes the window and exits or stops.
    fn quit(&mut self) {
        log::info!("quit requested");
        self.save_settings();
        self.platform.close();
        if self.config.exit_on_quit {
            std::process::exit(0);
        }
        self.state = State::Stopped;
    }

    /// Logs a graphics error and exits or stops.
    fn fail(&mut self, err: &vdb_core::VdbError, location: &Location<'_>) {
        log::error!("{err} at {}:{}", location.file(), location.line());
        if self.config.exit_on_fatal_error {
            std::process::exit(1);
        }
        self.platform.close();
        self.state = State::Stopped;
    }

    /// Returns false, after reporting it, if the graphics API reported an error.
    #[track_caller]
    fn check_graphics_error(&mut self) -> bool {
        match self.platform.take_error() {
            Some(code) => {
                self.fail(&graphics_error(code), Location::caller());
                false
            }
            None => true,
        }
    }

    /// Writes the settings file, recording the current window placement.
    ///
    /// Does nothing before the first breakpoint, so defaults never overwrite
    /// a settings file that was not loaded yet.
    pub fn save_settings(&mut self) -> bool {
        if self.state == State::Uninitialized {
            log::debug!("not saving settings, nothing was loaded yet");
            return false;
        }
        self.settings.global.window = self.platform.window_rect();
        let saved = self.settings.save(&self.config.settings_path);
        if saved {
            log::debug!("saved settings to '{}'", self.config.settings_path.display());
        }
        saved
    }

    /// Steps once on the next rendered tick.
    pub fn step_once(&mut self) {
        self.scheduler.request_step_once();
    }

    /// Steps over the current label on the next rendered tick.
    pub fn step_over(&mut self) {
        self.scheduler.request_step_over();
    }

    pub fn set_auto_step(&mut self, enabled: bool) {
        self.scheduler.set_auto_step(enabled);
    }

    pub fn toggle_auto_step(&mut self) {
        let enabled = self.scheduler.is_auto_stepping();
        self.scheduler.set_auto_step(!enabled);
    }

    pub fn is_auto_stepping(&self) -> bool {
        self.scheduler.is_auto_stepping()
    }

    /// Whether this is the first rendered tick since the breakpoint was entered.
    #[must_use]
    pub fn is_first_frame(&self) -> bool {
        self.entry.is_first_frame
    }

    /// Whether the current label differs from the previous breakpoint's.
    #[must_use]
    pub fn is_different_label(&self) -> bool {
        self.entry.is_different_label
    }

    /// Settings of the current breakpoint.
    pub fn frame_settings(&self) -> Option<&FrameSettings> {
        self.frame.and_then(|id| self.settings.frames.get(id))
    }

    pub fn frame_settings_mut(&mut self) -> Option<&mut FrameSettings> {
        let id = self.frame?;
        self.settings.frames.get_mut(id)
    }

    /// View computed for the frame being rendered.
    pub fn frame_view(&self) -> Option<&FrameView> {
        self.view.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Number of times fonts were rebuilt.
    pub fn font_reloads(&self) -> u32 {
        self.font_reloads
    }

    /// Whether the debugger quit or failed and skips all breakpoints.
    pub fn is_stopped(&self) -> bool {
        self.state == State::Stopped
    }

    pub fn config(&self) -> &DebuggerConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessPlatform, HeadlessUi};

    fn debugger(dir: &tempfile::TempDir) -> Debugger<HeadlessPlatform, HeadlessUi> {
        let config = DebuggerConfig::default()
            .with_settings_path(dir.path().join("vdb.ini"))
            .non_exiting();
        Debugger::new(config, HeadlessPlatform::new(), HeadlessUi::new())
    }

    #[test]
    fn test_lazy_initialization() {
        let dir = tempfile::tempdir().unwrap();
        let mut vdb = debugger(&dir);
        assert_eq!(vdb.platform().contexts_created, 0);
        assert!(!vdb.save_settings());

        assert!(vdb.begin_break("a"));
        vdb.end_break();
        assert_eq!(vdb.platform().contexts_created, 1);
        assert!(vdb.platform().is_window_visible());

        assert!(vdb.begin_break("a"));
        vdb.end_break();
        assert_eq!(vdb.platform().contexts_created, 1);
        assert_eq!(vdb.platform().shows, 1);
    }

    #[test]
    fn test_font_reload_follows_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut vdb = debugger(&dir);
        assert!(vdb.begin_break("a"));
        vdb.end_break();
        assert_eq!(vdb.ui().font_loads, vec![18]);

        vdb.settings_mut().global.dpi_scale = 200;
        assert!(vdb.begin_break("a"));
        vdb.end_break();
        assert_eq!(vdb.ui().font_loads, vec![18, 36]);
        assert_eq!(vdb.font_reloads(), 2);
    }

    #[test]
    fn test_idle_waits_only_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut vdb = debugger(&dir);
        assert!(vdb.begin_break("a"));
        vdb.end_break();
        assert_eq!(vdb.platform().idle_waits, 0);

        vdb.settings_mut().global.can_idle = true;
        assert!(vdb.begin_break("a"));
        vdb.end_break();
        assert_eq!(vdb.platform().idle_waits, 1);

        vdb.set_auto_step(true);
        vdb.settings_mut().global.auto_step_delay_ms = 10_000;
        assert!(vdb.begin_break("a"));
        vdb.end_break();
        assert_eq!(vdb.platform().idle_waits, 1);
    }

    #[test]
    fn test_toggle_auto_step() {
        let dir = tempfile::tempdir().unwrap();
        let mut vdb = debugger(&dir);
        assert!(!vdb.is_auto_stepping());
        vdb.toggle_auto_step();
        assert!(vdb.is_auto_stepping());
        vdb.toggle_auto_step();
        assert!(!vdb.is_auto_stepping());
    }
}
