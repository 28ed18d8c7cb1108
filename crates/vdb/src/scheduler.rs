//! Breakpoint stepping state machine.
//!
//! The host calls into the debugger at labelled breakpoints and keeps
//! re-entering the same breakpoint while the debugger wants to render. The
//! scheduler decides, per call, whether to render or let the host continue:
//!
//! - **step once**: stop rendering the current breakpoint and let the host
//!   run until the next breakpoint call, whatever its label
//! - **step over**: like step once, and additionally skip every following
//!   call with the same label until a different label shows up
//! - **auto step**: trigger step once on a timer

/// What [`BreakpointScheduler::enter`] knows about the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameEntry {
    /// First rendered tick since the breakpoint was entered.
    pub is_first_frame: bool,
    /// The label differs from the previous rendered call's label.
    pub is_different_label: bool,
}

/// Step requests coming from the keyboard this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInput {
    pub step_once: bool,
    pub step_over: bool,
}

/// Outcome of [`BreakpointScheduler::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the host inside the breakpoint and render this tick.
    Render,
    /// Leave the breakpoint.
    StepOnce,
    /// Leave the breakpoint and skip further calls with the same label.
    StepOver,
}

impl Decision {
    /// Whether the host should continue instead of rendering.
    pub fn is_step(self) -> bool {
        !matches!(self, Decision::Render)
    }
}

/// Per-label breakpoint state machine.
#[derive(Debug, Clone)]
pub struct BreakpointScheduler {
    prev_label: Option<String>,
    skip_label: Option<String>,
    first_frame: bool,
    want_step_once: bool,
    want_step_over: bool,
    auto_step: bool,
    auto_step_ticks: u64,
    save_ticks: u32,
}

impl Default for BreakpointScheduler {
    fn default() -> Self {
        Self {
            prev_label: None,
            skip_label: None,
            first_frame: true,
            want_step_once: false,
            want_step_over: false,
            auto_step: false,
            auto_step_ticks: 0,
            save_ticks: 0,
        }
    }
}

impl BreakpointScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a breakpoint call with `label`.
    ///
    /// Returns `None` if the call is being stepped over and must not render.
    pub fn enter(&mut self, label: &str) -> Option<FrameEntry> {
        match self.skip_label.as_deref() {
            Some(skip) if skip == label => return None,
            Some(_) => self.skip_label = None,
            None => {}
        }

        let is_different_label = self.prev_label.as_deref() != Some(label);
        if is_different_label {
            self.prev_label = Some(label.to_owned());
        }
        let entry = FrameEntry {
            is_first_frame: self.first_frame || is_different_label,
            is_different_label,
        };
        self.first_frame = false;
        Some(entry)
    }

    /// Resolves step requests for a tick that is about to render.
    ///
    /// Step once (from `input`, [`BreakpointScheduler::request_step_once`] or
    /// the auto-step timer) wins over step over. The auto-step timer fires
    /// once more than `delay_ms * tick_rate_hz / 1000` ticks have passed.
    pub fn decide(&mut self, input: StepInput, delay_ms: i32, tick_rate_hz: u32) -> Decision {
        let mut auto_fired = false;
        if self.auto_step {
            self.auto_step_ticks += 1;
            let threshold = i64::from(delay_ms) * i64::from(tick_rate_hz) / 1000;
            if i64::try_from(self.auto_step_ticks).unwrap_or(i64::MAX) > threshold {
                self.auto_step_ticks = 0;
                auto_fired = true;
            }
        }

        if input.step_once || std::mem::take(&mut self.want_step_once) || auto_fired {
            self.first_frame = true;
            return Decision::StepOnce;
        }
        if input.step_over || std::mem::take(&mut self.want_step_over) {
            self.first_frame = true;
            self.skip_label.clone_from(&self.prev_label);
            return Decision::StepOver;
        }
        Decision::Render
    }

    /// Requests a step once on the next rendered tick.
    pub fn request_step_once(&mut self) {
        self.want_step_once = true;
    }

    /// Requests a step over on the next rendered tick.
    pub fn request_step_over(&mut self) {
        self.want_step_over = true;
    }

    pub fn set_auto_step(&mut self, enabled: bool) {
        if enabled != self.auto_step {
            self.auto_step_ticks = 0;
        }
        self.auto_step = enabled;
    }

    pub fn is_auto_stepping(&self) -> bool {
        self.auto_step
    }

    /// Counts a rendered tick and reports whether a periodic save is due.
    ///
    /// `period` of zero never saves.
    pub fn save_due(&mut self, period: u32) -> bool {
        if period == 0 {
            return false;
        }
        self.save_ticks += 1;
        if self.save_ticks >= period {
            self.save_ticks = 0;
            true
        } else {
            false
        }
    }

    /// Label currently being stepped over.
    pub fn skip_label(&self) -> Option<&str> {
        self.skip_label.as_deref()
    }
}
