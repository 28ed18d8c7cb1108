//! Windowless platform and UI layer.
//!
//! [`HeadlessPlatform`] and [`HeadlessUi`] implement the collaborator traits
//! without touching any windowing or graphics API. They count what the
//! debugger asked them to do and let callers inject key presses, quit
//! requests and graphics errors. Useful for integration tests and for
//! running instrumented programs on machines without a display.

use std::collections::VecDeque;

use vdb_core::{Key, Result, WindowSettings};

use crate::keys::KeyTable;
use crate::platform::{Platform, UiLayer};

/// Framebuffer size reported when none was given.
pub const DEFAULT_FRAMEBUFFER_SIZE: (u32, u32) = (1000, 600);

/// A [`Platform`] with no window.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPlatform {
    rect: WindowSettings,
    framebuffer: Option<(u32, u32)>,
    visible: bool,
    closed: bool,
    quit_requested: bool,
    awake_frames: u32,
    /// Keys that go down on the next poll.
    queued: Vec<Key>,
    /// Keys that go up on the next poll.
    held: Vec<Key>,
    errors: VecDeque<u32>,
    /// Number of successful [`Platform::create_context`] calls.
    pub contexts_created: u32,
    pub shows: u32,
    pub polls: u32,
    /// Number of [`Platform::wait_events`] calls that would have blocked.
    pub idle_waits: u32,
    pub swaps: u32,
}

impl HeadlessPlatform {
    /// Creates a platform reporting [`DEFAULT_FRAMEBUFFER_SIZE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reported framebuffer size.
    #[must_use]
    pub fn with_framebuffer_size(mut self, width: u32, height: u32) -> Self {
        self.framebuffer = Some((width, height));
        self
    }

    /// Presses `key` on the next poll and releases it on the one after.
    pub fn press(&mut self, key: Key) {
        self.queued.push(key);
    }

    /// Makes [`Platform::should_quit`] return true.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Queues a graphics error code for [`Platform::take_error`].
    pub fn inject_error(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    /// Moves the window.
    pub fn set_window_rect(&mut self, rect: WindowSettings) {
        self.rect = rect;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Frames still kept awake.
    pub fn awake_frames(&self) -> u32 {
        self.awake_frames
    }

    fn deliver_keys(&mut self, keys: &mut KeyTable) {
        for key in self.held.drain(..) {
            keys.set_down(key, false);
        }
        for key in self.queued.drain(..) {
            keys.set_down(key, true);
            self.held.push(key);
        }
    }
}

impl Platform for HeadlessPlatform {
    fn create_context(&mut self, rect: WindowSettings) -> Result<()> {
        self.rect = rect;
        self.closed = false;
        self.contexts_created += 1;
        log::debug!("headless context created ({}x{})", rect.width, rect.height);
        Ok(())
    }

    fn show_window(&mut self) {
        self.visible = true;
        self.shows += 1;
    }

    fn is_window_visible(&self) -> bool {
        self.visible
    }

    fn window_rect(&self) -> WindowSettings {
        self.rect
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer.unwrap_or(DEFAULT_FRAMEBUFFER_SIZE)
    }

    fn poll_events(&mut self, keys: &mut KeyTable) {
        self.polls += 1;
        self.deliver_keys(keys);
    }

    fn wait_events(&mut self, keys: &mut KeyTable) {
        if self.awake_frames > 0 {
            self.awake_frames -= 1;
        } else {
            self.idle_waits += 1;
        }
        self.poll_events(keys);
    }

    fn keep_awake(&mut self, frames: u32) {
        self.awake_frames = self.awake_frames.max(frames);
    }

    fn should_quit(&self) -> bool {
        self.quit_requested
    }

    fn close(&mut self) {
        self.visible = false;
        self.closed = true;
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn take_error(&mut self) -> Option<u32> {
        self.errors.pop_front()
    }
}

/// A [`UiLayer`] that draws nothing.
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    in_frame: bool,
    pub frames_begun: u32,
    pub frames_ended: u32,
    /// Every font size loaded, in order.
    pub font_loads: Vec<u32>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame was begun and not yet ended.
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }
}

impl UiLayer for HeadlessUi {
    fn load_fonts(&mut self, size_px: u32) {
        self.font_loads.push(size_px);
    }

    fn begin_frame(&mut self) {
        self.in_frame = true;
        self.frames_begun += 1;
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        self.frames_ended += 1;
    }
}
