//! Interfaces to the window, graphics context and UI layer.
//!
//! The debugger core never talks to a windowing or graphics API directly.
//! A host plugs in a [`Platform`] and a [`UiLayer`]; [`crate::headless`]
//! provides implementations that need neither.

use vdb_core::{Result, VdbError, WindowSettings};

use crate::keys::KeyTable;

/// Window, event loop and graphics context.
pub trait Platform {
    /// Creates the window and its graphics context, placed at `rect`.
    ///
    /// A negative `rect` position lets the platform choose one.
    fn create_context(&mut self, rect: WindowSettings) -> Result<()>;

    fn show_window(&mut self);

    fn is_window_visible(&self) -> bool;

    /// Current window placement.
    fn window_rect(&self) -> WindowSettings;

    /// Framebuffer size in pixels.
    fn framebuffer_size(&self) -> (u32, u32);

    /// Processes pending events without blocking, updating `keys`.
    fn poll_events(&mut self, keys: &mut KeyTable);

    /// Blocks until an event arrives, unless frames are still being kept
    /// awake, then processes events like [`Platform::poll_events`].
    fn wait_events(&mut self, keys: &mut KeyTable);

    /// Don't block in [`Platform::wait_events`] for the next `frames` calls.
    fn keep_awake(&mut self, frames: u32);

    /// Whether the user asked to close the window.
    fn should_quit(&self) -> bool;

    /// Destroys the window.
    fn close(&mut self);

    fn swap_buffers(&mut self);

    /// Takes the oldest pending graphics error code, if any.
    fn take_error(&mut self) -> Option<u32>;
}

/// Immediate-mode UI drawn on top of every debugger frame.
pub trait UiLayer {
    /// Rebuilds the font atlas at `size_px` pixels.
    fn load_fonts(&mut self, size_px: u32);

    fn begin_frame(&mut self);

    fn end_frame(&mut self);
}

/// Symbolic name of an OpenGL-style error code.
pub fn graphics_error_name(code: u32) -> &'static str {
    match code {
        0x0500 => "GL_INVALID_ENUM",
        0x0501 => "GL_INVALID_VALUE",
        0x0502 => "GL_INVALID_OPERATION",
        0x0505 => "GL_OUT_OF_MEMORY",
        0x0506 => "GL_INVALID_FRAMEBUFFER_OPERATION",
        _ => "unknown error",
    }
}

/// Builds the error for graphics error `code`.
pub fn graphics_error(code: u32) -> VdbError {
    VdbError::Graphics {
        code,
        name: graphics_error_name(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names() {
        assert_eq!(graphics_error_name(0x0502), "GL_INVALID_OPERATION");
        assert_eq!(graphics_error_name(0x1234), "unknown error");
        assert_eq!(
            graphics_error(0x0505).to_string(),
            "graphics error 0x0505 (GL_OUT_OF_MEMORY)"
        );
    }
}
