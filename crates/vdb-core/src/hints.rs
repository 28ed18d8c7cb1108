//! Host-supplied overrides of view settings.
//!
//! Hints are staged when the host calls them and applied together at the
//! start of the next rendered frame, so a frame never sees a half-applied
//! set of overrides.

use crate::camera::{CameraKind, Orientation};
use crate::keys::Key;
use crate::settings::{FrameSettings, GlobalSettings, Theme};

/// An override requested by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hint {
    /// Selects a built-in camera. [`CameraKind::Custom`] is ignored.
    CameraType(CameraKind),
    /// Up orientation of the active camera.
    Orientation(Orientation),
    /// Distance between major grid lines.
    ViewScale(f32),
    ShowGrid(bool),
    /// Key bound to the active camera.
    CameraKey(Key),
    Theme(Theme),
}

/// Latest staged value of each kind of hint.
#[derive(Debug, Clone, Default)]
pub struct HintQueue {
    view_scale: Option<f32>,
    show_grid: Option<bool>,
    camera_type: Option<CameraKind>,
    orientation: Option<Orientation>,
    camera_key: Option<Key>,
    theme: Option<Theme>,
}

impl HintQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `hint`, replacing any earlier hint of the same kind.
    ///
    /// Returns false if the hint was rejected.
    pub fn stage(&mut self, hint: Hint) -> bool {
        match hint {
            Hint::CameraType(CameraKind::Custom) => return false,
            Hint::CameraType(kind) => self.camera_type = Some(kind),
            Hint::Orientation(up) => self.orientation = Some(up),
            Hint::ViewScale(scale) => self.view_scale = Some(scale),
            Hint::ShowGrid(show) => self.show_grid = Some(show),
            Hint::CameraKey(key) => self.camera_key = Some(key),
            Hint::Theme(theme) => self.theme = Some(theme),
        }
        true
    }

    /// Returns true if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.view_scale.is_none()
            && self.show_grid.is_none()
            && self.camera_type.is_none()
            && self.orientation.is_none()
            && self.camera_key.is_none()
            && self.theme.is_none()
    }

    /// Applies and clears every staged hint.
    pub fn apply(&mut self, frame: &mut FrameSettings, global: &mut GlobalSettings) {
        if let Some(scale) = self.view_scale.take() {
            frame.grid.grid_scale = scale;
            frame.grid.dirty = true;
        }
        if let Some(show) = self.show_grid.take() {
            frame.grid.grid_visible = show;
            frame.grid.dirty = true;
        }
        if let Some(kind) = self.camera_type.take() {
            frame.camera.select(kind);
        }
        // Must come after the camera type so it targets the newly selected view.
        if let Some(up) = self.orientation.take() {
            frame.camera.set_up(up);
        }
        if let Some(key) = self.camera_key.take() {
            frame.camera.key = Some(key);
        }
        if let Some(theme) = self.theme.take() {
            global.global_theme = theme;
        }
    }
}
