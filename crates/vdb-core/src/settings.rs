//! Global and per-breakpoint settings.

use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::registry::FrameRegistry;

/// Font size used until the user picks another one.
pub const DEFAULT_FONT_SIZE: i32 = 18;

/// Accepted range of `font_size` in the settings file.
pub const FONT_SIZE_RANGE: (i32, i32) = (6, 96);

/// Accepted range of `dpi_scale` (in percent) in the settings file.
pub const DPI_SCALE_RANGE: (i32, i32) = (100, 200);

/// Largest render-scale downsampling exponent.
pub const MAX_RENDER_SCALE_DOWN: i32 = 3;

/// Largest render-scale upsampling exponent.
pub const MAX_RENDER_SCALE_UP: i32 = 3;

/// Color theme of the debugger UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Bright,
}

impl Theme {
    /// All themes with their settings file literal.
    pub const LITERALS: &'static [(&'static str, Theme)] =
        &[("dark", Theme::Dark), ("bright", Theme::Bright)];

    /// The settings file literal for this theme.
    pub fn literal(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Bright => "bright",
        }
    }
}

/// Grid and unit cube overlay of a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub dirty: bool,
    pub grid_visible: bool,
    /// Distance between major grid lines, in scene units.
    pub grid_scale: f32,
    pub cube_visible: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            dirty: false,
            grid_visible: false,
            grid_scale: 2.0,
            cube_visible: false,
        }
    }
}

/// Offscreen render resolution of a breakpoint.
///
/// The scene is rendered at `framebuffer >> down` and upsampled `up` times
/// on the way back to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderScalerSettings {
    pub dirty: bool,
    pub down: i32,
    pub up: i32,
}

impl RenderScalerSettings {
    /// Offscreen target size for the given framebuffer, or `None` when
    /// rendering directly at window resolution.
    pub fn target_size(&self, framebuffer: (u32, u32)) -> Option<(u32, u32)> {
        if self.down <= 0 {
            return None;
        }
        let shift = self.down.min(MAX_RENDER_SCALE_DOWN) as u32;
        Some(((framebuffer.0 >> shift).max(1), (framebuffer.1 >> shift).max(1)))
    }
}

/// View settings remembered for one breakpoint label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSettings {
    label: String,
    pub camera: CameraState,
    pub grid: GridSettings,
    pub render_scaler: RenderScalerSettings,
}

impl FrameSettings {
    /// Creates default settings for `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            camera: CameraState::default(),
            grid: GridSettings::default(),
            render_scaler: RenderScalerSettings::default(),
        }
    }

    /// The breakpoint label these settings belong to.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether any part of these settings would be written to disk.
    pub fn is_dirty(&self) -> bool {
        let camera = &self.camera;
        camera.dirty
            || camera.projection.dirty
            || camera.planar.dirty
            || camera.trackball.dirty
            || camera.turntable.dirty
            || self.grid.dirty
            || self.render_scaler.dirty
    }
}

/// Window placement. A negative position lets the platform choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            x: -1,
            y: -1,
            width: 1000,
            height: 600,
        }
    }
}

/// Input sensitivities shared by all built-in cameras.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationSettings {
    pub mouse_sensitivity: f32,
    pub scroll_sensitivity: f32,
    pub move_speed_normal: f32,
    pub move_speed_slow: f32,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 50.0,
            scroll_sensitivity: 5.0,
            move_speed_normal: 1.0,
            move_speed_slow: 0.5,
        }
    }
}

/// Settings that apply to every breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub window: WindowSettings,
    pub navigation: NavigationSettings,
    pub never_ask_on_exit: bool,
    pub show_main_menu: bool,
    pub font_size: i32,
    /// UI scale in percent.
    pub dpi_scale: i32,
    /// Block in the event loop while nothing happens instead of polling.
    pub can_idle: bool,
    pub auto_step_delay_ms: i32,
    pub global_theme: Theme,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            navigation: NavigationSettings::default(),
            never_ask_on_exit: false,
            show_main_menu: true,
            font_size: DEFAULT_FONT_SIZE,
            dpi_scale: 100,
            can_idle: false,
            auto_step_delay_ms: 250,
            global_theme: Theme::Dark,
        }
    }
}

impl GlobalSettings {
    /// Font size in pixels after applying the DPI scale.
    pub fn effective_font_size(&self) -> u32 {
        let size = self.font_size as f32 * self.dpi_scale as f32 / 100.0;
        size.max(1.0) as u32
    }
}

/// Everything persisted in the settings file.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub global: GlobalSettings,
    pub frames: FrameRegistry,
}

impl Settings {
    /// Creates default settings with an empty frame registry.
    pub fn new() -> Self {
        Self::default()
    }
}
