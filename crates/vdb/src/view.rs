//! Per-frame view derived from a breakpoint's settings.

use glam::Mat4;
use vdb_core::math::{scale, up_permutation};
use vdb_core::settings::MAX_RENDER_SCALE_UP;
use vdb_core::{CameraKind, FrameSettings, Orientation, ProjectionSettings};

/// Offscreen target the scene is rendered into before upsampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    /// Number of 2x upsampling passes back to window resolution.
    pub upsample_steps: u32,
}

/// What the renderer needs to know to draw one breakpoint frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub camera: CameraKind,
    /// Projection for the perspective cameras.
    pub projection: Option<ProjectionSettings>,
    /// Up orientation of the built-in camera, if one is active.
    pub up: Option<Orientation>,
    /// Maps the configured up axis onto +Y.
    pub pre_permutation: Mat4,
    /// Scales the scene so one grid cell is one unit.
    pub pre_scaling: Mat4,
    pub grid_visible: bool,
    pub cube_visible: bool,
    /// `None` when rendering straight to the window.
    pub render_target: Option<RenderTarget>,
}

impl FrameView {
    /// Computes the view of `frame` for a window with `framebuffer` pixels.
    pub fn new(frame: &FrameSettings, framebuffer: (u32, u32)) -> Self {
        let camera = &frame.camera;
        let up = camera.up();
        let grid_scale = frame.grid.grid_scale;
        let scalable = grid_scale > 0.0 && grid_scale.is_finite();
        let pre_scaling = if camera.kind != CameraKind::Custom && scalable {
            let s = 1.0 / grid_scale;
            scale(s, s, s)
        } else {
            Mat4::IDENTITY
        };
        let render_target = frame
            .render_scaler
            .target_size(framebuffer)
            .map(|(width, height)| RenderTarget {
                width,
                height,
                upsample_steps: frame.render_scaler.up.clamp(0, MAX_RENDER_SCALE_UP) as u32,
            });

        Self {
            camera: camera.kind,
            projection: camera.kind.is_perspective().then_some(camera.projection),
            up,
            pre_permutation: up.map_or(Mat4::IDENTITY, up_permutation),
            pre_scaling,
            grid_visible: frame.grid.grid_visible,
            cube_visible: frame.grid.cube_visible,
            render_target,
        }
    }

    /// Transform applied to scene coordinates before the camera.
    pub fn model_transform(&self) -> Mat4 {
        self.pre_scaling * self.pre_permutation
    }
}
