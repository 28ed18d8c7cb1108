//! Per-breakpoint camera state.
//!
//! A breakpoint selects one [`CameraKind`]. Each built-in kind keeps its own
//! [`CameraView`]: a header shared by all kinds (dirty flag and up
//! orientation) plus the kind-specific parameters. All three views are kept
//! so that switching between camera kinds does not lose the others' state,
//! and the settings file can persist each of them independently.

use glam::{Mat4, Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::keys::Key;

/// Which camera drives the view of a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraKind {
    /// Built-in camera disabled; the host controls all transforms.
    #[default]
    Custom,
    /// 2D pan/rotate/zoom camera.
    Planar,
    /// Free-rotating 3D camera.
    Trackball,
    /// 3D camera orbiting a fixed up axis.
    Turntable,
}

impl CameraKind {
    /// All kinds with their settings file literal.
    pub const LITERALS: &'static [(&'static str, CameraKind)] = &[
        ("disabled", CameraKind::Custom),
        ("planar", CameraKind::Planar),
        ("trackball", CameraKind::Trackball),
        ("turntable", CameraKind::Turntable),
    ];

    /// The settings file literal for this kind.
    pub fn literal(self) -> &'static str {
        match self {
            CameraKind::Custom => "disabled",
            CameraKind::Planar => "planar",
            CameraKind::Trackball => "trackball",
            CameraKind::Turntable => "turntable",
        }
    }

    /// The view backing this kind, or `None` for [`CameraKind::Custom`].
    pub fn view_kind(self) -> Option<ViewKind> {
        match self {
            CameraKind::Custom => None,
            CameraKind::Planar => Some(ViewKind::Planar),
            CameraKind::Trackball => Some(ViewKind::Trackball),
            CameraKind::Turntable => Some(ViewKind::Turntable),
        }
    }

    /// Whether this camera renders with a perspective projection.
    pub fn is_perspective(self) -> bool {
        matches!(self, CameraKind::Trackball | CameraKind::Turntable)
    }
}

/// The built-in camera kinds that own a [`CameraView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Planar,
    Trackball,
    Turntable,
}

/// Which world axis points up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// +Z up.
    #[default]
    ZUp,
    /// +Y up.
    YUp,
    /// +X up.
    XUp,
    /// -Z up.
    ZDown,
    /// -Y up.
    YDown,
    /// -X up.
    XDown,
}

impl Orientation {
    /// All orientations with their settings file literal.
    pub const LITERALS: &'static [(&'static str, Orientation)] = &[
        ("z_up", Orientation::ZUp),
        ("y_up", Orientation::YUp),
        ("x_up", Orientation::XUp),
        ("z_down", Orientation::ZDown),
        ("y_down", Orientation::YDown),
        ("x_down", Orientation::XDown),
    ];

    /// The settings file literal for this orientation.
    pub fn literal(self) -> &'static str {
        match self {
            Orientation::ZUp => "z_up",
            Orientation::YUp => "y_up",
            Orientation::XUp => "x_up",
            Orientation::ZDown => "z_down",
            Orientation::YDown => "y_down",
            Orientation::XDown => "x_down",
        }
    }
}

/// Planar camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarParams {
    pub position: Vec2,
    pub angle: f32,
    pub zoom: f32,
}

impl Default for PlanarParams {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            zoom: 1.0,
        }
    }
}

/// Trackball camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackballParams {
    /// World to camera rotation.
    pub rotation: Mat4,
    /// Camera relative to world, in world coordinates.
    pub translation: Vec4,
    pub zoom: f32,
}

impl Default for TrackballParams {
    fn default() -> Self {
        Self {
            rotation: Mat4::IDENTITY,
            translation: Vec4::new(0.0, 0.0, 0.0, 1.0),
            zoom: 1.0,
        }
    }
}

/// Turntable camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurntableParams {
    pub angle_x: f32,
    pub angle_y: f32,
    pub radius: f32,
}

impl Default for TurntableParams {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            radius: 1.0,
        }
    }
}

/// One built-in camera: common header plus kind-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView<P> {
    /// Set once anything in this view was changed; only dirty views are saved.
    pub dirty: bool,
    pub up: Orientation,
    pub params: P,
}

impl<P: Default> CameraView<P> {
    fn with_up(up: Orientation) -> Self {
        Self {
            dirty: false,
            up,
            params: P::default(),
        }
    }
}

/// The view a breakpoint currently renders with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveView<'a> {
    Custom,
    Planar(&'a CameraView<PlanarParams>),
    Trackball(&'a CameraView<TrackballParams>),
    Turntable(&'a CameraView<TurntableParams>),
}

impl ActiveView<'_> {
    /// Up orientation of the active view; `None` for the custom camera.
    pub fn up(&self) -> Option<Orientation> {
        match self {
            ActiveView::Custom => None,
            ActiveView::Planar(v) => Some(v.up),
            ActiveView::Trackball(v) => Some(v.up),
            ActiveView::Turntable(v) => Some(v.up),
        }
    }
}

/// Projection used by the perspective cameras.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    pub dirty: bool,
    /// Vertical field of view in radians.
    pub y_fov: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            dirty: false,
            y_fov: 0.7,
            min_depth: 0.1,
            max_depth: 50.0,
        }
    }
}

/// Camera state of one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Set when the camera kind was chosen explicitly.
    pub dirty: bool,
    pub kind: CameraKind,
    /// Key the host assigned to this camera. Never persisted.
    #[serde(skip)]
    pub key: Option<Key>,
    pub projection: ProjectionSettings,
    pub planar: CameraView<PlanarParams>,
    pub trackball: CameraView<TrackballParams>,
    pub turntable: CameraView<TurntableParams>,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            dirty: false,
            kind: CameraKind::Custom,
            key: None,
            projection: ProjectionSettings::default(),
            planar: CameraView::with_up(Orientation::YUp),
            trackball: CameraView::with_up(Orientation::ZUp),
            turntable: CameraView::with_up(Orientation::ZUp),
        }
    }
}

impl CameraState {
    /// The view selected by [`CameraState::kind`].
    pub fn active(&self) -> ActiveView<'_> {
        match self.kind {
            CameraKind::Custom => ActiveView::Custom,
            CameraKind::Planar => ActiveView::Planar(&self.planar),
            CameraKind::Trackball => ActiveView::Trackball(&self.trackball),
            CameraKind::Turntable => ActiveView::Turntable(&self.turntable),
        }
    }

    /// Up orientation of the active view; `None` for the custom camera.
    pub fn up(&self) -> Option<Orientation> {
        self.active().up()
    }

    /// Sets the up orientation of the active view.
    ///
    /// Returns false, and changes nothing, for the custom camera.
    pub fn set_up(&mut self, up: Orientation) -> bool {
        match self.kind.view_kind() {
            Some(kind) => {
                *self.up_mut(kind) = up;
                true
            }
            None => false,
        }
    }

    /// Mutable access to the up orientation of the view of `kind`.
    pub fn up_mut(&mut self, kind: ViewKind) -> &mut Orientation {
        match kind {
            ViewKind::Planar => &mut self.planar.up,
            ViewKind::Trackball => &mut self.trackball.up,
            ViewKind::Turntable => &mut self.turntable.up,
        }
    }

    /// Selects a camera kind and marks the choice for saving.
    pub fn select(&mut self, kind: CameraKind) {
        self.kind = kind;
        self.dirty = true;
    }
}
