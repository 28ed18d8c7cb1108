//! Core of vdb-rs.
//!
//! This crate holds everything the debugger needs that does not touch a window:
//! - [`math`]: the small matrix kernel used by the cameras and the settings file
//! - [`Settings`]: global and per-breakpoint view settings
//! - [`FrameRegistry`]: breakpoint label to [`FrameSettings`] table
//! - [`codec`]: reader and writer for the `vdb.ini` settings file
//! - [`HintQueue`]: host-supplied overrides staged for the next frame

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Settings structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
// The settings file stores plain i32/f32 values
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod camera;
pub mod codec;
pub mod error;
pub mod hints;
pub mod keys;
pub mod math;
pub mod registry;
pub mod settings;

pub use camera::{
    ActiveView, CameraKind, CameraState, CameraView, Orientation, PlanarParams,
    ProjectionSettings, TrackballParams, TurntableParams, ViewKind,
};
pub use error::{Result, VdbError};
pub use hints::{Hint, HintQueue};
pub use keys::Key;
pub use registry::{FrameId, FrameRegistry, MAX_FRAME_SETTINGS};
pub use settings::{
    FrameSettings, GlobalSettings, GridSettings, NavigationSettings, RenderScalerSettings,
    Settings, Theme, WindowSettings,
};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
