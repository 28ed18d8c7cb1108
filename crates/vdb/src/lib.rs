//! vdb-rs: an in-process visual debugger.
//!
//! An instrumented program calls into the debugger at labelled breakpoints.
//! Each breakpoint pops up a window where the program draws diagnostic
//! geometry, and the developer steps through the program from there.
//!
//! # Quick Start
//!
//! ```no_run
//! use vdb::*;
//!
//! let config = DebuggerConfig::default().with_settings_path("vdb.ini");
//! let mut vdb = Debugger::new(config, HeadlessPlatform::new(), HeadlessUi::new());
//!
//! let mut positions = vec![Vec3::ZERO; 16];
//! for _ in 0..1000 {
//!     for p in &mut positions {
//!         *p += Vec3::Y * 0.01;
//!     }
//!     while vdb.begin_break("integrate") {
//!         // draw `positions` here
//!         vdb.end_break();
//!     }
//! }
//! ```
//!
//! # Stepping
//!
//! - **F10** (or [`Debugger::step_once`]) continues to the next breakpoint
//! - **F5** (or [`Debugger::step_over`]) continues and skips the current
//!   breakpoint until a breakpoint with another label is reached
//! - [`Debugger::set_auto_step`] steps once every `auto_step_delay_ms`
//!
//! # Settings
//!
//! Camera, grid and render scale settings are remembered per breakpoint
//! label and saved to `vdb.ini` (see [`vdb_core::codec`]).

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod debugger;
pub mod headless;
pub mod keys;
pub mod platform;
pub mod scheduler;
pub mod view;

// Re-export core types
pub use vdb_core::{
    camera::{CameraKind, CameraState, Orientation},
    error::{Result, VdbError},
    hints::Hint,
    keys::Key,
    settings::{FrameSettings, GlobalSettings, Settings, Theme, WindowSettings},
    Mat4, Vec2, Vec3, Vec4,
};

pub use config::DebuggerConfig;
pub use debugger::Debugger;
pub use headless::{HeadlessPlatform, HeadlessUi};
pub use keys::KeyTable;
pub use platform::{Platform, UiLayer};
pub use scheduler::{BreakpointScheduler, Decision};
pub use view::{FrameView, RenderTarget};

/// Initializes `env_logger` unless a logger is already installed.
///
/// [`Debugger::new`] calls this. Verbosity is controlled with `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
