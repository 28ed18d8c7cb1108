//! Settings file integration tests for vdb-core.
//!
//! These tests go through real files on disk: hand-written settings files,
//! save/reload cycles and the default fallback.

use std::fs;

use vdb_core::*;

const HAND_WRITTEN: &str = "\
[vdb]
window_pos = 40, 60
window_size=1280,720
mouse_sensitivity=12.5
font_size=24
dpi_scale=125
auto_step_delay_ms=500
global_theme=bright
some_future_option=enabled

[frame]=draw points
camera_type=planar
planar_position=1.5,-2
planar_zoom=3
planar_angle=0.5
planar_up=y_up
grid_visible=true
grid_scale=0.5
cube_visible=False

[frame]=mesh: pass 2
camera_type=trackball
trackball_R=0,1,0,0, -1,0,0,0, 0,0,1,0, 0,0,0,1
trackball_T=0, 0, -5, 1
trackball_zoom=2
trackball_up=z_up
y_fov=1.2
min_depth=0.01
max_depth=1000
render_scale_down=2
render_scale_up=1
";

#[test]
fn hand_written_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdb.ini");
    fs::write(&path, HAND_WRITTEN).unwrap();

    let settings = Settings::load_or_default(&path);

    let global = &settings.global;
    assert_eq!(global.window, WindowSettings { x: 40, y: 60, width: 1280, height: 720 });
    assert_eq!(global.navigation.mouse_sensitivity, 12.5);
    assert_eq!(global.font_size, 24);
    assert_eq!(global.dpi_scale, 125);
    assert_eq!(global.effective_font_size(), 30);
    assert_eq!(global.auto_step_delay_ms, 500);
    assert_eq!(global.global_theme, Theme::Bright);

    assert_eq!(settings.frames.len(), 2);

    let points = settings.frames.get(settings.frames.lookup("draw points").unwrap()).unwrap();
    assert_eq!(points.camera.kind, CameraKind::Planar);
    assert_eq!(points.camera.up(), Some(Orientation::YUp));
    assert_eq!(points.camera.planar.params.position, Vec2::new(1.5, -2.0));
    assert!(points.grid.grid_visible);
    assert!(!points.grid.cube_visible);
    assert!(!points.camera.trackball.dirty);

    let mesh = settings.frames.get(settings.frames.lookup("mesh: pass 2").unwrap()).unwrap();
    assert_eq!(mesh.camera.kind, CameraKind::Trackball);
    assert_eq!(mesh.camera.trackball.params.translation, Vec4::new(0.0, 0.0, -5.0, 1.0));
    assert_eq!(mesh.camera.projection.y_fov, 1.2);
    assert_eq!(mesh.render_scaler.down, 2);
    assert_eq!(mesh.render_scaler.target_size((1280, 720)), Some((320, 180)));
}

#[test]
fn save_and_reload_keeps_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdb.ini");

    let mut settings = Settings::load_or_default(&path);
    assert!(settings.frames.is_empty());

    settings.global.can_idle = true;
    let id = settings.frames.get_or_create("solver");
    let frame = settings.frames.get_mut(id).unwrap();
    frame.camera.select(CameraKind::Turntable);
    frame.camera.turntable.params.angle_x = 0.3;
    frame.camera.turntable.params.radius = 7.0;
    frame.camera.turntable.dirty = true;
    frame.grid.grid_visible = true;
    frame.grid.dirty = true;
    settings.frames.get_or_create("untouched");

    assert!(settings.save(&path));

    let reloaded = Settings::load_or_default(&path);
    assert!(reloaded.global.can_idle);
    let solver = reloaded.frames.get(reloaded.frames.lookup("solver").unwrap()).unwrap();
    assert_eq!(solver.camera.kind, CameraKind::Turntable);
    assert_eq!(solver.camera.turntable.params.angle_x, 0.3);
    assert_eq!(solver.camera.turntable.params.radius, 7.0);
    assert!(solver.grid.grid_visible);
    assert!(!solver.camera.projection.dirty);

    let untouched = reloaded.frames.get(reloaded.frames.lookup("untouched").unwrap()).unwrap();
    assert!(!untouched.is_dirty());

    // A second save of the reloaded settings produces the same file.
    let first = fs::read_to_string(&path).unwrap();
    assert!(reloaded.save(&path));
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn overflowing_file_keeps_first_sections() {
    let mut text = String::new();
    for i in 0..MAX_FRAME_SETTINGS + 5 {
        text.push_str(&format!("[frame]=label {i}\ngrid_scale={i}\n"));
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdb.ini");
    fs::write(&path, text).unwrap();

    let mut settings = Settings::load_or_default(&path);
    assert_eq!(settings.frames.len(), MAX_FRAME_SETTINGS);
    let last = settings.frames.lookup(&format!("label {}", MAX_FRAME_SETTINGS - 1)).unwrap();
    assert_eq!(settings.frames.get(last).unwrap().grid.grid_scale, (MAX_FRAME_SETTINGS - 1) as f32);
    assert!(settings.frames.lookup(&format!("label {MAX_FRAME_SETTINGS}")).is_none());

    // New labels still work for this session.
    let extra = settings.frames.get_or_create("one more");
    assert!(matches!(extra, FrameId::Transient(_)));
    settings.frames.get_mut(extra).unwrap().grid.grid_visible = true;
    assert!(settings.frames.get(extra).unwrap().grid.grid_visible);

    assert!(settings.save(&path));
    let reloaded = Settings::load_or_default(&path);
    assert!(reloaded.frames.lookup("one more").is_none());
    assert_eq!(reloaded.frames.len(), MAX_FRAME_SETTINGS);
}

#[test]
fn garbage_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdb.ini");
    fs::write(&path, "this is not a settings file\n=,=,\n[frame\n").unwrap();

    let settings = Settings::load_or_default(&path);
    assert_eq!(settings.global, GlobalSettings::default());
    assert!(settings.frames.is_empty());
}
