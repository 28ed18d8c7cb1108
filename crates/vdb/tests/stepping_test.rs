//! Stepping integration tests for vdb-rs.
//!
//! These tests drive a [`Debugger`] over the headless platform the way an
//! instrumented program would: calling `begin_break` in a loop and reacting
//! to its answer.

use vdb::*;

fn debugger(dir: &tempfile::TempDir) -> Debugger<HeadlessPlatform, HeadlessUi> {
    let config = DebuggerConfig::default()
        .with_settings_path(dir.path().join("vdb.ini"))
        .non_exiting();
    Debugger::new(config, HeadlessPlatform::new(), HeadlessUi::new())
}

/// One rendered tick: begin, and end if the frame was rendered.
fn tick(vdb: &mut Debugger<HeadlessPlatform, HeadlessUi>, label: &str) -> bool {
    let render = vdb.begin_break(label);
    if render {
        vdb.end_break();
    }
    render
}

#[test]
fn step_over_skips_until_label_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut vdb = debugger(&dir);

    assert!(tick(&mut vdb, "A"));
    vdb.platform_mut().press(Key::F5);
    assert!(!tick(&mut vdb, "A"));

    // The host moves on, hitting A twice more and then B.
    assert!(!tick(&mut vdb, "A"));
    assert!(!tick(&mut vdb, "A"));
    assert!(tick(&mut vdb, "B"));
    assert!(vdb.is_first_frame());
    assert!(vdb.is_different_label());

    // A is no longer skipped once B was reached.
    assert!(tick(&mut vdb, "A"));
}

#[test]
fn step_once_continues_one_breakpoint() {
    let dir = tempfile::tempdir().unwrap();
    let mut vdb = debugger(&dir);

    assert!(tick(&mut vdb, "A"));
    assert!(tick(&mut vdb, "A"));
    assert!(!vdb.is_first_frame());

    vdb.step_once();
    assert!(!tick(&mut vdb, "A"));

    // The next call renders again, whatever its label.
    assert!(tick(&mut vdb, "A"));
    assert!(vdb.is_first_frame());
    assert!(!vdb.is_different_label());
}

#[test]
fn step_once_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut vdb = debugger(&dir);

    assert!(tick(&mut vdb, "A"));
    vdb.platform_mut().press(Key::F10);
    assert!(!tick(&mut vdb, "A"));
    assert!(tick(&mut vdb, "B"));
    assert!(tick(&mut vdb, "B"));
}

#[test]
fn auto_step_continues_on_a_timer() {
    let dir = tempfile::tempdir().unwrap();
    let mut vdb = debugger(&dir);

    // Settings are loaded on the first breakpoint, so change them after it.
    assert!(tick(&mut vdb, "A"));
    vdb.settings_mut().global.auto_step_delay_ms = 50;
    vdb.set_auto_step(true);

    // 50 ms at 60 Hz is 3 ticks: three renders, then a step.
    let results: Vec<bool> = (0..8).map(|_| tick(&mut vdb, "A")).collect();
    assert_eq!(results, [true, true, true, false, true, true, true, false]);
}

#[test]
fn stepping_saves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdb.ini");
    let mut vdb = debugger(&dir);

    assert!(tick(&mut vdb, "A"));
    assert!(!path.exists());

    let frame = vdb.frame_settings_mut().unwrap();
    frame.grid.grid_visible = true;
    frame.grid.dirty = true;
    vdb.step_once();
    assert!(!tick(&mut vdb, "A"));

    let saved = Settings::load_or_default(&path);
    let id = saved.frames.lookup("A").unwrap();
    assert!(saved.frames.get(id).unwrap().grid.grid_visible);
}

#[test]
fn quit_saves_and_stops() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdb.ini");
    let mut vdb = debugger(&dir);

    assert!(tick(&mut vdb, "A"));
    vdb.platform_mut().set_window_rect(WindowSettings {
        x: 10,
        y: 20,
        width: 640,
        height: 480,
    });
    vdb.platform_mut().request_quit();
    assert!(!tick(&mut vdb, "A"));

    assert!(vdb.is_stopped());
    assert!(vdb.platform().is_closed());
    assert!(!tick(&mut vdb, "A"));
    assert!(!tick(&mut vdb, "B"));

    let saved = Settings::load_or_default(&path);
    assert_eq!((saved.global.window.x, saved.global.window.y), (10, 20));
    assert_eq!((saved.global.window.width, saved.global.window.height), (640, 480));
}

#[test]
fn graphics_error_stops_debugger() {
    let dir = tempfile::tempdir().unwrap();
    let mut vdb = debugger(&dir);

    assert!(tick(&mut vdb, "A"));
    vdb.platform_mut().inject_error(0x0502);
    assert!(!vdb.begin_break("A"));
    assert!(vdb.is_stopped());
    assert!(!tick(&mut vdb, "A"));
}

#[test]
fn periodic_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdb.ini");
    let config = DebuggerConfig::default()
        .with_settings_path(&path)
        .with_save_period_ticks(3)
        .non_exiting();
    let mut vdb = Debugger::new(config, HeadlessPlatform::new(), HeadlessUi::new());

    assert!(tick(&mut vdb, "A"));
    assert!(tick(&mut vdb, "A"));
    assert!(!path.exists());
    assert!(tick(&mut vdb, "A"));
    assert!(path.exists());
}
