//! Reads `vdb.ini` text into [`Settings`].

use crate::camera::{CameraKind, Orientation};
use crate::registry::FrameId;
use crate::settings::{
    FrameSettings, GlobalSettings, Settings, Theme, DPI_SCALE_RANGE, FONT_SIZE_RANGE,
    MAX_RENDER_SCALE_DOWN, MAX_RENDER_SCALE_UP,
};

use super::cursor::Cursor;

/// Key that opens a per-breakpoint section.
pub const FRAME_SECTION: &str = "[frame]";

const FRAME_KEYS: &[&str] = &[
    "camera_type",
    "turntable_angle_x",
    "turntable_angle_y",
    "turntable_radius",
    "turntable_up",
    "planar_position",
    "planar_zoom",
    "planar_angle",
    "planar_up",
    "trackball_R",
    "trackball_T",
    "trackball_zoom",
    "trackball_up",
    "y_fov",
    "min_depth",
    "max_depth",
    "grid_visible",
    "grid_scale",
    "cube_visible",
    "render_scale_down",
    "render_scale_up",
];

const GLOBAL_KEYS: &[&str] = &[
    "window_pos",
    "window_size",
    "never_ask_on_exit",
    "show_main_menu",
    "mouse_sensitivity",
    "scroll_sensitivity",
    "move_speed_normal",
    "move_speed_slow",
    "font_size",
    "dpi_scale",
    "can_idle",
    "auto_step_delay_ms",
    "global_theme",
];

/// Where per-frame keys currently go.
enum Section {
    /// No `[frame]` seen yet.
    None,
    Stored(FrameId),
    /// The registry was full; keys are parsed into a scratch entry and dropped.
    Discarded(Box<FrameSettings>),
}

/// Stores `value` in `dst` and raises `dirty` if a value was parsed.
fn store<T>(value: Option<T>, dst: &mut T, dirty: &mut bool) -> bool {
    match value {
        Some(v) => {
            *dst = v;
            *dirty = true;
            true
        }
        None => false,
    }
}

fn parse_frame_value(c: &mut Cursor<'_>, key: &str, frame: &mut FrameSettings) -> bool {
    let camera = &mut frame.camera;
    let planar = &mut camera.planar;
    let turntable = &mut camera.turntable;
    let trackball = &mut camera.trackball;
    let projection = &mut camera.projection;
    let grid = &mut frame.grid;
    let scaler = &mut frame.render_scaler;
    match key {
        "camera_type" => store(
            c.parse_one_of(CameraKind::LITERALS),
            &mut camera.kind,
            &mut camera.dirty,
        ),
        "turntable_angle_x" => store(
            c.parse_float(),
            &mut turntable.params.angle_x,
            &mut turntable.dirty,
        ),
        "turntable_angle_y" => store(
            c.parse_float(),
            &mut turntable.params.angle_y,
            &mut turntable.dirty,
        ),
        "turntable_radius" => store(
            c.parse_float(),
            &mut turntable.params.radius,
            &mut turntable.dirty,
        ),
        "turntable_up" => store(
            c.parse_one_of(Orientation::LITERALS),
            &mut turntable.up,
            &mut turntable.dirty,
        ),
        "planar_position" => store(
            c.parse_vec2(),
            &mut planar.params.position,
            &mut planar.dirty,
        ),
        "planar_zoom" => store(c.parse_float(), &mut planar.params.zoom, &mut planar.dirty),
        "planar_angle" => store(c.parse_float(), &mut planar.params.angle, &mut planar.dirty),
        "planar_up" => store(
            c.parse_one_of(Orientation::LITERALS),
            &mut planar.up,
            &mut planar.dirty,
        ),
        "trackball_R" => store(
            c.parse_rotation(),
            &mut trackball.params.rotation,
            &mut trackball.dirty,
        ),
        "trackball_T" => store(
            c.parse_vec4(),
            &mut trackball.params.translation,
            &mut trackball.dirty,
        ),
        "trackball_zoom" => store(
            c.parse_float(),
            &mut trackball.params.zoom,
            &mut trackball.dirty,
        ),
        "trackball_up" => store(
            c.parse_one_of(Orientation::LITERALS),
            &mut trackball.up,
            &mut trackball.dirty,
        ),
        "y_fov" => store(c.parse_float(), &mut projection.y_fov, &mut projection.dirty),
        "min_depth" => store(
            c.parse_float(),
            &mut projection.min_depth,
            &mut projection.dirty,
        ),
        "max_depth" => store(
            c.parse_float(),
            &mut projection.max_depth,
            &mut projection.dirty,
        ),
        "grid_visible" => store(c.parse_bool(), &mut grid.grid_visible, &mut grid.dirty),
        "grid_scale" => store(c.parse_float(), &mut grid.grid_scale, &mut grid.dirty),
        "cube_visible" => store(c.parse_bool(), &mut grid.cube_visible, &mut grid.dirty),
        "render_scale_down" => store(
            c.parse_int_clamped(0, MAX_RENDER_SCALE_DOWN),
            &mut scaler.down,
            &mut scaler.dirty,
        ),
        "render_scale_up" => store(
            c.parse_int_clamped(0, MAX_RENDER_SCALE_UP),
            &mut scaler.up,
            &mut scaler.dirty,
        ),
        _ => false,
    }
}

fn parse_global_value(c: &mut Cursor<'_>, key: &str, global: &mut GlobalSettings) -> bool {
    // Global keys carry no dirty flag; they are always written.
    let mut touched = false;
    let window = &mut global.window;
    let nav = &mut global.navigation;
    match key {
        "window_pos" => c
            .parse_int2()
            .map(|(x, y)| {
                window.x = x;
                window.y = y;
            })
            .is_some(),
        "window_size" => c
            .parse_int2()
            .map(|(w, h)| {
                window.width = w;
                window.height = h;
            })
            .is_some(),
        "never_ask_on_exit" => store(c.parse_bool(), &mut global.never_ask_on_exit, &mut touched),
        "show_main_menu" => store(c.parse_bool(), &mut global.show_main_menu, &mut touched),
        "mouse_sensitivity" => store(c.parse_float(), &mut nav.mouse_sensitivity, &mut touched),
        "scroll_sensitivity" => store(c.parse_float(), &mut nav.scroll_sensitivity, &mut touched),
        "move_speed_normal" => store(c.parse_float(), &mut nav.move_speed_normal, &mut touched),
        "move_speed_slow" => store(c.parse_float(), &mut nav.move_speed_slow, &mut touched),
        "font_size" => store(
            c.parse_float_as_int(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1),
            &mut global.font_size,
            &mut touched,
        ),
        "dpi_scale" => store(
            c.parse_float_as_int(DPI_SCALE_RANGE.0, DPI_SCALE_RANGE.1),
            &mut global.dpi_scale,
            &mut touched,
        ),
        "can_idle" => store(c.parse_bool(), &mut global.can_idle, &mut touched),
        "auto_step_delay_ms" => store(c.parse_int(), &mut global.auto_step_delay_ms, &mut touched),
        "global_theme" => store(
            c.parse_one_of(Theme::LITERALS),
            &mut global.global_theme,
            &mut touched,
        ),
        _ => false,
    }
}

/// Applies settings file `text` on top of `settings`.
///
/// Parsing never fails. Unknown text is skipped one byte at a time, and a
/// recognized key whose value does not parse leaves its field untouched and
/// skips the rest of that line.
pub fn parse_into(settings: &mut Settings, text: &str) {
    let mut c = Cursor::new(text);
    let mut section = Section::None;
    let mut discarded = 0usize;

    loop {
        c.skip_blank();
        if c.is_at_end() {
            break;
        }

        if c.expect_key(FRAME_SECTION) {
            let label = c.rest_of_line();
            section = match settings.frames.get_or_insert_stored(&label) {
                Some(id) => Section::Stored(id),
                None => {
                    discarded += 1;
                    Section::Discarded(Box::new(FrameSettings::new(label)))
                }
            };
            continue;
        }

        if let Some(key) = FRAME_KEYS.iter().copied().find(|k| c.expect_key(k)) {
            let frame = match &mut section {
                Section::Stored(id) => settings.frames.get_mut(*id),
                Section::Discarded(scratch) => Some(scratch.as_mut()),
                Section::None => None,
            };
            let parsed = match frame {
                Some(frame) => parse_frame_value(&mut c, key, frame),
                None => parse_frame_value(&mut c, key, &mut FrameSettings::new("")),
            };
            if !parsed {
                c.skip_line();
            }
            continue;
        }

        if let Some(key) = GLOBAL_KEYS.iter().copied().find(|k| c.expect_key(k)) {
            if !parse_global_value(&mut c, key, &mut settings.global) {
                c.skip_line();
            }
            continue;
        }

        c.skip_byte();
    }

    if discarded > 0 {
        log::warn!(
            "reached max number of stored breakpoint settings ({}); ignored {discarded} [frame] section(s), consider cleaning up the settings file",
            settings.frames.capacity()
        );
    }
}
