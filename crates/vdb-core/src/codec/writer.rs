//! Formats [`Settings`] as `vdb.ini` text.
//!
//! Floats use Rust's shortest round-trip formatting, so reading the text back
//! yields bit-identical values.

use std::fmt::{self, Write};

use glam::{Mat4, Vec4};

use crate::settings::{FrameSettings, GlobalSettings, Settings};

use super::parser::FRAME_SECTION;

fn write_bool(out: &mut impl Write, key: &str, value: bool) -> fmt::Result {
    writeln!(out, "{key}={}", u8::from(value))
}

fn write_vec4(out: &mut impl Write, key: &str, v: Vec4) -> fmt::Result {
    writeln!(out, "{key}={}, {}, {}, {}", v.x, v.y, v.z, v.w)
}

fn write_mat4(out: &mut impl Write, key: &str, m: &Mat4) -> fmt::Result {
    write!(out, "{key}=")?;
    for (i, value) in m.to_cols_array().iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{value}")?;
    }
    out.write_char('\n')
}

fn write_global(out: &mut impl Write, global: &GlobalSettings) -> fmt::Result {
    let window = &global.window;
    let nav = &global.navigation;
    writeln!(out, "[vdb]")?;
    writeln!(out, "window_pos={},{}", window.x, window.y)?;
    writeln!(out, "window_size={},{}", window.width, window.height)?;
    write_bool(out, "never_ask_on_exit", global.never_ask_on_exit)?;
    write_bool(out, "show_main_menu", global.show_main_menu)?;
    writeln!(out, "mouse_sensitivity={}", nav.mouse_sensitivity)?;
    writeln!(out, "scroll_sensitivity={}", nav.scroll_sensitivity)?;
    writeln!(out, "move_speed_normal={}", nav.move_speed_normal)?;
    writeln!(out, "move_speed_slow={}", nav.move_speed_slow)?;
    writeln!(out, "font_size={}", global.font_size)?;
    writeln!(out, "dpi_scale={}", global.dpi_scale)?;
    write_bool(out, "can_idle", global.can_idle)?;
    writeln!(out, "auto_step_delay_ms={}", global.auto_step_delay_ms)?;
    writeln!(out, "global_theme={}", global.global_theme.literal())
}

fn write_frame(out: &mut impl Write, frame: &FrameSettings) -> fmt::Result {
    let camera = &frame.camera;
    writeln!(out, "\n{FRAME_SECTION}={}", frame.label())?;

    if camera.dirty {
        writeln!(out, "camera_type={}", camera.kind.literal())?;
    }

    let planar = &camera.planar;
    if planar.dirty {
        let p = &planar.params;
        writeln!(out, "planar_position={},{}", p.position.x, p.position.y)?;
        writeln!(out, "planar_zoom={}", p.zoom)?;
        writeln!(out, "planar_angle={}", p.angle)?;
        writeln!(out, "planar_up={}", planar.up.literal())?;
    }

    let turntable = &camera.turntable;
    if turntable.dirty {
        let p = &turntable.params;
        writeln!(out, "turntable_angle_x={}", p.angle_x)?;
        writeln!(out, "turntable_angle_y={}", p.angle_y)?;
        writeln!(out, "turntable_radius={}", p.radius)?;
        writeln!(out, "turntable_up={}", turntable.up.literal())?;
    }

    let trackball = &camera.trackball;
    if trackball.dirty {
        let p = &trackball.params;
        write_mat4(out, "trackball_R", &p.rotation)?;
        write_vec4(out, "trackball_T", p.translation)?;
        writeln!(out, "trackball_zoom={}", p.zoom)?;
        writeln!(out, "trackball_up={}", trackball.up.literal())?;
    }

    let projection = &camera.projection;
    if projection.dirty {
        writeln!(out, "y_fov={}", projection.y_fov)?;
        writeln!(out, "min_depth={}", projection.min_depth)?;
        writeln!(out, "max_depth={}", projection.max_depth)?;
    }

    let grid = &frame.grid;
    if grid.dirty {
        write_bool(out, "grid_visible", grid.grid_visible)?;
        writeln!(out, "grid_scale={}", grid.grid_scale)?;
        write_bool(out, "cube_visible", grid.cube_visible)?;
    }

    let scaler = &frame.render_scaler;
    if scaler.dirty {
        writeln!(out, "render_scale_down={}", scaler.down)?;
        writeln!(out, "render_scale_up={}", scaler.up)?;
    }
    Ok(())
}

/// Writes the `[vdb]` block followed by one section per stored frame.
///
/// Frames whose label spans several lines cannot be read back and are left out.
pub fn write_settings(out: &mut impl Write, settings: &Settings) -> fmt::Result {
    write_global(out, &settings.global)?;
    for frame in settings.frames.stored() {
        if frame.label().contains(['\n', '\r']) {
            log::debug!("not saving settings for multi-line label {:?}", frame.label());
            continue;
        }
        write_frame(out, frame)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraKind, Orientation};
    use crate::settings::Theme;

    fn text(settings: &Settings) -> String {
        let mut out = String::new();
        write_settings(&mut out, settings).unwrap();
        out
    }

    #[test]
    fn test_default_settings_text() {
        let expected = "\
[vdb]
window_pos=-1,-1
window_size=1000,600
never_ask_on_exit=0
show_main_menu=1
mouse_sensitivity=50
scroll_sensitivity=5
move_speed_normal=1
move_speed_slow=0.5
font_size=18
dpi_scale=100
can_idle=0
auto_step_delay_ms=250
global_theme=dark
";
        assert_eq!(text(&Settings::new()), expected);
    }

    #[test]
    fn test_only_dirty_groups_are_written() {
        let mut settings = Settings::new();
        settings.global.global_theme = Theme::Bright;
        let id = settings.frames.get_or_create("loop");
        let frame = settings.frames.get_mut(id).unwrap();
        frame.camera.select(CameraKind::Turntable);
        frame.camera.turntable.up = Orientation::XDown;
        frame.camera.turntable.params.radius = 2.5;
        frame.camera.turntable.dirty = true;
        frame.grid.grid_scale = 0.25;
        frame.grid.dirty = true;

        let out = text(&settings);
        let section = out.split_once("\n[frame]=loop\n").unwrap().1;
        assert_eq!(
            section,
            "\
camera_type=turntable
turntable_angle_x=0
turntable_angle_y=0
turntable_radius=2.5
turntable_up=x_down
grid_visible=0
grid_scale=0.25
cube_visible=0
"
        );
        assert!(out.contains("global_theme=bright\n"));
    }

    #[test]
    fn test_clean_frame_writes_only_header() {
        let mut settings = Settings::new();
        settings.frames.get_or_create("idle");
        assert!(text(&settings).ends_with("global_theme=dark\n\n[frame]=idle\n"));
    }

    #[test]
    fn test_trackball_matrix_is_column_major() {
        let mut settings = Settings::new();
        let id = settings.frames.get_or_create("t");
        let trackball = &mut settings.frames.get_mut(id).unwrap().camera.trackball;
        trackball.params.rotation = Mat4::from_translation(glam::Vec3::new(7.0, 8.0, 9.0));
        trackball.dirty = true;

        let out = text(&settings);
        assert!(out.contains(
            "trackball_R=1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 7, 8, 9, 1\n\
             trackball_T=0, 0, 0, 1\n"
        ));
    }

    #[test]
    fn test_multi_line_labels_are_not_written() {
        let mut settings = Settings::new();
        settings.frames.get_or_create("two\nlines");
        settings.frames.get_or_create("ok");
        let out = text(&settings);
        assert!(!out.contains("two"));
        assert!(out.contains("[frame]=ok\n"));
    }
}
