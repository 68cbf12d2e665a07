//! Tests for the analog cursor.

use proptest::prelude::*;
use vcursor_platform::services::{PointerService, SimulatedHost};
use vcursor_types::input::PointerSource;

use super::*;
use crate::test_utils::{
    analog, key_down, key_repeat, key_up, pointer_down, pointer_up, scenario_settings, small_host,
    split_host,
};

/// A cursor on `small_host` synced to the host at `at`.
fn cursor_at(host: &mut SimulatedHost, at: Vec2) -> AnalogCursor {
    let mut cursor = AnalogCursor::new(host, 0, 20.0).unwrap();
    cursor.reposition(host, at);
    cursor
}

fn push_stick(cursor: &mut AnalogCursor, host: &mut SimulatedHost, x: f32, y: f32) {
    let (x_axis, y_axis) = cursor.stick().axes();
    cursor.handle_event(host, &analog(cursor.owner(), x_axis, x));
    cursor.handle_event(host, &analog(cursor.owner(), y_axis, y));
}

#[test]
fn rejects_unknown_owner() {
    let host = small_host();
    let err = AnalogCursor::new(&host, 3, 16.0).unwrap_err();
    assert!(matches!(err, CursorError::InvalidOwner(3)));
}

#[test]
fn radius_has_a_floor() {
    let host = small_host();
    assert_eq!(AnalogCursor::new(&host, 0, 4.0).unwrap().radius(), 16.0);
    assert_eq!(AnalogCursor::new(&host, 0, 24.0).unwrap().radius(), 24.0);
    assert_eq!(AnalogCursor::new(&host, 0, f32::NAN).unwrap().radius(), 16.0);
}

#[test]
fn clamp_policy_defaults_from_settings() {
    let mut host = small_host();
    assert!(AnalogCursor::new(&host, 0, 16.0).unwrap().is_clamp_to_viewport());
    host.settings_mut().default_clamp_to_viewport = false;
    assert!(!AnalogCursor::new(&host, 0, 16.0).unwrap().is_clamp_to_viewport());
}

#[test]
fn first_tick_adopts_host_position() {
    let mut host = small_host();
    host.move_mouse(0, Vec2::new(40.0, 60.0));
    let mut cursor = AnalogCursor::new(&host, 0, 16.0).unwrap();
    cursor.tick(&mut host, 0.016);
    assert_eq!(cursor.position(), Vec2::new(40.0, 60.0));
    assert_eq!(cursor.velocity(), Vec2::ZERO);
    assert!(!cursor.is_using_analog_input());
}

#[test]
fn reference_scenario_single_step() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(50.0, 100.0));
    push_stick(&mut cursor, &mut host, 1.0, 0.0);

    cursor.tick(&mut host, 0.1);
    let v = cursor.velocity();
    assert!((v.x - 9.51625).abs() < 1e-4, "got {}", v.x);
    assert!(v.x < 10.0);
    assert_eq!(v.y, 0.0);
    assert!((cursor.position().x - (50.0 + v.x * 0.1)).abs() < 1e-4);
}

#[test]
fn reference_scenario_approaches_terminal_velocity() {
    let mut host = small_host();
    host.settings_mut().default_clamp_to_viewport = false;
    let mut cursor = cursor_at(&mut host, Vec2::new(50.0, 100.0));
    push_stick(&mut cursor, &mut host, 1.0, 0.0);

    let mut prev = 0.0;
    for _ in 0..40 {
        cursor.tick(&mut host, 0.1);
        let speed = cursor.velocity().x;
        assert!(speed > prev);
        assert!(speed < 100.0);
        prev = speed;
    }
    assert!(prev > 95.0);
}

#[test]
fn stationary_without_input() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(70.5, 120.25));
    for _ in 0..30 {
        cursor.tick(&mut host, 1.0 / 60.0);
    }
    assert_eq!(cursor.position(), Vec2::new(70.5, 120.25));
    assert_eq!(cursor.velocity(), Vec2::ZERO);
    assert_eq!(host.cursor_position(0), Some(Vec2::new(70.0, 120.0)));
}

#[test]
fn using_analog_follows_stick_and_external_moves() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    assert!(!cursor.is_using_analog_input());

    push_stick(&mut cursor, &mut host, 1.0, 0.0);
    cursor.tick(&mut host, 0.1);
    assert!(cursor.is_using_analog_input());
    assert_eq!(host.cursor_radius(0), 16.0);

    push_stick(&mut cursor, &mut host, 0.0, 0.0);
    cursor.tick(&mut host, 0.1);
    assert!(cursor.is_using_analog_input());

    host.move_mouse(0, Vec2::new(30.0, 40.0));
    cursor.tick(&mut host, 0.1);
    assert!(!cursor.is_using_analog_input());
    assert_eq!(cursor.position(), Vec2::new(30.0, 40.0));
    assert_eq!(cursor.velocity(), Vec2::ZERO);
    assert_eq!(cursor.last_direction(), Vec2::ZERO);
    assert_eq!(host.cursor_radius(0), 0.0);
}

#[test]
fn external_move_restarts_motion_from_new_position() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    push_stick(&mut cursor, &mut host, 1.0, 0.0);
    for _ in 0..5 {
        cursor.tick(&mut host, 0.1);
    }
    assert!(cursor.velocity().x > 30.0);

    host.move_mouse(0, Vec2::new(40.0, 40.0));
    cursor.tick(&mut host, 0.1);
    // Fresh RK4 step from rest at the new position.
    assert!((cursor.velocity().x - 9.51625).abs() < 1e-4);
    assert!((cursor.position().x - 40.951_625).abs() < 1e-3);
    assert!(cursor.is_using_analog_input());
}

#[test]
fn last_direction_survives_stop() {
    let mut host = small_host();
    host.settings_mut().min_speed = 1.0;
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    push_stick(&mut cursor, &mut host, 0.0, 1.0);
    cursor.tick(&mut host, 0.1);
    // Stick up moves the cursor up the screen.
    assert!(cursor.velocity().y < 0.0);
    assert!((cursor.last_direction().y + 1.0).abs() < 1e-6);

    push_stick(&mut cursor, &mut host, 0.0, 0.0);
    for _ in 0..200 {
        cursor.tick(&mut host, 0.1);
    }
    assert_eq!(cursor.velocity(), Vec2::ZERO);
    assert!((cursor.last_direction().y + 1.0).abs() < 1e-6);
}

#[test]
fn deadzone_input_does_not_activate() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    push_stick(&mut cursor, &mut host, 0.05, 0.05);
    cursor.tick(&mut host, 0.1);
    assert!(!cursor.is_using_analog_input());
    assert_eq!(cursor.position(), Vec2::new(100.0, 100.0));
}

#[test]
fn missing_curve_degrades_to_no_motion() {
    let mut host = small_host();
    host.settings_mut().acceleration_curve = None;
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    push_stick(&mut cursor, &mut host, 1.0, 0.0);
    cursor.tick(&mut host, 0.1);
    assert_eq!(cursor.position(), Vec2::new(100.0, 100.0));
    assert!(!cursor.is_using_analog_input());
}

#[test]
fn no_acceleration_mode() {
    let mut host = small_host();
    host.settings_mut().no_acceleration = true;
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    push_stick(&mut cursor, &mut host, 1.0, 0.0);
    cursor.tick(&mut host, 0.1);
    assert_eq!(cursor.velocity(), Vec2::new(100.0, 0.0));
    push_stick(&mut cursor, &mut host, 0.0, 0.0);
    cursor.tick(&mut host, 0.1);
    assert_eq!(cursor.velocity(), Vec2::ZERO);
}

#[test]
fn stick_is_clamped_into_viewport() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(170.0, 100.0));
    push_stick(&mut cursor, &mut host, 1.0, 0.0);
    for _ in 0..50 {
        cursor.tick(&mut host, 0.1);
    }
    // radius 20 in a 200-wide viewport
    assert_eq!(cursor.position().x, 180.0);
    assert_eq!(host.cursor_position(0), Some(Vec2::new(180.0, 100.0)));
    // Clamping leaves velocity alone.
    assert!(cursor.velocity().x > 0.0);
}

#[test]
fn unclamped_cursor_leaves_viewport() {
    let mut host = small_host();
    host.settings_mut().default_clamp_to_viewport = false;
    let mut cursor = cursor_at(&mut host, Vec2::new(170.0, 100.0));
    push_stick(&mut cursor, &mut host, 1.0, 0.0);
    for _ in 0..50 {
        cursor.tick(&mut host, 0.1);
    }
    assert!(cursor.position().x > 200.0);
}

#[test]
fn enabling_clamp_applies_immediately() {
    let mut host = small_host();
    host.settings_mut().default_clamp_to_viewport = false;
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    push_stick(&mut cursor, &mut host, -1.0, 0.0);
    for _ in 0..30 {
        cursor.tick(&mut host, 0.1);
    }
    assert!(cursor.position().x < 20.0);
    assert!(cursor.velocity().x < 0.0);

    cursor.set_clamp_to_viewport(&mut host, true);
    assert!(cursor.is_clamp_to_viewport());
    assert_eq!(cursor.position().x, 20.0);
    assert_eq!(cursor.velocity(), Vec2::ZERO);
    assert_eq!(cursor.last_direction(), Vec2::ZERO);
    assert_eq!(host.cursor_position(0).map(|p| p.x), Some(20.0));
}

#[test]
fn enabling_clamp_picks_up_external_move() {
    let mut host = small_host();
    host.settings_mut().default_clamp_to_viewport = false;
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    host.move_mouse(0, Vec2::new(2.0, 199.0));
    cursor.set_clamp_to_viewport(&mut host, true);
    assert_eq!(cursor.position(), Vec2::new(20.0, 180.0));
    assert_eq!(host.cursor_position(0), Some(Vec2::new(20.0, 180.0)));
}

#[test]
fn toggle_clamp() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    assert!(cursor.is_clamp_to_viewport());
    cursor.toggle_clamp_to_viewport(&mut host);
    assert!(!cursor.is_clamp_to_viewport());
    cursor.toggle_clamp_to_viewport(&mut host);
    assert!(cursor.is_clamp_to_viewport());
    assert_eq!(cursor.position(), Vec2::new(100.0, 100.0));
}

#[test]
fn accept_button_clicks() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(64.0, 32.0));

    let d = cursor.handle_event(&mut host, &key_down(0, Key::ACCEPT));
    assert_eq!(d, EventDisposition::Consumed);
    let d = cursor.handle_event(&mut host, &key_repeat(0, Key::ACCEPT));
    assert_eq!(d, EventDisposition::Consumed);
    assert!(cursor.is_key_pressed(Key::ACCEPT));
    let d = cursor.handle_event(&mut host, &key_up(0, Key::ACCEPT));
    assert_eq!(d, EventDisposition::Consumed);
    assert!(!cursor.is_key_pressed(Key::ACCEPT));

    let clicks = host.clicks();
    assert_eq!(clicks.len(), 2);
    assert!(clicks[0].pressed);
    assert_eq!(clicks[0].position, Vec2::new(64.0, 32.0));
    assert!(!clicks[1].pressed);
}

#[test]
fn other_keys_pass_through() {
    let mut host = small_host();
    let mut cursor = cursor_at(&mut host, Vec2::new(64.0, 32.0));
    cursor.set_debugging(true);
    let d = cursor.handle_event(&mut host, &key_down(0, Key::GamepadFaceRight));
    assert_eq!(d, EventDisposition::PassThrough);
    assert!(cursor.is_key_pressed(Key::GamepadFaceRight));
    let d = cursor.handle_event(&mut host, &key_up(0, Key::GamepadFaceRight));
    assert_eq!(d, EventDisposition::PassThrough);
    assert!(!cursor.is_key_pressed(Key::GamepadFaceRight));
    assert!(host.clicks().is_empty());
}

#[test]
fn foreign_user_events_pass_through() {
    let mut host = split_host();
    let mut cursor = AnalogCursor::new(&host, 0, 16.0).unwrap();
    let d = cursor.handle_event(&mut host, &key_down(1, Key::ACCEPT));
    assert_eq!(d, EventDisposition::PassThrough);
    let d = cursor.handle_event(&mut host, &analog(1, Key::GamepadLeftX, 1.0));
    assert_eq!(d, EventDisposition::PassThrough);
    assert_eq!(cursor.stick_sample(), Vec2::ZERO);
    assert!(host.clicks().is_empty());
}

#[test]
fn gamepad_offset_policy() {
    let mut host = split_host();
    host.policy_mut().skip_assigning_gamepad_to_player_one = true;
    let mut cursor = AnalogCursor::new(&host, 1, 16.0).unwrap();
    let d = cursor.handle_event(&mut host, &analog(0, Key::GamepadLeftX, 0.7));
    assert_eq!(d, EventDisposition::Consumed);
    assert_eq!(cursor.stick_sample(), Vec2::new(0.7, 0.0));

    // Physical mice are not shifted.
    cursor.handle_event(&mut host, &pointer_down(1, Vec2::ZERO, PointerSource::Mouse));
    assert!(cursor.is_key_pressed(Key::MouseLeft));
}

#[test]
fn analog_y_is_negated_and_other_stick_passes() {
    let mut host = small_host();
    let mut cursor = AnalogCursor::new(&host, 0, 16.0).unwrap();
    let d = cursor.handle_event(&mut host, &analog(0, Key::GamepadLeftY, 0.5));
    assert_eq!(d, EventDisposition::Consumed);
    assert_eq!(cursor.stick_sample(), Vec2::new(0.0, -0.5));

    let d = cursor.handle_event(&mut host, &analog(0, Key::GamepadRightX, 0.9));
    assert_eq!(d, EventDisposition::PassThrough);
    assert_eq!(cursor.stick_sample(), Vec2::new(0.0, -0.5));

    // The right stick sample was still recorded.
    cursor.set_stick(AnalogStick::Right);
    assert_eq!(cursor.stick_sample(), Vec2::new(0.9, 0.0));
}

#[test]
fn pointer_events_are_recorded_and_pass_through() {
    let mut host = small_host();
    let mut cursor = AnalogCursor::new(&host, 0, 16.0).unwrap();
    cursor.set_debugging(true);
    let down = pointer_down(0, Vec2::new(5.0, 5.0), PointerSource::Mouse);
    assert_eq!(cursor.handle_event(&mut host, &down), EventDisposition::PassThrough);
    assert_eq!(cursor.handle_event(&mut host, &down), EventDisposition::PassThrough);
    assert!(cursor.is_key_pressed(Key::MouseLeft));
    let up = pointer_up(0, Vec2::new(5.0, 5.0), PointerSource::Mouse);
    assert_eq!(cursor.handle_event(&mut host, &up), EventDisposition::PassThrough);
    assert!(!cursor.is_key_pressed(Key::MouseLeft));
}

/// Push the stick right for one second starting at `at`; returns the
/// cursor and how many ticks it spent over an interactable widget.
fn drive_right_for_a_second(host: &mut SimulatedHost, at: Vec2) -> (AnalogCursor, usize) {
    let mut cursor = AnalogCursor::new(host, 0, 16.0).unwrap();
    cursor.reposition(host, at);
    push_stick(&mut cursor, host, 1.0, 0.0);
    let mut hovered_ticks = 0;
    for _ in 0..60 {
        cursor.tick(host, 1.0 / 60.0);
        if cursor.is_hovering_interactable() {
            hovered_ticks += 1;
        }
    }
    (cursor, hovered_ticks)
}

#[test]
fn hover_switches_to_hovered_tunables() {
    let mut host = split_host();
    *host.settings_mut() = scenario_settings();
    host.settings_mut().max_speed_hovered = 30.0;

    // Capped at 30 px/s the cursor cannot leave the 200 px wide button.
    let (hovered, hovered_ticks) = drive_right_for_a_second(&mut host, Vec2::new(150.0, 120.0));
    assert_eq!(hovered_ticks, 60);
    assert_eq!(hovered.hovered_widget().map(|w| w.name.as_str()), Some("LeftButton"));
    assert!((hovered.velocity().x - 30.0).abs() < 1e-3, "{:?}", hovered.velocity());

    let (free, free_ticks) = drive_right_for_a_second(&mut host, Vec2::new(500.0, 700.0));
    assert_eq!(free_ticks, 0);
    assert!(free.velocity().x > 60.0, "{:?}", free.velocity());
}

#[test]
fn analog_debug_reports_bound_axis_events() {
    let mut host = small_host();
    let mut cursor = AnalogCursor::new(&host, 0, 16.0).unwrap();
    assert_eq!(cursor.analog_debug_line(Key::GamepadLeftX), None);

    cursor.set_analog_debug(true);
    assert_eq!(
        cursor.analog_debug_line(Key::GamepadLeftY).as_deref(),
        Some("ANALOG: Gamepad_LeftY")
    );
    // Reported per event, even while the stick sits inside the deadzone.
    let d = cursor.handle_event(&mut host, &analog(0, Key::GamepadLeftX, 0.05));
    assert_eq!(d, EventDisposition::Consumed);
}

#[test]
fn hover_is_reported() {
    let mut host = split_host();
    let mut cursor = AnalogCursor::new(&host, 0, 16.0).unwrap();
    cursor.reposition(&mut host, Vec2::new(150.0, 120.0));
    cursor.tick(&mut host, 0.016);
    assert!(cursor.is_hovering_interactable());
    assert_eq!(cursor.hovered_widget().unwrap().name, "LeftButton");
    assert_eq!(cursor.snapshot().hovered.as_deref(), Some("LeftButton"));

    cursor.reposition(&mut host, Vec2::new(500.0, 700.0));
    cursor.tick(&mut host, 0.016);
    assert!(!cursor.is_hovering_interactable());
}

#[test]
fn dpi_scales_radius_and_speed() {
    let mut host = small_host().with_fixed_dpi(2.0);
    let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
    push_stick(&mut cursor, &mut host, 1.0, 0.0);
    cursor.tick(&mut host, 0.1);
    assert_eq!(host.cursor_radius(0), 32.0);
    // accel = 100 * 2 * 1 * 2 = 400, drag = 2
    let expected = motion::rk4_velocity(Vec2::ZERO, Vec2::new(400.0, 0.0), 2.0, 0.1);
    assert!((cursor.velocity().x - expected.x).abs() < 1e-3);
}

#[test]
fn snapshot_serializes() {
    let mut host = small_host();
    let cursor = cursor_at(&mut host, Vec2::new(10.0, 20.0));
    let json = serde_json::to_string(&cursor.snapshot()).unwrap();
    assert!(json.contains("\"user\":0"));
    assert!(json.contains("\"using_analog_input\":false"));
    assert!(json.contains("\"hovered\":null"));
}

proptest! {
    #[test]
    fn rest_is_stable_for_any_dt(
        x in 20.0f32..180.0,
        y in 20.0f32..180.0,
        dt in 0.0001f32..0.5,
    ) {
        let mut host = small_host();
        let mut cursor = cursor_at(&mut host, Vec2::new(x, y));
        cursor.tick(&mut host, dt);
        prop_assert_eq!(cursor.position(), Vec2::new(x, y));
        prop_assert_eq!(cursor.velocity(), Vec2::ZERO);
    }

    #[test]
    fn clamped_cursor_stays_inside(
        sx in -1.0f32..1.0,
        sy in -1.0f32..1.0,
        frames in 1usize..120,
    ) {
        let mut host = small_host();
        let mut cursor = cursor_at(&mut host, Vec2::new(100.0, 100.0));
        push_stick(&mut cursor, &mut host, sx, sy);
        for _ in 0..frames {
            cursor.tick(&mut host, 1.0 / 30.0);
        }
        let p = cursor.position();
        prop_assert!((20.0..=180.0).contains(&p.x));
        prop_assert!((20.0..=180.0).contains(&p.y));
    }
}
