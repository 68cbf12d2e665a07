//! Shared test utilities for cursor tests.
//!
//! Event constructors plus a few preconfigured [`SimulatedHost`]s.

use vcursor_platform::services::{SimulatedHost, SimulatedWidget};
use vcursor_platform::splitscreen::SplitScreenLayout;
use vcursor_types::config::CursorSettings;
use vcursor_types::curve::AccelerationCurve;
use vcursor_types::input::{
    AnalogEvent, InputEvent, Key, KeyEvent, PointerEvent, PointerSource,
};
use vcursor_types::math::Vec2;

pub fn key_down(user_index: u32, key: Key) -> InputEvent {
    InputEvent::KeyDown(KeyEvent {
        user_index,
        key,
        repeat: false,
    })
}

pub fn key_repeat(user_index: u32, key: Key) -> InputEvent {
    InputEvent::KeyDown(KeyEvent {
        user_index,
        key,
        repeat: true,
    })
}

pub fn key_up(user_index: u32, key: Key) -> InputEvent {
    InputEvent::KeyUp(KeyEvent {
        user_index,
        key,
        repeat: false,
    })
}

pub fn analog(user_index: u32, key: Key, value: f32) -> InputEvent {
    InputEvent::Analog(AnalogEvent {
        user_index,
        key,
        value,
    })
}

pub fn pointer_down(user_index: u32, position: Vec2, source: PointerSource) -> InputEvent {
    InputEvent::PointerDown(PointerEvent {
        user_index,
        button: Key::MouseLeft,
        position,
        source,
    })
}

pub fn pointer_up(user_index: u32, position: Vec2, source: PointerSource) -> InputEvent {
    InputEvent::PointerUp(PointerEvent {
        user_index,
        button: Key::MouseLeft,
        position,
        source,
    })
}

/// Tunables of the reference scenario: constant curve of 100, drag 1,
/// deadzone 0.1, no minimum speed, max speed 500.
pub fn scenario_settings() -> CursorSettings {
    CursorSettings {
        acceleration_curve: Some(AccelerationCurve::constant(100.0)),
        acceleration_multiplier: 1.0,
        deadzone: 0.1,
        drag_coefficient: 1.0,
        drag_coefficient_hovered: 1.0,
        min_speed: 0.0,
        max_speed: 500.0,
        max_speed_hovered: 500.0,
        ..CursorSettings::default()
    }
}

/// Single-user 200x200 desktop at DPI 1 with the scenario tunables.
pub fn small_host() -> SimulatedHost {
    let mut host = SimulatedHost::new(200.0, 200.0).with_fixed_dpi(1.0);
    *host.settings_mut() = scenario_settings();
    host
}

/// 1920x1080 two-player vertical split with one button in each half.
pub fn split_host() -> SimulatedHost {
    let mut host = SimulatedHost::new(1920.0, 1080.0)
        .with_layout(SplitScreenLayout::TwoPlayerVertical)
        .with_fixed_dpi(1.0);
    host.add_widget(
        SimulatedWidget::new(1, "LeftButton", Vec2::new(100.0, 100.0), Vec2::new(200.0, 80.0))
            .interactable(),
    );
    host.add_widget(
        SimulatedWidget::new(2, "RightButton", Vec2::new(1060.0, 100.0), Vec2::new(200.0, 80.0))
            .interactable(),
    );
    host
}
