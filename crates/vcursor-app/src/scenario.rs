//! Scripted split-screen session.
//!
//! Four seconds at 60 Hz: player one sweeps right and clicks a button,
//! player two sweeps up-left into the edge of its viewport, a real mouse
//! yanks player one's cursor away, and both sticks are released.

use anyhow::Result;
use serde::Serialize;
use vcursor_core::config::VirtualCursorConfig;
use vcursor_core::input::{AnalogEvent, AnalogStick, InputEvent, Key, KeyEvent};
use vcursor_core::math::Vec2;
use vcursor_core::platform::{SimulatedHost, SimulatedWidget, SplitScreenLayout};
use vcursor_core::{CursorManager, CursorSnapshot};

const DESKTOP_WIDTH: f32 = 1920.0;
const DESKTOP_HEIGHT: f32 = 1080.0;
const FRAME_RATE: u32 = 60;
const FRAMES: u32 = 4 * FRAME_RATE;
/// Emit a snapshot every this many frames.
const SAMPLE_EVERY: u32 = 6;

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    /// Gamepad stick position; `y` is positive when pushed up.
    Stick { user: u32, stick: AnalogStick, x: f32, y: f32 },
    Accept { user: u32, pressed: bool },
    /// A physical mouse moves the user's host cursor.
    MouseJump { user: u32, position: Vec2 },
}

/// One JSON line of output.
#[derive(Debug, Serialize)]
pub struct FrameRecord<'a> {
    pub frame: u32,
    pub time: f32,
    #[serde(flatten)]
    pub cursor: &'a CursorSnapshot,
}

fn script() -> Vec<(u32, Action)> {
    use Action::*;
    vec![
        (10, Stick { user: 0, stick: AnalogStick::Left, x: 1.0, y: 0.0 }),
        (10, Stick { user: 1, stick: AnalogStick::Right, x: -0.7, y: 0.7 }),
        (70, Stick { user: 0, stick: AnalogStick::Left, x: 0.0, y: 0.0 }),
        (100, Accept { user: 0, pressed: true }),
        (106, Accept { user: 0, pressed: false }),
        (130, Stick { user: 1, stick: AnalogStick::Right, x: 0.0, y: 0.0 }),
        (150, MouseJump { user: 0, position: Vec2::new(300.0, 900.0) }),
        (170, Stick { user: 0, stick: AnalogStick::Left, x: 0.0, y: 1.0 }),
        (210, Stick { user: 0, stick: AnalogStick::Left, x: 0.0, y: 0.0 }),
    ]
}

/// Desktop split between two players, one button per viewport.
fn build_host(config: VirtualCursorConfig) -> SimulatedHost {
    let mut host = SimulatedHost::new(DESKTOP_WIDTH, DESKTOP_HEIGHT)
        .with_layout(SplitScreenLayout::TwoPlayerVertical)
        .with_config(config);
    host.add_widget(SimulatedWidget::new(
        1,
        "Backdrop",
        Vec2::ZERO,
        Vec2::new(DESKTOP_WIDTH, DESKTOP_HEIGHT),
    ));
    host.add_widget(
        SimulatedWidget::new(10, "PlayButton", Vec2::new(700.0, 480.0), Vec2::new(200.0, 120.0))
            .interactable(),
    );
    host.add_widget(
        SimulatedWidget::new(20, "OptionsButton", Vec2::new(1100.0, 80.0), Vec2::new(240.0, 100.0))
            .interactable(),
    );
    host
}

fn apply(mgr: &mut CursorManager, host: &mut SimulatedHost, action: Action) {
    let mut event = |e: InputEvent| {
        let disposition = mgr.handle_event(host, &e);
        log::debug!("{e:?} -> {disposition:?}");
    };
    match action {
        Action::Stick { user, stick, x, y } => {
            let (x_axis, y_axis) = stick.axes();
            for (key, value) in [(x_axis, x), (y_axis, y)] {
                event(InputEvent::Analog(AnalogEvent {
                    user_index: user,
                    key,
                    value,
                }));
            }
        },
        Action::Accept { user, pressed } => {
            let key_event = KeyEvent {
                user_index: user,
                key: Key::ACCEPT,
                repeat: false,
            };
            event(if pressed {
                InputEvent::KeyDown(key_event)
            } else {
                InputEvent::KeyUp(key_event)
            });
        },
        Action::MouseJump { user, position } => {
            log::info!("Mouse moved user {user} cursor to ({}, {})", position.x, position.y);
            host.move_mouse(user, position);
        },
    }
}

/// Run the session, handing each sampled snapshot to `emit`. Returns the
/// number of simulated frames.
pub fn run(
    config: VirtualCursorConfig,
    mut emit: impl FnMut(&FrameRecord<'_>) -> Result<()>,
) -> Result<u32> {
    let mut host = build_host(config);
    let mut mgr = CursorManager::new();
    mgr.enable(&mut host, 0, AnalogStick::Left)?;
    mgr.enable(&mut host, 1, AnalogStick::Right)?;

    let dt = 1.0 / FRAME_RATE as f32;
    let script = script();
    for frame in 0..FRAMES {
        for (_, action) in script.iter().filter(|(at, _)| *at == frame) {
            apply(&mut mgr, &mut host, *action);
        }
        mgr.tick(&mut host, dt);

        if frame % SAMPLE_EVERY == 0 {
            for user in 0..2 {
                if let Some(cursor) = mgr.cursor(user) {
                    let snapshot = cursor.snapshot();
                    emit(&FrameRecord {
                        frame,
                        time: frame as f32 * dt,
                        cursor: &snapshot,
                    })?;
                }
            }
        }
    }

    let clicks = host.clicks().len();
    log::info!("Host received {clicks} synthesized pointer events");
    for user in 0..2 {
        mgr.teardown(&mut host, user);
    }
    Ok(FRAMES)
}
