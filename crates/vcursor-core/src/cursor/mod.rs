//! Gamepad-driven cursor for one local user.
//!
//! An [`AnalogCursor`] sits in the host's input pre-processor chain. It
//! records stick samples from analog events, turns the accept button into
//! pointer clicks, and on every tick integrates the stick into a velocity,
//! moves, clamps to the owner's viewport, and writes the result back to the
//! host cursor. If anything else moves the host cursor (a real mouse, a
//! scripted warp) the next tick adopts that position and starts over from
//! rest.

use std::collections::BTreeSet;

use serde::Serialize;
use vcursor_platform::services::{
    ConsumerId, CursorHost, PointerService, SettingsService, ViewportService,
};
use vcursor_types::config::MIN_CURSOR_RADIUS;
use vcursor_types::error::{CursorError, Result};
use vcursor_types::input::{AnalogEvent, AnalogStick, InputEvent, Key, KeyEvent, PointerEvent};
use vcursor_types::math::{Vec2, ViewportGeometry};

use crate::clamp::clamp_to_viewport;
use crate::classifier::InputClassifier;
use crate::hover::{self, HoveredWidget};
use crate::motion::{self, MotionParams};
use crate::processor::{EventDisposition, InputProcessor};

/// Stored position before the first sync; never equal to a host position.
const UNSYNCED: Vec2 = Vec2::splat(f32::MAX);

/// Serializable view of a cursor at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorSnapshot {
    pub user: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub last_direction: Vec2,
    pub using_analog_input: bool,
    pub clamp_to_viewport: bool,
    pub hovered: Option<String>,
}

/// Per-user cursor state and motion model.
#[derive(Debug, Clone)]
pub struct AnalogCursor {
    classifier: InputClassifier,
    velocity: Vec2,
    /// Full-precision position in absolute space.
    position: Vec2,
    last_direction: Vec2,
    hovered: Option<HoveredWidget>,
    using_analog: bool,
    clamp_to_viewport: bool,
    radius: f32,
    pressed_keys: BTreeSet<Key>,
    /// Latest sample per stick, screen-oriented (+y is down).
    stick_samples: [Vec2; 2],
    debugging: bool,
    analog_debug: bool,
    warned_missing_viewport: bool,
}

impl AnalogCursor {
    /// Create a cursor for local user `owner`, driven by the left stick.
    ///
    /// `radius` is raised to [`MIN_CURSOR_RADIUS`] if smaller. Fails with
    /// [`CursorError::InvalidOwner`] if the host has no such user.
    pub fn new(host: &dyn CursorHost, owner: u32, radius: f32) -> Result<Self> {
        if !host.has_user(owner) {
            return Err(CursorError::InvalidOwner(owner));
        }
        Ok(Self {
            classifier: InputClassifier::new(owner, AnalogStick::default()),
            velocity: Vec2::ZERO,
            position: UNSYNCED,
            last_direction: Vec2::ZERO,
            hovered: None,
            using_analog: false,
            clamp_to_viewport: host.cursor_settings().default_clamp_to_viewport,
            radius: radius.max(MIN_CURSOR_RADIUS),
            pressed_keys: BTreeSet::new(),
            stick_samples: [Vec2::ZERO; 2],
            debugging: false,
            analog_debug: false,
            warned_missing_viewport: false,
        })
    }

    // -- accessors ----------------------------------------------------------

    pub fn owner(&self) -> u32 {
        self.classifier.owner()
    }

    /// Identity used in the host's input consumer registry.
    pub fn consumer_id(&self) -> ConsumerId {
        ConsumerId(self.owner())
    }

    pub fn stick(&self) -> AnalogStick {
        self.classifier.stick()
    }

    pub fn set_stick(&mut self, stick: AnalogStick) {
        self.classifier.set_stick(stick);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Unit direction of the last non-zero velocity, kept after the cursor
    /// comes to rest.
    pub fn last_direction(&self) -> Vec2 {
        self.last_direction
    }

    pub fn is_using_analog_input(&self) -> bool {
        self.using_analog
    }

    pub fn is_hovering_interactable(&self) -> bool {
        self.hovered.is_some()
    }

    pub fn hovered_widget(&self) -> Option<&HoveredWidget> {
        self.hovered.as_ref()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_clamp_to_viewport(&self) -> bool {
        self.clamp_to_viewport
    }

    /// Latest sample of the bound stick.
    pub fn stick_sample(&self) -> Vec2 {
        self.stick_samples[self.stick().index()]
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn is_debugging(&self) -> bool {
        self.debugging
    }

    pub fn set_debugging(&mut self, enabled: bool) {
        self.debugging = enabled;
    }

    pub fn is_analog_debugging(&self) -> bool {
        self.analog_debug
    }

    pub fn set_analog_debug(&mut self, enabled: bool) {
        self.analog_debug = enabled;
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            user: self.owner(),
            position: self.position,
            velocity: self.velocity,
            last_direction: self.last_direction,
            using_analog_input: self.using_analog,
            clamp_to_viewport: self.clamp_to_viewport,
            hovered: self.hovered.as_ref().map(|w| w.name.clone()),
        }
    }

    // -- positioning ----------------------------------------------------------

    /// Move the cursor to `position` from rest and push it to the host.
    pub fn reposition(&mut self, host: &mut dyn CursorHost, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.last_direction = Vec2::ZERO;
        self.using_analog = false;
        host.set_cursor_position(self.owner(), position);
    }

    /// Enable or disable viewport clamping.
    ///
    /// Enabling while the cursor is out of bounds clamps it immediately and
    /// stops it.
    pub fn set_clamp_to_viewport(&mut self, host: &mut dyn CursorHost, enabled: bool) {
        self.clamp_to_viewport = enabled;
        if !enabled || !self.sync_with_host(host) {
            return;
        }
        let owner = self.owner();
        let Some(geometry) = host.viewport_geometry(owner) else {
            return;
        };
        let result = clamp_to_viewport(&geometry, self.position, self.radius);
        if result.clamped {
            log::debug!(
                "User {owner} cursor clamped into viewport at ({:.1}, {:.1})",
                result.position.x,
                result.position.y
            );
            self.position = result.position;
            self.velocity = Vec2::ZERO;
            self.last_direction = Vec2::ZERO;
            host.set_cursor_position(owner, self.position);
        }
    }

    pub fn toggle_clamp_to_viewport(&mut self, host: &mut dyn CursorHost) {
        let enabled = !self.clamp_to_viewport;
        self.set_clamp_to_viewport(host, enabled);
    }

    /// Adopt the host cursor position if something else moved it.
    ///
    /// Returns `false` when the host has no cursor for the owner.
    fn sync_with_host(&mut self, host: &mut dyn CursorHost) -> bool {
        let owner = self.owner();
        let Some(host_position) = host.cursor_position(owner) else {
            return false;
        };
        if self.position.trunc() != host_position {
            if self.position != UNSYNCED {
                log::debug!(
                    "User {owner} cursor moved externally to ({}, {})",
                    host_position.x,
                    host_position.y
                );
            }
            self.position = host_position;
            self.velocity = Vec2::ZERO;
            self.last_direction = Vec2::ZERO;
            self.using_analog = false;
            host.set_cursor_radius(owner, 0.0);
        }
        true
    }

    fn viewport(&mut self, host: &dyn CursorHost) -> Option<ViewportGeometry> {
        let geometry = host.viewport_geometry(self.owner());
        if geometry.is_none() && !self.warned_missing_viewport {
            log::warn!("No viewport for user {}; cursor will not be clamped", self.owner());
            self.warned_missing_viewport = true;
        }
        geometry
    }

    /// Debug line for a bound-stick axis event, when analog debugging is on.
    fn analog_debug_line(&self, key: Key) -> Option<String> {
        self.analog_debug.then(|| format!("ANALOG: {key}"))
    }

    /// Position clicks are synthesized at.
    fn click_position(&self, host: &dyn CursorHost) -> Vec2 {
        host.cursor_position(self.owner()).unwrap_or(self.position)
    }

    fn is_relevant(&self, host: &dyn CursorHost, event: InputEvent) -> bool {
        self.classifier.is_relevant(&event, host.input_policy())
    }
}

impl InputProcessor for AnalogCursor {
    fn handle_key_down(&mut self, host: &mut dyn CursorHost, event: &KeyEvent) -> EventDisposition {
        if !self.is_relevant(host, InputEvent::KeyDown(*event)) {
            return EventDisposition::PassThrough;
        }
        if event.repeat {
            if self.debugging {
                log::info!("KEY: {} Held", event.key);
            }
        } else {
            self.pressed_keys.insert(event.key);
            if self.debugging {
                log::info!("KEY: {} Pressed", event.key);
            }
        }

        if event.key == Key::ACCEPT {
            if !event.repeat {
                let at = self.click_position(host);
                host.synthesize_pointer_press(self.owner(), at);
            }
            return EventDisposition::Consumed;
        }
        EventDisposition::PassThrough
    }

    fn handle_key_up(&mut self, host: &mut dyn CursorHost, event: &KeyEvent) -> EventDisposition {
        if !self.is_relevant(host, InputEvent::KeyUp(*event)) {
            return EventDisposition::PassThrough;
        }
        self.pressed_keys.remove(&event.key);
        if self.debugging {
            log::info!("KEY: {} Released", event.key);
        }

        if event.key == Key::ACCEPT {
            let at = self.click_position(host);
            host.synthesize_pointer_release(self.owner(), at);
            return EventDisposition::Consumed;
        }
        EventDisposition::PassThrough
    }

    fn handle_analog(
        &mut self,
        host: &mut dyn CursorHost,
        event: &AnalogEvent,
    ) -> EventDisposition {
        if !self.is_relevant(host, InputEvent::Analog(*event)) {
            return EventDisposition::PassThrough;
        }
        let Some(stick) = AnalogStick::of_axis(event.key) else {
            return EventDisposition::PassThrough;
        };
        let (x_axis, _) = stick.axes();
        let sample = &mut self.stick_samples[stick.index()];
        if event.key == x_axis {
            sample.x = event.value;
        } else {
            // Gamepad up is positive; screen up is negative.
            sample.y = -event.value;
        }

        if !self.classifier.is_cursor_axis(event.key) {
            return EventDisposition::PassThrough;
        }
        if let Some(line) = self.analog_debug_line(event.key) {
            log::info!("{line}");
        }
        EventDisposition::Consumed
    }

    fn handle_pointer_down(
        &mut self,
        host: &mut dyn CursorHost,
        event: &PointerEvent,
    ) -> EventDisposition {
        if self.is_relevant(host, InputEvent::PointerDown(*event)) {
            let fresh = self.pressed_keys.insert(event.button);
            if self.debugging {
                let state = if fresh { "Pressed" } else { "Held" };
                log::info!("MOUSE: {} {state}", event.button);
            }
        }
        EventDisposition::PassThrough
    }

    fn handle_pointer_up(
        &mut self,
        host: &mut dyn CursorHost,
        event: &PointerEvent,
    ) -> EventDisposition {
        if self.is_relevant(host, InputEvent::PointerUp(*event)) {
            self.pressed_keys.remove(&event.button);
            if self.debugging {
                log::info!("MOUSE: {} Released", event.button);
            }
        }
        EventDisposition::PassThrough
    }

    fn tick(&mut self, host: &mut dyn CursorHost, dt: f32) {
        let owner = self.owner();
        let geometry = self.viewport(host);
        let viewport_size = geometry.map_or(host.desktop_geometry().size, |g| g.size);
        let dpi = host.dpi_scale(viewport_size);

        if !self.sync_with_host(host) {
            return;
        }

        self.hovered = hover::probe(&*host, self.position);

        let settings = host.cursor_settings();
        let params = MotionParams::from_settings(settings, dpi, self.hovered.is_some());
        let accel = motion::stick_acceleration(
            self.stick_sample(),
            settings.acceleration_curve.as_ref(),
            settings.deadzone,
            settings.acceleration_multiplier,
            dpi,
        );
        let analog_radius = settings.analog_radius * dpi;

        self.velocity = motion::integrate_velocity(self.velocity, accel, &params, dt);
        if !self.velocity.is_zero() {
            self.last_direction = self.velocity.safe_normal();
        }

        let next = self.position + self.velocity * dt;
        self.position = match geometry {
            Some(geometry) if self.clamp_to_viewport => {
                clamp_to_viewport(&geometry, next, self.radius).position
            },
            _ => next,
        };
        host.set_cursor_position(owner, self.position);

        if !accel.is_zero() {
            self.using_analog = true;
            host.set_cursor_radius(owner, analog_radius);
        }

        if self.analog_debug && !accel.is_zero() {
            let stick = self.stick_sample();
            log::debug!(
                "User {owner} stick ({:.2}, {:.2}) velocity ({:.1}, {:.1}) at ({:.1}, {:.1})",
                stick.x,
                stick.y,
                self.velocity.x,
                self.velocity.y,
                self.position.x,
                self.position.y
            );
        }
    }
}

#[cfg(test)]
mod tests;
