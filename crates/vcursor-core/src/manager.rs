//! Per-user cursor lifecycle.
//!
//! The manager owns at most one [`AnalogCursor`] per local user and tracks
//! whether it is registered in the host's input pre-processor chain.
//! Creating a cursor and registering it are separate steps: `disable`
//! unregisters but keeps the cursor and its state, `teardown` drops it.
//! Every operation is safe to repeat.

use std::collections::BTreeMap;

use vcursor_platform::services::{
    CursorHost, InputConsumerRegistry, PointerService, SettingsService, ViewportService,
};
use vcursor_platform::splitscreen::SplitScreenLayout;
use vcursor_types::error::Result;
use vcursor_types::input::{AnalogStick, InputEvent};
use vcursor_types::math::Vec2;

use crate::cursor::AnalogCursor;
use crate::processor::{EventDisposition, InputProcessor};

/// Where a user's cursor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorLifecycle {
    /// Never enabled.
    #[default]
    Uninitialized,
    /// Registered with the host and receiving input.
    Enabled,
    /// Unregistered; the cursor is kept.
    Disabled,
    /// Torn down; the cursor was dropped.
    Destroyed,
}

#[derive(Debug, Default)]
struct PlayerSlot {
    cursor: Option<AnalogCursor>,
    lifecycle: CursorLifecycle,
    debugging: bool,
    analog_debug: bool,
}

/// Owns the analog cursors of every local user.
#[derive(Debug)]
pub struct CursorManager {
    radius: Option<f32>,
    slots: BTreeMap<u32, PlayerSlot>,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorManager {
    /// Cursors take their radius from the host's `analog_radius` setting.
    pub fn new() -> Self {
        Self {
            radius: None,
            slots: BTreeMap::new(),
        }
    }

    /// Cursors created by this manager use `radius` (at least the minimum)
    /// instead of the configured one.
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius: Some(radius),
            slots: BTreeMap::new(),
        }
    }

    /// Create `user`'s cursor if needed, bind it to `stick`, and register it
    /// with the host.
    ///
    /// On first registration the cursor starts at the center of the user's
    /// split-screen viewport and a click is synthesized there so the host
    /// gives the user input focus. Enabling an enabled cursor only updates
    /// the stick binding.
    pub fn enable(
        &mut self,
        host: &mut dyn CursorHost,
        user: u32,
        stick: AnalogStick,
    ) -> Result<()> {
        let slot = self.slots.entry(user).or_default();
        if slot.cursor.is_none() {
            let radius = self.radius.unwrap_or(host.cursor_settings().analog_radius);
            let mut cursor = AnalogCursor::new(&*host, user, radius)?;
            cursor.set_debugging(slot.debugging);
            cursor.set_analog_debug(slot.analog_debug);
            slot.cursor = Some(cursor);
        }
        let Some(cursor) = slot.cursor.as_mut() else {
            return Ok(());
        };
        cursor.set_stick(stick);

        let id = cursor.consumer_id();
        if host.find_input_consumer(id).is_none() {
            host.register_input_consumer(id);
            let start = start_position(&*host, user);
            cursor.reposition(host, start);
            host.synthesize_pointer_press(user, start);
            host.synthesize_pointer_release(user, start);
            log::info!(
                "Analog cursor enabled for user {user} ({stick:?} stick) at ({:.0}, {:.0})",
                start.x,
                start.y
            );
        }

        let viewport_size = host
            .viewport_geometry(user)
            .map_or(host.desktop_geometry().size, |g| g.size);
        let radius = host.cursor_settings().analog_radius * host.dpi_scale(viewport_size);
        host.set_cursor_radius(user, radius);
        slot.lifecycle = CursorLifecycle::Enabled;
        Ok(())
    }

    /// Unregister `user`'s cursor and hide its interaction radius.
    pub fn disable(&mut self, host: &mut dyn CursorHost, user: u32) {
        let Some(slot) = self.slots.get_mut(&user) else {
            return;
        };
        let Some(cursor) = slot.cursor.as_ref() else {
            return;
        };
        let id = cursor.consumer_id();
        if host.find_input_consumer(id).is_some() {
            host.unregister_input_consumer(id);
            log::info!("Analog cursor disabled for user {user}");
        }
        host.set_cursor_radius(user, 0.0);
        slot.lifecycle = CursorLifecycle::Disabled;
    }

    /// Disable `user`'s cursor and drop it.
    pub fn teardown(&mut self, host: &mut dyn CursorHost, user: u32) {
        self.disable(host, user);
        let Some(slot) = self.slots.get_mut(&user) else {
            return;
        };
        if slot.cursor.take().is_some() {
            log::info!("Analog cursor destroyed for user {user}");
            slot.lifecycle = CursorLifecycle::Destroyed;
        }
    }

    pub fn lifecycle(&self, user: u32) -> CursorLifecycle {
        self.slots.get(&user).map(|s| s.lifecycle).unwrap_or_default()
    }

    /// True while `user`'s cursor is registered and receiving input.
    pub fn is_active(&self, user: u32) -> bool {
        self.lifecycle(user) == CursorLifecycle::Enabled
    }

    pub fn cursor(&self, user: u32) -> Option<&AnalogCursor> {
        self.slots.get(&user).and_then(|s| s.cursor.as_ref())
    }

    pub fn cursor_mut(&mut self, user: u32) -> Option<&mut AnalogCursor> {
        self.slots.get_mut(&user).and_then(|s| s.cursor.as_mut())
    }

    // -- viewport clamping ----------------------------------------------------

    pub fn set_clamp_to_viewport(&mut self, host: &mut dyn CursorHost, user: u32, enabled: bool) {
        if let Some(cursor) = self.cursor_mut(user) {
            cursor.set_clamp_to_viewport(host, enabled);
        }
    }

    pub fn toggle_clamp_to_viewport(&mut self, host: &mut dyn CursorHost, user: u32) {
        if let Some(cursor) = self.cursor_mut(user) {
            cursor.toggle_clamp_to_viewport(host);
        }
    }

    pub fn is_clamp_to_viewport(&self, user: u32) -> bool {
        self.cursor(user).is_some_and(AnalogCursor::is_clamp_to_viewport)
    }

    pub fn is_cursor_over_interactable_widget(&self, user: u32) -> bool {
        self.cursor(user).is_some_and(AnalogCursor::is_hovering_interactable)
    }

    // -- debug toggles --------------------------------------------------------

    /// Flip key/pointer diagnostics for `user`. Returns the new state.
    pub fn toggle_cursor_debug(&mut self, user: u32) -> bool {
        let slot = self.slots.entry(user).or_default();
        slot.debugging = !slot.debugging;
        if let Some(cursor) = slot.cursor.as_mut() {
            cursor.set_debugging(slot.debugging);
        }
        log::info!(
            "Cursor debug for user {user}: {}",
            if slot.debugging { "on" } else { "off" }
        );
        slot.debugging
    }

    /// Flip per-frame stick diagnostics for `user`. Returns the new state.
    pub fn toggle_analog_debug(&mut self, user: u32) -> bool {
        let slot = self.slots.entry(user).or_default();
        slot.analog_debug = !slot.analog_debug;
        if let Some(cursor) = slot.cursor.as_mut() {
            cursor.set_analog_debug(slot.analog_debug);
        }
        log::info!(
            "Analog debug for user {user}: {}",
            if slot.analog_debug { "on" } else { "off" }
        );
        slot.analog_debug
    }

    pub fn is_cursor_debug_active(&self, user: u32) -> bool {
        self.slots.get(&user).is_some_and(|s| s.debugging)
    }

    pub fn is_analog_debug_active(&self, user: u32) -> bool {
        self.slots.get(&user).is_some_and(|s| s.analog_debug)
    }

    // -- frame driving --------------------------------------------------------

    /// Offer `event` to each enabled cursor in user order until one
    /// consumes it.
    pub fn handle_event(
        &mut self,
        host: &mut dyn CursorHost,
        event: &InputEvent,
    ) -> EventDisposition {
        for cursor in self.enabled_cursors() {
            if cursor.handle_event(host, event).is_consumed() {
                return EventDisposition::Consumed;
            }
        }
        EventDisposition::PassThrough
    }

    /// Tick every enabled cursor.
    pub fn tick(&mut self, host: &mut dyn CursorHost, dt: f32) {
        for cursor in self.enabled_cursors() {
            cursor.tick(host, dt);
        }
    }

    fn enabled_cursors(&mut self) -> impl Iterator<Item = &mut AnalogCursor> {
        self.slots
            .values_mut()
            .filter(|s| s.lifecycle == CursorLifecycle::Enabled)
            .filter_map(|s| s.cursor.as_mut())
    }
}

/// Start position for `user`: the layout's center for that player, in
/// desktop space. Without a layout, the center of whatever viewport the
/// host reports for the user.
fn start_position(host: &dyn CursorHost, user: u32) -> Vec2 {
    let layout = host.split_screen_layout();
    if layout == SplitScreenLayout::None
        && let Some(viewport) = host.viewport_geometry(user)
    {
        return viewport.center();
    }
    host.desktop_geometry().absolute_at_uv(layout.center_uv(user))
}
