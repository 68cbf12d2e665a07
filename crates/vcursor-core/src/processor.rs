//! Pointer-device interface shared by cursor implementations.

use vcursor_platform::services::CursorHost;
use vcursor_types::input::{AnalogEvent, InputEvent, KeyEvent, PointerEvent};

/// Whether an input pre-processor swallowed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Handled here; the host must not route it further.
    Consumed,
    /// Not handled; the host continues routing it.
    PassThrough,
}

impl EventDisposition {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}

/// A device that sits in the host's input pre-processor chain and drives a
/// pointer once per frame.
pub trait InputProcessor {
    fn handle_key_down(&mut self, host: &mut dyn CursorHost, event: &KeyEvent) -> EventDisposition;

    fn handle_key_up(&mut self, host: &mut dyn CursorHost, event: &KeyEvent) -> EventDisposition;

    fn handle_analog(&mut self, host: &mut dyn CursorHost, event: &AnalogEvent)
    -> EventDisposition;

    fn handle_pointer_down(
        &mut self,
        host: &mut dyn CursorHost,
        event: &PointerEvent,
    ) -> EventDisposition;

    fn handle_pointer_up(
        &mut self,
        host: &mut dyn CursorHost,
        event: &PointerEvent,
    ) -> EventDisposition;

    /// Advance one frame of `dt` seconds.
    fn tick(&mut self, host: &mut dyn CursorHost, dt: f32);

    /// Route `event` to the matching handler.
    fn handle_event(&mut self, host: &mut dyn CursorHost, event: &InputEvent) -> EventDisposition {
        match event {
            InputEvent::KeyDown(e) => self.handle_key_down(host, e),
            InputEvent::KeyUp(e) => self.handle_key_up(host, e),
            InputEvent::Analog(e) => self.handle_analog(host, e),
            InputEvent::PointerDown(e) => self.handle_pointer_down(host, e),
            InputEvent::PointerUp(e) => self.handle_pointer_up(host, e),
        }
    }
}
