//! Host-agnostic input event types.
//!
//! Every host maps its native key, analog, and pointer events to these
//! types. Each event carries the index of the local user it was routed to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Keys, buttons, and analog axes the cursor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    GamepadLeftX,
    GamepadLeftY,
    GamepadRightX,
    GamepadRightY,
    GamepadFaceBottom,
    GamepadFaceRight,
    GamepadFaceLeft,
    GamepadFaceTop,
    GamepadDPadUp,
    GamepadDPadDown,
    GamepadDPadLeft,
    GamepadDPadRight,
    GamepadLeftShoulder,
    GamepadRightShoulder,
    GamepadStart,
    GamepadSelect,
    MouseLeft,
    MouseRight,
    MouseMiddle,
    /// Any other host key, by host key code.
    Other(u32),
}

impl Key {
    /// The button that acts as a primary click.
    pub const ACCEPT: Self = Self::GamepadFaceBottom;

    /// True for the four analog stick axes.
    pub fn is_stick_axis(self) -> bool {
        matches!(
            self,
            Self::GamepadLeftX | Self::GamepadLeftY | Self::GamepadRightX | Self::GamepadRightY
        )
    }

    pub fn is_mouse_button(self) -> bool {
        matches!(self, Self::MouseLeft | Self::MouseRight | Self::MouseMiddle)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GamepadLeftX => write!(f, "Gamepad_LeftX"),
            Self::GamepadLeftY => write!(f, "Gamepad_LeftY"),
            Self::GamepadRightX => write!(f, "Gamepad_RightX"),
            Self::GamepadRightY => write!(f, "Gamepad_RightY"),
            Self::GamepadFaceBottom => write!(f, "Gamepad_FaceButton_Bottom"),
            Self::GamepadFaceRight => write!(f, "Gamepad_FaceButton_Right"),
            Self::GamepadFaceLeft => write!(f, "Gamepad_FaceButton_Left"),
            Self::GamepadFaceTop => write!(f, "Gamepad_FaceButton_Top"),
            Self::GamepadDPadUp => write!(f, "Gamepad_DPad_Up"),
            Self::GamepadDPadDown => write!(f, "Gamepad_DPad_Down"),
            Self::GamepadDPadLeft => write!(f, "Gamepad_DPad_Left"),
            Self::GamepadDPadRight => write!(f, "Gamepad_DPad_Right"),
            Self::GamepadLeftShoulder => write!(f, "Gamepad_LeftShoulder"),
            Self::GamepadRightShoulder => write!(f, "Gamepad_RightShoulder"),
            Self::GamepadStart => write!(f, "Gamepad_Special_Right"),
            Self::GamepadSelect => write!(f, "Gamepad_Special_Left"),
            Self::MouseLeft => write!(f, "LeftMouseButton"),
            Self::MouseRight => write!(f, "RightMouseButton"),
            Self::MouseMiddle => write!(f, "MiddleMouseButton"),
            Self::Other(code) => write!(f, "Key_{code}"),
        }
    }
}

/// Which physical analog stick drives a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnalogStick {
    #[default]
    Left,
    Right,
}

impl AnalogStick {
    /// The `(x, y)` axis keys belonging to this stick.
    pub const fn axes(self) -> (Key, Key) {
        match self {
            Self::Left => (Key::GamepadLeftX, Key::GamepadLeftY),
            Self::Right => (Key::GamepadRightX, Key::GamepadRightY),
        }
    }

    /// The stick an axis key belongs to, if any.
    pub fn of_axis(key: Key) -> Option<Self> {
        match key {
            Key::GamepadLeftX | Key::GamepadLeftY => Some(Self::Left),
            Key::GamepadRightX | Key::GamepadRightY => Some(Self::Right),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Device a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerSource {
    /// A physical mouse.
    Mouse,
    /// A touch screen.
    Touch,
    /// Simulated by the host or by a gamepad-driven cursor.
    Synthetic,
}

impl PointerSource {
    /// True for physical mouse and touch devices.
    pub fn is_physical(self) -> bool {
        !matches!(self, Self::Synthetic)
    }
}

/// A key or button transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub user_index: u32,
    pub key: Key,
    pub repeat: bool,
}

/// A single analog axis sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogEvent {
    pub user_index: u32,
    pub key: Key,
    pub value: f32,
}

/// A pointer button transition at an absolute position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub user_index: u32,
    pub button: Key,
    pub position: Vec2,
    pub source: PointerSource,
}

/// A host input event routed to a local user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    Analog(AnalogEvent),
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
}

impl InputEvent {
    /// User index the host tagged the event with.
    pub fn user_index(&self) -> u32 {
        match self {
            Self::KeyDown(e) | Self::KeyUp(e) => e.user_index,
            Self::Analog(e) => e.user_index,
            Self::PointerDown(e) | Self::PointerUp(e) => e.user_index,
        }
    }

    /// True when the event came from a physical mouse or touch screen.
    pub fn is_physical_pointer(&self) -> bool {
        match self {
            Self::PointerDown(e) | Self::PointerUp(e) => e.source.is_physical(),
            _ => false,
        }
    }

    /// The key, button, or axis the event refers to.
    pub fn key(&self) -> Key {
        match self {
            Self::KeyDown(e) | Self::KeyUp(e) => e.key,
            Self::Analog(e) => e.key,
            Self::PointerDown(e) | Self::PointerUp(e) => e.button,
        }
    }
}
