//! Event ownership and stick-axis classification.

use vcursor_types::config::InputPolicy;
use vcursor_types::input::{AnalogStick, InputEvent, Key};

/// Decides whether events belong to one cursor.
///
/// Classification is pure: the classifier only reads the event and the
/// global policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClassifier {
    owner: u32,
    stick: AnalogStick,
}

impl InputClassifier {
    pub fn new(owner: u32, stick: AnalogStick) -> Self {
        Self { owner, stick }
    }

    pub fn owner(&self) -> u32 {
        self.owner
    }

    pub fn stick(&self) -> AnalogStick {
        self.stick
    }

    pub fn set_stick(&mut self, stick: AnalogStick) {
        self.stick = stick;
    }

    /// The local user an event belongs to once the gamepad offset policy is
    /// applied.
    ///
    /// When the first gamepad is skipped for player one, every non-pointer
    /// event and every synthetic pointer event is shifted up one user slot.
    /// Physical mouse and touch events keep their index.
    pub fn effective_user_index(event: &InputEvent, policy: InputPolicy) -> u32 {
        let index = event.user_index();
        if policy.skip_assigning_gamepad_to_player_one && !event.is_physical_pointer() {
            index.saturating_add(1)
        } else {
            index
        }
    }

    /// True when `event` targets this cursor's owner.
    pub fn is_relevant(&self, event: &InputEvent, policy: InputPolicy) -> bool {
        Self::effective_user_index(event, policy) == self.owner
    }

    /// True when `key` is one of the axes of the bound stick.
    pub fn is_cursor_axis(&self, key: Key) -> bool {
        AnalogStick::of_axis(key) == Some(self.stick)
    }
}
