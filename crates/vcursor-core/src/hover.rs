//! Topmost interactable widget under the cursor.

use vcursor_platform::services::{HitTestService, WidgetId};
use vcursor_types::math::Vec2;

/// The widget the cursor is hovering this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoveredWidget {
    pub id: WidgetId,
    pub name: String,
}

/// Walk the widget path at `position` from the leaf up and return the first
/// interactable widget.
pub fn probe<H: HitTestService + ?Sized>(host: &H, position: Vec2) -> Option<HoveredWidget> {
    host.widget_path(position)
        .into_iter()
        .rev()
        .find(|w| w.interactable)
        .map(|w| HoveredWidget {
            id: w.id,
            name: w.name,
        })
}
