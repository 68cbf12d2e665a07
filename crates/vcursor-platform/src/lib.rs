//! Host services consumed by the analog cursor.
//!
//! The cursor never talks to a windowing system directly. Everything it
//! needs from the host (the platform cursor, widget hit testing, viewport
//! placement, the input pre-processor registry, and shared settings) goes
//! through the traits in [`services`]. [`SimulatedHost`] implements all of
//! them in memory for tests and the simulation binary.

pub mod services;
pub mod splitscreen;

pub use services::{
    ConsumerId, CursorHost, HitTestService, InputConsumerRegistry, PointerService,
    SettingsService, SimulatedHost, SimulatedWidget, SyntheticClick, ViewportService, WidgetId,
    WidgetInfo,
};
pub use splitscreen::SplitScreenLayout;
