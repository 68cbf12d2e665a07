//! Host service traits and the in-memory simulated host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vcursor_types::config::{CursorSettings, InputPolicy, VirtualCursorConfig};
use vcursor_types::math::{Vec2, ViewportGeometry};

use crate::splitscreen::SplitScreenLayout;

// ---------------------------------------------------------------------------
// Pointer service
// ---------------------------------------------------------------------------

/// The host's own per-user cursor.
pub trait PointerService {
    /// Whether `user` is a local user the host knows about.
    fn has_user(&self, user: u32) -> bool;

    /// Current position of `user`'s cursor in absolute space.
    ///
    /// Hosts with integer-backed cursors report whole pixels.
    fn cursor_position(&self, user: u32) -> Option<Vec2>;

    /// Move `user`'s cursor.
    fn set_cursor_position(&mut self, user: u32, position: Vec2);

    /// Interaction radius used by the host's hit testing for `user`.
    fn set_cursor_radius(&mut self, user: u32, radius: f32);

    /// Inject a primary-button press for `user` at `position`.
    fn synthesize_pointer_press(&mut self, user: u32, position: Vec2);

    /// Inject a primary-button release for `user` at `position`.
    fn synthesize_pointer_release(&mut self, user: u32, position: Vec2);
}

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

/// Opaque widget handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

/// One entry of a widget path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetInfo {
    pub id: WidgetId,
    pub name: String,
    /// Eligible to receive pointer hover and focus.
    pub interactable: bool,
}

pub trait HitTestService {
    /// Widgets under `position`, ordered root first, leaf last.
    fn widget_path(&self, position: Vec2) -> Vec<WidgetInfo>;
}

// ---------------------------------------------------------------------------
// Viewport service
// ---------------------------------------------------------------------------

pub trait ViewportService {
    /// Placement of `user`'s viewport, or `None` if the user has none.
    fn viewport_geometry(&self, user: u32) -> Option<ViewportGeometry>;

    /// The whole desktop.
    fn desktop_geometry(&self) -> ViewportGeometry;

    fn split_screen_layout(&self) -> SplitScreenLayout;

    /// Display density factor for a viewport of the given size.
    fn dpi_scale(&self, viewport_size: Vec2) -> f32;
}

// ---------------------------------------------------------------------------
// Input consumer registry
// ---------------------------------------------------------------------------

/// Identity of a registered input pre-processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(pub u32);

/// The host's chain of input pre-processors.
///
/// Registering the same id twice adds it twice; callers that want a single
/// registration check [`InputConsumerRegistry::find_input_consumer`] first.
pub trait InputConsumerRegistry {
    fn register_input_consumer(&mut self, id: ConsumerId);
    fn unregister_input_consumer(&mut self, id: ConsumerId);
    /// Position of `id` in the chain.
    fn find_input_consumer(&self, id: ConsumerId) -> Option<usize>;
    fn input_consumer_count(&self) -> usize;
}

// ---------------------------------------------------------------------------
// Settings service
// ---------------------------------------------------------------------------

pub trait SettingsService {
    fn cursor_settings(&self) -> &CursorSettings;
    fn input_policy(&self) -> InputPolicy;
}

// ---------------------------------------------------------------------------
// Aggregate host trait
// ---------------------------------------------------------------------------

/// Aggregate trait providing access to every host service.
pub trait CursorHost:
    PointerService + HitTestService + ViewportService + InputConsumerRegistry + SettingsService
{
}

// ---------------------------------------------------------------------------
// Simulated host
// ---------------------------------------------------------------------------

/// Shortest viewport side at which the DPI scale is 1.0.
const REFERENCE_SHORT_SIDE: f32 = 1080.0;

/// Axis-aligned widget in absolute space.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedWidget {
    pub id: WidgetId,
    pub name: String,
    pub origin: Vec2,
    pub size: Vec2,
    pub interactable: bool,
}

impl SimulatedWidget {
    pub fn new(id: u64, name: &str, origin: Vec2, size: Vec2) -> Self {
        Self {
            id: WidgetId(id),
            name: name.to_string(),
            origin,
            size,
            interactable: false,
        }
    }

    pub fn interactable(mut self) -> Self {
        self.interactable = true;
        self
    }

    fn contains(&self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < self.origin.x + self.size.x
            && p.y < self.origin.y + self.size.y
    }
}

/// A pointer press or release injected through [`PointerService`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticClick {
    pub user: u32,
    pub position: Vec2,
    pub pressed: bool,
}

/// In-memory host: a desktop split between local users, integer-backed
/// cursors, and a flat list of widgets painted in insertion order.
///
/// Widgets added later are drawn on top; the widget path at a point lists
/// every widget containing it, bottom first.
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    desktop: ViewportGeometry,
    layout: SplitScreenLayout,
    local_users: u32,
    cursors: BTreeMap<u32, (i32, i32)>,
    radii: BTreeMap<u32, f32>,
    consumers: Vec<ConsumerId>,
    widgets: Vec<SimulatedWidget>,
    config: VirtualCursorConfig,
    fixed_dpi: Option<f32>,
    viewports: BTreeMap<u32, ViewportGeometry>,
    clicks: Vec<SyntheticClick>,
    focused_user: Option<u32>,
}

impl SimulatedHost {
    /// A single-user host with a desktop of `width` x `height` pixels.
    pub fn new(width: f32, height: f32) -> Self {
        let desktop = ViewportGeometry::new(Vec2::ZERO, Vec2::new(width, height));
        let mut host = Self {
            desktop,
            layout: SplitScreenLayout::None,
            local_users: 1,
            cursors: BTreeMap::new(),
            radii: BTreeMap::new(),
            consumers: Vec::new(),
            widgets: Vec::new(),
            config: VirtualCursorConfig::default(),
            fixed_dpi: None,
            viewports: BTreeMap::new(),
            clicks: Vec::new(),
            focused_user: None,
        };
        host.reset_cursors();
        host
    }

    /// Split the desktop and create one local user per viewport.
    pub fn with_layout(mut self, layout: SplitScreenLayout) -> Self {
        self.layout = layout;
        self.local_users = layout.player_count();
        self.reset_cursors();
        self
    }

    /// Override the number of local users (all sharing the layout).
    pub fn with_local_users(mut self, count: u32) -> Self {
        self.local_users = count;
        self.reset_cursors();
        self
    }

    pub fn with_config(mut self, config: VirtualCursorConfig) -> Self {
        self.config = config;
        self
    }

    /// Report `dpi` regardless of viewport size.
    pub fn with_fixed_dpi(mut self, dpi: f32) -> Self {
        self.fixed_dpi = Some(dpi);
        self
    }

    /// Give `user` a viewport of its own, ignoring the layout.
    pub fn with_viewport(mut self, user: u32, viewport: ViewportGeometry) -> Self {
        self.viewports.insert(user, viewport);
        self
    }

    pub fn add_widget(&mut self, widget: SimulatedWidget) {
        self.widgets.push(widget);
    }

    pub fn settings_mut(&mut self) -> &mut CursorSettings {
        &mut self.config.cursor
    }

    pub fn policy_mut(&mut self) -> &mut InputPolicy {
        &mut self.config.policy
    }

    /// Move `user`'s cursor the way a physical mouse would.
    pub fn move_mouse(&mut self, user: u32, position: Vec2) {
        self.set_cursor_position(user, position);
    }

    /// Current interaction radius for `user` (0 when never set).
    pub fn cursor_radius(&self, user: u32) -> f32 {
        self.radii.get(&user).copied().unwrap_or(0.0)
    }

    /// Every synthesized press and release, oldest first.
    pub fn clicks(&self) -> &[SyntheticClick] {
        &self.clicks
    }

    /// User whose last synthesized press granted it focus.
    pub fn focused_user(&self) -> Option<u32> {
        self.focused_user
    }

    fn reset_cursors(&mut self) {
        self.cursors.clear();
        let center = self.desktop.center().trunc();
        for user in 0..self.local_users {
            self.cursors.insert(user, (center.x as i32, center.y as i32));
        }
    }
}

impl PointerService for SimulatedHost {
    fn has_user(&self, user: u32) -> bool {
        user < self.local_users
    }

    fn cursor_position(&self, user: u32) -> Option<Vec2> {
        self.cursors
            .get(&user)
            .map(|&(x, y)| Vec2::new(x as f32, y as f32))
    }

    fn set_cursor_position(&mut self, user: u32, position: Vec2) {
        if !self.has_user(user) {
            log::warn!("Ignoring cursor move for unknown user {user}");
            return;
        }
        // Truncate like a platform cursor backed by integer pixels.
        self.cursors.insert(user, (position.x as i32, position.y as i32));
    }

    fn set_cursor_radius(&mut self, user: u32, radius: f32) {
        self.radii.insert(user, radius);
    }

    fn synthesize_pointer_press(&mut self, user: u32, position: Vec2) {
        self.focused_user = Some(user);
        self.clicks.push(SyntheticClick {
            user,
            position,
            pressed: true,
        });
    }

    fn synthesize_pointer_release(&mut self, user: u32, position: Vec2) {
        self.clicks.push(SyntheticClick {
            user,
            position,
            pressed: false,
        });
    }
}

impl HitTestService for SimulatedHost {
    fn widget_path(&self, position: Vec2) -> Vec<WidgetInfo> {
        self.widgets
            .iter()
            .filter(|w| w.contains(position))
            .map(|w| WidgetInfo {
                id: w.id,
                name: w.name.clone(),
                interactable: w.interactable,
            })
            .collect()
    }
}

impl ViewportService for SimulatedHost {
    fn viewport_geometry(&self, user: u32) -> Option<ViewportGeometry> {
        if !self.has_user(user) {
            return None;
        }
        if let Some(viewport) = self.viewports.get(&user) {
            return Some(*viewport);
        }
        if !self.config.policy.use_splitscreen {
            return Some(self.desktop);
        }
        // Extra local users beyond the layout share the full screen.
        let (uv_origin, uv_size) = self
            .layout
            .viewport_uv(user)
            .unwrap_or((Vec2::ZERO, Vec2::splat(1.0)));
        let origin = self.desktop.absolute_at_uv(uv_origin);
        let size = self.desktop.size.mul_elem(uv_size);
        Some(ViewportGeometry::new(origin, size))
    }

    fn desktop_geometry(&self) -> ViewportGeometry {
        self.desktop
    }

    fn split_screen_layout(&self) -> SplitScreenLayout {
        if self.config.policy.use_splitscreen {
            self.layout
        } else {
            SplitScreenLayout::None
        }
    }

    fn dpi_scale(&self, viewport_size: Vec2) -> f32 {
        if let Some(dpi) = self.fixed_dpi {
            return dpi;
        }
        let short_side = viewport_size.x.min(viewport_size.y);
        if short_side <= 0.0 {
            return 1.0;
        }
        short_side / REFERENCE_SHORT_SIDE
    }
}

impl InputConsumerRegistry for SimulatedHost {
    fn register_input_consumer(&mut self, id: ConsumerId) {
        self.consumers.push(id);
    }

    fn unregister_input_consumer(&mut self, id: ConsumerId) {
        self.consumers.retain(|c| *c != id);
    }

    fn find_input_consumer(&self, id: ConsumerId) -> Option<usize> {
        self.consumers.iter().position(|c| *c == id)
    }

    fn input_consumer_count(&self) -> usize {
        self.consumers.len()
    }
}

impl SettingsService for SimulatedHost {
    fn cursor_settings(&self) -> &CursorSettings {
        &self.config.cursor
    }

    fn input_policy(&self) -> InputPolicy {
        self.config.policy
    }
}

impl CursorHost for SimulatedHost {}
