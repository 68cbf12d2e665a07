//! Keep a cursor inside its owner's viewport.
//!
//! The cursor's circle of `radius` must stay fully inside the viewport, so
//! each axis is pinned to `radius ..= extent - radius` in viewport-local
//! space. An axis that needs no adjustment keeps its absolute coordinate
//! untouched, so clamping an already clamped point returns it bit for bit.

use vcursor_types::math::{Vec2, ViewportGeometry};

/// Outcome of [`clamp_to_viewport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampResult {
    pub position: Vec2,
    /// At least one axis was adjusted.
    pub clamped: bool,
}

/// Clamp `position` (absolute) to `geometry` inset by `radius`.
pub fn clamp_to_viewport(geometry: &ViewportGeometry, position: Vec2, radius: f32) -> ClampResult {
    let local = geometry.absolute_to_local(position);
    let extent = geometry.local_size();
    let (x, clamped_x) = clamp_axis(local.x, extent.x, radius);
    let (y, clamped_y) = clamp_axis(local.y, extent.y, radius);
    if !clamped_x && !clamped_y {
        return ClampResult {
            position,
            clamped: false,
        };
    }
    let adjusted = geometry.local_to_absolute(Vec2::new(x, y));
    ClampResult {
        position: Vec2::new(
            if clamped_x { adjusted.x } else { position.x },
            if clamped_y { adjusted.y } else { position.y },
        ),
        clamped: true,
    }
}

fn clamp_axis(local: f32, extent: f32, radius: f32) -> (f32, bool) {
    let mut value = local;
    let mut clamped = false;
    if value + radius > extent {
        value = extent - radius;
        clamped = true;
    }
    // Checked second: a viewport narrower than the cursor pins to `radius`.
    if value - radius < 0.0 {
        value = radius;
        clamped = true;
    }
    (value, clamped)
}
