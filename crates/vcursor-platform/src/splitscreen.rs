//! Split-screen layouts.
//!
//! Each layout divides the desktop into per-player viewports, described in
//! UV space (`0.0..1.0` on both axes). Start positions use a fixed table of
//! per-player centers; for odd divisions the table is close to, but not
//! exactly, the geometric center of the viewport.

use serde::{Deserialize, Serialize};
use vcursor_types::math::Vec2;

/// How the desktop is shared between local players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SplitScreenLayout {
    /// Every player shares the full screen.
    #[default]
    None,
    /// Two players stacked top and bottom.
    TwoPlayerHorizontal,
    /// Two players side by side.
    TwoPlayerVertical,
    /// One player on the top half, two sharing the bottom half.
    ThreePlayerFavorTop,
    /// Two players sharing the top half, one on the bottom half.
    ThreePlayerFavorBottom,
    /// Three columns.
    ThreePlayerVertical,
    /// Three rows.
    ThreePlayerHorizontal,
    /// Four quadrants.
    FourPlayerGrid,
    /// Four columns.
    FourPlayerVertical,
    /// Four rows.
    FourPlayerHorizontal,
}

const HALF: f32 = 0.5;
const THIRD: f32 = 1.0 / 3.0;
const QUARTER: f32 = 0.25;

impl SplitScreenLayout {
    /// Number of viewports the layout provides.
    pub fn player_count(self) -> u32 {
        match self {
            Self::None => 1,
            Self::TwoPlayerHorizontal | Self::TwoPlayerVertical => 2,
            Self::ThreePlayerFavorTop
            | Self::ThreePlayerFavorBottom
            | Self::ThreePlayerVertical
            | Self::ThreePlayerHorizontal => 3,
            Self::FourPlayerGrid | Self::FourPlayerVertical | Self::FourPlayerHorizontal => 4,
        }
    }

    /// Viewport of `player` as `(origin, size)` in UV space.
    ///
    /// With [`SplitScreenLayout::None`] every player gets the full screen.
    /// Returns `None` for a player index the layout has no viewport for.
    pub fn viewport_uv(self, player: u32) -> Option<(Vec2, Vec2)> {
        let full = Vec2::splat(1.0);
        let rect = |x: f32, y: f32, w: f32, h: f32| Some((Vec2::new(x, y), Vec2::new(w, h)));
        if self == Self::None {
            return Some((Vec2::ZERO, full));
        }
        if player >= self.player_count() {
            return None;
        }
        let p = player as f32;
        match self {
            Self::None => Some((Vec2::ZERO, full)),
            Self::TwoPlayerHorizontal => rect(0.0, p * HALF, 1.0, HALF),
            Self::TwoPlayerVertical => rect(p * HALF, 0.0, HALF, 1.0),
            Self::ThreePlayerFavorTop => match player {
                0 => rect(0.0, 0.0, 1.0, HALF),
                1 => rect(0.0, HALF, HALF, HALF),
                _ => rect(HALF, HALF, HALF, HALF),
            },
            Self::ThreePlayerFavorBottom => match player {
                0 => rect(0.0, 0.0, HALF, HALF),
                1 => rect(HALF, 0.0, HALF, HALF),
                _ => rect(0.0, HALF, 1.0, HALF),
            },
            Self::ThreePlayerVertical => rect(p * THIRD, 0.0, THIRD, 1.0),
            Self::ThreePlayerHorizontal => rect(0.0, p * THIRD, 1.0, THIRD),
            Self::FourPlayerGrid => {
                let col = (player % 2) as f32;
                let row = (player / 2) as f32;
                rect(col * HALF, row * HALF, HALF, HALF)
            },
            Self::FourPlayerVertical => rect(p * QUARTER, 0.0, QUARTER, 1.0),
            Self::FourPlayerHorizontal => rect(0.0, p * QUARTER, 1.0, QUARTER),
        }
    }

    /// Start position of `player`'s cursor in UV space.
    ///
    /// Falls back to the screen center for a shared screen or an index the
    /// layout has no viewport for.
    pub fn center_uv(self, player: u32) -> Vec2 {
        let v = Vec2::new;
        match (self, player) {
            (Self::TwoPlayerVertical, 0) => v(0.25, 0.5),
            (Self::TwoPlayerVertical, 1) => v(0.75, 0.5),

            (Self::TwoPlayerHorizontal, 0) => v(0.5, 0.25),
            (Self::TwoPlayerHorizontal, 1) => v(0.5, 0.75),

            (Self::ThreePlayerVertical, 0) => v(0.165, 0.5),
            (Self::ThreePlayerVertical, 1) => v(0.495, 0.5),
            (Self::ThreePlayerVertical, 2) => v(0.825, 0.5),

            (Self::ThreePlayerHorizontal, 0) => v(0.5, 0.165),
            (Self::ThreePlayerHorizontal, 1) => v(0.5, 0.495),
            (Self::ThreePlayerHorizontal, 2) => v(0.5, 0.825),

            (Self::ThreePlayerFavorTop, 0) => v(0.5, 0.25),
            (Self::ThreePlayerFavorTop, 1) => v(0.25, 0.75),
            (Self::ThreePlayerFavorTop, 2) => v(0.75, 0.75),

            (Self::ThreePlayerFavorBottom, 0) => v(0.25, 0.25),
            (Self::ThreePlayerFavorBottom, 1) => v(0.75, 0.25),
            (Self::ThreePlayerFavorBottom, 2) => v(0.5, 0.75),

            (Self::FourPlayerGrid, 0) => v(0.25, 0.25),
            (Self::FourPlayerGrid, 1) => v(0.75, 0.25),
            (Self::FourPlayerGrid, 2) => v(0.25, 0.75),
            (Self::FourPlayerGrid, 3) => v(0.75, 0.75),

            (Self::FourPlayerVertical, 0) => v(0.125, 0.5),
            (Self::FourPlayerVertical, 1) => v(0.375, 0.5),
            (Self::FourPlayerVertical, 2) => v(0.625, 0.5),
            (Self::FourPlayerVertical, 3) => v(0.875, 0.5),

            (Self::FourPlayerHorizontal, 0) => v(0.5, 0.125),
            (Self::FourPlayerHorizontal, 1) => v(0.5, 0.375),
            (Self::FourPlayerHorizontal, 2) => v(0.5, 0.625),
            (Self::FourPlayerHorizontal, 3) => v(0.5, 0.875),

            _ => v(0.5, 0.5),
        }
    }
}
