//! Space Junk - a small dodge-the-junk / shoot-the-target arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, scoring, lifecycle)
//! - `scene`: Loading → main scene flow
//! - `assets`: Sprite manifest and asset loading seam
//! - `tuning`: Data-driven variant balance
//! - `settings`: Launch configuration
//! - `snapshot`: Serializable frame description for a renderer

pub mod assets;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use assets::{AssetLoadError, AssetLoader, Sprite};
pub use scene::{Game, SceneKind};
pub use settings::Settings;
pub use tuning::{GameVariant, VariantConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (bounds for the player, spawn area for junk)
    pub const VIEWPORT_WIDTH: f32 = 1000.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Opacity below which a fading entity is destroyed
    pub const FADE_THRESHOLD: f32 = 0.05;

    /// Ticks between assets resolving and entering the main scene
    pub const LOADING_SETTLE_TICKS: u64 = 500;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 64.0;
    pub const PLAYER_START_Y: f32 = 64.0;
    pub const PLAYER_WIDTH: f32 = 199.0;
    pub const PLAYER_HEIGHT: f32 = 96.0;
    /// Four-way movement speed (pixels per tick)
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Score HUD placement
    pub const SCORE_X: f32 = 900.0;
    pub const SCORE_Y: f32 = 0.0;
    pub const SCORE_WIDTH: f32 = 100.0;
    pub const SCORE_HEIGHT: f32 = 20.0;

    /// Where a scored target waits until it is repositioned
    pub const PARKING_X: f32 = -10_000.0;
}

/// Axis-aligned box containment: is `[pos, pos + size]` inside `[min, max]`?
#[inline]
pub fn box_within(pos: Vec2, size: Vec2, min: Vec2, max: Vec2) -> bool {
    pos.x >= min.x && pos.y >= min.y && pos.x + size.x <= max.x && pos.y + size.y <= max.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_within_edges_inclusive() {
        let max = Vec2::new(1000.0, 600.0);
        assert!(box_within(Vec2::ZERO, Vec2::new(1000.0, 600.0), Vec2::ZERO, max));
        assert!(!box_within(Vec2::new(-0.5, 0.0), Vec2::new(10.0, 10.0), Vec2::ZERO, max));
        assert!(!box_within(Vec2::new(995.0, 0.0), Vec2::new(10.0, 10.0), Vec2::ZERO, max));
    }
}
