//! Data-driven game balance
//!
//! The four game versions share the same rules but disagree on constants
//! (hitbox insets, randomization ranges, what gets spawned). Each version is
//! a [`GameVariant`] that expands into a [`VariantConfig`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::Sprite;
use crate::sim::geometry::Polygon;

/// Game versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    /// Dodge two asteroids and a satellite
    #[default]
    Classic,
    /// Five pieces of junk with a looser hitbox
    Swarm,
    /// Explosions leave debris behind once they fade
    Debris,
    /// Fire music at targets to score
    Shooter,
}

impl GameVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Classic => "classic",
            GameVariant::Swarm => "swarm",
            GameVariant::Debris => "debris",
            GameVariant::Shooter => "shooter",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameVariant::Classic),
            "swarm" => Some(GameVariant::Swarm),
            "debris" => Some(GameVariant::Debris),
            "shooter" => Some(GameVariant::Shooter),
            _ => None,
        }
    }

    pub fn config(&self) -> VariantConfig {
        let base = VariantConfig::default();
        match self {
            GameVariant::Classic => base,
            GameVariant::Swarm => VariantConfig {
                junk: [Sprite::Asteroid, Sprite::Satellite, Sprite::Fuel]
                    .into_iter()
                    .cycle()
                    .take(5)
                    .collect(),
                junk_inset: 15.0,
                junk_speed: (2.0, 8.0),
                ..base
            },
            GameVariant::Debris => VariantConfig {
                junk: vec![Sprite::Asteroid, Sprite::Satellite, Sprite::Fuel, Sprite::Asteroid],
                leave_debris: true,
                ..base
            },
            GameVariant::Shooter => VariantConfig {
                starting_score: 0,
                junk: Vec::new(),
                targets: 2,
                can_fire: true,
                // Nose-tapered hit map for the shooter's rocket
                player_hitbox: vec![(10.0, 30.0), (10.0, 80.0), (180.0, 65.0), (180.0, 45.0)],
                ..base
            },
        }
    }
}

/// Balance knobs for one game version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Initial score value
    pub starting_score: i64,
    /// Player hit map, relative to the sprite's top-left corner
    pub player_hitbox: Vec<(f32, f32)>,
    /// Junk sprites spawned by the main scene, in order
    pub junk: Vec<Sprite>,
    /// Junk hitbox inset from the visual bounds
    pub junk_inset: f32,
    /// Junk re-entry x (just past the right edge)
    pub junk_spawn_x: f32,
    /// Junk horizontal speed range (pixels per tick)
    pub junk_speed: (f32, f32),
    /// Junk spin range (degrees per tick)
    pub junk_spin: (f32, f32),
    /// Number of targets spawned by the main scene
    pub targets: usize,
    /// Target reposition x range
    pub target_x: (f32, f32),
    /// Ticks a scored target stays parked before reappearing
    pub target_reposition_delay: u64,
    /// Explosion spin rate (degrees per tick)
    pub explosion_spin: f32,
    /// Explosion opacity decay per tick
    pub explosion_fade: f32,
    /// Spawn debris where an explosion fades out
    pub leave_debris: bool,
    /// Player may fire music projectiles
    pub can_fire: bool,
    /// Music projectile speed (pixels per tick, rightward)
    pub music_speed: f32,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            starting_score: 100,
            player_hitbox: vec![(10.0, 40.0), (10.0, 80.0), (180.0, 80.0), (180.0, 40.0)],
            junk: vec![Sprite::Asteroid, Sprite::Asteroid, Sprite::Satellite],
            junk_inset: 10.0,
            junk_spawn_x: 1024.0,
            junk_speed: (1.0, 10.0),
            junk_spin: (-5.0, 5.0),
            targets: 0,
            target_x: (500.0, 800.0),
            target_reposition_delay: 1000,
            explosion_spin: 4.0,
            explosion_fade: 0.05,
            leave_debris: false,
            can_fire: false,
            music_speed: 10.0,
        }
    }
}

impl VariantConfig {
    pub fn player_polygon(&self) -> Polygon {
        Polygon::from_pairs(&self.player_hitbox)
    }

    pub fn junk_polygon(&self, size: Vec2) -> Polygon {
        Polygon::inset(size, self.junk_inset)
    }

    /// Junk + target entities the main scene spawns
    pub fn hazard_count(&self) -> usize {
        self.junk.len() + self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names() {
        for v in [
            GameVariant::Classic,
            GameVariant::Swarm,
            GameVariant::Debris,
            GameVariant::Shooter,
        ] {
            assert_eq!(GameVariant::from_name(v.as_str()), Some(v));
        }
        assert_eq!(GameVariant::from_name("SHOOTER"), Some(GameVariant::Shooter));
        assert_eq!(GameVariant::from_name("pong"), None);
    }

    #[test]
    fn test_classic_spawn_set() {
        let cfg = GameVariant::Classic.config();
        assert_eq!(cfg.starting_score, 100);
        assert_eq!(
            cfg.junk,
            vec![Sprite::Asteroid, Sprite::Asteroid, Sprite::Satellite]
        );
        assert_eq!(cfg.hazard_count(), 3);
    }

    #[test]
    fn test_hazard_counts_stay_small() {
        for v in [
            GameVariant::Classic,
            GameVariant::Swarm,
            GameVariant::Debris,
            GameVariant::Shooter,
        ] {
            let n = v.config().hazard_count();
            assert!((2..=5).contains(&n), "{:?} spawns {}", v, n);
        }
    }

    #[test]
    fn test_shooter_starts_at_zero() {
        let cfg = GameVariant::Shooter.config();
        assert_eq!(cfg.starting_score, 0);
        assert!(cfg.can_fire);
        assert!(cfg.junk.is_empty());
    }
}
