//! Entity archetypes
//!
//! Every entity carries a transform plus a fixed set of optional capabilities
//! chosen by its constructor. Nothing adds or removes capabilities later.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Polygon;
use crate::assets::Sprite;
use crate::consts::*;
use crate::tuning::VariantConfig;

/// Stable entity identity; ids are never reused within a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Archetype tag used to pair up collision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    SpaceJunk,
    Target,
    /// Projectile fired by the player in the shooter variant
    Music,
    Explosion,
    /// Residue left where an explosion faded
    Debris,
    /// HUD text showing the score
    Score,
}

/// Opacity decay per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    pub rate: f32,
}

/// Rotation per tick (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub rate: f32,
}

/// Leftward drift per tick; re-enters from the right once off-screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    pub speed: f32,
}

/// Rightward flight per tick; destroyed once past the right edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub speed: f32,
}

/// A game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub sprite: Option<Sprite>,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees, unbounded
    pub rotation: f32,
    /// Opacity in [0, 1]
    pub alpha: f32,
    /// Collision polygon relative to `pos`
    pub hitbox: Option<Polygon>,
    pub fade: Option<Fade>,
    pub spin: Option<Spin>,
    pub drift: Option<Drift>,
    pub flight: Option<Flight>,
    /// Moves that leave the viewport are undone
    pub viewport_bounded: bool,
    /// False once destroyed; removed from the world at the end of the tick
    pub alive: bool,
    /// Projectile has already hit something and is waiting to be removed
    pub dead: bool,
    /// Parked off-screen and ignored by collisions
    pub disabled: bool,
}

impl Entity {
    fn base(id: EntityId, kind: EntityKind, sprite: Option<Sprite>, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            sprite,
            pos,
            size,
            rotation: 0.0,
            alpha: 1.0,
            hitbox: None,
            fade: None,
            spin: None,
            drift: None,
            flight: None,
            viewport_bounded: false,
            alive: true,
            dead: false,
            disabled: false,
        }
    }

    /// The rocket: four-way movement, custom hit map, viewport bounded
    pub fn player(id: EntityId, config: &VariantConfig) -> Self {
        Self {
            hitbox: Some(config.player_polygon()),
            viewport_bounded: true,
            ..Self::base(
                id,
                EntityKind::Player,
                Some(Sprite::Rocket),
                Vec2::new(PLAYER_START_X, PLAYER_START_Y),
                Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            )
        }
    }

    /// Drifting junk; position, speed and spin are randomized by the world
    pub fn space_junk(id: EntityId, sprite: Sprite, config: &VariantConfig) -> Self {
        let size = sprite.size();
        Self {
            hitbox: Some(config.junk_polygon(size)),
            spin: Some(Spin { rate: 0.0 }),
            drift: Some(Drift { speed: 0.0 }),
            ..Self::base(id, EntityKind::SpaceJunk, Some(sprite), Vec2::ZERO, size)
        }
    }

    /// Stationary target; placed by the world
    pub fn target(id: EntityId, config: &VariantConfig) -> Self {
        let size = Sprite::Fuel.size();
        Self {
            hitbox: Some(config.junk_polygon(size)),
            ..Self::base(id, EntityKind::Target, Some(Sprite::Fuel), Vec2::ZERO, size)
        }
    }

    /// Projectile launched from `pos`
    pub fn music(id: EntityId, pos: Vec2, config: &VariantConfig) -> Self {
        let size = Sprite::Note.size();
        Self {
            hitbox: Some(Polygon::rect(Vec2::ZERO, size)),
            flight: Some(Flight {
                speed: config.music_speed,
            }),
            ..Self::base(id, EntityKind::Music, Some(Sprite::Note), pos, size)
        }
    }

    /// Spinning, fading burst
    pub fn explosion(id: EntityId, pos: Vec2, config: &VariantConfig) -> Self {
        Self {
            fade: Some(Fade {
                rate: config.explosion_fade,
            }),
            spin: Some(Spin {
                rate: config.explosion_spin,
            }),
            ..Self::base(
                id,
                EntityKind::Explosion,
                Some(Sprite::Explosion),
                pos,
                Sprite::Explosion.size(),
            )
        }
    }

    pub fn debris(id: EntityId, pos: Vec2) -> Self {
        Self::base(id, EntityKind::Debris, Some(Sprite::Debris), pos, Sprite::Debris.size())
    }

    pub fn score_board(id: EntityId) -> Self {
        Self::base(
            id,
            EntityKind::Score,
            None,
            Vec2::new(SCORE_X, SCORE_Y),
            Vec2::new(SCORE_WIDTH, SCORE_HEIGHT),
        )
    }

    /// Hitbox in world space, if this entity currently takes part in collisions
    pub fn world_hitbox(&self) -> Option<Vec<Vec2>> {
        if !self.alive || self.disabled {
            return None;
        }
        self.hitbox.as_ref().map(|poly| poly.translated(self.pos))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}
