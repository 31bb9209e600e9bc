//! Collision rules and reactions
//!
//! A rule is chosen by the pair of entity kinds. Reactions never touch the
//! world directly: they mutate the entities and score they are handed and
//! return [`Command`]s for the world to apply, so the score is always passed
//! in explicitly.

use std::collections::HashSet;

use glam::Vec2;

use super::entity::{Entity, EntityId, EntityKind};
use super::geometry::polygons_overlap;
use super::score::Score;
use super::state::Action;
use crate::consts::PARKING_X;
use crate::tuning::VariantConfig;

/// Collision pairings that have a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Player (first) touched by space junk (second)
    PlayerSpaceJunk,
    /// Music projectile (first) striking a target (second)
    MusicTarget,
}

/// Pick the rule for two kinds. The bool is true when the arguments must be
/// swapped to match the rule's (first, second) order.
pub fn rule_for(a: EntityKind, b: EntityKind) -> Option<(Rule, bool)> {
    use EntityKind::*;
    match (a, b) {
        (Player, SpaceJunk) => Some((Rule::PlayerSpaceJunk, false)),
        (SpaceJunk, Player) => Some((Rule::PlayerSpaceJunk, true)),
        (Music, Target) => Some((Rule::MusicTarget, false)),
        (Target, Music) => Some((Rule::MusicTarget, true)),
        _ => None,
    }
}

/// Whether a kind takes part in any rule
pub fn is_collider(kind: EntityKind) -> bool {
    matches!(
        kind,
        EntityKind::Player | EntityKind::SpaceJunk | EntityKind::Music | EntityKind::Target
    )
}

/// World changes requested by a reaction
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Destroy(EntityId),
    SpawnExplosion(Vec2),
    Schedule {
        delay: u64,
        owner: EntityId,
        action: Action,
    },
}

/// Shape overlap between two live, enabled colliders
pub fn entities_overlap(a: &Entity, b: &Entity) -> bool {
    match (a.world_hitbox(), b.world_hitbox()) {
        (Some(pa), Some(pb)) => polygons_overlap(&pa, &pb),
        _ => false,
    }
}

/// Order-independent pair key
pub fn pair_key(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Overlapping pairs from the previous tick, used to fire each reaction once
/// per collision episode
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    previous: HashSet<(EntityId, EntityId)>,
    current: HashSet<(EntityId, EntityId)>,
}

impl ContactTracker {
    /// Record an overlap this tick; returns true when the episode is new
    pub fn touch(&mut self, a: EntityId, b: EntityId) -> bool {
        let key = pair_key(a, b);
        self.current.insert(key);
        !self.previous.contains(&key)
    }

    /// Close the tick: this tick's contacts become the reference set
    pub fn end_tick(&mut self) {
        self.previous = std::mem::take(&mut self.current);
    }
}

/// Player hit by junk: lose a point; below zero the player blows up
pub fn player_hit_space_junk(player: &Entity, score: &mut Score) -> Vec<Command> {
    score.decrement();
    if score.value() < 0 {
        log::info!("Player destroyed at score {}", score.value());
        vec![
            Command::SpawnExplosion(player.pos),
            Command::Destroy(player.id),
        ]
    } else {
        Vec::new()
    }
}

/// Music struck a target: mark dead and go away next tick
pub fn music_hit_target(music: &mut Entity) -> Vec<Command> {
    if music.dead {
        return Vec::new();
    }
    music.dead = true;
    vec![Command::Schedule {
        delay: 1,
        owner: music.id,
        action: Action::Destroy(music.id),
    }]
}

/// Target struck by music: score, explode, park off-screen until repositioned
pub fn target_hit_by_music(
    target: &mut Entity,
    score: &mut Score,
    config: &VariantConfig,
) -> Vec<Command> {
    if target.disabled {
        return Vec::new();
    }
    score.increment();
    let at = target.pos;
    target.pos.x = PARKING_X;
    target.disabled = true;
    vec![
        Command::SpawnExplosion(at),
        Command::Schedule {
            delay: config.target_reposition_delay,
            owner: target.id,
            action: Action::RepositionTarget(target.id),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;

    #[test]
    fn test_rule_for_is_symmetric() {
        assert_eq!(
            rule_for(EntityKind::Player, EntityKind::SpaceJunk),
            Some((Rule::PlayerSpaceJunk, false))
        );
        assert_eq!(
            rule_for(EntityKind::SpaceJunk, EntityKind::Player),
            Some((Rule::PlayerSpaceJunk, true))
        );
        assert_eq!(
            rule_for(EntityKind::Target, EntityKind::Music),
            Some((Rule::MusicTarget, true))
        );
        assert_eq!(rule_for(EntityKind::SpaceJunk, EntityKind::SpaceJunk), None);
        assert_eq!(rule_for(EntityKind::Player, EntityKind::Target), None);
    }

    #[test]
    fn test_contact_tracker_episodes() {
        let mut contacts = ContactTracker::default();
        let (a, b) = (EntityId(1), EntityId(2));

        assert!(contacts.touch(a, b));
        contacts.end_tick();
        // Still overlapping: same episode
        assert!(!contacts.touch(b, a));
        contacts.end_tick();
        // Separated for a tick
        contacts.end_tick();
        assert!(contacts.touch(a, b));
    }

    #[test]
    fn test_player_hit_decrements_until_negative() {
        let cfg = VariantConfig::default();
        let player = Entity::player(EntityId(1), &cfg);
        let mut score = Score::new(1);

        assert!(player_hit_space_junk(&player, &mut score).is_empty());
        assert!(player_hit_space_junk(&player, &mut score).is_empty());
        assert_eq!(score.value(), 0);

        let commands = player_hit_space_junk(&player, &mut score);
        assert_eq!(
            commands,
            vec![
                Command::SpawnExplosion(player.pos),
                Command::Destroy(player.id)
            ]
        );
    }

    #[test]
    fn test_music_debounce() {
        let cfg = VariantConfig::default();
        let mut music = Entity::music(EntityId(5), Vec2::ZERO, &cfg);
        assert_eq!(music_hit_target(&mut music).len(), 1);
        assert!(music.dead);
        assert!(music_hit_target(&mut music).is_empty());
    }

    #[test]
    fn test_target_parks_and_schedules() {
        let cfg = VariantConfig::default();
        let mut target = Entity::target(EntityId(9), &cfg);
        target.pos = Vec2::new(600.0, 100.0);
        let mut score = Score::new(0);

        let commands = target_hit_by_music(&mut target, &mut score, &cfg);
        assert_eq!(score.value(), 1);
        assert!(target.disabled);
        assert_eq!(target.pos.x, PARKING_X);
        assert_eq!(
            commands,
            vec![
                Command::SpawnExplosion(Vec2::new(600.0, 100.0)),
                Command::Schedule {
                    delay: 1000,
                    owner: EntityId(9),
                    action: Action::RepositionTarget(EntityId(9)),
                },
            ]
        );

        // Already parked: no second point
        assert!(target_hit_by_music(&mut target, &mut score, &cfg).is_empty());
        assert_eq!(score.value(), 1);
    }

    #[test]
    fn test_entities_overlap_uses_hitbox_not_sprite() {
        let cfg = VariantConfig::default();
        let player = Entity::player(EntityId(1), &cfg);
        let mut junk = Entity::space_junk(EntityId(2), Sprite::Asteroid, &cfg);

        // Sprites overlap, but the player's hit map starts 40px down
        junk.pos = Vec2::new(64.0, 64.0 + 40.0 - 187.0 + 10.0);
        assert!(!entities_overlap(&player, &junk));

        junk.pos = Vec2::new(100.0, 100.0);
        assert!(entities_overlap(&player, &junk));
    }
}
