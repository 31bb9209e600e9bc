//! World state and entity lifecycle
//!
//! Entities live in a single list sorted by id. Spawning and removal are
//! deferred to the end of the tick so per-tick iteration never sees the list
//! change underneath it; destruction flags the entity immediately so it takes
//! no further part in the tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::ContactTracker;
use super::entity::{Entity, EntityId, EntityKind};
use super::geometry::Viewport;
use super::schedule::Scheduler;
use super::score::Score;
use crate::assets::Sprite;
use crate::consts::PLAYER_SPEED;
use crate::tuning::VariantConfig;

/// Delayed world actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Destroy(EntityId),
    RepositionTarget(EntityId),
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: EntityId, kind: EntityKind },
    Destroyed { id: EntityId, kind: EntityKind },
    /// A new collision episode between two entities, first/second per rule
    Collision { first: EntityId, second: EntityId },
    /// A fading entity dropped below the visibility threshold
    Faded { id: EntityId, pos: Vec2 },
    ScoreChanged { value: i64 },
    JunkRecycled { id: EntityId },
    TargetRepositioned { id: EntityId },
}

/// The main scene's simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub config: VariantConfig,
    pub viewport: Viewport,
    /// Four-way movement speed
    pub player_speed: f32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: Score,
    /// Live entities, sorted by id
    pub entities: Vec<Entity>,
    pub(crate) pending_spawns: Vec<Entity>,
    pub(crate) schedule: Scheduler<Action>,
    pub(crate) contacts: ContactTracker,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Create an empty world
    pub fn new(config: VariantConfig, viewport: Viewport, seed: u64) -> Self {
        Self {
            score: Score::new(config.starting_score),
            config,
            viewport,
            player_speed: PLAYER_SPEED,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            entities: Vec::new(),
            pending_spawns: Vec::new(),
            schedule: Scheduler::new(),
            contacts: ContactTracker::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a world with the main scene's initial entity set
    pub fn with_initial_set(config: VariantConfig, viewport: Viewport, seed: u64) -> Self {
        let mut world = Self::new(config, viewport, seed);
        world.spawn_initial_set();
        world
    }

    /// One player, the configured junk and targets, one score HUD
    pub fn spawn_initial_set(&mut self) {
        let id = EntityId(self.next_entity_id());
        let player = Entity::player(id, &self.config);
        self.spawn(player);

        let junk = self.config.junk.clone();
        for sprite in junk {
            self.spawn_junk(sprite);
        }
        for _ in 0..self.config.targets {
            self.spawn_target();
        }

        let id = EntityId(self.next_entity_id());
        self.spawn(Entity::score_board(id));
        self.flush();

        log::info!(
            "Main scene: {} entities ({} hazards), score {}",
            self.entities.len(),
            self.config.hazard_count(),
            self.score.value()
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an entity; it joins the world when the current tick ends
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.pending_spawns.push(entity);
        id
    }

    pub fn spawn_junk(&mut self, sprite: Sprite) -> EntityId {
        let id = EntityId(self.next_entity_id());
        let mut junk = Entity::space_junk(id, sprite, &self.config);
        randomize_junk(&mut junk, &self.config, &self.viewport, &mut self.rng);
        self.spawn(junk)
    }

    pub fn spawn_target(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id());
        let mut target = Entity::target(id, &self.config);
        place_target(&mut target, &self.config, &self.viewport, &mut self.rng);
        self.spawn(target)
    }

    pub fn spawn_explosion(&mut self, pos: Vec2) -> EntityId {
        let id = EntityId(self.next_entity_id());
        let explosion = Entity::explosion(id, pos, &self.config);
        self.spawn(explosion)
    }

    pub fn spawn_music(&mut self, pos: Vec2) -> EntityId {
        let id = EntityId(self.next_entity_id());
        let music = Entity::music(id, pos, &self.config);
        self.spawn(music)
    }

    pub fn spawn_debris(&mut self, pos: Vec2) -> EntityId {
        let id = EntityId(self.next_entity_id());
        self.spawn(Entity::debris(id, pos))
    }

    /// Destroy an entity. Immediate for the rest of the tick, final, and a
    /// no-op if it is already gone.
    pub fn destroy(&mut self, id: EntityId) {
        if let Some(entity) = self.get_mut(id) {
            if !entity.alive {
                return;
            }
            entity.alive = false;
            let kind = entity.kind;
            self.events.push(GameEvent::Destroyed { id, kind });
        }
    }

    /// Run `action` after `delay` ticks on behalf of `owner`
    pub fn schedule(&mut self, delay: u64, owner: EntityId, action: Action) {
        self.schedule.schedule_at(self.time_ticks + delay, Some(owner), action);
    }

    /// Due ticks of actions pending for an entity
    pub fn scheduled_for(&self, owner: EntityId) -> Vec<u64> {
        self.schedule.pending_for(owner)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &mut self.entities[i])
    }

    /// Live entities of a kind
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|e| e.alive && e.kind == kind)
            .count()
    }

    /// Ids of live entities of a kind, in id order
    pub fn ids_of(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.alive && e.kind == kind)
            .map(|e| e.id)
            .collect()
    }

    pub fn first_of_kind(&self, kind: EntityKind) -> Option<&Entity> {
        self.entities.iter().find(|e| e.alive && e.kind == kind)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.first_of_kind(EntityKind::Player)
    }

    /// Events recorded during the last tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the events recorded during the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Send junk back to the right edge with fresh speed and spin
    pub fn recycle_junk(&mut self, id: EntityId) {
        let Ok(i) = self.entities.binary_search_by_key(&id, |e| e.id) else {
            return;
        };
        randomize_junk(&mut self.entities[i], &self.config, &self.viewport, &mut self.rng);
        self.events.push(GameEvent::JunkRecycled { id });
    }

    /// Bring a parked target back at a random spot
    pub fn reposition_target(&mut self, id: EntityId) {
        let Ok(i) = self.entities.binary_search_by_key(&id, |e| e.id) else {
            return;
        };
        let target = &mut self.entities[i];
        if !target.alive {
            return;
        }
        place_target(target, &self.config, &self.viewport, &mut self.rng);
        target.disabled = false;
        self.events.push(GameEvent::TargetRepositioned { id });
    }

    /// End-of-tick bookkeeping: drop destroyed entities (cancelling their
    /// scheduled actions) and admit queued spawns
    pub fn flush(&mut self) {
        let schedule = &mut self.schedule;
        self.entities.retain(|e| {
            if !e.alive {
                schedule.cancel_owned_by(e.id);
            }
            e.alive
        });

        for entity in self.pending_spawns.drain(..) {
            self.events.push(GameEvent::Spawned {
                id: entity.id,
                kind: entity.kind,
            });
            self.entities.push(entity);
        }
        // Ids are allocated in order, so this is already sorted
        self.entities.sort_by_key(|e| e.id);
    }
}

/// Random re-entry: x at the spawn edge, y anywhere the sprite fits,
/// fresh speed and spin
pub(crate) fn randomize_junk(
    junk: &mut Entity,
    config: &VariantConfig,
    viewport: &Viewport,
    rng: &mut Pcg32,
) {
    let (spin_lo, spin_hi) = config.junk_spin;
    let (speed_lo, speed_hi) = config.junk_speed;
    if let Some(spin) = junk.spin.as_mut() {
        spin.rate = rng.random_range(spin_lo..=spin_hi);
    }
    if let Some(drift) = junk.drift.as_mut() {
        drift.speed = rng.random_range(speed_lo..=speed_hi);
    }
    junk.pos = Vec2::new(config.junk_spawn_x, random_row(junk.size.y, viewport, rng));
}

/// Random target spot within the configured x range
pub(crate) fn place_target(
    target: &mut Entity,
    config: &VariantConfig,
    viewport: &Viewport,
    rng: &mut Pcg32,
) {
    let (lo, hi) = config.target_x;
    let x = rng.random_range(lo..=hi);
    target.pos = Vec2::new(x, random_row(target.size.y, viewport, rng));
}

/// Whole-pixel y in `[0, viewport height - height]`
fn random_row(height: f32, viewport: &Viewport, rng: &mut Pcg32) -> f32 {
    let max_y = (viewport.height - height).floor().max(0.0) as i32;
    rng.random_range(0..=max_y) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::GameVariant;

    #[test]
    fn test_classic_initial_set() {
        let world = World::with_initial_set(GameVariant::Classic.config(), Viewport::default(), 1);
        assert_eq!(world.count_kind(EntityKind::Player), 1);
        assert_eq!(world.count_kind(EntityKind::Score), 1);
        assert_eq!(world.count_kind(EntityKind::SpaceJunk), 3);
        assert_eq!(world.count_kind(EntityKind::Target), 0);

        let sprites: Vec<_> = world
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::SpaceJunk)
            .filter_map(|e| e.sprite)
            .collect();
        assert_eq!(sprites, vec![Sprite::Asteroid, Sprite::Asteroid, Sprite::Satellite]);
    }

    #[test]
    fn test_variant_initial_sets() {
        let cases = [
            (GameVariant::Swarm, 5, 0),
            (GameVariant::Debris, 4, 0),
            (GameVariant::Shooter, 0, 2),
        ];
        for (variant, junk, targets) in cases {
            let world = World::with_initial_set(variant.config(), Viewport::default(), 7);
            assert_eq!(world.count_kind(EntityKind::Player), 1, "{:?}", variant);
            assert_eq!(world.count_kind(EntityKind::Score), 1, "{:?}", variant);
            assert_eq!(world.count_kind(EntityKind::SpaceJunk), junk, "{:?}", variant);
            assert_eq!(world.count_kind(EntityKind::Target), targets, "{:?}", variant);
        }
    }

    #[test]
    fn test_junk_spawns_at_right_edge() {
        let world = World::with_initial_set(GameVariant::Classic.config(), Viewport::default(), 3);
        for junk in world.entities.iter().filter(|e| e.kind == EntityKind::SpaceJunk) {
            assert_eq!(junk.pos.x, 1024.0);
            assert!(junk.pos.y >= 0.0 && junk.pos.y <= 600.0 - junk.size.y);
            assert_eq!(junk.pos.y.fract(), 0.0);
            let speed = junk.drift.unwrap().speed;
            assert!((1.0..=10.0).contains(&speed));
            let spin = junk.spin.unwrap().rate;
            assert!((-5.0..=5.0).contains(&spin));
        }
    }

    #[test]
    fn test_targets_within_range() {
        let world = World::with_initial_set(GameVariant::Shooter.config(), Viewport::default(), 11);
        for target in world.entities.iter().filter(|e| e.kind == EntityKind::Target) {
            assert!((500.0..=800.0).contains(&target.pos.x));
            assert!(target.pos.y >= 0.0 && target.pos.y <= 600.0 - target.size.y);
        }
    }

    #[test]
    fn test_spawn_is_deferred_until_flush() {
        let mut world = World::new(VariantConfig::default(), Viewport::default(), 0);
        let id = world.spawn_explosion(Vec2::new(1.0, 2.0));
        assert!(world.get(id).is_none());
        world.flush();
        assert_eq!(world.get(id).map(|e| e.kind), Some(EntityKind::Explosion));
    }

    #[test]
    fn test_destroy_is_immediate_and_cancels_schedule() {
        let mut world = World::new(VariantConfig::default(), Viewport::default(), 0);
        let id = world.spawn_target();
        world.flush();
        world.schedule(1000, id, Action::RepositionTarget(id));
        assert_eq!(world.scheduled_for(id), vec![1000]);

        world.destroy(id);
        assert!(!world.get(id).map(|e| e.alive).unwrap_or(true));
        assert_eq!(world.count_kind(EntityKind::Target), 0);

        world.flush();
        assert!(world.get(id).is_none());
        assert!(world.scheduled_for(id).is_empty());

        // Destroying again is a no-op
        world.destroy(id);
        let destroyed = world
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Destroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = World::with_initial_set(GameVariant::Swarm.config(), Viewport::default(), 42);
        let b = World::with_initial_set(GameVariant::Swarm.config(), Viewport::default(), 42);
        let pa: Vec<_> = a.entities.iter().map(|e| e.pos).collect();
        let pb: Vec<_> = b.entities.iter().map(|e| e.pos).collect();
        assert_eq!(pa, pb);
    }
}
