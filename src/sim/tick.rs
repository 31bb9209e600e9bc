//! Per-frame simulation tick
//!
//! One call advances the world by a single frame, in fixed phase order:
//! 0. scheduled actions that have come due
//! 1. scripted motion/decay and input-driven movement
//! 2. viewport bounds reversion
//! 3. collision reactions
//! 4. deferred removal and spawning

use glam::Vec2;

use super::collision::{self, Command, Rule};
use super::entity::EntityKind;
use super::motion::{self, DriftOutcome, FadeOutcome};
use super::state::{Action, GameEvent, World};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire a music projectile (shooter variant)
    pub fire: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Unit steps per axis; opposite keys cancel
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput) {
    world.time_ticks += 1;
    world.events.clear();

    let input = if input.idle_mode {
        autopilot(world, input)
    } else {
        input.clone()
    };

    run_due_actions(world);
    let moved = apply_updates(world, &input);
    apply_bounds(world, &moved);
    resolve_collisions(world);
    world.flush();
}

/// Phase 0
fn run_due_actions(world: &mut World) {
    for action in world.schedule.drain_due(world.time_ticks) {
        match action {
            Action::Destroy(id) => world.destroy(id),
            Action::RepositionTarget(id) => world.reposition_target(id),
        }
    }
}

/// Phase 1. Returns (index, pre-move position) for bounded entities that moved.
fn apply_updates(world: &mut World, input: &TickInput) -> Vec<(usize, Vec2)> {
    let mut moved = Vec::new();
    let step = input.direction() * world.player_speed;
    let mut fire_from = None;

    for i in 0..world.entities.len() {
        if !world.entities[i].alive {
            continue;
        }

        if world.entities[i].kind == EntityKind::Player {
            let player = &mut world.entities[i];
            if step != Vec2::ZERO {
                let old = player.pos;
                player.pos += step;
                if player.viewport_bounded {
                    moved.push((i, old));
                }
            }
            if input.fire && world.config.can_fire {
                fire_from = Some(player.pos + Vec2::new(player.size.x, player.size.y * 0.5));
            }
        }

        if let Some(fade) = world.entities[i].fade {
            let entity = &mut world.entities[i];
            match motion::fade(entity.alpha, fade.rate) {
                FadeOutcome::Visible(alpha) => entity.alpha = alpha,
                FadeOutcome::Expired(alpha) => {
                    entity.alpha = alpha;
                    let (id, kind, pos) = (entity.id, entity.kind, entity.pos);
                    world.events.push(GameEvent::Faded { id, pos });
                    world.destroy(id);
                    on_faded(world, kind, pos);
                    continue;
                }
            }
        }

        if let Some(spin) = world.entities[i].spin {
            let entity = &mut world.entities[i];
            entity.rotation = motion::rotate(entity.rotation, spin.rate);
        }

        if let Some(drift) = world.entities[i].drift {
            let entity = &mut world.entities[i];
            match motion::drift(entity.pos.x, entity.size.x, drift.speed) {
                DriftOutcome::Moved(x) => entity.pos.x = x,
                DriftOutcome::OffScreen => {
                    let id = entity.id;
                    world.recycle_junk(id);
                }
            }
        }

        if let Some(flight) = world.entities[i].flight {
            let entity = &mut world.entities[i];
            entity.pos.x += flight.speed;
            if entity.pos.x > world.viewport.width {
                let id = entity.id;
                world.destroy(id);
            }
        }
    }

    if let Some(at) = fire_from {
        let half = crate::assets::Sprite::Note.size().y * 0.5;
        world.spawn_music(at - Vec2::new(0.0, half));
    }

    moved
}

/// Listener for `Faded`: leave debris where explosions burn out
fn on_faded(world: &mut World, kind: EntityKind, pos: Vec2) {
    if kind == EntityKind::Explosion && world.config.leave_debris {
        world.spawn_debris(pos);
    }
}

/// Phase 2
fn apply_bounds(world: &mut World, moved: &[(usize, Vec2)]) {
    for &(i, old) in moved {
        let entity = &mut world.entities[i];
        if !entity.alive {
            continue;
        }
        entity.pos = motion::revert_if_outside(&world.viewport, old, entity.pos, entity.size);
    }
}

/// Phase 3
fn resolve_collisions(world: &mut World) {
    let candidates: Vec<usize> = (0..world.entities.len())
        .filter(|&i| collision::is_collider(world.entities[i].kind))
        .collect();

    for (n, &i) in candidates.iter().enumerate() {
        for &j in &candidates[n + 1..] {
            let Some((rule, swapped)) =
                collision::rule_for(world.entities[i].kind, world.entities[j].kind)
            else {
                continue;
            };
            // Re-checked per pair: earlier reactions may have destroyed or
            // parked either entity
            if !collision::entities_overlap(&world.entities[i], &world.entities[j]) {
                continue;
            }
            let (first, second) = if swapped { (j, i) } else { (i, j) };
            let (first_id, second_id) = (world.entities[first].id, world.entities[second].id);
            if !world.contacts.touch(first_id, second_id) {
                continue;
            }

            world.events.push(GameEvent::Collision {
                first: first_id,
                second: second_id,
            });
            log::debug!("{:?}: {:?} x {:?}", rule, first_id, second_id);
            react(world, rule, first, second);
        }
    }

    world.contacts.end_tick();
}

fn react(world: &mut World, rule: Rule, first: usize, second: usize) {
    let before = world.score.value();
    let commands = match rule {
        Rule::PlayerSpaceJunk => {
            collision::player_hit_space_junk(&world.entities[first], &mut world.score)
        }
        Rule::MusicTarget => {
            let mut commands = collision::music_hit_target(&mut world.entities[first]);
            // A spent projectile keeps overlapping but scores nothing
            if !commands.is_empty() {
                commands.extend(collision::target_hit_by_music(
                    &mut world.entities[second],
                    &mut world.score,
                    &world.config,
                ));
            }
            commands
        }
    };

    if world.score.value() != before {
        world.events.push(GameEvent::ScoreChanged {
            value: world.score.value(),
        });
    }
    apply_commands(world, commands);
}

fn apply_commands(world: &mut World, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::Destroy(id) => world.destroy(id),
            Command::SpawnExplosion(pos) => {
                world.spawn_explosion(pos);
            }
            Command::Schedule {
                delay,
                owner,
                action,
            } => world.schedule(delay, owner, action),
        }
    }
}

/// Demo input: dodge the closest incoming junk, or line up with a target
/// and fire
fn autopilot(world: &World, input: &TickInput) -> TickInput {
    let mut out = TickInput {
        idle_mode: true,
        ..input.clone()
    };
    let Some(player) = world.player() else {
        return out;
    };
    let center = player.center();

    if world.config.can_fire {
        let target = world
            .entities
            .iter()
            .filter(|e| e.alive && !e.disabled && e.kind == EntityKind::Target)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
        if let Some(target) = target {
            let dy = target.center().y - center.y;
            out.down = dy > world.player_speed;
            out.up = dy < -world.player_speed;
            out.fire = dy.abs() < target.size.y * 0.25 && world.time_ticks % 20 == 0;
        }
        return out;
    }

    // Junk ahead of the rocket that shares its rows
    let threat = world
        .entities
        .iter()
        .filter(|e| e.alive && e.kind == EntityKind::SpaceJunk)
        .filter(|e| {
            e.pos.x + e.size.x > player.pos.x && e.pos.x < player.pos.x + player.size.x + 250.0
        })
        .filter(|e| e.pos.y < player.pos.y + player.size.y && e.pos.y + e.size.y > player.pos.y)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(junk) = threat {
        let go_up = junk.center().y > center.y;
        let room_up = player.pos.y >= world.player_speed;
        let room_down = player.pos.y + player.size.y + world.player_speed <= world.viewport.height;
        out.up = (go_up && room_up) || (!go_up && !room_down);
        out.down = !out.up;
    }
    out
}
