//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod motion;
pub mod schedule;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{ContactTracker, Rule};
pub use entity::{Entity, EntityId, EntityKind};
pub use geometry::{Polygon, Viewport, polygons_overlap};
pub use schedule::Scheduler;
pub use score::Score;
pub use state::{Action, GameEvent, World};
pub use tick::{TickInput, tick};
