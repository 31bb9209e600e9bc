//! Frame snapshot for presentation
//!
//! Everything a renderer needs to draw one frame, serializable to JSON.

use serde::{Deserialize, Serialize};

use crate::assets::Sprite;
use crate::scene::SceneKind;
use crate::sim::{EntityId, EntityKind, World};

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub sprite: Option<Sprite>,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub rotation: f32,
    pub alpha: f32,
    /// Text content for text entities (the score HUD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A full frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub scene: String,
    pub frame: u64,
    /// Loading scene status line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    pub entities: Vec<EntityView>,
}

impl Snapshot {
    pub fn loading(frame: u64, text: &str) -> Self {
        Self {
            scene: SceneKind::Loading.as_str().to_string(),
            frame,
            status_text: Some(text.to_string()),
            score: None,
            entities: Vec::new(),
        }
    }

    pub fn main(frame: u64, world: &World) -> Self {
        let entities = world
            .entities
            .iter()
            .filter(|e| e.alive)
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                sprite: e.sprite,
                x: e.pos.x,
                y: e.pos.y,
                w: e.size.x,
                h: e.size.y,
                rotation: e.rotation,
                alpha: e.alpha,
                text: (e.kind == EntityKind::Score).then(|| world.score.text().to_string()),
            })
            .collect();

        Self {
            scene: SceneKind::Main.as_str().to_string(),
            frame,
            status_text: None,
            score: Some(world.score.value()),
            entities,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;
    use crate::tuning::GameVariant;

    #[test]
    fn test_main_snapshot_has_score_text() {
        let world = World::with_initial_set(GameVariant::Classic.config(), Viewport::default(), 1);
        let snap = Snapshot::main(10, &world);
        assert_eq!(snap.entities.len(), 5);
        let hud = snap
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Score)
            .unwrap();
        assert_eq!(hud.text.as_deref(), Some("Score: 100"));
        assert_eq!((hud.x, hud.y, hud.w, hud.h), (900.0, 0.0, 100.0, 20.0));
        assert!(snap.entities.iter().all(|e| e.kind == EntityKind::Score || e.text.is_none()));
    }

    #[test]
    fn test_snapshot_json() {
        let snap = Snapshot::loading(3, "loading... 42% complete");
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"scene\": \"loading\""));
        assert!(json.contains("42% complete"));
        assert!(!json.contains("\"score\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
