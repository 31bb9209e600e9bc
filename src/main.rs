//! Space Junk entry point
//!
//! Runs the game headlessly: loading scene, then the main scene for the
//! configured number of frames. Rendering is left to whatever consumes the
//! frame snapshot.

fn main() {
    use space_junk::assets::{AssetLoader, DirectoryLoader, ManifestLoader};
    use space_junk::sim::{EntityKind, GameEvent, TickInput};
    use space_junk::{Game, SceneKind, Settings};

    env_logger::init();
    log::info!("Space Junk (native) starting...");

    let settings = Settings::load();
    log::info!(
        "Variant {}, seed {}, {} frames",
        settings.variant.as_str(),
        settings.seed,
        settings.frames
    );

    let loader: Box<dyn AssetLoader> = match &settings.asset_dir {
        Some(dir) => Box::new(DirectoryLoader::new(dir)),
        None => Box::new(ManifestLoader),
    };
    let input = TickInput {
        idle_mode: settings.autopilot,
        ..Default::default()
    };
    let frames = settings.frames;
    let dump = settings.dump_snapshot;
    let mut game = Game::new(settings, loader);

    for _ in 0..frames {
        game.frame(&input);
        for event in game.drain_events() {
            match event {
                GameEvent::Destroyed {
                    kind: EntityKind::Player,
                    ..
                } => log::info!("Player destroyed at frame {}", game.frames()),
                GameEvent::ScoreChanged { value } => log::debug!("Score: {}", value),
                GameEvent::Faded { id, .. } => log::trace!("{:?} faded", id),
                _ => {}
            }
        }
    }

    match game.scene_kind() {
        SceneKind::Loading => {
            let text = game.loading().map(|l| l.text().to_string()).unwrap_or_default();
            log::warn!("Still on the loading scene: {}", text);
        }
        SceneKind::Main => {
            if let Some(world) = game.world() {
                log::info!(
                    "{} after {} ticks ({} entities)",
                    world.score.text(),
                    world.time_ticks,
                    world.entities.len()
                );
            }
        }
    }

    if dump {
        match game.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Snapshot failed: {}", e),
        }
    }
}
