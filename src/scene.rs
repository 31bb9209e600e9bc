//! Scene flow: loading → main
//!
//! The loading scene pulls every manifest image through the [`AssetLoader`],
//! one per frame, then waits a fixed settle delay before building the main
//! scene's world. A load failure parks the game on the loading scene for good.

use crate::assets::{AssetLoadError, AssetLoader, MANIFEST, SpriteRegistry};
use crate::consts::LOADING_SETTLE_TICKS;
use crate::settings::Settings;
use crate::sim::{GameEvent, Scheduler, TickInput, World, tick};
use crate::snapshot::Snapshot;

/// Which scene is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Loading,
    Main,
}

impl SceneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Loading => "loading",
            SceneKind::Main => "main",
        }
    }
}

/// Progress of the loading scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    InProgress,
    Complete,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SceneAction {
    EnterMain,
}

/// Loading scene state
#[derive(Debug)]
pub struct LoadingScene {
    text: String,
    status: LoadStatus,
    loaded: Vec<&'static str>,
    clock: u64,
    schedule: Scheduler<SceneAction>,
    error: Option<AssetLoadError>,
}

impl Default for LoadingScene {
    fn default() -> Self {
        Self {
            text: "loading...".to_string(),
            status: LoadStatus::InProgress,
            loaded: Vec::new(),
            clock: 0,
            schedule: Scheduler::new(),
            error: None,
        }
    }
}

impl LoadingScene {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// The load failure, if one happened
    pub fn error(&self) -> Option<&AssetLoadError> {
        self.error.as_ref()
    }

    /// One frame of loading. Returns true when the main scene should start.
    fn frame(&mut self, loader: &mut dyn AssetLoader, sprites: &mut SpriteRegistry) -> bool {
        self.clock += 1;

        if self.status == LoadStatus::InProgress {
            let file = MANIFEST[self.loaded.len()];
            match loader.load(file) {
                Ok(()) => {
                    self.loaded.push(file);
                    let percent = self.loaded.len() * 100 / MANIFEST.len();
                    self.text = format!("loading... {}% complete", percent);
                    if self.loaded.len() == MANIFEST.len() {
                        sprites.register_loaded(&self.loaded);
                        self.status = LoadStatus::Complete;
                        self.schedule.schedule_at(
                            self.clock + LOADING_SETTLE_TICKS,
                            None,
                            SceneAction::EnterMain,
                        );
                        log::info!("Assets loaded ({} sprites)", sprites.len());
                    }
                }
                Err(e) => {
                    log::error!("could not load assets: {}", e);
                    self.text = "could not load assets".to_string();
                    self.status = LoadStatus::Failed;
                    self.error = Some(e);
                }
            }
        }

        self.schedule
            .drain_due(self.clock)
            .into_iter()
            .any(|a| a == SceneAction::EnterMain)
    }
}

enum Scene {
    Loading(LoadingScene),
    Main(Box<World>),
}

/// The whole game: scene flow around the simulation
pub struct Game {
    settings: Settings,
    loader: Box<dyn AssetLoader>,
    sprites: SpriteRegistry,
    scene: Scene,
    frames: u64,
}

impl Game {
    pub fn new(settings: Settings, loader: Box<dyn AssetLoader>) -> Self {
        log::info!("Loading scene ({} variant)", settings.variant.as_str());
        Self {
            settings,
            loader,
            sprites: SpriteRegistry::default(),
            scene: Scene::Loading(LoadingScene::default()),
            frames: 0,
        }
    }

    /// Advance one frame of whichever scene is active
    pub fn frame(&mut self, input: &TickInput) {
        self.frames += 1;
        let enter_main = match &mut self.scene {
            Scene::Loading(loading) => loading.frame(self.loader.as_mut(), &mut self.sprites),
            Scene::Main(world) => {
                tick(world, input);
                false
            }
        };
        if enter_main {
            self.enter_main();
        }
    }

    /// Replace the active scene with a freshly populated main scene
    pub fn enter_main(&mut self) {
        let mut world = World::new(
            self.settings.variant.config(),
            self.settings.viewport,
            self.settings.seed,
        );
        world.player_speed = self.settings.player_speed;
        world.spawn_initial_set();
        log::info!("Entering main scene after {} frames", self.frames);
        self.scene = Scene::Main(Box::new(world));
    }

    pub fn scene_kind(&self) -> SceneKind {
        match self.scene {
            Scene::Loading(_) => SceneKind::Loading,
            Scene::Main(_) => SceneKind::Main,
        }
    }

    pub fn loading(&self) -> Option<&LoadingScene> {
        match &self.scene {
            Scene::Loading(loading) => Some(loading),
            Scene::Main(_) => None,
        }
    }

    pub fn world(&self) -> Option<&World> {
        match &self.scene {
            Scene::Main(world) => Some(world.as_ref()),
            Scene::Loading(_) => None,
        }
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        match &mut self.scene {
            Scene::Main(world) => Some(world.as_mut()),
            Scene::Loading(_) => None,
        }
    }

    pub fn sprites(&self) -> &SpriteRegistry {
        &self.sprites
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Frames advanced since the game was created
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Events from the last main-scene tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world_mut().map(World::drain_events).unwrap_or_default()
    }

    pub fn snapshot(&self) -> Snapshot {
        match &self.scene {
            Scene::Loading(loading) => Snapshot::loading(self.frames, loading.text()),
            Scene::Main(world) => Snapshot::main(self.frames, world),
        }
    }
}
