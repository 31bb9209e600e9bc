//! Sprite manifest and asset loading
//!
//! The simulation only needs sprite identifiers and their default sizes.
//! Decoding and drawing the images belongs to whatever renderer consumes
//! the [`crate::snapshot::Snapshot`]; the loading scene just has to know
//! whether every file resolved.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Named sprite regions used by entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sprite {
    Rocket,
    Asteroid,
    Fuel,
    Satellite,
    Explosion,
    Debris,
    Note,
}

impl Sprite {
    pub const ALL: [Sprite; 7] = [
        Sprite::Rocket,
        Sprite::Asteroid,
        Sprite::Fuel,
        Sprite::Satellite,
        Sprite::Explosion,
        Sprite::Debris,
        Sprite::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sprite::Rocket => "rocket",
            Sprite::Asteroid => "asteroid",
            Sprite::Fuel => "fuel",
            Sprite::Satellite => "satellite",
            Sprite::Explosion => "explosion",
            Sprite::Debris => "debris",
            Sprite::Note => "note",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Sprite::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Image file holding this sprite
    pub fn file(&self) -> &'static str {
        match self {
            Sprite::Rocket => "img/rocket.png",
            Sprite::Asteroid => "img/rock.png",
            Sprite::Fuel => "img/atom.png",
            Sprite::Satellite => "img/satellite.png",
            Sprite::Explosion => "img/explode.png",
            Sprite::Debris => "img/debris.png",
            Sprite::Note => "img/note.png",
        }
    }

    /// Sub-rectangle [x, y, w, h] within the image
    pub fn region(&self) -> [u32; 4] {
        match self {
            Sprite::Rocket => [0, 0, 198, 96],
            Sprite::Asteroid => [0, 0, 198, 187],
            Sprite::Fuel => [0, 0, 198, 158],
            Sprite::Satellite => [0, 0, 198, 176],
            Sprite::Explosion => [0, 0, 180, 180],
            Sprite::Debris => [0, 0, 64, 64],
            Sprite::Note => [0, 0, 48, 48],
        }
    }

    /// Default entity size for this sprite
    pub fn size(&self) -> Vec2 {
        let [_, _, w, h] = self.region();
        Vec2::new(w as f32, h as f32)
    }
}

/// Image files the loading scene must resolve, in load order
pub const MANIFEST: [&str; 7] = [
    "img/atom.png",
    "img/rock.png",
    "img/rocket.png",
    "img/satellite.png",
    "img/explode.png",
    "img/debris.png",
    "img/note.png",
];

/// Sprites registered once the manifest has loaded
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    registered: Vec<Sprite>,
}

impl SpriteRegistry {
    /// Register every sprite whose image is in `loaded`
    pub fn register_loaded(&mut self, loaded: &[&str]) {
        for sprite in Sprite::ALL {
            if loaded.contains(&sprite.file()) && !self.registered.contains(&sprite) {
                self.registered.push(sprite);
            }
        }
    }

    pub fn is_registered(&self, sprite: Sprite) -> bool {
        self.registered.contains(&sprite)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

/// Failure to resolve an image from the manifest
#[derive(Debug)]
pub enum AssetLoadError {
    Missing { path: PathBuf },
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for AssetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetLoadError::Missing { path } => {
                write!(f, "asset not found: {}", path.display())
            }
            AssetLoadError::Io { path, source } => {
                write!(f, "failed to read asset {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for AssetLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetLoadError::Missing { .. } => None,
            AssetLoadError::Io { source, .. } => Some(source),
        }
    }
}

/// Asset pipeline seam; the loading scene calls this once per manifest file
pub trait AssetLoader {
    fn load(&mut self, file: &str) -> Result<(), AssetLoadError>;
}

/// Accepts every file; images are presentation data the simulation never reads
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestLoader;

impl AssetLoader for ManifestLoader {
    fn load(&mut self, _file: &str) -> Result<(), AssetLoadError> {
        Ok(())
    }
}

/// Resolves each file under a root directory
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl AssetLoader for DirectoryLoader {
    fn load(&mut self, file: &str) -> Result<(), AssetLoadError> {
        let path = self.root.join(file);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(AssetLoadError::Missing { path }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetLoadError::Missing { path })
            }
            Err(source) => Err(AssetLoadError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_names_round_trip() {
        for sprite in Sprite::ALL {
            assert_eq!(Sprite::from_name(sprite.as_str()), Some(sprite));
        }
        assert_eq!(Sprite::from_name("banana"), None);
    }

    #[test]
    fn test_every_sprite_file_is_in_manifest() {
        for sprite in Sprite::ALL {
            assert!(MANIFEST.contains(&sprite.file()), "{:?}", sprite);
        }
    }

    #[test]
    fn test_registry_only_registers_loaded() {
        let mut registry = SpriteRegistry::default();
        registry.register_loaded(&["img/rock.png", "img/rocket.png"]);
        assert!(registry.is_registered(Sprite::Asteroid));
        assert!(registry.is_registered(Sprite::Rocket));
        assert!(!registry.is_registered(Sprite::Explosion));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_directory_loader_missing_file() {
        let mut loader = DirectoryLoader::new("/definitely/not/a/real/dir");
        let err = loader.load("img/rock.png").unwrap_err();
        assert!(matches!(err, AssetLoadError::Missing { .. }));
        assert!(err.to_string().contains("img/rock.png"));
    }
}
