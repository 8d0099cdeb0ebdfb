//! A project manifest names every document to load; [`Project`] holds the
//! indexes built from them.

use crate::animation::AnimationRegistry;
use crate::catalog::TilesetCatalog;
use crate::error::Result;
use crate::loader;
use crate::map::MapSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct GroupManifest {
    pub name: String,
    /// Tileset names, in draw order.
    pub tilesets: Vec<String>,
}

/// Paths are relative to the manifest's directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectManifest {
    pub tilesets: Vec<PathBuf>,
    pub tileset_groups: Vec<GroupManifest>,
    pub animations: Vec<PathBuf>,
    pub maps: Vec<PathBuf>,
}

impl ProjectManifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        loader::from_json(&loader::read_text(path)?, path)
    }
}

/// Everything a game needs at draw time, loaded up front.
#[derive(Debug, Default)]
pub struct Project {
    pub catalog: TilesetCatalog,
    pub animations: AnimationRegistry,
    pub maps: MapSet,
}

impl Project {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let manifest = ProjectManifest::load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_manifest(&manifest, base)
    }

    /// Load tilesets first, then groups, animations and maps.
    ///
    /// Groups declared in animation descriptors are added to the catalog as
    /// well, so compound sprites can use them.
    pub fn from_manifest(manifest: &ProjectManifest, base_dir: &Path) -> Result<Self> {
        let mut project = Project::default();

        for rel in &manifest.tilesets {
            let tileset = loader::load_tileset(base_dir.join(rel))?;
            project.catalog.register(tileset);
        }

        for group in &manifest.tileset_groups {
            project
                .animations
                .add_tileset_group(group.name.clone(), group.tilesets.clone());
        }

        for rel in &manifest.animations {
            loader::load_animations(base_dir.join(rel), &mut project.animations)?;
        }

        for (name, members) in project.animations.tileset_groups() {
            project.catalog.add_group(name, members)?;
        }

        for rel in &manifest.maps {
            project.maps.insert(loader::load_map(base_dir.join(rel))?);
        }

        log::info!(
            "project loaded from {}: {} tilesets, {} animations, {} maps",
            base_dir.display(),
            project.catalog.len(),
            project.animations.len(),
            project.maps.len()
        );
        Ok(project)
    }
}
