use crate::error::{Error, Result};
use crate::layer::Layer;
use std::collections::HashMap;
use std::path::PathBuf;

/// A tileset referenced by a map, owning global ids from `first_gid` on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTileset {
    pub first_gid: u32,
    /// Tileset document path, resolved against the map's directory.
    pub source: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Map {
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    tilesets: Vec<MapTileset>, // sorted by first_gid
    layers: Vec<Layer>,        // draw order: array order
}

impl Map {
    pub fn new(
        name: impl Into<String>,
        tile_width: u32,
        tile_height: u32,
        mut tilesets: Vec<MapTileset>,
        layers: Vec<Layer>,
    ) -> Self {
        tilesets.sort_unstable_by_key(|t| t.first_gid);
        Map {
            name: name.into(),
            tile_width,
            tile_height,
            tilesets,
            layers,
        }
    }

    pub fn tilesets(&self) -> &[MapTileset] {
        &self.tilesets
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Result<&Layer> {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| Error::LayerNotFound {
                map: self.name.clone(),
                layer: name.to_owned(),
            })
    }

    /// The reference with the greatest `first_gid <= global_id`.
    pub fn tileset_for_gid(&self, global_id: u32) -> Option<&MapTileset> {
        let idx = self.tilesets.partition_point(|t| t.first_gid <= global_id);
        idx.checked_sub(1).map(|i| &self.tilesets[i])
    }
}

/// Loaded maps by name.
#[derive(Debug, Default)]
pub struct MapSet {
    maps: HashMap<String, Map>,
}

impl MapSet {
    pub fn insert(&mut self, map: Map) {
        log::debug!("registered map '{}' ({} layers)", map.name, map.layers.len());
        self.maps.insert(map.name.clone(), map);
    }

    pub fn get(&self, name: &str) -> Result<&Map> {
        self.maps
            .get(name)
            .ok_or_else(|| Error::MapNotFound(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
