use super::{SpriteDrawer, TileRef};
use crate::catalog::TilesetCatalog;
use crate::command::DrawOptions;
use crate::error::{Error, Result};
use crate::geom::TileRect;
use crate::render::{draw_tile, DrawBackend};
use crate::tileset::Tileset;
use macroquad::math::vec2;
use std::collections::HashMap;
use std::sync::Arc;

/// A sprite whose poses span several tiles of one tileset, laid out
/// left-to-right, top-to-bottom, `columns` tiles per row.
#[derive(Debug, Clone)]
pub struct ComplexSprite {
    tileset: Arc<Tileset>,
    columns: u32,
    parts: HashMap<u32, Vec<u32>>,
}

impl ComplexSprite {
    /// `columns` is the pose layout width, independent of the tileset's own.
    pub fn new(tileset: Arc<Tileset>, columns: u32) -> Self {
        ComplexSprite {
            tileset,
            columns: columns.max(1),
            parts: HashMap::new(),
        }
    }

    pub fn from_catalog(catalog: &TilesetCatalog, name: &str, columns: u32) -> Result<Self> {
        Ok(Self::new(Arc::clone(catalog.by_name(name)?), columns))
    }

    /// Register (or replace) the tiles making up `pose`.
    pub fn add_part(&mut self, pose: u32, parts: Vec<u32>) {
        self.parts.insert(pose, parts);
    }

    pub fn parts(&self, pose: u32) -> Result<&[u32]> {
        self.parts
            .get(&pose)
            .map(Vec::as_slice)
            .ok_or(Error::NoPartsForPose { pose })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    fn pose(&self, id: &TileRef) -> Result<u32> {
        match id {
            TileRef::ById(pose) => Ok(*pose),
            TileRef::ByName(_) => Err(Error::InvalidIdVariant {
                sprite: "complex",
                id: id.to_string(),
            }),
        }
    }

    /// Pixel offset of part `index` inside the pose.
    fn part_offset(&self, index: usize) -> (i32, i32) {
        let cols = self.columns as usize;
        let col = (index % cols) as i32;
        let row = (index / cols) as i32;
        (
            col * self.tileset.tile_width as i32,
            row * self.tileset.tile_height as i32,
        )
    }
}

impl SpriteDrawer for ComplexSprite {
    fn draw(&self, id: &TileRef, opts: &DrawOptions, backend: &mut dyn DrawBackend) -> Result<()> {
        let parts = self.parts(self.pose(id)?)?;
        for (index, &part) in parts.iter().enumerate() {
            let (dx, dy) = self.part_offset(index);
            let part_opts = opts.translated(vec2(dx as f32, dy as f32));
            draw_tile(backend, &self.tileset, part, &part_opts)?;
        }
        Ok(())
    }

    fn collision_rect(&self, id: &TileRef, collider: &str) -> Result<TileRect> {
        let parts = self.parts(self.pose(id)?)?;
        let mut acc = TileRect::EMPTY;
        for (index, &part) in parts.iter().enumerate() {
            let (dx, dy) = self.part_offset(index);
            acc = acc.union(self.tileset.collision_rect(part, collider)?.translate(dx, dy));
        }
        Ok(acc)
    }
}
