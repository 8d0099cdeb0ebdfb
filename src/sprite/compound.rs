use super::simple::{resolve_id, TileCursor};
use super::{SpriteDrawer, TileRef};
use crate::animation::Clock;
use crate::catalog::TilesetCatalog;
use crate::command::DrawOptions;
use crate::error::Result;
use crate::geom::TileRect;
use crate::render::{draw_tile, DrawBackend};
use crate::tileset::Tileset;
use std::sync::Arc;

/// Several tilesets drawn at the same id and place, first to last
/// (body, then clothing, then hair, ...).
#[derive(Debug, Clone)]
pub struct CompoundSprite {
    tilesets: Vec<Arc<Tileset>>,
    /// One per tileset; layers may animate at different rates.
    cursors: Vec<TileCursor>,
}

impl CompoundSprite {
    pub fn new(tilesets: Vec<Arc<Tileset>>) -> Self {
        let cursors = vec![TileCursor::default(); tilesets.len()];
        CompoundSprite { tilesets, cursors }
    }

    /// Every name must be registered.
    pub fn from_names<S: AsRef<str>>(catalog: &TilesetCatalog, names: &[S]) -> Result<Self> {
        let tilesets = names
            .iter()
            .map(|n| catalog.by_name(n.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(tilesets))
    }

    pub fn from_group(catalog: &TilesetCatalog, group: &str) -> Result<Self> {
        Ok(Self::new(catalog.group(group)?.to_vec()))
    }

    pub fn tilesets(&self) -> &[Arc<Tileset>] {
        &self.tilesets
    }

    /// Draw every layer at the current frame of its own tile animation.
    /// Fails with [`Error::MissingAnimationFrames`] at the first layer whose
    /// tile is not animated.
    ///
    /// [`Error::MissingAnimationFrames`]: crate::Error::MissingAnimationFrames
    pub fn draw_animated(
        &mut self,
        id: &TileRef,
        opts: &DrawOptions,
        clock: &dyn Clock,
        backend: &mut dyn DrawBackend,
    ) -> Result<()> {
        let now = clock.now_ms();
        for (ts, cursor) in self.tilesets.iter().zip(&mut self.cursors) {
            let local = resolve_id(ts, id)?;
            let frame = cursor.frame(ts, local, now)?;
            draw_tile(backend, ts, frame, opts)?;
        }
        Ok(())
    }
}

impl SpriteDrawer for CompoundSprite {
    fn draw(&self, id: &TileRef, opts: &DrawOptions, backend: &mut dyn DrawBackend) -> Result<()> {
        for ts in &self.tilesets {
            let local = resolve_id(ts, id)?;
            draw_tile(backend, ts, local, opts)?;
        }
        Ok(())
    }

    /// Union over the layers.
    fn collision_rect(&self, id: &TileRef, collider: &str) -> Result<TileRect> {
        let mut acc = TileRect::EMPTY;
        for ts in &self.tilesets {
            let local = resolve_id(ts, id)?;
            acc = acc.union(ts.collision_rect(local, collider)?);
        }
        Ok(acc)
    }
}
