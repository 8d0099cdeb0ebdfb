use super::{SpriteDrawer, TileRef};
use crate::animation::{Clock, FrameClock, Millis};
use crate::catalog::TilesetCatalog;
use crate::command::DrawOptions;
use crate::error::{Error, Result};
use crate::geom::TileRect;
use crate::render::{draw_tile, DrawBackend};
use crate::tileset::Tileset;
use std::sync::Arc;

/// A sprite cut from a single tileset.
#[derive(Debug, Clone)]
pub struct SimpleSprite {
    tileset: Arc<Tileset>,
    cursor: TileCursor,
}

impl SimpleSprite {
    pub fn new(tileset: Arc<Tileset>) -> Self {
        SimpleSprite {
            tileset,
            cursor: TileCursor::default(),
        }
    }

    pub fn from_catalog(catalog: &TilesetCatalog, name: &str) -> Result<Self> {
        Ok(Self::new(Arc::clone(catalog.by_name(name)?)))
    }

    pub fn tileset(&self) -> &Arc<Tileset> {
        &self.tileset
    }

    /// Draw the current frame of the tile's own animation.
    ///
    /// Fails with [`Error::MissingAnimationFrames`] when the tile is not animated.
    pub fn draw_animated(
        &mut self,
        id: &TileRef,
        opts: &DrawOptions,
        clock: &dyn Clock,
        backend: &mut dyn DrawBackend,
    ) -> Result<()> {
        let local = resolve_id(&self.tileset, id)?;
        let frame = self.cursor.frame(&self.tileset, local, clock.now_ms())?;
        draw_tile(backend, &self.tileset, frame, opts)
    }
}

/// Local id behind `id`: itself, or the first tile tagged with that type.
pub(crate) fn resolve_id(tileset: &Tileset, id: &TileRef) -> Result<u32> {
    match id {
        TileRef::ById(local) => Ok(*local),
        TileRef::ByName(name) => Ok(tileset.tile_by_type(name)?.id),
    }
}

/// Playback position in one tile's animation. Starts over when asked for a
/// different tile.
#[derive(Debug, Clone, Default)]
pub(crate) struct TileCursor {
    tile: Option<u32>,
    clock: FrameClock,
}

impl TileCursor {
    /// Tile id of the active frame of `local_id`'s animation at `now`.
    pub(crate) fn frame(&mut self, tileset: &Tileset, local_id: u32, now: Millis) -> Result<u32> {
        let no_frames = || Error::MissingAnimationFrames {
            name: format!("{}#{}", tileset.name, local_id),
        };
        let frames = tileset
            .tile_animation(local_id)
            .ok_or_else(no_frames)?
            .frames();

        if self.tile != Some(local_id) {
            self.tile = Some(local_id);
            self.clock.reset();
        }
        let index = self.clock.tick(frames, now).ok_or_else(no_frames)?;
        Ok(frames[index].tile_id)
    }
}

impl SpriteDrawer for SimpleSprite {
    fn draw(&self, id: &TileRef, opts: &DrawOptions, backend: &mut dyn DrawBackend) -> Result<()> {
        let local = resolve_id(&self.tileset, id)?;
        draw_tile(backend, &self.tileset, local, opts)
    }

    fn collision_rect(&self, id: &TileRef, collider: &str) -> Result<TileRect> {
        let local = resolve_id(&self.tileset, id)?;
        self.tileset.collision_rect(local, collider)
    }
}
