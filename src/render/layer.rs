use super::backend::{draw_tile, DrawBackend};
use crate::animation::{Clock, FrameClock, Millis, SystemClock};
use crate::catalog::TilesetCatalog;
use crate::command::DrawOptions;
use crate::error::{Error, Result};
use crate::gid::{decode, GidFlags};
use crate::layer::Layer;
use crate::map::Map;
use crate::tileset::Tileset;
use macroquad::math::{Affine2, Vec2};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Outcome of drawing a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerStats {
    pub drawn: usize,
    /// Cells whose GID did not resolve to a loaded tileset.
    pub skipped: usize,
}

impl std::ops::AddAssign for LayerStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.skipped += rhs.skipped;
    }
}

/// Draws map layers and standalone tiles, playing tile animations.
///
/// Animated tiles share one frame cursor per (tileset, tile), so every cell
/// showing the same animated tile stays in step.
#[derive(Debug, Default)]
pub struct MapRenderer<C: Clock = SystemClock> {
    clock: C,
    /// tileset name -> local id -> cursor
    tile_clocks: HashMap<String, HashMap<u32, FrameClock>>,
    /// (map, layer) pairs already warned about unresolved cells
    warned: HashSet<(String, String)>,
}

impl MapRenderer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl<C: Clock> MapRenderer<C> {
    pub fn with_clock(clock: C) -> Self {
        MapRenderer {
            clock,
            tile_clocks: HashMap::new(),
            warned: HashSet::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The tile id to show for `local_id` now: its current animation frame
    /// when the tile is animated, else itself.
    pub fn active_tile(&mut self, tileset: &Tileset, local_id: u32) -> u32 {
        let now: Millis = self.clock.now_ms();
        let Some(anim) = tileset.tile_animation(local_id) else {
            return local_id;
        };
        let frames = anim.frames();
        // name key allocated once per tileset
        if !self.tile_clocks.contains_key(tileset.name.as_str()) {
            self.tile_clocks.insert(tileset.name.clone(), HashMap::new());
        }
        self.tile_clocks
            .get_mut(tileset.name.as_str())
            .and_then(|cursors| cursors.entry(local_id).or_default().tick(frames, now))
            .map_or(local_id, |i| frames[i].tile_id)
    }

    /// Draw one tile, animated if the tileset says so.
    pub fn draw_tile(
        &mut self,
        tileset: &Tileset,
        local_id: u32,
        opts: &DrawOptions,
        backend: &mut dyn DrawBackend,
    ) -> Result<()> {
        let id = self.active_tile(tileset, local_id);
        draw_tile(backend, tileset, id, opts)
    }

    pub fn draw_tile_with_source(
        &mut self,
        catalog: &TilesetCatalog,
        source: &Path,
        local_id: u32,
        opts: &DrawOptions,
        backend: &mut dyn DrawBackend,
    ) -> Result<()> {
        let tileset = catalog.by_source(source)?;
        self.draw_tile(tileset, local_id, opts, backend)
    }

    /// Draw every non-empty cell of `layer` in storage order.
    ///
    /// Cells whose GID does not resolve are skipped and counted; a map may be
    /// drawn before all of its tilesets are loaded.
    pub fn draw_layer(
        &mut self,
        map: &Map,
        layer: &Layer,
        catalog: &TilesetCatalog,
        opts: &DrawOptions,
        backend: &mut dyn DrawBackend,
    ) -> Result<LayerStats> {
        let mut stats = LayerStats::default();

        for (index, gid) in layer.cells() {
            let tile = match decode(gid, map, catalog) {
                Ok(Some(tile)) => tile,
                Ok(None) => continue,
                Err(Error::UnresolvedGidReference { .. }) => {
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let pos = layer.cell_position(index, map.tile_width, map.tile_height);
            let cell_opts = cell_options(opts, pos, tile.flags);
            self.draw_tile(tile.tileset, tile.local_id, &cell_opts, backend)?;
            stats.drawn += 1;
        }

        if stats.skipped > 0 {
            self.report_skipped(map, layer, stats.skipped);
        }
        Ok(stats)
    }

    /// Warn the first time a layer skips cells, then only at debug level.
    fn report_skipped(&mut self, map: &Map, layer: &Layer, skipped: usize) {
        if self.warned.insert((map.name.clone(), layer.name.clone())) {
            log::warn!(
                "map '{}' layer '{}': skipped {} cells with unresolved tiles",
                map.name,
                layer.name,
                skipped
            );
        } else {
            log::debug!("map '{}' layer '{}': skipped {} cells", map.name, layer.name, skipped);
        }
    }

    /// Whether a skip warning was already issued for this layer.
    pub fn has_warned(&self, map: &str, layer: &str) -> bool {
        self.warned.contains(&(map.to_owned(), layer.to_owned()))
    }

    pub fn draw_named_layer(
        &mut self,
        map: &Map,
        layer_name: &str,
        catalog: &TilesetCatalog,
        opts: &DrawOptions,
        backend: &mut dyn DrawBackend,
    ) -> Result<LayerStats> {
        let layer = map.layer(layer_name)?;
        self.draw_layer(map, layer, catalog, opts, backend)
    }

    /// Draw all visible layers, bottom to top.
    pub fn draw_map(
        &mut self,
        map: &Map,
        catalog: &TilesetCatalog,
        opts: &DrawOptions,
        backend: &mut dyn DrawBackend,
    ) -> Result<LayerStats> {
        let mut total = LayerStats::default();
        for layer in map.layers().iter().filter(|l| l.visible) {
            total += self.draw_layer(map, layer, catalog, opts, backend)?;
        }
        Ok(total)
    }
}

/// Placement and flips of one cell. The diagonal flag becomes a transpose
/// of the cell's axes, with the horizontal/vertical flips swapped so the
/// result matches diagonal-then-horizontal-then-vertical.
fn cell_options(opts: &DrawOptions, pos: Vec2, flags: GidFlags) -> DrawOptions {
    let mut transform = opts.transform * Affine2::from_translation(pos);
    let (mut flip_h, mut flip_v) = (flags.horizontal, flags.vertical);
    if flags.diagonal {
        transform = transform * Affine2::from_cols(Vec2::Y, Vec2::X, Vec2::ZERO);
        std::mem::swap(&mut flip_h, &mut flip_v);
    }
    DrawOptions {
        transform,
        flip_h,
        flip_v,
    }
}
