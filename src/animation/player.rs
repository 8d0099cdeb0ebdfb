use super::clock::Clock;
use super::collider::ColliderCache;
use super::registry::AnimationRegistry;
use super::source::{AnimationFrame, FramePart, SourceAnimation, NO_PART};
use super::state::FrameClock;
use crate::catalog::TilesetCatalog;
use crate::command::DrawOptions;
use crate::error::{Error, Result};
use crate::geom::TileRect;
use crate::render::{draw_tile, DrawBackend};
use crate::tileset::Tileset;
use macroquad::math::vec2;
use std::sync::Arc;

/// One viewer's playback of a class/action animation.
///
/// Holds its own frame cursor; two characters playing the same animation
/// should each have a player.
#[derive(Debug)]
pub struct AnimationPlayer {
    animation: Arc<SourceAnimation>,
    tilesets: Vec<Arc<Tileset>>,
    clock: FrameClock,
    colliders: ColliderCache,
}

impl AnimationPlayer {
    /// Resolve the animation's tilesets by name.
    pub fn new(animation: Arc<SourceAnimation>, catalog: &TilesetCatalog) -> Result<Self> {
        let tilesets = animation
            .tilesets()
            .iter()
            .map(|name| catalog.by_name(name).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(AnimationPlayer {
            animation,
            tilesets,
            clock: FrameClock::new(),
            colliders: ColliderCache::default(),
        })
    }

    pub fn from_registry(
        registry: &AnimationRegistry,
        catalog: &TilesetCatalog,
        class: &str,
        action: &str,
    ) -> Result<Self> {
        let animation = Arc::clone(registry.get(class, action)?);
        Self::new(animation, catalog)
    }

    pub fn animation(&self) -> &SourceAnimation {
        &self.animation
    }

    pub fn frame_index(&self) -> Option<usize> {
        self.clock.current()
    }

    /// Advance (at most one frame) and return the active frame.
    pub fn tick(&mut self, clock: &dyn Clock) -> Result<&AnimationFrame> {
        let idx = self.advance(clock)?;
        Ok(&self.animation.frames()[idx])
    }

    fn advance(&mut self, clock: &dyn Clock) -> Result<usize> {
        self.clock
            .tick(self.animation.frames(), clock.now_ms())
            .ok_or_else(|| Error::MissingAnimationFrames {
                name: self.animation.key().to_string(),
            })
    }

    /// Draw every part of the active frame.
    pub fn draw(
        &mut self,
        opts: &DrawOptions,
        clock: &dyn Clock,
        backend: &mut dyn DrawBackend,
    ) -> Result<()> {
        let idx = self.advance(clock)?;
        let frame = &self.animation.frames()[idx];

        for part in &frame.parts {
            let Some(tile_id) = part_tile_id(part)? else {
                continue;
            };
            let part_opts = opts
                .with_flip(part.flip)
                .translated(vec2(part.x_offset as f32, part.y_offset as f32));
            for ts in self.part_tilesets(part) {
                draw_tile(backend, ts, tile_id, &part_opts)?;
            }
        }
        Ok(())
    }

    /// Union of `collider` over every part of every frame, offsets applied.
    /// Computed on first request per collider name.
    pub fn collision_rect(&self, collider: &str) -> Result<TileRect> {
        self.colliders.get_or_compute(collider, || {
            let mut acc = TileRect::EMPTY;
            for frame in self.animation.frames() {
                for part in &frame.parts {
                    let Some(tile_id) = part_tile_id(part)? else {
                        continue;
                    };
                    for ts in self.part_tilesets(part) {
                        let rect = ts
                            .collision_rect(tile_id, collider)?
                            .translate(part.x_offset, part.y_offset);
                        acc = acc.union(rect);
                    }
                }
            }
            Ok(acc)
        })
    }

    fn part_tilesets(&self, part: &FramePart) -> &[Arc<Tileset>] {
        match part.tileset {
            Some(i) => self.tilesets.get(i..=i).unwrap_or(&[]),
            None => &self.tilesets,
        }
    }
}

/// `None` for the "no part" sentinel.
fn part_tile_id(part: &FramePart) -> Result<Option<u32>> {
    if part.tile_id == NO_PART {
        return Ok(None);
    }
    u32::try_from(part.tile_id)
        .map(Some)
        .map_err(|_| Error::InvalidIdVariant {
            sprite: "animation",
            id: part.tile_id.to_string(),
        })
}
