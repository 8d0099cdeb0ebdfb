use crate::animation::FrameDuration;
use crate::error::{Error, Result};
use crate::geom::TileRect;
use macroquad::math::Vec2;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A grid-sliced image plus the metadata of the tiles that have any.
#[derive(Debug, Clone)]
pub struct Tileset {
    pub name: String,
    /// Path of the document this tileset was read from.
    pub source: PathBuf,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    /// 0 when the document omits it; see [`Tileset::columns`].
    pub columns: u32,
    pub spacing: u32,
    pub margin: u32,
    pub image: Image,
    /// Sparse, keyed by local tile id.
    pub tiles: BTreeMap<u32, Tile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    /// Resolved against the tileset's directory at load time.
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Tile {
    pub id: u32,
    pub tile_type: Option<String>,
    pub animation: Option<Animation>,
    pub object_groups: Vec<ObjectGroup>,
}

/// Tile-level animation: a non-empty frame sequence with positive durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<Frame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub tile_id: u32,
    pub duration_ms: u32,
}

impl FrameDuration for Frame {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

impl Animation {
    /// `label` only feeds error messages.
    pub fn new(label: &str, frames: Vec<Frame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::MissingAnimationFrames {
                name: label.to_owned(),
            });
        }
        if let Some(index) = frames.iter().position(|f| f.duration_ms == 0) {
            return Err(Error::ZeroFrameDuration {
                name: label.to_owned(),
                index,
            });
        }
        Ok(Animation { frames })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectGroup {
    pub name: String,
    pub objects: Vec<Object>,
}

#[derive(Debug, Clone)]
pub struct Object {
    pub id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shape: ObjectShape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectShape {
    Rectangle,
    Ellipse,
    Point,
    Polygon(Vec<Vec2>),
    Polyline(Vec<Vec2>),
}

impl Object {
    /// Bounding rectangle, truncated to whole pixels.
    pub fn rect(&self) -> TileRect {
        TileRect::new(
            self.x as i32,
            self.y as i32,
            (self.x + self.width) as i32,
            (self.y + self.height) as i32,
        )
    }
}

impl Tileset {
    /// Effective column count, derived from the image width when the
    /// document leaves `columns` at 0.
    pub fn columns(&self) -> Result<u32> {
        let cols = if self.columns > 0 {
            self.columns
        } else {
            self.image.width / (self.tile_width + self.spacing).max(1)
        };
        if cols == 0 {
            return Err(Error::ZeroColumns {
                tileset: self.name.clone(),
            });
        }
        Ok(cols)
    }

    fn check_bounds(&self, local_id: u32) -> Result<()> {
        if local_id >= self.tile_count {
            return Err(Error::TileIdOutOfBounds {
                tileset: self.name.clone(),
                id: local_id,
                tile_count: self.tile_count,
            });
        }
        Ok(())
    }

    /// Pixel rectangle of `local_id` inside the tileset image.
    pub fn tile_rect(&self, local_id: u32) -> Result<TileRect> {
        self.check_bounds(local_id)?;
        let cols = self.columns()?;
        let col = local_id % cols;
        let row = local_id / cols;
        let sx = self.margin + col * (self.tile_width + self.spacing);
        let sy = self.margin + row * (self.tile_height + self.spacing);
        Ok(TileRect::from_origin_size(
            sx as i32,
            sy as i32,
            self.tile_width as i32,
            self.tile_height as i32,
        ))
    }

    /// Rectangle of the object named `collider` on the tile, relative to the
    /// tile's top-left corner. Without such an object the whole tile collides.
    pub fn collision_rect(&self, local_id: u32, collider: &str) -> Result<TileRect> {
        self.check_bounds(local_id)?;
        let found = self.tiles.get(&local_id).and_then(|tile| {
            tile.object_groups
                .iter()
                .flat_map(|og| og.objects.iter())
                .find(|o| o.name == collider)
        });
        Ok(match found {
            Some(obj) => obj.rect(),
            None => self.full_tile_rect(),
        })
    }

    /// `[0, 0, tile_width, tile_height]`
    pub fn full_tile_rect(&self) -> TileRect {
        TileRect::from_origin_size(0, 0, self.tile_width as i32, self.tile_height as i32)
    }

    pub fn tile_by_id(&self, local_id: u32) -> Result<&Tile> {
        self.tiles.get(&local_id).ok_or_else(|| Error::TileNotFound {
            tileset: self.name.clone(),
            id: local_id,
        })
    }

    /// First tile, in id order, whose type tag equals `tile_type`.
    pub fn tile_by_type(&self, tile_type: &str) -> Result<&Tile> {
        self.tiles
            .values()
            .find(|t| t.tile_type.as_deref() == Some(tile_type))
            .ok_or_else(|| Error::TileTypeNotFound {
                tileset: self.name.clone(),
                tile_type: tile_type.to_owned(),
            })
    }

    pub fn tile_animation(&self, local_id: u32) -> Option<&Animation> {
        self.tiles.get(&local_id).and_then(|t| t.animation.as_ref())
    }

    pub fn has_animation(&self, local_id: u32) -> bool {
        self.tile_animation(local_id).is_some()
    }
}
