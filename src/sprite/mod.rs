//! Sprites drawn from one tileset, from stacked tilesets, or from multi-tile poses.

mod animation;
mod complex;
mod compound;
mod simple;

pub use animation::{SpriteAnimation, SpriteFrame};
pub use complex::ComplexSprite;
pub use compound::CompoundSprite;
pub use simple::SimpleSprite;

use crate::command::DrawOptions;
use crate::error::Result;
use crate::geom::TileRect;
use crate::render::DrawBackend;
use std::fmt;

/// How a draw call names its tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TileRef {
    /// Local tile id (or pose id for complex sprites).
    ById(u32),
    /// A tile's type tag.
    ByName(String),
}

impl From<u32> for TileRef {
    fn from(id: u32) -> Self {
        TileRef::ById(id)
    }
}

impl From<&str> for TileRef {
    fn from(name: &str) -> Self {
        TileRef::ByName(name.to_owned())
    }
}

impl From<String> for TileRef {
    fn from(name: String) -> Self {
        TileRef::ByName(name)
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileRef::ById(id) => write!(f, "#{id}"),
            TileRef::ByName(name) => write!(f, "'{name}'"),
        }
    }
}

/// Common surface of the sprite kinds.
pub trait SpriteDrawer {
    fn draw(&self, id: &TileRef, opts: &DrawOptions, backend: &mut dyn DrawBackend) -> Result<()>;

    /// Collider of `id` in sprite-local pixels; the whole tile when the tile
    /// names no such collider.
    fn collision_rect(&self, id: &TileRef, collider: &str) -> Result<TileRect>;
}
