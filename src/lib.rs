//! Tiled tilesets, maps and sprite animations, drawn through a pluggable backend.
//!
//! Load everything up front ([`Project::load`] or the [`loader`] functions),
//! then each frame ask a [`MapRenderer`], a sprite or an [`AnimationPlayer`]
//! to emit [`DrawCommand`]s into a [`DrawBackend`].

pub mod animation;
mod catalog;
mod command;
mod error;
mod geom;
pub mod gid;
mod layer;
pub mod loader;
mod map;
mod project;
pub mod render;
pub mod sprite;
mod tileset;

pub use animation::{AnimationPlayer, AnimationRegistry, Clock, ManualClock, SystemClock};
pub use catalog::{normalize_source, TilesetCatalog, TilesetGroup};
pub use command::{DrawCommand, DrawOptions, Flip};
pub use error::{Error, Result};
pub use geom::TileRect;
pub use gid::{decode, DecodedTile, Gid, GidFlags};
pub use layer::Layer;
pub use map::{Map, MapSet, MapTileset};
pub use project::{GroupManifest, Project, ProjectManifest};
pub use render::{CommandLog, DrawBackend, MacroquadBackend, MapRenderer, RecordedCommand};
pub use sprite::{ComplexSprite, CompoundSprite, SimpleSprite, SpriteAnimation, SpriteDrawer, TileRef};
pub use tileset::{Animation, Frame, Image, Object, ObjectGroup, ObjectShape, Tile, Tileset};
