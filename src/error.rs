use std::io;
use std::path::PathBuf;

/// Error type for loading, looking up and drawing tiles, sprites and animations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// JSON parse error
    #[error("JSON parse error in {path}: {source}")]
    Json {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// No tileset registered under this name
    #[error("tileset '{0}' not found")]
    TilesetNotFound(String),
    /// No tileset registered under this source path
    #[error("tileset with source '{0}' not found")]
    TilesetSourceNotFound(PathBuf),
    /// No tileset group registered under this name
    #[error("tileset group '{0}' not found")]
    TilesetGroupNotFound(String),
    /// No animation registered for the class/action pair
    #[error("animation not found for class '{class}' action '{action}'")]
    AnimationNotFound {
        /// Animation class
        class: String,
        /// Animation action
        action: String,
    },
    /// No tile in the tileset carries this type tag
    #[error("no tile with type '{tile_type}' in tileset '{tileset}'")]
    TileTypeNotFound {
        /// Tileset searched
        tileset: String,
        /// Requested type tag
        tile_type: String,
    },
    /// The tile id has no metadata record in the tileset
    #[error("tile {id} has no metadata in tileset '{tileset}'")]
    TileNotFound {
        /// Tileset searched
        tileset: String,
        /// Local tile id
        id: u32,
    },
    /// No layer with this name in the map
    #[error("layer '{layer}' not found in map '{map}'")]
    LayerNotFound {
        /// Map searched
        map: String,
        /// Requested layer
        layer: String,
    },
    /// No map registered under this name
    #[error("map '{0}' not found")]
    MapNotFound(String),

    /// Local tile id is not below the tileset's tile count
    #[error("tile id {id} out of bounds for tileset '{tileset}' ({tile_count} tiles)")]
    TileIdOutOfBounds {
        /// Tileset addressed
        tileset: String,
        /// Offending local id
        id: u32,
        /// Number of tiles in the tileset
        tile_count: u32,
    },
    /// A GID whose global id is not covered by any of the map's tilesets
    #[error("gid {gid:#x} does not resolve to any loaded tileset")]
    UnresolvedGidReference {
        /// Raw GID, flags included
        gid: u32,
    },

    /// An animation without any frame
    #[error("animation '{name}' has no frames")]
    MissingAnimationFrames {
        /// Animation label
        name: String,
    },
    /// Timed animation with different numbers of ids and durations
    #[error("frame and timing lists must be the same length ({frames} ids, {durations} durations)")]
    FrameTimingMismatch {
        /// Number of frame ids
        frames: usize,
        /// Number of durations
        durations: usize,
    },
    /// A frame whose duration is zero
    #[error("frame {index} of animation '{name}' has a zero duration")]
    ZeroFrameDuration {
        /// Animation label
        name: String,
        /// Frame position
        index: usize,
    },
    /// An animation descriptor that does not declare exactly one shape
    #[error("animation '{class}/{action}' must declare exactly one of simple/timed/complex, found {found}")]
    AnimationShape {
        /// Animation class
        class: String,
        /// Animation action
        action: String,
        /// Number of shapes present
        found: usize,
    },
    /// A complex part addressing a tileset outside the animation's tileset list
    #[error("animation '{class}/{action}' references tileset #{index} but only {available} are declared")]
    TilesetIndexOutOfRange {
        /// Animation class
        class: String,
        /// Animation action
        action: String,
        /// 1-based index from the descriptor
        index: usize,
        /// Number of tilesets available
        available: usize,
    },
    /// A class/action pair registered twice
    #[error("animation for class '{class}' action '{action}' is already registered")]
    DuplicateAnimation {
        /// Animation class
        class: String,
        /// Animation action
        action: String,
    },

    /// A draw call given an id shape the sprite does not support
    #[error("{sprite} sprite cannot be drawn with id {id}")]
    InvalidIdVariant {
        /// Sprite kind
        sprite: &'static str,
        /// Rendered id
        id: String,
    },
    /// A complex sprite pose without registered parts
    #[error("no parts registered for pose {pose}")]
    NoPartsForPose {
        /// Pose id
        pose: u32,
    },

    /// A layer's data length does not match width * height
    #[error("invalid layer size for layer '{layer}': expected {expected} cells, found {actual}")]
    InvalidLayerSize {
        /// Layer name
        layer: String,
        /// width * height
        expected: usize,
        /// Actual data length
        actual: usize,
    },
    /// Tileset column count is zero and cannot be derived from its image
    #[error("tileset '{tileset}' has no columns")]
    ZeroColumns {
        /// Tileset name
        tileset: String,
    },

    /// The draw backend has no texture for this image
    #[error("texture for image '{image}' is not loaded")]
    TextureNotLoaded {
        /// Image source path
        image: PathBuf,
    },
}

/// Crate-wide result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;
