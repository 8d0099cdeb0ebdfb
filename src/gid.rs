use crate::catalog::TilesetCatalog;
use crate::error::{Error, Result};
use crate::map::Map;
use crate::tileset::Tileset;
use std::sync::Arc;

pub const FLIP_H: u32 = 0x8000_0000; // bit 31
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
pub const GID_MASK: u32 = 0x1FFF_FFFF; // keep lower 29 bits

/// Packed layer cell: 3 flip bits over a 1-based global tile id, 0 = empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gid(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GidFlags {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

impl GidFlags {
    pub const NONE: GidFlags = GidFlags {
        horizontal: false,
        vertical: false,
        diagonal: false,
    };

    pub fn from_bits(raw: u32) -> Self {
        GidFlags {
            horizontal: raw & FLIP_H != 0,
            vertical: raw & FLIP_V != 0,
            diagonal: raw & FLIP_D != 0,
        }
    }

    pub fn bits(self) -> u32 {
        let mut bits = 0;
        if self.horizontal {
            bits |= FLIP_H;
        }
        if self.vertical {
            bits |= FLIP_V;
        }
        if self.diagonal {
            bits |= FLIP_D;
        }
        bits
    }
}

impl Gid {
    pub const EMPTY: Gid = Gid(0);

    /// Inverse of [`decode`].
    #[inline]
    pub fn encode(first_gid: u32, local_id: u32, flags: GidFlags) -> Gid {
        let global = first_gid + local_id;
        debug_assert!(global & !GID_MASK == 0, "global id {global} overflows 29 bits");
        Gid((global & GID_MASK) | flags.bits())
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn global_id(self) -> u32 {
        self.0 & GID_MASK
    }

    #[inline]
    pub fn flags(self) -> GidFlags {
        GidFlags::from_bits(self.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A cell resolved to its tileset.
#[derive(Debug, Clone)]
pub struct DecodedTile<'a> {
    pub tileset: &'a Arc<Tileset>,
    pub first_gid: u32,
    pub local_id: u32,
    pub flags: GidFlags,
}

/// Resolve `gid` against the map's tileset references.
///
/// `Ok(None)` for an empty cell; [`Error::UnresolvedGidReference`] when no
/// loaded tileset covers the global id.
pub fn decode<'a>(gid: Gid, map: &Map, catalog: &'a TilesetCatalog) -> Result<Option<DecodedTile<'a>>> {
    if gid.is_empty() {
        return Ok(None);
    }
    let unresolved = || Error::UnresolvedGidReference { gid: gid.raw() };

    let global = gid.global_id();
    let entry = map.tileset_for_gid(global).ok_or_else(unresolved)?;
    let tileset = catalog.by_source(&entry.source).map_err(|_| unresolved())?;
    let local_id = global - entry.first_gid;
    if local_id >= tileset.tile_count {
        return Err(unresolved());
    }

    Ok(Some(DecodedTile {
        tileset,
        first_gid: entry.first_gid,
        local_id,
        flags: gid.flags(),
    }))
}
