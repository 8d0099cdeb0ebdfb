// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use tiled_compositor::{Animation, Frame, Image, Object, ObjectGroup, ObjectShape, Tile, Tileset};

/// 16x16 tiles, no spacing or margin.
pub fn grid(name: &str, columns: u32, tile_count: u32) -> Tileset {
    Tileset {
        name: name.to_owned(),
        source: PathBuf::from(format!("tilesets/{name}.tsj")),
        tile_width: 16,
        tile_height: 16,
        tile_count,
        columns,
        spacing: 0,
        margin: 0,
        image: Image {
            source: PathBuf::from(format!("tilesets/{name}.png")),
            width: columns * 16,
            height: tile_count.div_ceil(columns) * 16,
        },
        tiles: BTreeMap::new(),
    }
}

fn tile_mut(ts: &mut Tileset, id: u32) -> &mut Tile {
    ts.tiles.entry(id).or_insert_with(|| Tile {
        id,
        ..Default::default()
    })
}

pub fn with_collider(mut ts: Tileset, id: u32, name: &str, rect: [f32; 4]) -> Tileset {
    let [x, y, x2, y2] = rect;
    let tile = tile_mut(&mut ts, id);
    if tile.object_groups.is_empty() {
        tile.object_groups.push(ObjectGroup::default());
    }
    tile.object_groups[0].objects.push(Object {
        id: 1,
        name: name.to_owned(),
        x,
        y,
        width: x2 - x,
        height: y2 - y,
        shape: ObjectShape::Rectangle,
    });
    ts
}

pub fn with_type(mut ts: Tileset, id: u32, tile_type: &str) -> Tileset {
    tile_mut(&mut ts, id).tile_type = Some(tile_type.to_owned());
    ts
}

/// `frames` as (tile id, duration ms).
pub fn with_animation(mut ts: Tileset, id: u32, frames: &[(u32, u32)]) -> Tileset {
    let frames = frames
        .iter()
        .map(|&(tile_id, duration_ms)| Frame { tile_id, duration_ms })
        .collect();
    let label = format!("{}#{}", ts.name, id);
    tile_mut(&mut ts, id).animation = Some(Animation::new(&label, frames).unwrap());
    ts
}
