use super::{base_dir, file_stem, from_json, read_text};
use crate::error::Result;
use crate::layer::Layer;
use crate::map::{Map, MapTileset};
use crate::tileset::{Animation, Frame, Image, Object, ObjectGroup, ObjectShape, Tile, Tileset};
use macroquad::math::{vec2, Vec2};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    width: usize,
    #[serde(default)]
    height: usize,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" expected here
    /// Children of a "group" layer.
    #[serde(default)]
    layers: Vec<JsonLayer>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct JsonTilesetRef {
    firstgid: u32,
    source: String,
}

#[derive(Deserialize)]
struct JsonMap {
    #[serde(default)]
    class: Option<String>,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTilesetRef>,
}

#[derive(Deserialize)]
struct JsonTileset {
    #[serde(default)]
    name: Option<String>,
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    #[serde(default)]
    columns: u32,
    #[serde(default)]
    image: String,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
    #[serde(default)]
    tiles: Vec<JsonTile>,
}

#[derive(Deserialize)]
struct JsonObjectPoint {
    x: f32,
    y: f32,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    ellipse: bool,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    polygon: Vec<JsonObjectPoint>,
    #[serde(default)]
    polyline: Vec<JsonObjectPoint>,
}

#[derive(Deserialize)]
struct JsonObjectGroup {
    #[serde(default)]
    name: String,
    #[serde(default)]
    objects: Vec<JsonObject>,
}

#[derive(Deserialize)]
struct JsonFrame {
    tileid: u32,
    duration: u32,
}

#[derive(Deserialize)]
struct JsonTile {
    id: u32,
    /// Pre-1.9 exports call the class "type".
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    animation: Vec<JsonFrame>,
    #[serde(default)]
    objectgroup: Option<JsonObjectGroup>,
}

fn object_from_json(obj: JsonObject) -> Object {
    let points = |pts: Vec<JsonObjectPoint>| -> Vec<Vec2> { pts.into_iter().map(|p| vec2(p.x, p.y)).collect() };
    let shape = if obj.point {
        ObjectShape::Point
    } else if obj.ellipse {
        ObjectShape::Ellipse
    } else if !obj.polygon.is_empty() {
        ObjectShape::Polygon(points(obj.polygon))
    } else if !obj.polyline.is_empty() {
        ObjectShape::Polyline(points(obj.polyline))
    } else {
        ObjectShape::Rectangle
    };
    Object {
        id: obj.id,
        name: obj.name,
        x: obj.x,
        y: obj.y,
        width: obj.width,
        height: obj.height,
        shape,
    }
}

fn tile_from_json(tileset: &str, tile: JsonTile) -> Result<Tile> {
    let animation = if tile.animation.is_empty() {
        None
    } else {
        let frames = tile
            .animation
            .into_iter()
            .map(|f| Frame {
                tile_id: f.tileid,
                duration_ms: f.duration,
            })
            .collect();
        Some(Animation::new(&format!("{}#{}", tileset, tile.id), frames)?)
    };
    let object_groups = tile
        .objectgroup
        .into_iter()
        .map(|g| ObjectGroup {
            name: g.name,
            objects: g.objects.into_iter().map(object_from_json).collect(),
        })
        .collect();

    Ok(Tile {
        id: tile.id,
        tile_type: tile.class.or(tile.kind).filter(|t| !t.is_empty()),
        animation,
        object_groups,
    })
}

/// Parse a tileset document read from `path`. The image source is resolved
/// against the document's directory; a missing `name` falls back to the file stem.
pub fn parse_tileset(text: &str, path: &Path) -> Result<Tileset> {
    let j: JsonTileset = from_json(text, path)?;
    let name = j.name.filter(|n| !n.is_empty()).unwrap_or_else(|| file_stem(path));

    let mut tiles = BTreeMap::new();
    for tile in j.tiles {
        let tile = tile_from_json(&name, tile)?;
        tiles.insert(tile.id, tile);
    }

    let image_source = if j.image.is_empty() {
        Default::default()
    } else {
        base_dir(path).join(&j.image)
    };

    let tileset = Tileset {
        name,
        source: path.to_path_buf(),
        tile_width: j.tilewidth,
        tile_height: j.tileheight,
        tile_count: j.tilecount,
        columns: j.columns,
        spacing: j.spacing,
        margin: j.margin,
        image: Image {
            source: image_source,
            width: j.imagewidth,
            height: j.imageheight,
        },
        tiles,
    };
    // reject a grid we could never slice
    tileset.columns()?;

    log::debug!(
        "parsed tileset '{}' from {} ({} tiles, {} with metadata)",
        tileset.name,
        path.display(),
        tileset.tile_count,
        tileset.tiles.len()
    );
    Ok(tileset)
}

pub fn load_tileset(path: impl AsRef<Path>) -> Result<Tileset> {
    let path = path.as_ref();
    parse_tileset(&read_text(path)?, path)
}

fn collect_tile_layers(layers: Vec<JsonLayer>, parent_visible: bool, out: &mut Vec<Layer>) -> Result<()> {
    for l in layers {
        let visible = parent_visible && l.visible;
        match l.kind.as_deref().unwrap_or("tilelayer") {
            "tilelayer" => {
                let mut layer = Layer::new(l.name, l.width, l.height, l.data)?;
                layer.visible = visible;
                out.push(layer);
            }
            "group" => collect_tile_layers(l.layers, visible, out)?,
            other => log::debug!("skipping {} layer '{}'", other, l.name),
        }
    }
    Ok(())
}

/// Parse a map document read from `path`. Tileset references resolve
/// against the map's directory and are looked up lazily at draw time.
pub fn parse_map(text: &str, path: &Path) -> Result<Map> {
    let j: JsonMap = from_json(text, path)?;
    let map_dir = base_dir(path);

    let tilesets = j
        .tilesets
        .into_iter()
        .map(|t| MapTileset {
            first_gid: t.firstgid,
            source: map_dir.join(t.source),
        })
        .collect();

    let mut layers = Vec::with_capacity(j.layers.len());
    collect_tile_layers(j.layers, true, &mut layers)?;

    let name = j.class.filter(|c| !c.is_empty()).unwrap_or_else(|| file_stem(path));
    let map = Map::new(name, j.tilewidth, j.tileheight, tilesets, layers);
    log::debug!(
        "parsed map '{}' from {} ({} tilesets, {} tile layers)",
        map.name,
        path.display(),
        map.tilesets().len(),
        map.layers().len()
    );
    Ok(map)
}

pub fn load_map(path: impl AsRef<Path>) -> Result<Map> {
    let path = path.as_ref();
    parse_map(&read_text(path)?, path)
}
