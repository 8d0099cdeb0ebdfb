// tests/load_tests.rs

use std::fs;
use std::path::Path;
use tiled_compositor::loader::{load_map, load_tileset};
use tiled_compositor::{CommandLog, DrawOptions, Error, MapRenderer, ManualClock, Project};

const TERRAIN: &str = r#"{
  "name": "terrain", "tilewidth": 16, "tileheight": 16, "tilecount": 16, "columns": 4,
  "image": "terrain.png", "imagewidth": 64, "imageheight": 64,
  "tiles": [{"id": 0, "animation": [{"tileid": 0, "duration": 250}, {"tileid": 1, "duration": 250}]}]
}"#;

const BODY: &str = r#"{
  "name": "body", "tilewidth": 16, "tileheight": 32, "tilecount": 8, "columns": 4,
  "image": "body.png", "imagewidth": 64, "imageheight": 64,
  "tiles": [{"id": 0, "objectgroup": {"objects": [{"name": "feet", "x": 2, "y": 24, "width": 12, "height": 8}]}}]
}"#;

const HAIR: &str = r#"{
  "name": "hair", "tilewidth": 16, "tileheight": 32, "tilecount": 8, "columns": 4,
  "image": "hair.png", "imagewidth": 64, "imageheight": 64
}"#;

const PLAYER_ANI: &str = r#"{
  "tileset_groups": [{"name": "player", "tilesets": ["body", "hair"]}],
  "animations": [
    {"class": "player", "action": "walk", "tileset_group": "player",
     "simple": {"duration": 100, "frames": [0, 1, 2, 3]}}
  ]
}"#;

const VILLAGE: &str = r#"{
  "class": "village", "tilewidth": 16, "tileheight": 16,
  "tilesets": [{"firstgid": 1, "source": "../tilesets/terrain.tsj"}],
  "layers": [{"type": "tilelayer", "name": "ground", "width": 2, "height": 1, "data": [1, 6]}]
}"#;

const MANIFEST: &str = r#"{
  "tilesets": ["tilesets/terrain.tsj", "tilesets/body.tsj", "tilesets/hair.tsj"],
  "tileset_groups": [{"name": "scenery", "tilesets": ["terrain"]}],
  "animations": ["anims/player.ani"],
  "maps": ["maps/village.tmj"]
}"#;

fn write(dir: &Path, rel: &str, text: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn project_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "tilesets/terrain.tsj", TERRAIN);
    write(dir.path(), "tilesets/body.tsj", BODY);
    write(dir.path(), "tilesets/hair.tsj", HAIR);
    write(dir.path(), "anims/player.ani", PLAYER_ANI);
    write(dir.path(), "maps/village.tmj", VILLAGE);
    write(dir.path(), "project.json", MANIFEST);
    dir
}

#[test]
fn project_loads_every_listed_document() -> anyhow::Result<()> {
    let dir = project_dir();
    let project = Project::load(dir.path().join("project.json"))?;

    assert_eq!(project.catalog.names(), ["body", "hair", "terrain"]);
    assert_eq!(project.animations.len(), 1);
    assert_eq!(project.maps.len(), 1);

    let walk = project.animations.get("player", "walk")?;
    assert_eq!(walk.tilesets(), ["body", "hair"]);

    // descriptor and manifest groups both reach the catalog
    assert_eq!(project.catalog.group("player")?.len(), 2);
    assert_eq!(project.catalog.group("scenery")?[0].name, "terrain");

    let terrain = project.catalog.by_source(dir.path().join("tilesets/terrain.tsj"))?;
    assert_eq!(terrain.image.source, dir.path().join("tilesets/terrain.png"));
    Ok(())
}

#[test]
fn loaded_map_resolves_through_relative_tileset_paths() -> anyhow::Result<()> {
    let dir = project_dir();
    let project = Project::load(dir.path().join("project.json"))?;
    let map = project.maps.get("village")?;

    let mut renderer = MapRenderer::with_clock(ManualClock::new(0));
    let mut log = CommandLog::new();
    let stats = renderer.draw_map(map, &project.catalog, &DrawOptions::default(), &mut log)?;

    assert_eq!(stats.drawn, 2);
    assert_eq!(stats.skipped, 0);
    assert_eq!(log.commands[1].src.min_x, 16);
    assert_eq!(log.commands[1].src.min_y, 16);
    Ok(())
}

#[test]
fn standalone_loaders() -> anyhow::Result<()> {
    let dir = project_dir();
    let body = load_tileset(dir.path().join("tilesets/body.tsj"))?;
    assert_eq!(body.collision_rect(0, "feet")?.max_y, 32);

    let map = load_map(dir.path().join("maps/village.tmj"))?;
    assert_eq!(map.layer("ground")?.data(), [1, 6]);
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Project::load(dir.path().join("nope.json")).unwrap_err();
    match err {
        Error::Io { path, .. } => assert!(path.ends_with("nope.json")),
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn malformed_manifest_is_json_error_with_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "project.json", r#"{"tilesets": [1, 2"#);
    let err = Project::load(dir.path().join("project.json")).unwrap_err();
    match err {
        Error::Json { path, .. } => assert!(path.ends_with("project.json")),
        other => panic!("expected Json, got {:?}", other),
    }
}

#[test]
fn missing_listed_tileset_fails_the_project() {
    let dir = project_dir();
    fs::remove_file(dir.path().join("tilesets/hair.tsj")).unwrap();
    let err = Project::load(dir.path().join("project.json")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn timed_descriptor_with_mismatched_lists() {
    let dir = project_dir();
    write(
        dir.path(),
        "anims/player.ani",
        r#"{"animations": [{"class": "player", "action": "walk", "tilesets": ["body"],
           "timed": {"ids": [0, 1, 2], "durations": [100, 100]}}]}"#,
    );
    let err = Project::load(dir.path().join("project.json")).unwrap_err();
    assert!(matches!(err, Error::FrameTimingMismatch { frames: 3, durations: 2 }));
}
