use super::{from_json, read_text};
use crate::animation::{
    AnimationKey, AnimationRegistry, RawAnimation, RawComplex, RawSimple, RawTimed, SourceAnimation,
};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

#[derive(Deserialize)]
struct JsonTilesetGroup {
    name: String,
    tilesets: Vec<String>,
}

#[derive(Deserialize)]
struct JsonAnimation {
    class: String,
    action: String,
    #[serde(default)]
    tileset_group: Option<String>,
    #[serde(default)]
    tilesets: Vec<String>,
    #[serde(default)]
    simple: Option<RawSimple>,
    #[serde(default)]
    timed: Option<RawTimed>,
    #[serde(default)]
    complex: Option<RawComplex>,
}

#[derive(Deserialize)]
struct JsonAnimationFile {
    #[serde(default)]
    tileset_groups: Vec<JsonTilesetGroup>,
    #[serde(default)]
    animations: Vec<JsonAnimation>,
}

impl JsonAnimation {
    /// Exactly one of the three shapes.
    fn shape(&mut self) -> Result<RawAnimation> {
        let shapes = [
            self.simple.take().map(RawAnimation::Simple),
            self.timed.take().map(RawAnimation::Timed),
            self.complex.take().map(RawAnimation::Complex),
        ];
        let found = shapes.iter().flatten().count();
        match (found, shapes.into_iter().flatten().next()) {
            (1, Some(raw)) => Ok(raw),
            _ => Err(Error::AnimationShape {
                class: self.class.clone(),
                action: self.action.clone(),
                found,
            }),
        }
    }
}

/// Register the tileset groups and animations of one descriptor document.
///
/// An animation may name a group declared in the same document or in one
/// registered earlier. Its tilesets are the group's tilesets followed by its
/// own list. The document is registered as a whole or not at all.
pub fn parse_animations(
    text: &str,
    path: &Path,
    registry: &mut AnimationRegistry,
) -> Result<Vec<Arc<SourceAnimation>>> {
    let doc: JsonAnimationFile = from_json(text, path)?;

    let groups: HashMap<String, Vec<String>> = doc
        .tileset_groups
        .into_iter()
        .map(|g| (g.name, g.tilesets))
        .collect();

    let mut pending = Vec::with_capacity(doc.animations.len());
    let mut keys = HashSet::new();
    for mut entry in doc.animations {
        let raw = entry.shape()?;
        let mut tilesets = match &entry.tileset_group {
            Some(group) => match groups.get(group) {
                Some(members) => members.clone(),
                None => registry.tileset_group(group)?.to_vec(),
            },
            None => Vec::new(),
        };
        tilesets.append(&mut entry.tilesets);

        let key = AnimationKey::new(entry.class, entry.action);
        if registry.get(&key.class, &key.action).is_ok() || !keys.insert(key.clone()) {
            return Err(Error::DuplicateAnimation {
                class: key.class,
                action: key.action,
            });
        }
        pending.push(SourceAnimation::from_raw(key, tilesets, raw)?);
    }

    for (name, members) in groups {
        registry.add_tileset_group(name, members);
    }
    let registered = pending
        .into_iter()
        .map(|animation| registry.register(animation))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "loaded {} animations from {}",
        registered.len(),
        path.display()
    );
    Ok(registered)
}

pub fn load_animations(
    path: impl AsRef<Path>,
    registry: &mut AnimationRegistry,
) -> Result<Vec<Arc<SourceAnimation>>> {
    let path = path.as_ref();
    parse_animations(&read_text(path)?, path, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Flip;

    fn parse(text: &str) -> Result<AnimationRegistry> {
        let mut reg = AnimationRegistry::new();
        parse_animations(text, Path::new("player.ani"), &mut reg)?;
        Ok(reg)
    }

    #[test]
    fn simple_shape_with_group_and_defaults() {
        let reg = parse(
            r#"{
              "tileset_groups": [{"name": "player", "tilesets": ["body", "hair"]}],
              "animations": [{
                "class": "player", "action": "walk_left",
                "tileset_group": "player", "tilesets": ["hat"],
                "simple": {"duration": 100, "frames": [0, 1, 2],
                           "defaults": {"flip_horizontal": true}}
              }]
            }"#,
        )
        .unwrap();

        let anim = reg.get("player", "walk_left").unwrap();
        assert_eq!(anim.tilesets(), ["body", "hair", "hat"]);
        assert_eq!(anim.frames().len(), 3);
        assert_eq!(anim.frames()[1].duration_ms, 100);
        let part = &anim.frames()[0].parts[0];
        assert_eq!(part.flip, Some(Flip { horizontal: true, vertical: false }));
        assert_eq!(reg.tileset_group("player").unwrap(), ["body", "hair"]);
    }

    #[test]
    fn timed_shape_accepts_pairs_and_parallel_lists() {
        let reg = parse(
            r#"{"animations": [
              {"class": "bat", "action": "fly", "tilesets": ["bat"],
               "timed": {"frames": [{"id": 0, "duration": 80}, {"id": 1, "duration": 120}]}},
              {"class": "bat", "action": "sleep", "tilesets": ["bat"],
               "timed": {"ids": [4, 5], "durations": [500, 250]}}
            ]}"#,
        )
        .unwrap();

        let fly: Vec<_> = reg.get("bat", "fly").unwrap().frames().iter().map(|f| f.duration_ms).collect();
        assert_eq!(fly, [80, 120]);
        let sleep = reg.get("bat", "sleep").unwrap();
        assert_eq!(sleep.frames()[1].parts[0].tile_id, 5);
        assert_eq!(sleep.frames()[1].duration_ms, 250);
    }

    #[test]
    fn timed_length_mismatch() {
        let err = parse(
            r#"{"animations": [{"class": "bat", "action": "fly", "tilesets": ["bat"],
               "timed": {"ids": [0, 1, 2], "durations": [100, 100]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::FrameTimingMismatch { frames: 3, durations: 2 }));
    }

    #[test]
    fn complex_parts_address_tilesets_from_one() {
        let reg = parse(
            r#"{"animations": [{"class": "door", "action": "open", "tilesets": ["frame", "panel"],
               "complex": {"frames": [{"duration": 50, "parts": [
                 {"id": 0, "tileset": 1},
                 {"id": 3, "tileset_index": 2, "x_offset": 16, "flip_vertical": true}
               ]}]}}]}"#,
        )
        .unwrap();

        let parts = &reg.get("door", "open").unwrap().frames()[0].parts;
        assert_eq!(parts[0].tileset, Some(0));
        assert_eq!(parts[1].tileset, Some(1));
        assert_eq!(parts[1].x_offset, 16);
    }

    #[test]
    fn complex_index_out_of_range() {
        let err = parse(
            r#"{"animations": [{"class": "door", "action": "open", "tilesets": ["frame"],
               "complex": {"frames": [{"duration": 50, "parts": [{"id": 0, "tileset": 2}]}]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::TilesetIndexOutOfRange { index: 2, available: 1, .. }));
    }

    #[test]
    fn exactly_one_shape_is_required() {
        let none = parse(r#"{"animations": [{"class": "a", "action": "b"}]}"#).unwrap_err();
        assert!(matches!(none, Error::AnimationShape { found: 0, .. }));

        let two = parse(
            r#"{"animations": [{"class": "a", "action": "b",
               "simple": {"duration": 10, "frames": [0]},
               "timed": {"ids": [0], "durations": [10]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(two, Error::AnimationShape { found: 2, .. }));
    }

    #[test]
    fn failing_document_registers_nothing() {
        let mut reg = AnimationRegistry::new();
        let err = parse_animations(
            r#"{
              "tileset_groups": [{"name": "bat", "tilesets": ["bat"]}],
              "animations": [
                {"class": "bat", "action": "fly", "tileset_group": "bat",
                 "simple": {"duration": 100, "frames": [0, 1]}},
                {"class": "bat", "action": "sleep", "tileset_group": "bat",
                 "timed": {"ids": [4, 5], "durations": [500]}}
              ]
            }"#,
            Path::new("bat.ani"),
            &mut reg,
        )
        .unwrap_err();

        assert!(matches!(err, Error::FrameTimingMismatch { .. }));
        assert!(reg.is_empty());
        assert!(reg.tileset_group("bat").is_err());
    }

    #[test]
    fn duplicate_within_document_is_rejected_up_front() {
        let mut reg = AnimationRegistry::new();
        let err = parse_animations(
            r#"{"animations": [
              {"class": "bat", "action": "fly", "tilesets": ["bat"], "simple": {"duration": 10, "frames": [0]}},
              {"class": "bat", "action": "fly", "tilesets": ["bat"], "simple": {"duration": 10, "frames": [1]}}
            ]}"#,
            Path::new("bat.ani"),
            &mut reg,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateAnimation { .. }));
        assert!(reg.is_empty());
    }

    #[test]
    fn unknown_group_is_an_error() {
        let err = parse(
            r#"{"animations": [{"class": "a", "action": "b", "tileset_group": "ghost",
               "simple": {"duration": 10, "frames": [0]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::TilesetGroupNotFound(g) if g == "ghost"));
    }
}
