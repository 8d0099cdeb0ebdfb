//! Class-level sprite animations and their descriptor shapes.
//!
//! Descriptors come in three shapes ([`RawAnimation`]). They are normalized
//! once, at load time, into a sequence of [`AnimationFrame`]s; nothing past
//! [`SourceAnimation::from_raw`] sees the raw shape again.

use super::state::FrameDuration;
use crate::command::Flip;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// Tile id meaning "no part in this slot".
pub const NO_PART: i32 = -1;

/// Registry key of a class-level animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimationKey {
    pub class: String,
    pub action: String,
}

impl AnimationKey {
    pub fn new(class: impl Into<String>, action: impl Into<String>) -> Self {
        AnimationKey {
            class: class.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for AnimationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.class, self.action)
    }
}

/// One drawn piece of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePart {
    /// Local tile id, or [`NO_PART`].
    pub tile_id: i32,
    /// 0-based index into the animation's tilesets; `None` draws the part on
    /// every tileset, in order.
    pub tileset: Option<usize>,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Overrides the caller's flips when present.
    pub flip: Option<Flip>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrame {
    pub duration_ms: u32,
    pub parts: Vec<FramePart>,
}

impl FrameDuration for AnimationFrame {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

/// A normalized class/action animation.
#[derive(Debug, Clone)]
pub struct SourceAnimation {
    key: AnimationKey,
    tilesets: Vec<String>,
    frames: Vec<AnimationFrame>,
}

impl SourceAnimation {
    /// Normalize `raw` for an animation drawing on `tilesets` (by name).
    pub fn from_raw(key: AnimationKey, tilesets: Vec<String>, raw: RawAnimation) -> Result<Self> {
        let frames = raw.normalize(&key, tilesets.len())?;
        Ok(SourceAnimation {
            key,
            tilesets,
            frames,
        })
    }

    pub fn key(&self) -> &AnimationKey {
        &self.key
    }

    pub fn class(&self) -> &str {
        &self.key.class
    }

    pub fn action(&self) -> &str {
        &self.key.action
    }

    pub fn tilesets(&self) -> &[String] {
        &self.tilesets
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RawDefaults {
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub x_offset: i32,
    pub y_offset: i32,
}

/// Shared per-frame duration over a flat id list.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSimple {
    pub duration: u32,
    #[serde(default)]
    pub defaults: Option<RawDefaults>,
    pub frames: Vec<i32>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawTimedFrame {
    pub id: i32,
    pub duration: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTimedFrames {
    Pairs { frames: Vec<RawTimedFrame> },
    Split { ids: Vec<i32>, durations: Vec<u32> },
}

/// Per-frame durations, either as `{id, duration}` pairs or as parallel lists.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTimed {
    #[serde(default)]
    pub defaults: Option<RawDefaults>,
    #[serde(flatten)]
    pub frames: RawTimedFrames,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawPart {
    pub id: i32,
    /// 1-based index into the animation's tilesets.
    #[serde(alias = "tileset_index")]
    pub tileset: usize,
    #[serde(default)]
    pub x_offset: i32,
    #[serde(default)]
    pub y_offset: i32,
    #[serde(default)]
    pub flip_horizontal: bool,
    #[serde(default)]
    pub flip_vertical: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComplexFrame {
    pub duration: u32,
    pub parts: Vec<RawPart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComplex {
    pub frames: Vec<RawComplexFrame>,
}

/// The three descriptor shapes.
#[derive(Debug, Clone)]
pub enum RawAnimation {
    Simple(RawSimple),
    Timed(RawTimed),
    Complex(RawComplex),
}

fn single_part(id: i32, defaults: Option<RawDefaults>) -> FramePart {
    let d = defaults.unwrap_or_default();
    FramePart {
        tile_id: id,
        tileset: None,
        x_offset: d.x_offset,
        y_offset: d.y_offset,
        flip: defaults.map(|d| Flip {
            horizontal: d.flip_horizontal,
            vertical: d.flip_vertical,
        }),
    }
}

impl RawAnimation {
    /// Canonical frame sequence. `tileset_count` bounds complex part indexes.
    pub fn normalize(self, key: &AnimationKey, tileset_count: usize) -> Result<Vec<AnimationFrame>> {
        let frames: Vec<AnimationFrame> = match self {
            RawAnimation::Simple(s) => s
                .frames
                .iter()
                .map(|&id| AnimationFrame {
                    duration_ms: s.duration,
                    parts: vec![single_part(id, s.defaults)],
                })
                .collect(),
            RawAnimation::Timed(t) => {
                let pairs: Vec<(i32, u32)> = match t.frames {
                    RawTimedFrames::Pairs { frames } => {
                        frames.iter().map(|f| (f.id, f.duration)).collect()
                    }
                    RawTimedFrames::Split { ids, durations } => {
                        if ids.len() != durations.len() {
                            return Err(Error::FrameTimingMismatch {
                                frames: ids.len(),
                                durations: durations.len(),
                            });
                        }
                        ids.into_iter().zip(durations).collect()
                    }
                };
                pairs
                    .into_iter()
                    .map(|(id, duration)| AnimationFrame {
                        duration_ms: duration,
                        parts: vec![single_part(id, t.defaults)],
                    })
                    .collect()
            }
            RawAnimation::Complex(c) => {
                let mut frames = Vec::with_capacity(c.frames.len());
                for frame in c.frames {
                    let parts = frame
                        .parts
                        .iter()
                        .map(|p| {
                            if p.tileset == 0 || p.tileset > tileset_count {
                                return Err(Error::TilesetIndexOutOfRange {
                                    class: key.class.clone(),
                                    action: key.action.clone(),
                                    index: p.tileset,
                                    available: tileset_count,
                                });
                            }
                            Ok(FramePart {
                                tile_id: p.id,
                                tileset: Some(p.tileset - 1),
                                x_offset: p.x_offset,
                                y_offset: p.y_offset,
                                flip: Some(Flip {
                                    horizontal: p.flip_horizontal,
                                    vertical: p.flip_vertical,
                                }),
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    frames.push(AnimationFrame {
                        duration_ms: frame.duration,
                        parts,
                    });
                }
                frames
            }
        };

        if frames.is_empty() {
            return Err(Error::MissingAnimationFrames {
                name: key.to_string(),
            });
        }
        if let Some(index) = frames.iter().position(|f| f.duration_ms == 0) {
            return Err(Error::ZeroFrameDuration {
                name: key.to_string(),
                index,
            });
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> AnimationKey {
        AnimationKey::new("player", "walk")
    }

    #[test]
    fn simple_shares_duration_and_defaults() {
        let raw: RawSimple = serde_json::from_str(
            r#"{"duration":135,"defaults":{"flip_horizontal":true,"y_offset":-4},"frames":[48,49,-1]}"#,
        )
        .unwrap();
        let frames = RawAnimation::Simple(raw).normalize(&key(), 1).unwrap();

        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.duration_ms == 135));
        let part = frames[0].parts[0];
        assert_eq!(part.tile_id, 48);
        assert_eq!(part.tileset, None);
        assert_eq!(part.y_offset, -4);
        assert_eq!(part.flip, Some(Flip { horizontal: true, vertical: false }));
        assert_eq!(frames[2].parts[0].tile_id, NO_PART);
    }

    #[test]
    fn simple_without_defaults_keeps_caller_flips() {
        let raw: RawSimple = serde_json::from_str(r#"{"duration":100,"frames":[1]}"#).unwrap();
        let frames = RawAnimation::Simple(raw).normalize(&key(), 1).unwrap();
        assert_eq!(frames[0].parts[0].flip, None);
    }

    #[test]
    fn timed_accepts_pairs_and_parallel_lists() {
        let pairs: RawTimed =
            serde_json::from_str(r#"{"frames":[{"id":1,"duration":80},{"id":2,"duration":55}]}"#).unwrap();
        let frames = RawAnimation::Timed(pairs).normalize(&key(), 1).unwrap();
        assert_eq!(
            frames.iter().map(|f| (f.parts[0].tile_id, f.duration_ms)).collect::<Vec<_>>(),
            [(1, 80), (2, 55)]
        );

        let split: RawTimed =
            serde_json::from_str(r#"{"ids":[4,5],"durations":[10,20]}"#).unwrap();
        let frames = RawAnimation::Timed(split).normalize(&key(), 1).unwrap();
        assert_eq!(frames[1].duration_ms, 20);
    }

    #[test]
    fn timed_length_mismatch_fails() {
        let raw: RawTimed =
            serde_json::from_str(r#"{"ids":[1,2,3],"durations":[100,100]}"#).unwrap();
        assert!(matches!(
            RawAnimation::Timed(raw).normalize(&key(), 1),
            Err(Error::FrameTimingMismatch { frames: 3, durations: 2 })
        ));
    }

    #[test]
    fn complex_parts_index_tilesets_from_one() {
        let raw: RawComplex = serde_json::from_str(
            r#"{"frames":[{"duration":100,"parts":[
                {"id":3,"tileset":2,"x_offset":16,"flip_vertical":true},
                {"id":4,"tileset_index":1}
            ]}]}"#,
        )
        .unwrap();
        let frames = RawAnimation::Complex(raw.clone()).normalize(&key(), 2).unwrap();
        let parts = &frames[0].parts;
        assert_eq!(parts[0].tileset, Some(1));
        assert_eq!(parts[0].x_offset, 16);
        assert_eq!(parts[0].flip, Some(Flip { horizontal: false, vertical: true }));
        assert_eq!(parts[1].tileset, Some(0));

        assert!(matches!(
            RawAnimation::Complex(raw).normalize(&key(), 1),
            Err(Error::TilesetIndexOutOfRange { index: 2, available: 1, .. })
        ));
    }

    #[test]
    fn empty_and_zero_duration_are_rejected() {
        let raw: RawSimple = serde_json::from_str(r#"{"duration":100,"frames":[]}"#).unwrap();
        assert!(matches!(
            RawAnimation::Simple(raw).normalize(&key(), 1),
            Err(Error::MissingAnimationFrames { .. })
        ));

        let raw: RawSimple = serde_json::from_str(r#"{"duration":0,"frames":[1]}"#).unwrap();
        assert!(matches!(
            RawAnimation::Simple(raw).normalize(&key(), 1),
            Err(Error::ZeroFrameDuration { index: 0, .. })
        ));
    }
}
