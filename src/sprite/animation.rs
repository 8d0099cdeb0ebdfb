use super::{SpriteDrawer, TileRef};
use crate::animation::{Clock, ColliderCache, FrameClock, FrameDuration, NO_PART};
use crate::command::{DrawOptions, Flip};
use crate::error::{Error, Result};
use crate::geom::TileRect;
use crate::render::DrawBackend;

/// One step of a sprite animation. `id` is [`NO_PART`] for an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub id: i32,
    pub duration_ms: u32,
}

impl FrameDuration for SpriteFrame {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

/// Frame sequence played over any sprite drawer.
#[derive(Debug)]
pub struct SpriteAnimation<S> {
    sprite: S,
    frames: Vec<SpriteFrame>,
    defaults: Option<Flip>,
    frame_clock: FrameClock,
    colliders: ColliderCache,
}

impl<S: SpriteDrawer> SpriteAnimation<S> {
    /// Every frame shown for `duration_ms`.
    pub fn simple(sprite: S, duration_ms: u32, ids: &[i32], defaults: Option<Flip>) -> Result<Self> {
        let frames = ids
            .iter()
            .map(|&id| SpriteFrame { id, duration_ms })
            .collect();
        Self::with_frames(sprite, frames, defaults)
    }

    /// `ids[i]` shown for `durations[i]`.
    pub fn timed(sprite: S, ids: &[i32], durations: &[u32], defaults: Option<Flip>) -> Result<Self> {
        if ids.len() != durations.len() {
            return Err(Error::FrameTimingMismatch {
                frames: ids.len(),
                durations: durations.len(),
            });
        }
        let frames = ids
            .iter()
            .zip(durations)
            .map(|(&id, &duration_ms)| SpriteFrame { id, duration_ms })
            .collect();
        Self::with_frames(sprite, frames, defaults)
    }

    fn with_frames(sprite: S, frames: Vec<SpriteFrame>, defaults: Option<Flip>) -> Result<Self> {
        let mut anim = SpriteAnimation {
            sprite,
            frames: Vec::new(),
            defaults,
            frame_clock: FrameClock::new(),
            colliders: ColliderCache::default(),
        };
        anim.set_frames(frames)?;
        Ok(anim)
    }

    /// Replace the sequence; playback restarts and cached colliders are dropped.
    pub fn set_frames(&mut self, frames: Vec<SpriteFrame>) -> Result<()> {
        if frames.is_empty() {
            return Err(Error::MissingAnimationFrames {
                name: "sprite animation".to_owned(),
            });
        }
        if let Some(index) = frames.iter().position(|f| f.duration_ms == 0) {
            return Err(Error::ZeroFrameDuration {
                name: "sprite animation".to_owned(),
                index,
            });
        }
        self.frames = frames;
        self.frame_clock.reset();
        self.colliders.clear();
        Ok(())
    }

    pub fn sprite(&self) -> &S {
        &self.sprite
    }

    pub fn frames(&self) -> &[SpriteFrame] {
        &self.frames
    }

    pub fn frame_index(&self) -> Option<usize> {
        self.frame_clock.current()
    }

    /// Draw the frame active at the clock's time. The flip defaults, when
    /// set, replace the caller's flips.
    pub fn draw(
        &mut self,
        opts: &DrawOptions,
        clock: &dyn Clock,
        backend: &mut dyn DrawBackend,
    ) -> Result<()> {
        let Some(index) = self.frame_clock.tick(&self.frames, clock.now_ms()) else {
            return Ok(());
        };
        let Some(id) = frame_ref(&self.frames[index])? else {
            return Ok(());
        };
        self.sprite.draw(&id, &opts.with_flip(self.defaults), backend)
    }

    /// Union of `collider` over all frames, cached per collider name.
    pub fn collision_rect(&self, collider: &str) -> Result<TileRect> {
        self.colliders.get_or_compute(collider, || {
            let mut acc = TileRect::EMPTY;
            for frame in &self.frames {
                if let Some(id) = frame_ref(frame)? {
                    acc = acc.union(self.sprite.collision_rect(&id, collider)?);
                }
            }
            Ok(acc)
        })
    }
}

fn frame_ref(frame: &SpriteFrame) -> Result<Option<TileRef>> {
    if frame.id == NO_PART {
        return Ok(None);
    }
    u32::try_from(frame.id)
        .map(|id| Some(TileRef::ById(id)))
        .map_err(|_| Error::InvalidIdVariant {
            sprite: "sprite animation",
            id: frame.id.to_string(),
        })
}
