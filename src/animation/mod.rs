//! Frame timing shared by tile animations and class-level sprite animations.

mod clock;
mod collider;
mod player;
mod registry;
mod source;
mod state;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use collider::ColliderCache;
pub use player::AnimationPlayer;
pub use registry::AnimationRegistry;
pub use source::{
    AnimationFrame, AnimationKey, FramePart, RawAnimation, RawComplex, RawComplexFrame,
    RawDefaults, RawPart, RawSimple, RawTimed, RawTimedFrame, RawTimedFrames, SourceAnimation,
    NO_PART,
};
pub use state::{FrameClock, FrameDuration, FrameState};
