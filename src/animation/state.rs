use super::clock::Millis;

/// Anything with a display time.
pub trait FrameDuration {
    fn duration_ms(&self) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    #[default]
    Uninitialized,
    Playing { frame_index: usize, due_at: Millis },
}

/// Time-driven cursor over a frame sequence.
///
/// Each [`FrameClock::tick`] advances at most one frame, so a late tick plays
/// slower instead of skipping frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    state: FrameState,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn current(&self) -> Option<usize> {
        match self.state {
            FrameState::Uninitialized => None,
            FrameState::Playing { frame_index, .. } => Some(frame_index),
        }
    }

    pub fn reset(&mut self) {
        self.state = FrameState::Uninitialized;
    }

    /// Active frame index at `now`; `None` only for an empty sequence.
    pub fn tick<F: FrameDuration>(&mut self, frames: &[F], now: Millis) -> Option<usize> {
        if frames.is_empty() {
            self.state = FrameState::Uninitialized;
            return None;
        }

        let next = match self.state {
            FrameState::Playing { frame_index, due_at } if frame_index < frames.len() => {
                if now < due_at {
                    return Some(frame_index);
                }
                (frame_index + 1) % frames.len()
            }
            // first query, or the sequence shrank under us
            _ => 0,
        };

        self.state = FrameState::Playing {
            frame_index: next,
            due_at: now + Millis::from(frames[next].duration_ms()),
        };
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct F(u32);

    impl FrameDuration for F {
        fn duration_ms(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn first_query_starts_at_frame_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.state(), FrameState::Uninitialized);
        assert_eq!(clock.tick(&[F(100), F(50)], 1_000), Some(0));
        assert_eq!(
            clock.state(),
            FrameState::Playing { frame_index: 0, due_at: 1_100 }
        );
    }

    #[test]
    fn advances_once_per_query_and_wraps() {
        let frames = [F(100), F(50), F(10)];
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(&frames, 0), Some(0));
        assert_eq!(clock.tick(&frames, 99), Some(0));
        assert_eq!(clock.tick(&frames, 100), Some(1));
        // far past every deadline: still a single step
        assert_eq!(clock.tick(&frames, 10_000), Some(2));
        assert_eq!(clock.tick(&frames, 10_010), Some(0));
    }

    #[test]
    fn empty_sequence_has_no_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick::<F>(&[], 0), None);
        assert_eq!(clock.current(), None);
    }

    #[test]
    fn shrunken_sequence_restarts() {
        let mut clock = FrameClock::new();
        let long = [F(1), F(1), F(1)];
        clock.tick(&long, 0);
        clock.tick(&long, 1);
        clock.tick(&long, 2);
        assert_eq!(clock.current(), Some(2));
        assert_eq!(clock.tick(&[F(5)], 3), Some(0));
    }
}
