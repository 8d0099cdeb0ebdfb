use std::cell::Cell;
use std::time::Instant;

/// Milliseconds on a clock's own timeline.
pub type Millis = u64;

/// Source of "now" for frame selection.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        ManualClock {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}
