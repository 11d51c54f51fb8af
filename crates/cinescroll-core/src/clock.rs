use instant::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed: f64,
    pub delta: f64,
}

impl FrameTime {
    pub fn new(elapsed: f64, delta: f64) -> Self {
        Self { elapsed, delta }
    }
}

/// Elapsed/delta clock. Wall-clock driven via [`tick`](Self::tick) or fed
/// explicit timestamps via [`advance_to`](Self::advance_to).
#[derive(Clone, Debug)]
pub struct FrameClock {
    started: Instant,
    previous: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            previous: 0.0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = self.started.elapsed().as_secs_f64();
        self.advance_to(now)
    }

    /// Move to `elapsed` seconds. Time never runs backwards: an earlier
    /// timestamp yields a zero delta.
    pub fn advance_to(&mut self, elapsed: f64) -> FrameTime {
        let elapsed = elapsed.max(self.previous);
        let delta = elapsed - self.previous;
        self.previous = elapsed;
        FrameTime { elapsed, delta }
    }
}
