/// Nominal frame interval in milliseconds (60 Hz).
pub const NOMINAL_FRAME_MS: f64 = 16.67;

/// Variable-step frame clock.
/// Converts host timestamps into deltas measured in nominal frames, so that
/// 1.0 means "one 60 Hz frame elapsed" regardless of the display rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous tick (ms), `None` until the first tick.
    last_ms: Option<f64>,
    /// Most recent timestamp seen (ms).
    now_ms: f64,
    /// Upper bound on a single delta, in nominal frames.
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_ms: None,
            now_ms: 0.0,
            max_delta,
        }
    }

    /// Record a new timestamp and return the clamped delta in frame units.
    /// The first tick only records the timestamp and returns 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => ((now_ms - last) / NOMINAL_FRAME_MS) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.now_ms = now_ms;
        // Cap to keep the integration stable after a backgrounded tab.
        delta.clamp(0.0, self.max_delta)
    }

    /// Timestamp of the latest tick (ms).
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Wall-clock seconds of the latest tick.
    pub fn seconds(&self) -> f64 {
        self.now_ms * 0.001
    }
}
