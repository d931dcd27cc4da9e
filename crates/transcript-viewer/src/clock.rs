//! Playback clock capability.

use tokio::time::Instant;

/// Source of the current playback position.
pub trait PlaybackClock: Send {
    /// Current position in seconds, or None until the player is ready.
    fn current_time(&self) -> Option<f64>;

    /// Jump to `seconds`.
    fn seek_to(&mut self, seconds: f64);

    fn is_ready(&self) -> bool;
}

/// Clock that advances with wall time scaled by a playback rate.
///
/// Stands in for a video player: it reports nothing until started, then
/// counts from its start offset.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    origin: Option<Instant>,
    offset: f64,
    rate: f64,
}

impl SimulatedClock {
    pub fn new(start_at: f64, rate: f64) -> Self {
        Self {
            origin: None,
            offset: start_at.max(0.0),
            rate,
        }
    }

    /// Begin playback.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.origin.is_none() {
            self.origin = Some(now);
        }
    }

    /// Position at `now`.
    pub fn time_at(&self, now: Instant) -> Option<f64> {
        let origin = self.origin?;
        let elapsed = now.saturating_duration_since(origin).as_secs_f64();
        Some(self.offset + elapsed * self.rate)
    }

    fn seek_at(&mut self, seconds: f64, now: Instant) {
        self.offset = seconds.max(0.0);
        if self.origin.is_some() {
            self.origin = Some(now);
        }
    }
}

impl PlaybackClock for SimulatedClock {
    fn current_time(&self) -> Option<f64> {
        self.time_at(Instant::now())
    }

    fn seek_to(&mut self, seconds: f64) {
        self.seek_at(seconds, Instant::now());
    }

    fn is_ready(&self) -> bool {
        self.origin.is_some()
    }
}
