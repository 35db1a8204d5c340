use crate::foundation::core::Millis;
use crate::foundation::random::RandomSource;

/// Pauses a looping animation for a random whole number of seconds after each iteration.
///
/// While a pause is pending, further iteration reports are ignored so overlapping resume timers
/// never stack up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PulseController {
    min_secs: u32,
    max_secs: u32,
    paused: bool,
}

impl PulseController {
    /// Longest pause a scene may configure, in seconds.
    pub const MAX_PAUSE_SECS: u32 = 86_400;

    /// Controller pausing for `min_secs..=max_secs` seconds. Bounds are swapped if reversed.
    pub fn new(min_secs: u32, max_secs: u32) -> Self {
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
            paused: false,
        }
    }

    /// Inclusive pause bounds in seconds.
    pub fn bounds(&self) -> (u32, u32) {
        (self.min_secs, self.max_secs)
    }

    /// `true` while a pause is in effect.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Draw a pause length: `floor(r * (max - min + 1)) + min` whole seconds.
    pub fn pause_duration(&self, rng: &mut dyn RandomSource) -> Millis {
        let span = (u64::from(self.max_secs) - u64::from(self.min_secs) + 1) as f64;
        let drawn = (rng.next_f64() * span).floor() as u64;
        let secs = u64::from(self.min_secs)
            .saturating_add(drawn)
            .min(u64::from(self.max_secs));
        Millis(secs.saturating_mul(1000))
    }

    /// Handle one animation iteration. Returns the pause to apply, or `None` if already paused.
    pub fn on_iteration(&mut self, rng: &mut dyn RandomSource) -> Option<Millis> {
        if self.paused {
            return None;
        }
        self.paused = true;
        let pause = self.pause_duration(rng);
        tracing::debug!(pause_ms = pause.0, "pulse paused");
        Some(pause)
    }

    /// End the current pause.
    pub fn resume(&mut self) {
        self.paused = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/pulse.rs"]
mod tests;
