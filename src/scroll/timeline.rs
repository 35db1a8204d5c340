use crate::animation::ease::Ease;
use crate::foundation::core::Millis;

/// Scroll-linked progress that trails its scroll target by a fixed catch-up time.
///
/// Each new target restarts a `power3.out` catch-up from the currently displayed value, so
/// fast scrolling never jumps and the playhead lands exactly on the target after `lag`.
#[derive(Clone, Debug)]
pub struct ScrubbedProgress {
    lag: Millis,
    current: f64,
    from: f64,
    target: f64,
    elapsed: Millis,
}

impl ScrubbedProgress {
    /// New playhead at progress 0. A zero `lag` follows the target immediately.
    pub fn new(lag: Millis) -> Self {
        Self {
            lag,
            current: 0.0,
            from: 0.0,
            target: 0.0,
            elapsed: Millis::ZERO,
        }
    }

    /// Displayed progress.
    pub fn value(&self) -> f64 {
        self.current
    }

    /// Progress the playhead is heading toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// `true` while the displayed value trails the target.
    pub fn is_settling(&self) -> bool {
        self.current != self.target
    }

    /// Jump straight to `progress` without smoothing.
    pub fn snap(&mut self, progress: f64) {
        self.current = progress;
        self.from = progress;
        self.target = progress;
        self.elapsed = Millis::ZERO;
    }

    /// Retarget the playhead.
    pub fn set_target(&mut self, progress: f64) {
        if progress == self.target {
            return;
        }
        if self.lag.0 == 0 {
            self.snap(progress);
            return;
        }
        self.from = self.current;
        self.target = progress;
        self.elapsed = Millis::ZERO;
    }

    /// Advance by `dt`. Returns the new displayed value when it changed.
    pub fn step(&mut self, dt: Millis) -> Option<f64> {
        if !self.is_settling() {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        let t = if self.lag.0 == 0 {
            1.0
        } else {
            self.elapsed.0 as f64 / self.lag.0 as f64
        };
        self.current = if t >= 1.0 {
            self.target
        } else {
            self.from + (self.target - self.from) * Ease::OutQuart.apply(t)
        };
        Some(self.current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/timeline.rs"]
mod tests;
