use crate::foundation::core::Millis;
use crate::host::stage::World;
use std::fmt;

/// Handle to a scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

pub(crate) type TimerCallback = Box<dyn FnOnce(&mut World)>;

struct Timer {
    id: TimerId,
    due: Millis,
    callback: TimerCallback,
}

/// Fire-and-forget delayed callbacks, ordered by due time then scheduling order.
#[derive(Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<Timer>,
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.pending.len())
            .field("next_due", &self.next_due())
            .finish()
    }
}

impl TimerQueue {
    pub(crate) fn schedule(&mut self, due: Millis, callback: TimerCallback) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer { id, due, callback });
        id
    }

    /// Drop a pending callback. Returns `false` when it already fired or never existed.
    pub(crate) fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Number of callbacks waiting to fire.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// `true` when `id` has not fired or been cancelled yet.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    /// Due time of the earliest pending callback.
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.iter().map(|t| t.due).min()
    }

    /// Remove every callback due at or before `now`, in firing order.
    pub(crate) fn take_due(&mut self, now: Millis) -> Vec<(TimerId, TimerCallback)> {
        let (mut due, rest): (Vec<Timer>, Vec<Timer>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|t| t.due <= now);
        self.pending = rest;
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| (t.id, t.callback)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/timers.rs"]
mod tests;
