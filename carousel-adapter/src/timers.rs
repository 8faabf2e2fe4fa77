use alloc::vec::Vec;

/// Deferred work owned by a [`crate::Controller`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// End of the slide transition started by navigation `generation`.
    Settle { generation: u64 },
    /// `after_change` notification for a navigation that left `previous_index`.
    AfterChange { previous_index: usize },
    /// Silent clone-band correction, valid only while `generation` is still current.
    CorrectBoundary { generation: u64 },
    /// Second measurement pass after a resize.
    SettleGeometry,
    AutoPlay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub due_ms: u64,
    seq: u64,
    pub kind: TimerKind,
}

/// A small deadline queue. Timers fire in `(due_ms, scheduling order)` order.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.timers.push(Timer { due_ms, seq, kind });
    }

    /// Removes and returns the earliest timer due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Timer> {
        let (pos, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))?;
        Some(self.timers.swap_remove(pos))
    }

    pub fn cancel(&mut self, mut matches: impl FnMut(&TimerKind) -> bool) {
        self.timers.retain(|t| !matches(&t.kind));
    }

    pub fn contains(&self, mut matches: impl FnMut(&TimerKind) -> bool) -> bool {
        self.timers.iter().any(|t| matches(&t.kind))
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
