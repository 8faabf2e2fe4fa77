/// Admits at most one navigation per window; everything else inside the window is dropped.
///
/// The gate is clock-agnostic: callers pass a monotonic `now_ms`, and the window closes
/// once `now_ms` reaches `opened_at + window_ms`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrottleGate {
    window_ms: u64,
    engaged_until_ms: Option<u64>,
}

impl ThrottleGate {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            engaged_until_ms: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn set_window_ms(&mut self, window_ms: u64) {
        self.window_ms = window_ms;
    }

    pub fn is_engaged(&self, now_ms: u64) -> bool {
        self.engaged_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Returns `true` and engages the gate when the call may proceed.
    pub fn try_acquire(&mut self, now_ms: u64) -> bool {
        if self.is_engaged(now_ms) {
            ctrace!(now_ms, until = ?self.engaged_until_ms, "throttle: dropped");
            return false;
        }
        self.engaged_until_ms = Some(now_ms.saturating_add(self.window_ms));
        true
    }

    pub fn reset(&mut self) {
        self.engaged_until_ms = None;
    }
}
