//! Inactivity timeout, independent of the navigation mode.

/// Inactivity before the device locks and sleeps.
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 3 * 60 * 1000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdleStatus {
    Active,
    /// Reported once per idle period.
    Expired,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IdleTracker {
    last_activity_ms: u64,
    timeout_ms: u64,
    fired: bool,
}

impl IdleTracker {
    pub const fn new(timeout_ms: u64, now_ms: u64) -> Self {
        Self {
            last_activity_ms: now_ms,
            timeout_ms,
            fired: false,
        }
    }

    pub fn record_activity(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
        self.fired = false;
    }

    pub fn poll(&mut self, now_ms: u64) -> IdleStatus {
        if self.fired {
            return IdleStatus::Active;
        }
        if now_ms.saturating_sub(self.last_activity_ms) > self.timeout_ms {
            self.fired = true;
            return IdleStatus::Expired;
        }
        IdleStatus::Active
    }

    pub const fn idle_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms)
    }
}
