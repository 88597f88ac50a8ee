//! Gravity timer
//!
//! A single pending deadline owned by the game. The host loop polls it with
//! the current time; arming always replaces the previous deadline, so there is
//! never more than one tick outstanding.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct GravityTimer {
    deadline: Option<Instant>,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending tick and schedule one `delay` after `now`
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.cancel();
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the pending tick, zero if overdue
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consume the pending tick if it is due. Returns true at most once per arm.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = GravityTimer::new();
        assert!(!timer.fire(start));

        timer.arm(start, Duration::from_millis(100));
        assert!(!timer.fire(start + Duration::from_millis(99)));
        assert!(timer.fire(start + Duration::from_millis(100)));
        assert!(!timer.fire(start + Duration::from_millis(500)));
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let start = Instant::now();
        let mut timer = GravityTimer::new();
        timer.arm(start, Duration::from_millis(100));
        timer.arm(start + Duration::from_millis(80), Duration::from_millis(100));
        assert!(!timer.fire(start + Duration::from_millis(120)));
        assert!(timer.fire(start + Duration::from_millis(180)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = GravityTimer::new();
        timer.arm(start, Duration::ZERO);
        timer.cancel();
        assert!(!timer.fire(start + Duration::from_secs(1)));
        assert_eq!(timer.remaining(start), None);
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let mut timer = GravityTimer::new();
        timer.arm(start, Duration::from_millis(100));
        assert_eq!(timer.remaining(start + Duration::from_millis(30)), Some(Duration::from_millis(70)));
        assert_eq!(timer.remaining(start + Duration::from_millis(300)), Some(Duration::ZERO));
    }
}
