use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{Policy, PolicyFactory};

/// Evacuates an entry once a duration has elapsed.
///
/// The deadline is captured at construction time against the monotonic
/// clock, so the answer can only move from false to true.
#[derive(Debug, Clone)]
pub struct TimePolicy {
    expire_at: Instant,
}

impl TimePolicy {
    pub fn new(ttl: Duration) -> Self {
        Self {
            expire_at: Instant::now() + ttl,
        }
    }
}

impl Policy for TimePolicy {
    fn evacuate(&self) -> bool {
        Instant::now() > self.expire_at
    }
}

/// Factory applying a fresh [`TimePolicy`] with the given ttl to every new
/// entry, so per-entry expiry clocks stay independent.
pub fn time_policy(ttl: Duration) -> PolicyFactory {
    Arc::new(move || -> Box<dyn Policy> { Box::new(TimePolicy::new(ttl)) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn expires_after_ttl() {
        let policy = TimePolicy::new(Duration::from_millis(20));
        assert!(!policy.evacuate());
        thread::sleep(Duration::from_millis(30));
        assert!(policy.evacuate());
    }

    #[test]
    fn factory_gives_independent_clocks() {
        let factory = time_policy(Duration::from_millis(20));
        let early = factory();
        thread::sleep(Duration::from_millis(30));
        let late = factory();
        assert!(early.evacuate());
        assert!(!late.evacuate());
    }
}
