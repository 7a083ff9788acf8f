use std::sync::Arc;

use super::{Policy, PolicyFactory};

/// Always evacuates. Appended to an entry's manager to force it out of the
/// queue on the next eviction pass after an explicit cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelledPolicy;

impl CancelledPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for CancelledPolicy {
    fn evacuate(&self) -> bool {
        true
    }
}

pub fn cancelled_policy() -> PolicyFactory {
    Arc::new(|| -> Box<dyn Policy> { Box::new(CancelledPolicy::new()) })
}
