use super::Policy;

/// OR-combinator over an entry's eviction policies.
///
/// Policies are evaluated in insertion order with short-circuit, so the
/// answer is deterministic for tests. Appending a policy can only move the
/// manager toward "evictable", never back. Mutation is guarded by the
/// owning queue's lock, not internally.
pub struct PolicyManager {
    policies: Vec<Box<dyn Policy>>,
}

impl PolicyManager {
    pub fn new(policies: Vec<Box<dyn Policy>>) -> Self {
        Self { policies }
    }

    /// Returns true if any member policy wants the entry evacuated.
    pub fn evacuate(&self) -> bool {
        self.policies.iter().any(|p| p.evacuate())
    }

    /// Appends a policy at the end of the evaluation order.
    pub fn add_policy(&mut self, policy: Box<dyn Policy>) {
        self.policies.push(policy);
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl std::fmt::Debug for PolicyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyManager")
            .field("policies", &self.policies.len())
            .finish()
    }
}
