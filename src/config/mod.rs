use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::Path};

use crate::core::queue::policies::{time_policy, PolicyFactory};
use crate::core::queue::{Direction, Queue};

/// Settings for one policy-driven queue instance.
#[derive(Debug, Deserialize, Clone)]
pub struct QueueSettings {
    pub direction: Direction,
    pub capacity: usize,
    /// When set, every entry gets a time policy with this ttl.
    pub default_ttl_ms: Option<u64>,
    /// Polling interval of the `pop_wait` bridge; omitted = built-in default.
    pub poll_interval_ms: Option<u64>,
}

impl QueueSettings {
    /// Builds a queue from these settings, wiring `default_ttl_ms` into a
    /// time-policy factory applied to every new entry.
    pub fn build<T: Clone + Send + 'static>(&self) -> Queue<T> {
        let mut factories: Vec<PolicyFactory> = Vec::new();
        if let Some(ttl_ms) = self.default_ttl_ms {
            factories.push(time_policy(Duration::from_millis(ttl_ms)));
        }
        let queue = Queue::with_policies(self.direction, self.capacity, factories);
        match self.poll_interval_ms {
            Some(interval_ms) => queue.with_poll_interval(Duration::from_millis(interval_ms)),
            None => queue,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub queue: QueueSettings,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, anyhow::Error> {
    let raw: String = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)?;
    Ok(config)
}
