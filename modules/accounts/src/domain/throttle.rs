//! Fixed-window login throttle keyed by username.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct Bucket {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Counts failed login attempts per key within a fixed window; once the
/// limit is reached further attempts are refused until the window rolls
/// over. A successful login clears the bucket.
pub struct LoginThrottle {
    buckets: DashMap<String, Bucket>,
    max_attempts: u32,
    window: Duration,
}

impl LoginThrottle {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            buckets: DashMap::new(),
            max_attempts,
            window,
        }
    }

    /// Err(retry_after_secs) when the key is currently locked out.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        let now = Utc::now();
        if let Some(bucket) = self.buckets.get(key) {
            if bucket.reset_at > now && bucket.count >= self.max_attempts {
                let retry = (bucket.reset_at - now).num_seconds().max(1) as u64;
                return Err(retry);
            }
        }
        Ok(())
    }

    pub fn record_failure(&self, key: &str) {
        let now = Utc::now();
        let mut entry = self.buckets.entry(key.to_string()).or_insert(Bucket {
            count: 0,
            reset_at: now + self.window,
        });
        if entry.reset_at <= now {
            entry.count = 0;
            entry.reset_at = now + self.window;
        }
        entry.count += 1;
    }

    pub fn clear(&self, key: &str) {
        self.buckets.remove(key);
    }
}
