//! Stored entry with an absolute expiration time.

use std::time::{Duration, Instant};

// == Entry ==
/// A value held by [`MemoryStore`](super::MemoryStore) together with the
/// instant it stops being visible.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value
    pub value: String,
    /// Expiration instant; the entry is gone once `now >= expires_at`
    pub expires_at: Instant,
}

impl Entry {
    /// Creates an entry expiring `ttl` from now.
    pub fn new(value: impl Into<String>, ttl: Duration) -> Self {
        Self {
            value: value.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired as soon as the current time
    /// reaches its expiration instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = Entry::new("clip", Duration::from_secs(600));
        assert_eq!(entry.value, "clip");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = Entry::new("clip", Duration::from_millis(50));
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expires_after_ttl() {
        let start = Instant::now();
        let entry = Entry::new("clip", Duration::from_secs(10));
        assert!(!entry.is_expired_at(start + Duration::from_secs(9)));
        assert!(entry.is_expired_at(start + Duration::from_secs(11)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = Entry {
            value: "clip".to_string(),
            expires_at: now,
        };
        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
    }
}
