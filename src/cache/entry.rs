use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::time::Instant;

use crate::hn::DisplayItem;

/// The last successfully fetched front page.
///
/// Always replaced as a whole, so `stories` and `expires_at` come from the
/// same refresh.
#[derive(Debug, Clone)]
pub struct CacheEntry {
  /// Stories in upstream rank order
  pub stories: Arc<Vec<DisplayItem>>,
  pub expires_at: Instant,
  /// Wall-clock time of the refresh that produced `stories`, for display
  pub refreshed_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
  /// An empty entry that is already expired at `now`.
  pub fn expired(now: Instant) -> Self {
    Self {
      stories: Arc::new(Vec::new()),
      expires_at: now,
      refreshed_at: None,
    }
  }

  pub fn is_fresh(&self, now: Instant) -> bool {
    now < self.expires_at
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[test]
  fn test_expired_entry_is_not_fresh() {
    let now = Instant::now();
    let entry = CacheEntry::expired(now);
    assert!(!entry.is_fresh(now));
    assert!(entry.stories.is_empty());
    assert!(entry.refreshed_at.is_none());
  }

  #[test]
  fn test_fresh_until_expiry() {
    let now = Instant::now();
    let entry = CacheEntry {
      stories: Arc::new(Vec::new()),
      expires_at: now + Duration::from_secs(10),
      refreshed_at: Some(Utc::now()),
    };
    assert!(entry.is_fresh(now));
    assert!(entry.is_fresh(now + Duration::from_secs(9)));
    assert!(!entry.is_fresh(now + Duration::from_secs(10)));
  }
}
