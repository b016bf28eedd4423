//! Cache layer that serializes refreshes of the front page.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::entry::CacheEntry;
use crate::hn::ItemSource;
use crate::pipeline::{self, PipelineError};

/// Front page cache in front of an [`ItemSource`].
///
/// Refreshes take `refreshing` for the whole fetch, so they never overlap.
/// The entry itself is only locked to clone or swap it, so reads never wait
/// on the network and only ever see a complete entry.
pub struct StoryCache<S> {
  source: Arc<S>,
  num_stories: usize,
  /// How long a refreshed entry stays fresh
  life: Duration,
  entry: RwLock<CacheEntry>,
  refreshing: Mutex<()>,
}

impl<S: ItemSource + 'static> StoryCache<S> {
  /// Create a cache whose first read is always a miss.
  pub fn new(source: Arc<S>, num_stories: usize, life: Duration) -> Self {
    Self {
      source,
      num_stories,
      life,
      entry: RwLock::new(CacheEntry::expired(Instant::now())),
      refreshing: Mutex::new(()),
    }
  }

  /// Current stories, refreshing synchronously if the entry has expired.
  ///
  /// A failed refresh is returned to the caller; the stored entry is kept.
  pub async fn get_stories(&self) -> Result<CacheEntry, PipelineError> {
    {
      let entry = self.entry.read().await;
      if entry.is_fresh(Instant::now()) {
        return Ok(entry.clone());
      }
    }

    self.refresh().await
  }

  /// Fetch the front page and replace the entry on success.
  ///
  /// Waits for any refresh already in flight, then performs its own fetch.
  pub async fn refresh(&self) -> Result<CacheEntry, PipelineError> {
    let _refreshing = self.refreshing.lock().await;
    let started = Instant::now();

    let stories = pipeline::fetch_top_stories(Arc::clone(&self.source), self.num_stories).await?;

    let fresh = CacheEntry {
      stories: Arc::new(stories),
      expires_at: Instant::now() + self.life,
      refreshed_at: Some(Utc::now()),
    };
    *self.entry.write().await = fresh.clone();
    debug!(
      stories = fresh.stories.len(),
      elapsed_ms = started.elapsed().as_millis() as u64,
      "Refreshed top stories"
    );

    Ok(fresh)
  }

  /// Refresh every `life / 2` for the rest of the process.
  ///
  /// The first refresh runs immediately. Failures are logged and the stale
  /// entry keeps being served.
  pub fn spawn_refresher(self: &Arc<Self>) -> JoinHandle<()> {
    let cache = Arc::clone(self);
    let period = (self.life / 2).max(Duration::from_millis(1));

    tokio::spawn(async move {
      let mut ticker = tokio::time::interval(period);
      ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

      loop {
        ticker.tick().await;
        if let Err(e) = cache.refresh().await {
          warn!(error = %e, "Background refresh failed, serving cached stories");
        }
      }
    })
  }

  #[cfg(test)]
  async fn current(&self) -> CacheEntry {
    self.entry.read().await.clone()
  }
}
