//! Concurrent fetch of the ranked front page.
//!
//! Ids are listed once, then a slightly oversized window of items is fetched
//! in parallel. Each task reports its window index over one channel so the
//! page can be put back into upstream rank order after out-of-order
//! completion.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::hn::story::{enrich, is_qualifying_story};
use crate::hn::{DisplayItem, ItemSource, UpstreamError};

/// The front page could not be built at all.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("failed to list top stories: {0}")]
  TopStories(#[source] UpstreamError),
}

/// One task's outcome; `story` is `None` when the item failed or was filtered.
struct Report {
  index: usize,
  story: Option<DisplayItem>,
}

/// Candidates to fetch for `count` results, before capping at the list length.
fn oversample(count: usize) -> usize {
  count.saturating_mul(5) / 4
}

/// Fetch up to `count` qualifying stories in upstream rank order.
///
/// Per-item failures are dropped, not surfaced; only a failed id listing
/// fails the call. Fewer than `count` results is a valid outcome.
pub async fn fetch_top_stories<S>(
  source: Arc<S>,
  count: usize,
) -> Result<Vec<DisplayItem>, PipelineError>
where
  S: ItemSource + 'static,
{
  if count == 0 {
    return Ok(Vec::new());
  }

  let ids = source
    .top_story_ids()
    .await
    .map_err(PipelineError::TopStories)?;

  let wanted = oversample(count).min(ids.len());
  let (tx, mut rx) = mpsc::unbounded_channel();

  for (index, &id) in ids[..wanted].iter().enumerate() {
    let source = Arc::clone(&source);
    let tx = tx.clone();

    tokio::spawn(async move {
      let story = match source.item(id).await {
        Ok(item) if is_qualifying_story(&item) => Some(enrich(item)),
        Ok(_) => None,
        Err(e) => {
          debug!(id, error = %e, "Dropping item that failed to load");
          None
        }
      };
      // The receiver is gone once the quota was met
      let _ = tx.send(Report { index, story });
    });
  }
  // Only task senders remain, so the channel closes after the last report
  drop(tx);

  // No more than `wanted` reports can arrive
  let mut collected = Vec::with_capacity(wanted);
  while collected.len() < count {
    match rx.recv().await {
      Some(Report {
        index,
        story: Some(story),
      }) => collected.push((index, story)),
      Some(_) => {}
      None => break,
    }
  }

  collected.sort_by_key(|(index, _)| *index);
  collected.truncate(count);

  Ok(collected.into_iter().map(|(_, story)| story).collect())
}
