//! Scriptable in-memory item source for tests.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::client::{ItemSource, UpstreamError};
use super::types::RawItem;

#[derive(Clone)]
enum Scripted {
  Item(RawItem),
  Fail,
}

pub struct FakeSource {
  ids: Vec<u64>,
  items: HashMap<u64, Scripted>,
  delays: HashMap<u64, Duration>,
  list_delay: Duration,
  fail_list: AtomicBool,
  /// Bumped on every list call and stamped into item titles as "gen N"
  generation: AtomicU64,
  list_calls: AtomicUsize,
  item_calls: AtomicUsize,
  lists_in_flight: AtomicUsize,
  max_lists_in_flight: AtomicUsize,
}

impl FakeSource {
  pub fn new(ids: &[u64]) -> Self {
    Self {
      ids: ids.to_vec(),
      items: HashMap::new(),
      delays: HashMap::new(),
      list_delay: Duration::ZERO,
      fail_list: AtomicBool::new(false),
      generation: AtomicU64::new(0),
      list_calls: AtomicUsize::new(0),
      item_calls: AtomicUsize::new(0),
      lists_in_flight: AtomicUsize::new(0),
      max_lists_in_flight: AtomicUsize::new(0),
    }
  }

  /// Every id becomes a story linking to https://www.site{id}.com/{id}
  pub fn all_stories(ids: &[u64]) -> Self {
    ids.iter().fold(Self::new(ids), |source, &id| {
      source.story(id, &format!("https://www.site{}.com/{}", id, id))
    })
  }

  pub fn story(self, id: u64, url: &str) -> Self {
    self.with_item(id, "story", url)
  }

  pub fn with_item(mut self, id: u64, kind: &str, url: &str) -> Self {
    let mut extra = Map::new();
    extra.insert("title".to_string(), json!(format!("Item {}", id)));
    extra.insert("by".to_string(), json!("pg"));
    extra.insert("score".to_string(), json!(id));
    let item = RawItem {
      id,
      kind: kind.to_string(),
      url: url.to_string(),
      extra,
    };
    self.items.insert(id, Scripted::Item(item));
    self
  }

  pub fn failing(mut self, id: u64) -> Self {
    self.items.insert(id, Scripted::Fail);
    self
  }

  pub fn delay(mut self, id: u64, delay: Duration) -> Self {
    self.delays.insert(id, delay);
    self
  }

  pub fn list_delay(mut self, delay: Duration) -> Self {
    self.list_delay = delay;
    self
  }

  pub fn set_list_failure(&self, fail: bool) {
    self.fail_list.store(fail, Ordering::SeqCst);
  }

  pub fn list_calls(&self) -> usize {
    self.list_calls.load(Ordering::SeqCst)
  }

  pub fn item_calls(&self) -> usize {
    self.item_calls.load(Ordering::SeqCst)
  }

  pub fn max_lists_in_flight(&self) -> usize {
    self.max_lists_in_flight.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ItemSource for FakeSource {
  async fn top_story_ids(&self) -> Result<Vec<u64>, UpstreamError> {
    self.list_calls.fetch_add(1, Ordering::SeqCst);
    let in_flight = self.lists_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.max_lists_in_flight.fetch_max(in_flight, Ordering::SeqCst);

    if !self.list_delay.is_zero() {
      tokio::time::sleep(self.list_delay).await;
    }
    self.lists_in_flight.fetch_sub(1, Ordering::SeqCst);

    if self.fail_list.load(Ordering::SeqCst) {
      return Err(UpstreamError::Missing(0));
    }
    self.generation.fetch_add(1, Ordering::SeqCst);
    Ok(self.ids.clone())
  }

  async fn item(&self, id: u64) -> Result<RawItem, UpstreamError> {
    self.item_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = self.delays.get(&id) {
      tokio::time::sleep(*delay).await;
    }

    match self.items.get(&id).cloned() {
      Some(Scripted::Item(mut item)) => {
        let generation = self.generation.load(Ordering::SeqCst);
        item.extra.insert(
          "title".to_string(),
          Value::String(format!("Item {} gen {}", id, generation)),
        );
        Ok(item)
      }
      Some(Scripted::Fail) | None => Err(UpstreamError::Missing(id)),
    }
  }
}
