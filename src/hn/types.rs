use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An item as returned by the Hacker News item API.
///
/// Only the fields the pipeline acts on are typed. Everything else
/// (`title`, `by`, `score`, `kids`, ...) is kept verbatim in `extra` and
/// written back out unchanged on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
  pub id: u64,
  #[serde(rename = "type", default)]
  pub kind: String,
  #[serde(default)]
  pub url: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl RawItem {
  pub fn title(&self) -> &str {
    self.extra_str("title")
  }

  pub fn by(&self) -> &str {
    self.extra_str("by")
  }

  pub fn score(&self) -> Option<u64> {
    self.extra.get("score").and_then(Value::as_u64)
  }

  /// Total comment count (`descendants` upstream)
  pub fn comments(&self) -> Option<u64> {
    self.extra.get("descendants").and_then(Value::as_u64)
  }

  fn extra_str(&self, key: &str) -> &str {
    self
      .extra
      .get(key)
      .and_then(Value::as_str)
      .unwrap_or_default()
  }
}

/// A qualifying story ready for display.
///
/// Built only by [`super::story::enrich`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
  #[serde(flatten)]
  item: RawItem,
  host: String,
}

impl DisplayItem {
  pub(super) fn new(item: RawItem, host: String) -> Self {
    Self { item, host }
  }

  pub fn item(&self) -> &RawItem {
    &self.item
  }

  pub fn id(&self) -> u64 {
    self.item.id
  }

  pub fn url(&self) -> &str {
    &self.item.url
  }

  /// Hostname of the story URL without a leading `www.`; empty if unknown
  pub fn host(&self) -> &str {
    &self.host
  }
}
