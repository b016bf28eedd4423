//! Story filtering and display enrichment.

use url::Url;

use super::types::{DisplayItem, RawItem};

/// Only externally linked stories are shown: comments, jobs, polls and
/// self-posts without a URL are not.
pub fn is_qualifying_story(item: &RawItem) -> bool {
  item.kind == "story" && !item.url.is_empty()
}

/// Attach the display host. An unparsable URL yields an empty host.
pub fn enrich(item: RawItem) -> DisplayItem {
  let host = display_host(&item.url).unwrap_or_default();
  DisplayItem::new(item, host)
}

fn display_host(raw: &str) -> Option<String> {
  let url = Url::parse(raw).ok()?;
  let host = url.host_str()?;
  // Single prefix only: "www.www.x" keeps its inner "www."
  Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
