use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use std::time::Duration;

use crate::cache::CacheEntry;
use crate::hn::DisplayItem;

const STYLE: &str = "body { padding: 20px; font-family: Verdana, Geneva, sans-serif; }\n\
  .page { max-width: 900px; margin: 0 auto; }\n\
  li { padding: 6px 0; }\n\
  a { color: #222; text-decoration: none; }\n\
  .host, .meta, footer { color: #888; font-size: 0.85em; }";

/// Render the front page as a full HTML document.
pub fn page(entry: &CacheEntry, elapsed: Duration) -> String {
  let mut html = String::with_capacity(1024 + entry.stories.len() * 256);

  html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
  html.push_str("<title>Quiet Hacker News</title>\n");
  let _ = writeln!(html, "<style>\n{}\n</style>", STYLE);
  html.push_str("</head>\n<body>\n<div class=\"page\">\n<h1>Quiet Hacker News</h1>\n<ol>\n");

  for story in entry.stories.iter() {
    story_item(&mut html, story);
  }

  html.push_str("</ol>\n<footer>\n");
  let _ = write!(html, "<p>This page was rendered in {:?}", elapsed);
  if let Some(refreshed_at) = entry.refreshed_at {
    let _ = write!(
      html,
      ", stories fetched at {}",
      refreshed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
  }
  html.push_str("</p>\n</footer>\n</div>\n</body>\n</html>\n");

  html
}

fn story_item(html: &mut String, story: &DisplayItem) {
  let item = story.item();
  let _ = write!(
    html,
    "<li id=\"story-{}\"><a href=\"{}\">{}</a>",
    story.id(),
    encode_double_quoted_attribute(story.url()),
    encode_text(item.title())
  );
  if !story.host().is_empty() {
    let _ = write!(
      html,
      " <span class=\"host\">({})</span>",
      encode_text(story.host())
    );
  }

  let mut meta = Vec::new();
  if let Some(score) = item.score() {
    meta.push(format!("{} points", score));
  }
  if !item.by().is_empty() {
    meta.push(format!("by {}", encode_text(item.by())));
  }
  if let Some(comments) = item.comments() {
    meta.push(format!("{} comments", comments));
  }
  if !meta.is_empty() {
    let _ = write!(html, "<br><span class=\"meta\">{}</span>", meta.join(" | "));
  }

  html.push_str("</li>\n");
}
