//! Short-lived cache of the ranked front page.
//!
//! This module provides:
//! - A single cache entry, replaced only by a complete successful refresh
//! - Cache-first reads that refresh synchronously once the entry expires
//! - A background refresher running at half the entry lifetime
//! - Stale serving when a background refresh fails

mod entry;
mod layer;

pub use entry::CacheEntry;
pub use layer::StoryCache;
