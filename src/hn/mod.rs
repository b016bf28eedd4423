//! Hacker News item API: client, item types, and story enrichment.

pub mod client;
pub mod story;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use client::{HnClient, ItemSource, UpstreamError};
pub use types::{DisplayItem, RawItem};
