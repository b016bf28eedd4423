use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::HnConfig;

use super::types::RawItem;

/// A single upstream call failed.
#[derive(Debug, Error)]
pub enum UpstreamError {
  #[error("request to {url} failed: {source}")]
  Request {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("{url} returned {status}")]
  Status { url: String, status: StatusCode },
  #[error("failed to decode response from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("item {0} does not exist")]
  Missing(u64),
}

/// Where ranked ids and item bodies come from.
///
/// Implementations must be safe to call from many tasks at once.
#[async_trait]
pub trait ItemSource: Send + Sync {
  /// Top story ids in upstream rank order
  async fn top_story_ids(&self) -> Result<Vec<u64>, UpstreamError>;

  /// A single item by id
  async fn item(&self, id: u64) -> Result<RawItem, UpstreamError>;
}

/// Hacker News API client
#[derive(Clone)]
pub struct HnClient {
  http: reqwest::Client,
  base_url: Url,
}

impl HnClient {
  pub fn new(config: &HnConfig) -> Result<Self> {
    // Without the trailing slash, joins would drop the "/v0" segment
    let mut base = config.api_url.clone();
    if !base.ends_with('/') {
      base.push('/');
    }
    let base_url =
      Url::parse(&base).map_err(|e| eyre!("Invalid Hacker News API URL {}: {}", base, e))?;

    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, base_url })
  }

  fn endpoint(&self, path: &str) -> String {
    self
      .base_url
      .join(path)
      .map(String::from)
      .unwrap_or_else(|_| format!("{}{}", self.base_url, path))
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
    let url = self.endpoint(path);

    let response = self
      .http
      .get(&url)
      .send()
      .await
      .map_err(|source| UpstreamError::Request {
        url: url.clone(),
        source,
      })?;

    let status = response.status();
    if !status.is_success() {
      return Err(UpstreamError::Status { url, status });
    }

    response
      .json::<T>()
      .await
      .map_err(|source| UpstreamError::Decode { url, source })
  }
}

#[async_trait]
impl ItemSource for HnClient {
  async fn top_story_ids(&self) -> Result<Vec<u64>, UpstreamError> {
    self.get_json("topstories.json").await
  }

  async fn item(&self, id: u64) -> Result<RawItem, UpstreamError> {
    // Unknown ids come back as a JSON null
    let item: Option<RawItem> = self.get_json(&format!("item/{}.json", id)).await?;
    item.ok_or(UpstreamError::Missing(id))
  }
}
