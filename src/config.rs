use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Port the web server listens on
  pub port: u16,
  /// Number of top stories to display
  pub num_stories: usize,
  /// How long a fetched front page is served before it is considered expired
  pub cache_ttl_secs: u64,
  /// Optional directory for a daily rolling log file
  pub log_dir: Option<PathBuf>,
  pub hn: HnConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      port: 3000,
      num_stories: 30,
      cache_ttl_secs: 10,
      log_dir: None,
      hn: HnConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HnConfig {
  /// Base URL of the Hacker News item API
  pub api_url: String,
  /// Per-request timeout
  pub timeout_secs: u64,
}

impl Default for HnConfig {
  fn default() -> Self {
    Self {
      api_url: "https://hacker-news.firebaseio.com/v0/".to_string(),
      timeout_secs: 10,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./quiet-hn.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/quiet-hn/config.yaml
  ///
  /// Unlike an explicit path, a missing config file in the search locations
  /// is not an error: defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("quiet-hn.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("quiet-hn").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Invalid config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents).map_err(|e| eyre!("{}", e))?;
    config.validate()?;
    Ok(config)
  }

  /// Reject values the cache cannot run with.
  pub fn validate(&self) -> Result<()> {
    if self.cache_ttl_secs == 0 {
      return Err(eyre!("cache_ttl_secs must be greater than zero"));
    }
    if self.hn.timeout_secs == 0 {
      return Err(eyre!("hn.timeout_secs must be greater than zero"));
    }
    Ok(())
  }

  pub fn cache_ttl(&self) -> Duration {
    Duration::from_secs(self.cache_ttl_secs)
  }
}
