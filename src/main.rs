mod cache;
mod config;
mod hn;
mod pipeline;
mod render;
mod server;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::StoryCache;
use crate::hn::HnClient;

#[derive(Parser, Debug)]
#[command(name = "quiet-hn")]
#[command(about = "A quiet, cached front page of Hacker News top stories")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/quiet-hn/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// The port to start the web server on [default: 3000]
  #[arg(short, long)]
  port: Option<u16>,

  /// The number of top stories to display [default: 30]
  #[arg(short, long)]
  num_stories: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let config = config::Config::load(args.config.as_deref())?;

  // Command line wins over the config file
  let config = config::Config {
    port: args.port.unwrap_or(config.port),
    num_stories: args.num_stories.unwrap_or(config.num_stories),
    ..config
  };

  let _log_guard = init_tracing(config.log_dir.as_deref());

  let client = HnClient::new(&config.hn)?;
  let cache = Arc::new(StoryCache::new(
    Arc::new(client),
    config.num_stories,
    config.cache_ttl(),
  ));
  cache.spawn_refresher();

  let listener = TcpListener::bind(("0.0.0.0", config.port))
    .await
    .map_err(|e| eyre!("Failed to bind port {}: {}", config.port, e))?;

  info!(
    port = config.port,
    num_stories = config.num_stories,
    cache_ttl_secs = config.cache_ttl_secs,
    "Serving top stories"
  );

  server::serve(listener, server::router(cache)).await
}

/// Log to stderr, and to a daily rolling file when a log directory is set.
///
/// The returned guard flushes the file writer and must outlive the server.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quiet_hn=info"));

  let (file_layer, guard) = match log_dir {
    Some(dir) => {
      let appender = tracing_appender::rolling::daily(dir, "quiet-hn.log");
      let (writer, guard) = tracing_appender::non_blocking(appender);
      (
        Some(fmt::layer().with_writer(writer).with_ansi(false)),
        Some(guard),
      )
    }
    None => (None, None),
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(file_layer)
    .init();

  guard
}
