use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use color_eyre::{eyre::eyre, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::error;

use crate::cache::StoryCache;
use crate::hn::ItemSource;
use crate::pipeline::PipelineError;
use crate::render;

type SharedCache<S> = Arc<StoryCache<S>>;

pub fn router<S: ItemSource + 'static>(cache: SharedCache<S>) -> Router {
  Router::new()
    .route("/", get(index::<S>))
    .route("/stories.json", get(stories_json::<S>))
    .with_state(cache)
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
  axum::serve(listener, app)
    .await
    .map_err(|e| eyre!("Server error: {}", e))
}

async fn index<S: ItemSource + 'static>(State(cache): State<SharedCache<S>>) -> Response {
  let start = Instant::now();
  match cache.get_stories().await {
    Ok(entry) => Html(render::page(&entry, start.elapsed())).into_response(),
    Err(e) => load_failed(e),
  }
}

async fn stories_json<S: ItemSource + 'static>(State(cache): State<SharedCache<S>>) -> Response {
  match cache.get_stories().await {
    Ok(entry) => Json(entry.stories.as_ref().clone()).into_response(),
    Err(e) => load_failed(e),
  }
}

fn load_failed(e: PipelineError) -> Response {
  error!(error = %e, "Failed to load top stories");
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    "Failed to load top stories",
  )
    .into_response()
}
