use std::path::Path;

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

mod config;
mod handlers;
mod post_index;
mod responses;
mod services;

use crate::services::posts::SortedPosts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let config = config::Config::from_env();
    tracing::info!(
        posts_index = %config.posts_index.display(),
        site_dir = %config.site_dir.display(),
        include_drafts = config.include_drafts,
        "starting blog server"
    );

    let provider = post_index::IndexFile::new(
        config.posts_index.clone(),
        config.include_drafts,
        config.posts_cache_ttl,
    );
    let app = app(provider, &config.site_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}

fn app<Provider>(provider: Provider, site_dir: &Path) -> Router
where
    Provider: SortedPosts + Clone + Send + Sync + 'static,
{
    let index = ServeFile::new(site_dir.join("index.html"));
    let site = ServeDir::new(site_dir).fallback(index);
    Router::new()
        .route("/api/posts", get(handlers::posts::list_posts::<Provider>))
        .with_state(provider)
        .route("/healthz", get(handlers::healthz))
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
}
