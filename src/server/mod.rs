//! Read-only JSON API over the post store

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::content::{PostFilter, PostStore};
use crate::Folio;

/// Query parameters for the post list
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// `all`, `featured`, or a category id
    pub filter: Option<String>,
    /// Only posts carrying this tag
    pub tag: Option<String>,
}

/// Build the API router
pub fn router(store: PostStore) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/posts", get(list_posts_handler))
        .route("/api/posts/:id", get(get_post_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Start the API server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio.store());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Serving posts from {:?}", folio.content_dir);
    println!("API running at http://{}:{}/api/posts", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(store): State<PostStore>) -> Response {
    match tokio::task::spawn_blocking(move || store.list_posts().len()).await {
        Ok(count) => Json(json!({ "status": "ok", "posts": count })).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn list_posts_handler(
    State(store): State<PostStore>,
    Query(query): Query<ListQuery>,
) -> Response {
    let filter: PostFilter = query
        .filter
        .as_deref()
        .unwrap_or("all")
        .parse()
        .unwrap_or_default();

    let result = tokio::task::spawn_blocking(move || {
        let posts = filter.apply(store.list_posts());
        match query.tag {
            Some(tag) => posts.into_iter().filter(|p| p.has_tag(&tag)).collect(),
            None => posts,
        }
    })
    .await;

    match result {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn get_post_handler(State(store): State<PostStore>, Path(id): Path<String>) -> Response {
    let lookup_id = id.clone();
    match tokio::task::spawn_blocking(move || store.get_post(&lookup_id)).await {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Post not found", "id": id })),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

fn internal_error(e: tokio::task::JoinError) -> Response {
    tracing::error!("Request task failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
