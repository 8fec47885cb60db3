use std::{net::SocketAddr, path::PathBuf};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

/// Root of the site tree: the shell page, `fragments/` and the wasm `pkg/`.
#[derive(Clone)]
struct SiteRoot(PathBuf);

#[tokio::main]
async fn main() {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("site"));

    let app = Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"ok": true})) }))
        .fallback(serve_site)
        .with_state(SiteRoot(root.clone()));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    println!("[START] Serving {} at http://{addr}", root.display());
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn serve_site(State(SiteRoot(root)): State<SiteRoot>, uri: Uri) -> impl IntoResponse {
    let requested = uri.path().trim_start_matches('/');
    let relative = if requested.is_empty() {
        "index.html"
    } else {
        requested
    };

    // Keep lookups inside the site tree.
    if relative.split('/').any(|part| part == "..") {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }

    match tokio::fs::read(root.join(relative)).await {
        Ok(body) => ([(header::CONTENT_TYPE, content_type(relative))], body).into_response(),
        Err(_) => {
            println!("[MISS] {relative}");
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}

fn content_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
