//! Embedded browser console for the agents API.
//!
//! Serves the static single-page client compiled into the binary. Paths that
//! name no asset fall back to `index.html` so client-side routes resolve.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "client/dist"]
struct Assets;

const INDEX: &str = "index.html";

/// Console routes, to be nested under a prefix such as `/console`.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/{*path}", get(static_handler))
}

async fn index() -> Response {
    serve(INDEX)
}

async fn static_handler(Path(path): Path<String>) -> Response {
    serve(path.trim_start_matches('/'))
}

fn serve(path: &str) -> Response {
    let (name, asset) = match Assets::get(path) {
        Some(asset) => (path, asset),
        None => match Assets::get(INDEX) {
            Some(asset) => (INDEX, asset),
            None => return (StatusCode::NOT_FOUND, "Not found").into_response(),
        },
    };

    let mime = mime_guess::from_path(name).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.as_ref().to_string())], asset.data.into_owned()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get(uri: &str) -> (StatusCode, String, String) {
        let app: Router = Router::new().nest("/console", routes());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn serves_index_at_root() {
        let (status, content_type, body) = get("/console").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains("Retell Agents"));
    }

    #[tokio::test]
    async fn serves_assets_with_their_mime_type() {
        let (status, content_type, _) = get("/console/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.contains("javascript"));

        let (_, content_type, _) = get("/console/style.css").await;
        assert!(content_type.starts_with("text/css"));
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let (status, content_type, body) = get("/console/agents/agent-123").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains("Retell Agents"));
    }
}
