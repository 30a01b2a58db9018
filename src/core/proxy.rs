//! Same-origin proxy for the gallery API
//!
//! Every `/api/{path}` request is forwarded to `{API_UPSTREAM_URL}/{path}` with
//! its method, query, body and end-to-end headers. The path goes out exactly as
//! the browser encoded it and the request body is streamed, so uploads are not
//! bound by a buffer limit. The upstream response is relayed as is, error
//! statuses included; only a transport failure produces a proxy-generated
//! `502 {message}`.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::{Body, HttpBody},
    extract::State,
    http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::any,
};
use thiserror::Error;

use super::api::{API_PREFIX, ServerMessage};
use super::config::Config;

/// Headers that describe a single connection and must not be forwarded
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::HOST,
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
];

#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl ProxyState {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Gallery API is unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Failed to read gallery API response: {0}")]
    Body(#[source] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!("API proxy failure: {}", self);
        (StatusCode::BAD_GATEWAY, Json(ServerMessage::new(self.to_string()))).into_response()
    }
}

/// Create the API proxy router
pub fn api_proxy_router(config: Config) -> Router {
    Router::new()
        .route(&format!("{API_PREFIX}/{{*path}}"), any(forward))
        .with_state(ProxyState::new(config))
}

async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ProxyError> {
    let path = upstream_path(&uri);
    let url = state.config.upstream_url(path, uri.query());
    tracing::debug!("Forwarding {} {} -> {}", method, uri.path(), url);

    let mut request = state
        .client
        .request(method, &url)
        .headers(end_to_end(&headers));
    // Bodiless requests (GET) go out without a chunked empty body
    if !body.is_end_stream() {
        request = request.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    let upstream = request
        .send()
        .await
        .map_err(ProxyError::Unreachable)?;

    let status = upstream.status();
    if status.is_server_error() {
        tracing::warn!("Gallery API returned {} for {}", status, url);
    }

    let response_headers = end_to_end(upstream.headers());
    let bytes = upstream.bytes().await.map_err(ProxyError::Body)?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}

/// Request path below the `/api` prefix, still percent-encoded
fn upstream_path(uri: &Uri) -> &str {
    uri.path().strip_prefix(API_PREFIX).unwrap_or(uri.path())
}

/// Copy of `headers` without hop-by-hop entries
fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = headers.clone();
    for name in &HOP_BY_HOP {
        forwarded.remove(name);
    }
    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::to_bytes,
        body::Bytes,
        http::{HeaderValue, Request},
        routing::{get, post},
    };
    use tower::ServiceExt;

    /// Start a stand-in gallery API on an ephemeral port
    async fn spawn_upstream() -> String {
        let upstream = Router::new()
            .route(
                "/getImage",
                get(|headers: HeaderMap| async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(serde_json::json!({ "images": [{ "image": auth }] }))
                }),
            )
            .route(
                "/login",
                post(|body: String| async move {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(serde_json::json!({ "message": format!("bad login: {body}") })),
                    )
                }),
            )
            .route(
                "/echo",
                get(|uri: Uri| async move { uri.query().unwrap_or_default().to_string() }),
            )
            .route(
                "/image",
                post(|body: Body| async move {
                    let bytes = to_bytes(body, usize::MAX).await.unwrap();
                    bytes.len().to_string()
                }),
            )
            .route(
                "/resetPassword/{*rest}",
                post(|uri: Uri| async move { uri.path().to_string() }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });
        format!("http://{addr}/")
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_hop_by_hop_headers_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let forwarded = end_to_end(&headers);
        assert_eq!(forwarded.len(), 3);
        assert_eq!(forwarded[header::AUTHORIZATION], "Bearer t");
        assert_eq!(forwarded[header::CONTENT_LENGTH], "12");
        assert!(forwarded.get(header::HOST).is_none());
        assert!(forwarded.get(header::CONNECTION).is_none());
    }

    #[test]
    fn test_upstream_path_keeps_encoding() {
        let uri: Uri = "/api/resetPassword/a%2Fb?x=1".parse().unwrap();
        assert_eq!(upstream_path(&uri), "/resetPassword/a%2Fb");
    }

    #[tokio::test]
    async fn test_large_upload_reaches_upstream() {
        let upstream = spawn_upstream().await;
        let app = api_proxy_router(Config::with_upstream(Some(upstream)));

        let payload = Bytes::from(vec![b'x'; 3 * 1024 * 1024]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/image")
                    .header(header::CONTENT_TYPE, "multipart/form-data; boundary=X")
                    .header(header::CONTENT_LENGTH, payload.len())
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, (3 * 1024 * 1024).to_string());
    }

    #[tokio::test]
    async fn test_encoded_path_segments_are_preserved() {
        let upstream = spawn_upstream().await;
        let app = api_proxy_router(Config::with_upstream(Some(upstream)));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/resetPassword/a%2Fb")
                    .header(header::CONTENT_LENGTH, 0)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "/resetPassword/a%2Fb");
    }

    #[tokio::test]
    async fn test_forwards_authorization() {
        let upstream = spawn_upstream().await;
        let app = api_proxy_router(Config::with_upstream(Some(upstream)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/getImage")
                    .header("Authorization", "Bearer abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            r#"{"images":[{"image":"Bearer abc"}]}"#
        );
    }

    #[tokio::test]
    async fn test_relays_upstream_errors() {
        let upstream = spawn_upstream().await;
        let app = api_proxy_router(Config::with_upstream(Some(upstream)));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from("creds"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            r#"{"message":"bad login: creds"}"#
        );
    }

    #[tokio::test]
    async fn test_forwards_query_string() {
        let upstream = spawn_upstream().await;
        let app = api_proxy_router(Config::with_upstream(Some(upstream)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/echo?page=2&size=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_string(response).await, "page=2&size=10");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let app = api_proxy_router(Config::with_upstream(Some(format!("http://{addr}"))));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/getImage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: ServerMessage = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body.message.starts_with("Gallery API is unreachable"));
    }
}
