//! Development proxy: requests under a path prefix are forwarded, with the
//! prefix stripped, to a remote Movement node.

use crate::config::ProxyConfig;
use crate::utils::error::Result;
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use futures_util::StreamExt;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

/// Headers that only describe a single connection and must not be relayed.
static HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    prefix: String,
    target: String,
}

impl ProxyRule {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            prefix: prefix.into(),
            target: target.trim_end_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Strips the prefix. The result always starts with `/`; `None` means the
    /// path is not handled by this rule.
    pub fn rewrite(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.starts_with('/') {
            Some(rest.to_string())
        } else {
            Some(format!("/{}", rest))
        }
    }

    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> Option<String> {
        let rewritten = self.rewrite(path)?;
        Some(match query {
            Some(q) => format!("{}{}?{}", self.target, rewritten, q),
            None => format!("{}{}", self.target, rewritten),
        })
    }
}

#[derive(Clone)]
pub struct ProxyState {
    rule: Arc<ProxyRule>,
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl ProxyState {
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            rule: Arc::new(ProxyRule::new(&config.prefix, &config.target)),
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn rule(&self) -> &ProxyRule {
        &self.rule
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new().fallback(proxy_handler).with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message: String = message.into();
    (
        status,
        Json(json!({"error": {"code": status.as_u16(), "message": message}})),
    )
        .into_response()
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP.iter() {
        out.remove(name);
    }
    out.remove("keep-alive");
    out
}

enum BodyError {
    TooLarge,
    Read(axum::Error),
}

/// Collects the request body, stopping as soon as it grows past `limit`.
async fn read_body(body: Body, limit: usize) -> std::result::Result<Bytes, BodyError> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(BodyError::Read)?;
        if buf.len() + chunk.len() > limit {
            return Err(BodyError::TooLarge);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}

async fn proxy_handler(State(state): State<ProxyState>, req: Request) -> Response {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();

    let Some(url) = state.rule.upstream_url(&path, parts.uri.query()) else {
        tracing::debug!(path = %path, "No proxy rule matched");
        return error_response(StatusCode::NOT_FOUND, format!("No route for {}", path));
    };

    let declared_len = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared_len.is_some_and(|len| len > state.max_body_bytes) {
        tracing::warn!(path = %path, "Request body exceeds {} bytes", state.max_body_bytes);
        return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
    }
    let body = match read_body(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(BodyError::TooLarge) => {
            tracing::warn!(path = %path, "Request body exceeds {} bytes", state.max_body_bytes);
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
        }
        Err(BodyError::Read(e)) => {
            tracing::warn!(path = %path, error = %e, "Failed to read request body");
            return error_response(StatusCode::BAD_REQUEST, "Failed to read request body");
        }
    };

    // Host and length are recomputed for the upstream request.
    let mut headers = strip_hop_by_hop(&parts.headers);
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    tracing::info!(method = %parts.method, path = %path, target = %url, "Sending request to the target");

    let upstream = state
        .client
        .request(parts.method.clone(), url.as_str())
        .headers(headers)
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(path = %path, target = %url, error = %e, "Proxy error");
            return error_response(StatusCode::BAD_GATEWAY, format!("Upstream request failed: {}", e));
        }
    };

    let status = upstream.status();
    let headers = strip_hop_by_hop(upstream.headers());
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(path = %path, target = %url, error = %e, "Proxy error while reading response");
            return error_response(StatusCode::BAD_GATEWAY, format!("Upstream response failed: {}", e));
        }
    };

    tracing::info!(
        status = status.as_u16(),
        path = %path,
        elapsed = ?started.elapsed(),
        "Received response from the target"
    );

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Serves on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(listener: TcpListener, state: ProxyState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    tracing::info!(
        "Proxying {}* on http://{} to {} (body limit {} bytes)",
        state.rule().prefix(),
        local,
        state.rule().target(),
        state.max_body_bytes()
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &ProxyConfig) -> Result<()> {
    let state = ProxyState::new(config)?;
    let listener = TcpListener::bind(config.bind_addr()?).await?;
    serve_with_shutdown(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down proxy");
    })
    .await
}
