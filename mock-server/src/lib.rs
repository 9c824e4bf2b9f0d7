use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, Method, Uri},
    routing::get,
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw, sent back as the response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EchoedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    /// The request body parsed as JSON, or `null` when empty or not JSON.
    pub body: serde_json::Value,
}

pub fn app() -> Router {
    Router::new()
        .route("/delay/{ms}", get(delayed))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("echo server listening on {addr}");
    }
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<EchoedRequest> {
    info!("{method} {uri}");
    Json(EchoedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        // First value per name; repeated headers are not expected here.
        headers: headers
            .keys()
            .filter_map(|k| Some((k.as_str().to_string(), headers.get(k)?.to_str().ok()?.to_string())))
            .collect(),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    })
}

async fn delayed(Path(ms): Path<u64>) -> &'static str {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    "done"
}
