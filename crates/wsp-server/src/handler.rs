use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use wsp_resolver::{ResolutionError, SiteResolver};
use wsp_types::FetchResult;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Whether the `Accept` header lets us answer with an HTML page.
///
/// A missing header, an empty one and `*/*` all count.
pub fn accepts_html(headers: &HeaderMap) -> bool {
    let accept = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .trim();
    accept.is_empty() || accept == "*/*" || accept.contains("text/html")
}

/// HTTP status for a failed resolution.
pub fn status_for(err: &ResolutionError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// `GET /__config`: the site configuration plus the RPC URL in use.
pub async fn config_handler(State(resolver): State<Arc<SiteResolver>>) -> Response {
    let config = resolver.config();
    let mut value = match serde_json::to_value(config) {
        Ok(value) => value,
        Err(err) => return text(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    };
    if let Value::Object(map) = &mut value {
        let rpc = config.rpc_url().map(|s| Value::String(s.to_owned()));
        map.insert("rpcUrl".into(), rpc.unwrap_or(Value::Null));
    }
    match serde_json::to_string_pretty(&value) {
        Ok(body) => ([(CONTENT_TYPE, "application/json; charset=utf-8")], body).into_response(),
        Err(err) => text(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Every other path: resolve it against the site.
pub async fn resource_handler(
    State(resolver): State<Arc<SiteResolver>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let html = accepts_html(&headers);
    match resolver.resolve(uri.path(), html).await {
        Ok(result) => success(result),
        Err(err) => {
            let status = status_for(&err);
            if status == StatusCode::NOT_FOUND {
                return text(status, "Not found".to_owned());
            }
            tracing::warn!(path = uri.path(), error = %err, "resolution failed");
            text(status, err.to_string())
        }
    }
}

fn success(result: FetchResult) -> Response {
    let mut response = Response::new(Body::from(result.body));
    let out = response.headers_mut();
    for (name, value) in &result.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                out.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "dropping header not valid in HTTP"),
        }
    }
    response
}

fn text(status: StatusCode, body: String) -> Response {
    (status, [(CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}
