//! Stateless request builders.
//!
//! # Design
//! GET, DELETE and the body-carrying write methods each get their own entry
//! point because their inputs differ: only GET takes query parameters, only
//! writes take a body. A DELETE with a body or a POST with a query string
//! cannot be expressed.
//!
//! Every function is a pure transformation from its arguments to an
//! `HttpRequest`; nothing is cached or shared between calls.

use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;
use url::Url;

use crate::error::BuildError;
use crate::json;
use crate::headers::HeaderSet;
use crate::http::{CachePolicy, HttpMethod, HttpRequest, QueryParams, WriteMethod};

/// Build a `GET` request, attaching `query` as URL query parameters.
///
/// Parameters are form-urlencoded and emitted in name order. A space becomes
/// `+`, which servers that decode the query as `application/x-www-form-urlencoded`
/// read back as a space; a server that only percent-decodes will see a literal
/// `+`. An empty or absent `query` leaves the URL without a `?`.
///
/// Fails with `BuildError::InvalidUrl` when the base is an opaque URL
/// (`mailto:`, `data:` and similar) that cannot carry a path and query.
pub fn build_get(
    base: &Url,
    path: &str,
    query: Option<&QueryParams>,
    headers: &HeaderSet,
    timeout: Option<Duration>,
    cache_policy: Option<CachePolicy>,
) -> Result<HttpRequest, BuildError> {
    let url = compose_url(base, path, query)?;
    Ok(make_request(url, HttpMethod::Get, headers, None, timeout, cache_policy))
}

/// Build a `DELETE` request. Never fails.
pub fn build_delete(
    base: &Url,
    path: &str,
    headers: &HeaderSet,
    timeout: Option<Duration>,
    cache_policy: Option<CachePolicy>,
) -> HttpRequest {
    let url = append_path(base, path);
    make_request(url, HttpMethod::Delete, headers, None, timeout, cache_policy)
}

/// Build a `PUT`, `POST` or `PATCH` request with `body` encoded as JSON.
///
/// `body` must serialize to a JSON object; anything else, or a value JSON
/// cannot represent (a map with non-string keys, a NaN or infinite float),
/// fails with `BuildError::BodyEncoding`.
pub fn build_write<B>(
    base: &Url,
    path: &str,
    method: WriteMethod,
    body: &B,
    headers: &HeaderSet,
    timeout: Option<Duration>,
    cache_policy: Option<CachePolicy>,
) -> Result<HttpRequest, BuildError>
where
    B: Serialize + ?Sized,
{
    let url = append_path(base, path);
    let body = encode_body(body)?;
    Ok(make_request(url, method.into(), headers, Some(body), timeout, cache_policy))
}

fn make_request(
    url: Url,
    method: HttpMethod,
    headers: &HeaderSet,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
    cache_policy: Option<CachePolicy>,
) -> HttpRequest {
    debug!("built {method} request for {url}");
    HttpRequest {
        url,
        method,
        headers: headers.flatten(),
        body,
        timeout,
        cache_policy,
    }
}

/// Append `path` and, if given, the query to `base`.
fn compose_url(base: &Url, path: &str, query: Option<&QueryParams>) -> Result<Url, BuildError> {
    let mut url = append_path(base, path);

    if url.cannot_be_a_base() {
        warn!("rejecting opaque URL {url}");
        return Err(BuildError::InvalidUrl(format!(
            "{url} cannot carry a path and query"
        )));
    }

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.query_pairs_mut().extend_pairs(query.iter());
    }

    Ok(url)
}

/// Append `path` to `base` as path components.
///
/// The base path is kept and a separator inserted, so `https://h/api` plus
/// `users` gives `https://h/api/users`. Empty segments from leading or doubled
/// slashes are dropped, a trailing slash on `path` is kept, and each segment is
/// percent-encoded. An empty `path` returns the base unchanged.
///
/// `.` and `..` segments are dropped, not resolved, so the result never climbs
/// above the base path. A URL cannot carry them literally: even `%2E` is read
/// as a dot segment when the URL is parsed.
pub(crate) fn append_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    if path.is_empty() {
        return url;
    }

    if url.cannot_be_a_base() {
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        return url;
    }

    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !matches!(*s, "" | "." | "..")));
        if path.ends_with('/') {
            segments.push("");
        }
    }
    url
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, BuildError> {
    Ok(json::encode_object(body)?)
}
