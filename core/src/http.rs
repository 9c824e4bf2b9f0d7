//! HTTP request descriptor types for the host-does-IO pattern.
//!
//! # Design
//! These types describe an HTTP request as plain data. The core crate builds
//! `HttpRequest` values without ever touching the network; the caller (host)
//! hands them to whatever transport it owns. `timeout` and `cache_policy` are
//! carried verbatim for that transport and never interpreted here.
//!
//! All fields use owned types so values can cross FFI boundaries without
//! lifetime concerns.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Flattened header mapping, name to value.
///
/// Ordered by name (byte order), so emitted header order is deterministic
/// rather than insertion order.
pub type Headers = BTreeMap<String, String>;

/// Query parameters attached to a GET request, name to value.
///
/// Ordered by name (byte order); `?b=2&a=1` cannot be expressed, it is
/// always emitted as `?a=1&b=2`.
pub type QueryParams = BTreeMap<String, String>;

/// HTTP method carried by a request descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Uppercase wire name, e.g. `"DELETE"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The body-carrying methods accepted by `build_write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WriteMethod {
    Put,
    Post,
    Patch,
}

impl WriteMethod {
    pub fn as_str(&self) -> &'static str {
        HttpMethod::from(*self).as_str()
    }
}

impl fmt::Display for WriteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<WriteMethod> for HttpMethod {
    fn from(m: WriteMethod) -> Self {
        match m {
            WriteMethod::Put => HttpMethod::Put,
            WriteMethod::Post => HttpMethod::Post,
            WriteMethod::Patch => HttpMethod::Patch,
        }
    }
}

/// Cache directive handed to the transport unchanged.
///
/// The variants mirror the policies common platform HTTP stacks expose. What
/// each one means is up to the transport executing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    UseProtocolCachePolicy,
    ReloadIgnoringLocalCacheData,
    ReloadIgnoringLocalAndRemoteCacheData,
    ReturnCacheDataElseLoad,
    ReturnCacheDataDontLoad,
    ReloadRevalidatingCacheData,
}

/// An HTTP request described as plain data.
///
/// Built by the `build_*` functions. The caller is responsible for executing
/// this request against the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub method: HttpMethod,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
    pub cache_policy: Option<CachePolicy>,
}

impl HttpRequest {
    /// Exact-name header lookup. Names are not case-folded.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Decode the body back into JSON, if there is one.
    pub fn body_json(&self) -> Option<Result<serde_json::Value, serde_json::Error>> {
        self.body.as_deref().map(serde_json::from_slice)
    }
}
