//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer/length pairs instead of `Vec`,
//! and enums with explicit discriminants. Enum inputs from C arrive as plain
//! integers and are mapped here, so an out-of-range value is an error rather
//! than undefined behavior. Conversion functions live here to keep `lib.rs`
//! focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;
use std::time::Duration;

use restkit_core::{BuildError, CachePolicy, HeaderSet, HttpMethod, HttpRequest, MediaType, WriteMethod};

/// Opaque handle to a `HeaderSet`. C callers build one with the
/// `rest_headers_*` functions and pass it to the builders.
pub struct FfiHeaderSet {
    pub(crate) inner: HeaderSet,
}

// ---------------------------------------------------------------------------
// Input mapping
// ---------------------------------------------------------------------------

/// Media type selector for `rest_headers_set_accept` / `_set_content_type`.
#[repr(C)]
pub enum FfiMediaTypeKind {
    Json = 0,
    PlainText = 1,
    Custom = 2,
}

/// Map a raw media type selector; `custom` is only read for `Custom`.
pub(crate) fn media_type_from_raw(kind: i32, custom: Option<&str>) -> Option<MediaType> {
    match kind {
        k if k == FfiMediaTypeKind::Json as i32 => Some(MediaType::Json),
        k if k == FfiMediaTypeKind::PlainText as i32 => Some(MediaType::PlainText),
        k if k == FfiMediaTypeKind::Custom as i32 => custom.map(|s| MediaType::Custom(s.to_string())),
        _ => None,
    }
}

/// Write method selector for `rest_build_write`.
#[repr(C)]
pub enum FfiWriteMethod {
    Put = 0,
    Post = 1,
    Patch = 2,
}

pub(crate) fn write_method_from_raw(method: i32) -> Option<WriteMethod> {
    match method {
        m if m == FfiWriteMethod::Put as i32 => Some(WriteMethod::Put),
        m if m == FfiWriteMethod::Post as i32 => Some(WriteMethod::Post),
        m if m == FfiWriteMethod::Patch as i32 => Some(WriteMethod::Patch),
        _ => None,
    }
}

/// Cache policy as a C enum. `None` means "not set".
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiCachePolicy {
    None = 0,
    UseProtocolCachePolicy = 1,
    ReloadIgnoringLocalCacheData = 2,
    ReloadIgnoringLocalAndRemoteCacheData = 3,
    ReturnCacheDataElseLoad = 4,
    ReturnCacheDataDontLoad = 5,
    ReloadRevalidatingCacheData = 6,
}

impl From<Option<CachePolicy>> for FfiCachePolicy {
    fn from(policy: Option<CachePolicy>) -> Self {
        match policy {
            None => FfiCachePolicy::None,
            Some(CachePolicy::UseProtocolCachePolicy) => FfiCachePolicy::UseProtocolCachePolicy,
            Some(CachePolicy::ReloadIgnoringLocalCacheData) => FfiCachePolicy::ReloadIgnoringLocalCacheData,
            Some(CachePolicy::ReloadIgnoringLocalAndRemoteCacheData) => {
                FfiCachePolicy::ReloadIgnoringLocalAndRemoteCacheData
            }
            Some(CachePolicy::ReturnCacheDataElseLoad) => FfiCachePolicy::ReturnCacheDataElseLoad,
            Some(CachePolicy::ReturnCacheDataDontLoad) => FfiCachePolicy::ReturnCacheDataDontLoad,
            Some(CachePolicy::ReloadRevalidatingCacheData) => FfiCachePolicy::ReloadRevalidatingCacheData,
        }
    }
}

/// Map a raw cache policy code. The outer `None` flags an unknown code.
pub(crate) fn cache_policy_from_raw(code: i32) -> Option<Option<CachePolicy>> {
    Some(match code {
        0 => None,
        1 => Some(CachePolicy::UseProtocolCachePolicy),
        2 => Some(CachePolicy::ReloadIgnoringLocalCacheData),
        3 => Some(CachePolicy::ReloadIgnoringLocalAndRemoteCacheData),
        4 => Some(CachePolicy::ReturnCacheDataElseLoad),
        5 => Some(CachePolicy::ReturnCacheDataDontLoad),
        6 => Some(CachePolicy::ReloadRevalidatingCacheData),
        _ => return None,
    })
}

/// Negative means "no timeout".
pub(crate) fn timeout_from_millis(timeout_ms: i64) -> Option<Duration> {
    u64::try_from(timeout_ms).ok().map(Duration::from_millis)
}

/// `-1` when unset. A non-zero timeout never rounds down to 0, which hosts
/// commonly read as "no timeout".
pub(crate) fn timeout_to_millis(timeout: Option<Duration>) -> i64 {
    match timeout {
        None => -1,
        Some(t) if !t.is_zero() && t.as_millis() == 0 => 1,
        Some(t) => i64::try_from(t.as_millis()).unwrap_or(i64::MAX),
    }
}

/// A query parameter supplied by the C caller. Neither field is freed by us.
#[repr(C)]
pub struct FfiQueryPair {
    pub name: *const c_char,
    pub value: *const c_char,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Patch = 3,
    Delete = 4,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// `body` is null for GET and DELETE; otherwise it points to `body_len`
/// bytes of UTF-8 JSON (not NUL-terminated). `timeout_ms` is -1 when unset.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut u8,
    pub body_len: usize,
    pub timeout_ms: i64,
    pub cache_policy: FfiCachePolicy,
}

/// Convert a string for C. Interior NULs cannot occur in URLs or in values
/// that arrived as C strings; should one appear the field becomes empty.
fn to_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let url = to_c_string(req.url.into());

        let (body, body_len) = match req.body {
            Some(bytes) => {
                let len = bytes.len();
                (Box::into_raw(bytes.into_boxed_slice()) as *mut u8, len)
            }
            None => (std::ptr::null_mut(), 0),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        let timeout_ms = timeout_to_millis(req.timeout);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
            body_len,
            timeout_ms,
            cache_policy: req.cache_policy.into(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiBuildResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = 1,
    BodyEncoding = 2,
    NullArg = 3,
    InvalidArg = 4,
    Panic = 5,
}

/// Result envelope for all build operations.
///
/// On success `error_code` is `Ok`, `error_message` is null and `request`
/// points to the built request. On failure `request` is null and
/// `error_message` is a human-readable C string.
#[repr(C)]
pub struct FfiBuildResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub request: *mut FfiHttpRequest,
}

impl FfiBuildResult {
    pub(crate) fn ok(req: HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            request: FfiHttpRequest::from_core(req),
        }))
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            error_code,
            error_message: to_c_string(msg),
            request: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn from_error(err: BuildError) -> *mut Self {
        let code = match err {
            BuildError::InvalidUrl(_) => FfiErrorCode::InvalidUrl,
            BuildError::BodyEncoding(_) => FfiErrorCode::BodyEncoding,
        };
        Self::error(code, err.to_string())
    }

    pub(crate) fn from_result(result: Result<HttpRequest, BuildError>) -> *mut Self {
        match result {
            Ok(req) => Self::ok(req),
            Err(e) => Self::from_error(e),
        }
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    pub(crate) fn invalid_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::InvalidArg, format!("invalid argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg.to_string())
    }
}
