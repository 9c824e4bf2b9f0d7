//! C-ABI wrapper around `restkit-core`.
//!
//! # Overview
//! Exposes header-set construction and the three request builders through
//! `extern "C"` functions so any language with a C FFI can produce request
//! descriptors and execute them with its own HTTP stack.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Header sets are opaque handles mutated through setters, mirroring the
//!   core's builder-style `HeaderSet` methods.
//! - All builders return an `FfiBuildResult` envelope carrying either the
//!   request or an error code and message.
//! - The C caller owns all returned pointers and must call the matching
//!   `rest_*_free` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use restkit_core::{HeaderSet, QueryParams, Url};

use types::*;

/// Borrow a C string as `&str`. `None` for null or invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Header set lifecycle
// ---------------------------------------------------------------------------

/// Create an empty header set.
///
/// The caller must free the returned pointer with `rest_headers_free`.
#[unsafe(no_mangle)]
pub extern "C" fn rest_headers_new() -> *mut FfiHeaderSet {
    catch_unwind(|| Box::into_raw(Box::new(FfiHeaderSet { inner: HeaderSet::new() })))
        .unwrap_or(std::ptr::null_mut())
}

/// Free a header set created by `rest_headers_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn rest_headers_free(headers: *mut FfiHeaderSet) {
    if !headers.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(headers) });
        });
    }
}

/// Set the `Accept` header. `custom` is read only when `kind` is `Custom`.
///
/// Returns false if `headers` is null, `kind` is unknown, or `kind` is
/// `Custom` and `custom` is null.
#[unsafe(no_mangle)]
pub extern "C" fn rest_headers_set_accept(
    headers: *mut FfiHeaderSet,
    kind: i32,
    custom: *const c_char,
) -> bool {
    catch_unwind(|| {
        if headers.is_null() {
            return false;
        }
        let headers = unsafe { &mut *headers };
        match media_type_from_raw(kind, unsafe { c_str(custom) }) {
            Some(media_type) => {
                headers.inner.accept = Some(media_type);
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

/// Set the `Content-Type` header. Same rules as `rest_headers_set_accept`.
#[unsafe(no_mangle)]
pub extern "C" fn rest_headers_set_content_type(
    headers: *mut FfiHeaderSet,
    kind: i32,
    custom: *const c_char,
) -> bool {
    catch_unwind(|| {
        if headers.is_null() {
            return false;
        }
        let headers = unsafe { &mut *headers };
        match media_type_from_raw(kind, unsafe { c_str(custom) }) {
            Some(media_type) => {
                headers.inner.content_type = Some(media_type);
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

/// Set the `Authorization` header value verbatim.
#[unsafe(no_mangle)]
pub extern "C" fn rest_headers_set_authorization(
    headers: *mut FfiHeaderSet,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if headers.is_null() {
            return false;
        }
        let headers = unsafe { &mut *headers };
        match unsafe { c_str(value) } {
            Some(value) => {
                headers.inner.authorization = Some(value.to_string());
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

/// Add or replace a custom header. A custom `Accept`, `Content-Type` or
/// `Authorization` overrides the standard field when the request is built.
#[unsafe(no_mangle)]
pub extern "C" fn rest_headers_insert(
    headers: *mut FfiHeaderSet,
    name: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if headers.is_null() {
            return false;
        }
        let headers = unsafe { &mut *headers };
        match unsafe { (c_str(name), c_str(value)) } {
            (Some(name), Some(value)) => {
                headers.inner.custom.insert(name.to_string(), value.to_string());
                true
            }
            _ => false,
        }
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Arguments shared by every builder, decoded from their C forms.
struct CommonArgs {
    base: Url,
    path: String,
    headers: HeaderSet,
    timeout: Option<std::time::Duration>,
    cache_policy: Option<restkit_core::CachePolicy>,
}

/// Decode the shared builder arguments, or return the error envelope.
///
/// A null `headers` handle means "no headers".
fn common_args(
    base_url: *const c_char,
    path: *const c_char,
    headers: *const FfiHeaderSet,
    timeout_ms: i64,
    cache_policy: i32,
) -> Result<CommonArgs, *mut FfiBuildResult> {
    if base_url.is_null() {
        return Err(FfiBuildResult::null_arg("base_url"));
    }
    if path.is_null() {
        return Err(FfiBuildResult::null_arg("path"));
    }
    let base_str = unsafe { c_str(base_url) }.ok_or_else(|| FfiBuildResult::invalid_arg("base_url"))?;
    let base = Url::parse(base_str)
        .map_err(|e| FfiBuildResult::from_error(e.into()))?;
    let path = unsafe { c_str(path) }
        .ok_or_else(|| FfiBuildResult::invalid_arg("path"))?
        .to_string();
    let headers = if headers.is_null() {
        HeaderSet::new()
    } else {
        unsafe { &*headers }.inner.clone()
    };
    let cache_policy =
        cache_policy_from_raw(cache_policy).ok_or_else(|| FfiBuildResult::invalid_arg("cache_policy"))?;

    Ok(CommonArgs {
        base,
        path,
        headers,
        timeout: timeout_from_millis(timeout_ms),
        cache_policy,
    })
}

/// Build a GET request.
///
/// `query` points to `query_len` name/value pairs and may be null when
/// `query_len` is 0. `headers` may be null. `timeout_ms < 0` means no
/// timeout; `cache_policy` is an `FfiCachePolicy` code (0 = unset).
#[unsafe(no_mangle)]
pub extern "C" fn rest_build_get(
    base_url: *const c_char,
    path: *const c_char,
    query: *const FfiQueryPair,
    query_len: u32,
    headers: *const FfiHeaderSet,
    timeout_ms: i64,
    cache_policy: i32,
) -> *mut FfiBuildResult {
    catch_unwind(|| {
        let args = match common_args(base_url, path, headers, timeout_ms, cache_policy) {
            Ok(args) => args,
            Err(result) => return result,
        };

        let mut params = QueryParams::new();
        if query_len > 0 {
            if query.is_null() {
                return FfiBuildResult::null_arg("query");
            }
            let pairs = unsafe { std::slice::from_raw_parts(query, query_len as usize) };
            for pair in pairs {
                match unsafe { (c_str(pair.name), c_str(pair.value)) } {
                    (Some(name), Some(value)) => {
                        params.insert(name.to_string(), value.to_string());
                    }
                    _ => return FfiBuildResult::invalid_arg("query"),
                }
            }
        }

        FfiBuildResult::from_result(restkit_core::build_get(
            &args.base,
            &args.path,
            Some(&params),
            &args.headers,
            args.timeout,
            args.cache_policy,
        ))
    })
    .unwrap_or_else(|_| FfiBuildResult::panic("panic in rest_build_get"))
}

/// Build a DELETE request. Fails only on bad arguments.
#[unsafe(no_mangle)]
pub extern "C" fn rest_build_delete(
    base_url: *const c_char,
    path: *const c_char,
    headers: *const FfiHeaderSet,
    timeout_ms: i64,
    cache_policy: i32,
) -> *mut FfiBuildResult {
    catch_unwind(|| {
        let args = match common_args(base_url, path, headers, timeout_ms, cache_policy) {
            Ok(args) => args,
            Err(result) => return result,
        };
        FfiBuildResult::ok(restkit_core::build_delete(
            &args.base,
            &args.path,
            &args.headers,
            args.timeout,
            args.cache_policy,
        ))
    })
    .unwrap_or_else(|_| FfiBuildResult::panic("panic in rest_build_delete"))
}

/// Build a PUT, POST or PATCH request.
///
/// `method` is an `FfiWriteMethod` code. `body_json` is the body as JSON
/// text; it must parse and must be an object, otherwise the result carries
/// `BodyEncoding`.
#[unsafe(no_mangle)]
pub extern "C" fn rest_build_write(
    base_url: *const c_char,
    path: *const c_char,
    method: i32,
    body_json: *const c_char,
    headers: *const FfiHeaderSet,
    timeout_ms: i64,
    cache_policy: i32,
) -> *mut FfiBuildResult {
    catch_unwind(|| {
        let args = match common_args(base_url, path, headers, timeout_ms, cache_policy) {
            Ok(args) => args,
            Err(result) => return result,
        };
        let Some(method) = write_method_from_raw(method) else {
            return FfiBuildResult::invalid_arg("method");
        };
        if body_json.is_null() {
            return FfiBuildResult::null_arg("body_json");
        }
        let Some(text) = (unsafe { c_str(body_json) }) else {
            return FfiBuildResult::invalid_arg("body_json");
        };
        let body: serde_json::Value = match serde_json::from_str(text) {
            Ok(body) => body,
            Err(e) => return FfiBuildResult::from_error(e.into()),
        };

        FfiBuildResult::from_result(restkit_core::build_write(
            &args.base,
            &args.path,
            method,
            &body,
            &args.headers,
            args.timeout,
            args.cache_policy,
        ))
    })
    .unwrap_or_else(|_| FfiBuildResult::panic("panic in rest_build_write"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Release an `FfiHttpRequest` and everything it points to.
fn free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let req = unsafe { Box::from_raw(req) };
    if !req.url.is_null() {
        drop(unsafe { CString::from_raw(req.url) });
    }
    if !req.body.is_null() {
        drop(unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.body, req.body_len)) });
    }
    if !req.headers.is_null() && req.headers_len > 0 {
        let headers = unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize))
        };
        for h in headers.iter() {
            if !h.key.is_null() {
                drop(unsafe { CString::from_raw(h.key) });
            }
            if !h.value.is_null() {
                drop(unsafe { CString::from_raw(h.value) });
            }
        }
    }
}

/// Free an `FfiBuildResult` returned by any `rest_build_*` function,
/// including the request it carries. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn rest_free_result(result: *mut FfiBuildResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        free_request(result.request);
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
