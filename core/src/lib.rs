//! Request assembly for REST clients.
//!
//! # Overview
//! Turns structured inputs (base URL, path, query, headers, JSON body) into
//! `HttpRequest` descriptors without touching the network (host-does-IO
//! pattern). The caller hands each descriptor to its own transport.
//!
//! # Design
//! - `HeaderSet` captures header intent and flattens to a name/value map.
//! - `build_get`, `build_delete` and `build_write` are stateless and pure.
//! - `RestClient` is an optional holder for a base URL and request defaults.
//! - Types use owned fields to simplify FFI mapping.

pub mod builder;
pub mod client;
pub mod error;
pub mod headers;
pub mod http;
mod json;

pub use builder::{build_delete, build_get, build_write};
pub use client::RestClient;
pub use error::BuildError;
pub use headers::{HeaderSet, MediaType};
pub use http::{CachePolicy, Headers, HttpMethod, HttpRequest, QueryParams, WriteMethod};
pub use url::Url;
