//! Configured front-end over the stateless builders.
//!
//! # Design
//! `RestClient` holds a base URL plus request defaults (headers, timeout,
//! cache policy) and carries no mutable state between calls. Each method
//! merges its per-call headers over the defaults and delegates to the
//! matching `build_*` function, so the output is exactly what the free
//! functions would produce given the merged inputs.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::builder::{build_delete, build_get, build_write};
use crate::error::BuildError;
use crate::headers::HeaderSet;
use crate::http::{CachePolicy, HttpRequest, QueryParams, WriteMethod};

/// Request builder bound to one base URL and a set of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestClient {
    base_url: Url,
    default_headers: HeaderSet,
    timeout: Option<Duration>,
    cache_policy: Option<CachePolicy>,
}

impl RestClient {
    /// Parse `base_url` and create a client with no defaults.
    pub fn new(base_url: &str) -> Result<Self, BuildError> {
        Ok(Self::from_url(Url::parse(base_url)?))
    }

    pub fn from_url(base_url: Url) -> Self {
        Self {
            base_url,
            default_headers: HeaderSet::default(),
            timeout: None,
            cache_policy: None,
        }
    }

    pub fn with_default_headers(mut self, headers: HeaderSet) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = Some(cache_policy);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderSet {
        &self.default_headers
    }

    pub fn get(
        &self,
        path: &str,
        query: Option<&QueryParams>,
        headers: &HeaderSet,
    ) -> Result<HttpRequest, BuildError> {
        build_get(
            &self.base_url,
            path,
            query,
            &self.default_headers.merged(headers),
            self.timeout,
            self.cache_policy,
        )
    }

    pub fn delete(&self, path: &str, headers: &HeaderSet) -> HttpRequest {
        build_delete(
            &self.base_url,
            path,
            &self.default_headers.merged(headers),
            self.timeout,
            self.cache_policy,
        )
    }

    pub fn write<B: Serialize + ?Sized>(
        &self,
        path: &str,
        method: WriteMethod,
        body: &B,
        headers: &HeaderSet,
    ) -> Result<HttpRequest, BuildError> {
        build_write(
            &self.base_url,
            path,
            method,
            body,
            &self.default_headers.merged(headers),
            self.timeout,
            self.cache_policy,
        )
    }

    pub fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        headers: &HeaderSet,
    ) -> Result<HttpRequest, BuildError> {
        self.write(path, WriteMethod::Post, body, headers)
    }

    pub fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        headers: &HeaderSet,
    ) -> Result<HttpRequest, BuildError> {
        self.write(path, WriteMethod::Put, body, headers)
    }

    pub fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        headers: &HeaderSet,
    ) -> Result<HttpRequest, BuildError> {
        self.write(path, WriteMethod::Patch, body, headers)
    }
}
