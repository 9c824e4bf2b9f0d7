//! Structured header intent and its flattening to wire form.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::http::Headers;

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";

/// Media type for the `Accept` and `Content-Type` headers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// `application/json`
    Json,
    /// `text/plain`
    PlainText,
    /// Any other media type, emitted verbatim (e.g. `image/png`).
    Custom(String),
}

impl MediaType {
    /// The string written into the header.
    pub fn value(&self) -> &str {
        match self {
            MediaType::Json => "application/json",
            MediaType::PlainText => "text/plain",
            MediaType::Custom(s) => s,
        }
    }

    /// Map a header value back to a variant. Unknown values become `Custom`.
    pub fn from_value(value: &str) -> Self {
        match value {
            "application/json" => MediaType::Json,
            "text/plain" => MediaType::PlainText,
            other => MediaType::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for MediaType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MediaType::from_value(s))
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(MediaType::from_value(&s))
    }
}

/// HTTP headers to attach to a request.
///
/// Holds the three standard headers as optional fields plus any number of
/// custom ones. `flatten` writes the standard fields first and then overlays
/// `custom`, so a custom entry named exactly `Accept`, `Content-Type` or
/// `Authorization` replaces the standard field. Names are compared exactly,
/// without case folding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accept(mut self, media_type: MediaType) -> Self {
        self.accept = Some(media_type);
        self
    }

    pub fn with_content_type(mut self, media_type: MediaType) -> Self {
        self.content_type = Some(media_type);
        self
    }

    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Shorthand for `Authorization: Bearer <token>`.
    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_authorization(format!("Bearer {token}"))
    }

    /// Add or replace a custom header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Standard fields set on `other` win; unset ones fall back to `self`.
    /// Custom maps are unioned with `other` winning on collisions.
    pub fn merged(&self, other: &HeaderSet) -> HeaderSet {
        let mut custom = self.custom.clone();
        custom.extend(other.custom.iter().map(|(k, v)| (k.clone(), v.clone())));
        HeaderSet {
            accept: other.accept.clone().or_else(|| self.accept.clone()),
            content_type: other.content_type.clone().or_else(|| self.content_type.clone()),
            authorization: other.authorization.clone().or_else(|| self.authorization.clone()),
            custom,
        }
    }

    /// Convert into a single name-to-value mapping. Unset fields produce no
    /// entry; custom entries are written last and win on collision.
    pub fn flatten(&self) -> Headers {
        let mut headers = Headers::new();

        if let Some(accept) = &self.accept {
            headers.insert(ACCEPT.to_string(), accept.value().to_string());
        }
        if let Some(content_type) = &self.content_type {
            headers.insert(CONTENT_TYPE.to_string(), content_type.value().to_string());
        }
        if let Some(authorization) = &self.authorization {
            headers.insert(AUTHORIZATION.to_string(), authorization.clone());
        }
        for (name, value) in &self.custom {
            headers.insert(name.clone(), value.clone());
        }

        headers
    }
}
