//! Error types for request building.
//!
//! # Design
//! Only two things can go wrong while assembling a request: the URL cannot be
//! formed, or a write body cannot be encoded as a JSON object. Both are
//! terminal for the call that raised them; no partial request is returned.
//! Messages are captured as strings so the error stays `Clone` and maps
//! cleanly onto the FFI result envelope.

use thiserror::Error;

/// Errors returned by the `build_*` functions and `RestClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The base, path and query could not be composed into a usable URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The write body could not be encoded as a JSON object.
    #[error("body encoding failed: {0}")]
    BodyEncoding(String),
}

impl From<url::ParseError> for BuildError {
    fn from(e: url::ParseError) -> Self {
        BuildError::InvalidUrl(e.to_string())
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(e: serde_json::Error) -> Self {
        BuildError::BodyEncoding(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = BuildError::InvalidUrl("cannot be a base".to_string());
        assert_eq!(err.to_string(), "invalid URL: cannot be a base");

        let err = BuildError::BodyEncoding("key must be a string".to_string());
        assert_eq!(err.to_string(), "body encoding failed: key must be a string");
    }

    #[test]
    fn parse_error_maps_to_invalid_url() {
        let err: BuildError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, BuildError::InvalidUrl(_)));
    }
}
