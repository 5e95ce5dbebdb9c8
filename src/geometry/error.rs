//! Ingestion error types.

use thiserror::Error;

/// Errors raised while ingesting a raw feature payload.
///
/// All variants are recoverable: a failed ingestion leaves the previously
/// stored collection untouched, so the layer stays queryable against
/// whatever was last successfully built.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload bytes (or a decoded blob body) are not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The blob wrapper's `content` field is not valid base64.
    #[error("blob content is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded blob bytes are not valid UTF-8 text.
    #[error("decoded blob is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The payload claimed to be a feature collection but its structure
    /// does not parse as one.
    #[error("invalid feature collection structure: {0}")]
    Structure(String),

    /// A feature carried geometry that could not be converted for
    /// spatial math.
    #[error("unsupported or invalid geometry: {0}")]
    Geometry(String),
}
