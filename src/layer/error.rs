//! Layer-level errors.

use thiserror::Error;

use crate::geometry::ParseError;
use crate::source::SourceError;

/// Errors from loading a feature payload into the layer.
#[derive(Debug, Error)]
pub enum LayerError {
    /// The payload could not be fetched from the source.
    #[error("failed to fetch feature payload: {0}")]
    Source(#[from] SourceError),
    /// The payload could not be parsed.
    #[error("failed to parse feature payload: {0}")]
    Parse(#[from] ParseError),
}
