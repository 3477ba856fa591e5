//! Error types.

use thiserror::Error;

use crate::restriction::RestrictionType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unsupported restriction entry type {restriction_type} for key `{key}`")]
    UnsupportedType {
        key: String,
        restriction_type: RestrictionType,
    },
    #[error("restriction `{key}` is nested deeper than {max_depth} levels")]
    DepthExceeded { key: String, max_depth: usize },
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid restriction manifest: {0}")]
    Json(#[from] serde_json::Error),
}
