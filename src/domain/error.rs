//! Errors raised by collection operations.

use std::path::PathBuf;

use thiserror::Error;

use super::record::ItemId;

/// Everything that can go wrong while loading or working on the collection.
///
/// All kinds except [`CollectionError::SourceUnavailable`] are reported to the
/// user and the session carries on.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Your input ID {id} is invalid!")]
    ItemNotFound { id: ItemId },

    #[error("All copies of item {id} are already available, so this item can not be checked in.")]
    AlreadyFull { id: ItemId },

    #[error("No copies of item {id} are available for check out.")]
    NoneAvailable { id: ItemId },

    #[error("Invalid query string.")]
    InvalidQuery,

    #[error("Invalid value for {field}: {value:?}")]
    InvalidFieldValue { field: &'static str, value: String },

    #[error("Could not load {}: {reason}", .path.display())]
    SourceUnavailable { path: PathBuf, reason: String },
}

impl CollectionError {
    pub fn invalid_field(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            field,
            value: value.into(),
        }
    }

    pub fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error ends the session instead of being reported
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}
