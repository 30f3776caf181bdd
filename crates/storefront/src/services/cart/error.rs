//! Cart error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No line exists at the given position.
    #[error("no cart line at index {0}")]
    LineNotFound(usize),

    /// Quantities must be at least 1.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The product is sold by size and none was chosen.
    #[error("please choose a size for {0}")]
    SizeRequired(String),

    /// Reading or writing the persisted cart failed.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),
}
