//! Error types for item store operations.
//!
//! # Design
//! The store only ever checks existence, so `NotFound` is the only variant.
//! Input validation belongs to the router and never reaches this type.

use thiserror::Error;

/// Errors returned by `ItemStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No item with the given ID is currently in the store.
    #[error("item '{id}' not found")]
    NotFound { id: String },
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}
