//! Error types for the editor

use crate::mutations::MutationError;
use crate::store::StoreError;
use crate::validator::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EditorError {
    /// Rejected by the validator; fixable by further editing
    pub fn is_validation(&self) -> bool {
        matches!(self, EditorError::Validation(_))
    }
}
