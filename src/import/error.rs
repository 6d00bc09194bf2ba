//! Errors surfaced by import operations

use thiserror::Error;

use crate::transfer::TransferError;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The target profile already exists. Nothing was transferred.
    #[error("Config with name '{name}' already exists!")]
    Conflict { name: String },

    /// A transfer failed outside a batch, under the propagating policy.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}
