//! The module contains the errors the ledger can throw.
//!
//! Validation failures ([`EmptyName`], [`InvalidAmount`]) abort the
//! operation without touching the bill list; the I/O variants come from
//! the persistence adapter.
//!
//! [`EmptyName`]: LedgerError::EmptyName
//! [`InvalidAmount`]: LedgerError::InvalidAmount
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Enter a valid item name")]
    EmptyName,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
