//! Ledger Error Types
//!
//! Failures talking to the JSON-RPC relay or the mirror node. A reverted
//! transaction is not an error here; it comes back as a [`Receipt`] with
//! [`TxStatus::Reverted`] so the caller can report the hash.
//!
//! [`Receipt`]: crate::Receipt
//! [`TxStatus::Reverted`]: crate::TxStatus::Reverted

use ethers::types::H256;
use thiserror::Error;
use types::Role;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Relay rejected or failed a request
    #[error("RPC error during {operation}: {message}")]
    Rpc { operation: String, message: String },

    /// Signing key could not be loaded
    #[error("Signer error for {role}: {message}")]
    Signer { role: Role, message: String },

    /// Submitted but no receipt ever appeared
    #[error("Transaction 0x{tx_hash:x} was dropped before a receipt was produced")]
    Dropped { tx_hash: H256 },

    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Mirror node request failed
    #[error("Mirror node error at {url}: {message}")]
    Mirror { url: String, message: String },

    /// Mirror node never ingested the record
    #[error("Mirror node has no {what} after {attempts} attempts")]
    MirrorTimeout { what: String, attempts: u32 },

    /// Response did not have the expected shape
    #[error("Malformed {what}: {reason}")]
    Malformed { what: String, reason: String },

    /// No record of the transaction exists
    #[error("Unknown transaction 0x{tx_hash:x}")]
    UnknownTransaction { tx_hash: H256 },
}

impl LedgerError {
    pub fn rpc(operation: &str, error: impl std::fmt::Display) -> Self {
        LedgerError::Rpc {
            operation: operation.to_string(),
            message: error.to_string(),
        }
    }
}
