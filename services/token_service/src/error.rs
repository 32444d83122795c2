//! Error types for scenario steps

use codec::CodecError;
use network::LedgerError;
use thiserror::Error;
use types::{IdError, TransferError, H256};

/// Result type alias for step operations
pub type Result<T> = std::result::Result<T, StepError>;

/// Why a step failed; every variant is final, nothing is retried
#[derive(Debug, Error)]
pub enum StepError {
    /// Transaction never produced a receipt
    #[error("Submission failed during {step}: {source}")]
    Submission {
        step: String,
        #[source]
        source: LedgerError,
    },

    /// Read-only query failed
    #[error("Query failed during {step}: {source}")]
    Query {
        step: String,
        #[source]
        source: LedgerError,
    },

    /// Receipt status was not success
    #[error("{step} reverted in transaction 0x{tx_hash:x}{}", format_reason(.reason))]
    Reverted {
        step: String,
        tx_hash: H256,
        reason: Option<String>,
    },

    /// Observed state differs from what the step requires
    #[error("Check '{check}' failed: expected {expected}, actual {actual}")]
    Assertion {
        check: String,
        expected: String,
        actual: String,
    },

    /// Request rejected before anything was submitted
    #[error("Rejected before submission: {reason}")]
    Invalid { reason: String },

    /// Token creation or minting did not complete
    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    #[error("ABI error: {0}")]
    Codec(#[from] CodecError),
}

fn format_reason(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" ({})", reason),
        None => String::new(),
    }
}

impl From<TransferError> for StepError {
    fn from(error: TransferError) -> Self {
        StepError::Invalid {
            reason: error.to_string(),
        }
    }
}

impl From<IdError> for StepError {
    fn from(error: IdError) -> Self {
        StepError::Provisioning(error.to_string())
    }
}

impl StepError {
    /// Name of the failed check, for assertion failures
    pub fn check_name(&self) -> Option<&str> {
        match self {
            StepError::Assertion { check, .. } => Some(check),
            _ => None,
        }
    }

    pub fn is_revert(&self) -> bool {
        matches!(self, StepError::Reverted { .. })
    }
}
