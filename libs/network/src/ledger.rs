//! The seam between scenario steps and a ledger
//!
//! Steps only ever see [`Ledger`]; the JSON-RPC client and the in-memory
//! ledger used by the scenario tests both implement it.

use crate::error::LedgerError;
use crate::identity::Identity;
use async_trait::async_trait;
use ethers::types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

/// State-changing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub data: Vec<u8>,
    /// Attached value in weibars
    pub value: U256,
    pub gas_limit: u64,
}

impl ContractCall {
    pub fn new(to: Address, data: Vec<u8>, gas_limit: u64) -> Self {
        Self {
            to,
            data,
            value: U256::zero(),
            gas_limit,
        }
    }

    pub fn with_value(mut self, weibars: U256) -> Self {
        self.value = weibars;
        self
    }
}

/// Read-only call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCall {
    pub to: Address,
    /// `msg.sender` for views that depend on the caller
    pub from: Option<Address>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    Success,
    Reverted,
}

/// Final outcome of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_hash: H256,
    pub status: TxStatus,
    pub block_number: Option<u64>,
    pub gas_used: Option<U256>,
    /// Reason reported for a revert, when the ledger provides one
    pub revert_reason: Option<String>,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        self.status == TxStatus::Success
    }
}

#[async_trait]
pub trait Ledger: Send + Sync {
    /// Sign `call` as `signer`, submit it and wait for the receipt
    async fn send(&self, signer: &Identity, call: ContractCall) -> Result<Receipt, LedgerError>;

    /// Execute a read-only call and return the raw output
    async fn call(&self, read: ReadCall) -> Result<Vec<u8>, LedgerError>;

    /// Native balance in weibars
    async fn balance(&self, account: Address) -> Result<U256, LedgerError>;

    /// Output data of a state-changing call
    ///
    /// Receipts carry no return data, so ledgers look it up after the fact.
    async fn call_result(&self, tx_hash: H256) -> Result<Vec<u8>, LedgerError>;
}
