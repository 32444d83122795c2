//! Error types for identifier parsing and transfer instruction validation

use ethers_core::types::Address;
use thiserror::Error;

/// Errors raised while parsing ledger-native identifiers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// Input is not of the form `shard.realm.num`
    #[error("Invalid entity id '{input}': {reason}")]
    Malformed { input: String, reason: String },

    /// Address carries an EVM alias instead of a long-zero entity number
    #[error("Address {address:?} is not a long-zero entity address")]
    NotLongZero { address: Address },
}

/// Errors raised while building or validating a composite transfer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Instruction carries no legs at all
    #[error("Composite transfer has no legs")]
    Empty,

    /// A single leg moves nothing
    #[error("Zero amount leg for {account:?} in {asset}")]
    ZeroAmount { asset: String, account: Address },

    /// Signed amounts for one asset do not sum to zero
    #[error("{asset} legs do not balance: net amount {net}")]
    Unbalanced { asset: String, net: i128 },

    /// Token list with neither fungible nor NFT transfers
    #[error("Token transfer list for {token:?} is empty")]
    EmptyTokenList { token: Address },

    /// Same token appears in two transfer lists
    #[error("Token {token:?} appears in more than one transfer list")]
    DuplicateToken { token: Address },

    /// NFT leg sends a serial back to its own sender
    #[error("NFT serial {serial} of {token:?} is sent to its own sender {account:?}")]
    SelfTransfer {
        token: Address,
        serial: i64,
        account: Address,
    },

    /// NFT serial numbers start at 1
    #[error("Invalid NFT serial {serial} for {token:?}")]
    InvalidSerial { token: Address, serial: i64 },

    /// Amount does not fit the ledger's int64 representation
    #[error("Amount overflow: {context}")]
    AmountOverflow { context: String },
}
