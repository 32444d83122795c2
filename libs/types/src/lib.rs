//! # HTS Harness Types
//!
//! Plain domain types shared by every crate of the harness. Nothing here
//! talks to the network; these are the values the codec encodes and the
//! scenario steps reason about.
//!
//! - [`ids`]: ledger-native `shard.realm.num` identifiers and their long-zero
//!   EVM addresses
//! - [`amount`]: HBAR amounts in tinybars with the weibar conversion used by
//!   the JSON-RPC relay
//! - [`allowance`]: the three allowance variants behind one tagged union
//! - [`transfer`]: the composite (atomic) transfer instruction and its
//!   conservation rules
//! - [`token`]: references to provisioned tokens and creation requests

pub mod allowance;
pub mod amount;
pub mod errors;
pub mod ids;
pub mod role;
pub mod token;
pub mod transfer;

pub use allowance::{AssetClass, Allowance, AllowanceValue};
pub use amount::{Hbar, TINYBARS_PER_HBAR, WEIBARS_PER_TINYBAR};
pub use errors::{IdError, TransferError};
pub use ids::{AccountId, TokenId};
pub use role::Role;
pub use token::{FungibleTokenRef, FungibleTokenRequest, NftCollectionRequest, NonFungibleTokenRef};
pub use transfer::{
    AccountAmount, CompositeTransfer, CompositeTransferBuilder, NftTransfer, TokenTransferList,
    TransferList,
};

/// EVM address type used across the harness
pub use ethers_core::types::{Address, H256, U256};
