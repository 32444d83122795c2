//! # Ledger Clients
//!
//! Signing identities plus the [`Ledger`] seam every scenario step talks
//! through.
//!
//! ## Architecture Role
//!
//! ```text
//! token_service steps → [Ledger] → RpcLedger → JSON-RPC relay
//!                                      ↓
//!                                 MirrorClient → mirror node REST
//! ```
//!
//! - **[`RpcLedger`]**: ethers HTTP provider, per-identity signer middleware
//! - **[`MirrorClient`]**: contract results (return data, revert reasons)
//! - **[`Identity`]**: role-tagged `LocalWallet`

pub mod error;
pub mod identity;
pub mod ledger;
pub mod mirror;
pub mod rpc;

pub use error::LedgerError;
pub use identity::{Identity, Participants};
pub use ledger::{ContractCall, Ledger, ReadCall, Receipt, TxStatus};
pub use mirror::{ContractResultRecord, MirrorClient};
pub use rpc::RpcLedger;
