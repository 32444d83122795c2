//! # Token Service ABI Codec
//!
//! Encoding and decoding rules for every system-contract entry point the
//! harness touches. Function definitions are built once (see [`abi`]) and the
//! per-interface modules expose typed encoders for the calls the harness
//! makes and typed decoders for what comes back.
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → libs/network
//!     ↑           ↓            ↓
//! Allowance   calldata     JSON-RPC
//! Composite   outputs      mirror node
//! Transfer
//! ```
//!
//! Decoders for call *inputs* exist as well; the in-memory ledger used by the
//! scenario tests replays the exact calldata the harness sends.

pub mod abi;
pub mod allowance;
pub mod erc20;
pub mod erc721;
pub mod error;
pub mod hrc632;
pub mod hrc719;
pub mod hts;
pub mod outputs;
mod words;

pub use error::CodecError;
pub use types::{Address, U256};

/// A state-changing call: target contract and calldata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallData {
    pub to: Address,
    pub data: Vec<u8>,
}

/// A read-only call; `from` matters for `msg.sender`-scoped views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub to: Address,
    pub from: Option<Address>,
    pub data: Vec<u8>,
}
