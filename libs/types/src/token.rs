//! Provisioned token references and the requests that create them

use crate::ids::TokenId;
use ethers_core::types::Address;
use serde::{Deserialize, Serialize};

/// Fungible token created for a scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleTokenRef {
    pub id: TokenId,
    pub address: Address,
    pub total_supply: u64,
    pub decimals: u32,
}

/// NFT collection created for a scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFungibleTokenRef {
    pub id: TokenId,
    pub address: Address,
    pub serials: Vec<i64>,
}

impl NonFungibleTokenRef {
    pub fn has_serial(&self, serial: i64) -> bool {
        self.serials.contains(&serial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleTokenRequest {
    pub name: String,
    pub symbol: String,
    pub initial_supply: u64,
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftCollectionRequest {
    pub name: String,
    pub symbol: String,
    /// Finite maximum supply; 0 means infinite supply
    pub max_supply: u64,
    /// Serials minted right after creation
    pub mint_count: usize,
}

impl NftCollectionRequest {
    /// Metadata attached to the `index`-th minted serial (0-based)
    pub fn metadata_for(&self, index: usize) -> Vec<u8> {
        format!("{}-{}", self.symbol, index + 1).into_bytes()
    }
}
