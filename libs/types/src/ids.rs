//! Ledger-native entity identifiers
//!
//! Every account, token and contract on the ledger is addressed natively as
//! `shard.realm.num`. Through the EVM interface the same entity is addressed
//! by its "long-zero" address: 4 bytes of shard, 8 bytes of realm and 8 bytes
//! of entity number, big-endian.

use crate::errors::IdError;
use ethers_core::types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_entity_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name {
            pub shard: u32,
            pub realm: u64,
            pub num: u64,
        }

        impl $name {
            pub const fn new(shard: u32, realm: u64, num: u64) -> Self {
                Self { shard, realm, num }
            }

            /// Entity in shard 0, realm 0
            pub const fn from_num(num: u64) -> Self {
                Self::new(0, 0, num)
            }

            /// Long-zero EVM address of this entity
            pub fn to_solidity_address(&self) -> Address {
                let mut bytes = [0u8; 20];
                bytes[..4].copy_from_slice(&self.shard.to_be_bytes());
                bytes[4..12].copy_from_slice(&self.realm.to_be_bytes());
                bytes[12..].copy_from_slice(&self.num.to_be_bytes());
                Address::from(bytes)
            }

            /// Inverse of [`Self::to_solidity_address`]
            ///
            /// Rejects addresses whose shard and realm bytes are not all zero,
            /// which is how EVM key aliases are told apart from entity numbers
            /// in this harness (all of its entities live in shard 0, realm 0).
            pub fn from_solidity_address(address: Address) -> Result<Self, IdError> {
                if !is_long_zero(address) {
                    return Err(IdError::NotLongZero { address });
                }
                let bytes = address.as_bytes();
                let mut num = [0u8; 8];
                num.copy_from_slice(&bytes[12..]);
                Ok(Self::from_num(u64::from_be_bytes(num)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let (shard, realm, num) = parse_triplet(input)?;
                let shard = u32::try_from(shard).map_err(|_| IdError::Malformed {
                    input: input.to_string(),
                    reason: "shard does not fit in 32 bits".to_string(),
                })?;
                Ok(Self::new(shard, realm, num))
            }
        }
    };
}

define_entity_id!(
    /// Native account identifier, e.g. the Treasury operator `0.0.1234`
    AccountId
);

define_entity_id!(
    /// Native token identifier returned by token creation
    TokenId
);

/// True when the top 12 bytes (shard and realm) are zero
pub fn is_long_zero(address: Address) -> bool {
    address.as_bytes()[..12].iter().all(|b| *b == 0)
}

fn parse_triplet(input: &str) -> Result<(u64, u64, u64), IdError> {
    let malformed = |reason: &str| IdError::Malformed {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = input.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(malformed("expected shard.realm.num"));
    }

    let mut values = [0u64; 3];
    for (slot, part) in values.iter_mut().zip(parts.iter()) {
        *slot = part
            .parse::<u64>()
            .map_err(|_| malformed("components must be unsigned integers"))?;
    }

    Ok((values[0], values[1], values[2]))
}
