//! Allowances: an owner-granted right for a spender to move an asset
//!
//! The three asset classes use three different approval entry points, but
//! the lifecycle is the same for all of them: the allowance reads as unset,
//! the owner approves, the allowance reads as the granted value. Keeping the
//! variants behind one enum lets a single procedure drive all three.

use crate::amount::Hbar;
use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset classes issued by the token service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    Native,
    Fungible,
    NonFungible,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetClass::Native => "HBAR",
            AssetClass::Fungible => "FT",
            AssetClass::NonFungible => "NFT",
        };
        f.write_str(name)
    }
}

/// One allowance to grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Allowance {
    /// HBAR allowance set on the owner's own account
    Native {
        owner: Address,
        spender: Address,
        amount: Hbar,
    },
    /// Fungible-token allowance set on the token
    Fungible {
        token: Address,
        owner: Address,
        spender: Address,
        amount: u64,
    },
    /// Approval of one NFT serial
    NonFungible {
        token: Address,
        owner: Address,
        spender: Address,
        serial: i64,
    },
}

/// Observed state of an allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllowanceValue {
    /// Remaining amount (tinybars for HBAR, smallest token unit for FT)
    Amount(U256),
    /// Address approved for an NFT serial
    Approved(Address),
}

impl Allowance {
    pub fn asset_class(&self) -> AssetClass {
        match self {
            Allowance::Native { .. } => AssetClass::Native,
            Allowance::Fungible { .. } => AssetClass::Fungible,
            Allowance::NonFungible { .. } => AssetClass::NonFungible,
        }
    }

    pub fn owner(&self) -> Address {
        match self {
            Allowance::Native { owner, .. }
            | Allowance::Fungible { owner, .. }
            | Allowance::NonFungible { owner, .. } => *owner,
        }
    }

    pub fn spender(&self) -> Address {
        match self {
            Allowance::Native { spender, .. }
            | Allowance::Fungible { spender, .. }
            | Allowance::NonFungible { spender, .. } => *spender,
        }
    }

    /// Value an allowance reads as before anything was granted
    pub fn unset_value(&self) -> AllowanceValue {
        match self {
            Allowance::Native { .. } | Allowance::Fungible { .. } => {
                AllowanceValue::Amount(U256::zero())
            }
            Allowance::NonFungible { .. } => AllowanceValue::Approved(Address::zero()),
        }
    }

    /// Value the allowance must read as right after approval
    pub fn granted_value(&self) -> AllowanceValue {
        match self {
            Allowance::Native { amount, .. } => {
                AllowanceValue::Amount(U256::from(amount.to_tinybars().unsigned_abs()))
            }
            Allowance::Fungible { amount, .. } => AllowanceValue::Amount(U256::from(*amount)),
            Allowance::NonFungible { spender, .. } => AllowanceValue::Approved(*spender),
        }
    }

    /// The approval that clears this allowance; its granted value is the unset value
    pub fn revoked(&self) -> Allowance {
        match self {
            Allowance::Native { owner, spender, .. } => Allowance::Native {
                owner: *owner,
                spender: *spender,
                amount: Hbar::ZERO,
            },
            Allowance::Fungible {
                token,
                owner,
                spender,
                ..
            } => Allowance::Fungible {
                token: *token,
                owner: *owner,
                spender: *spender,
                amount: 0,
            },
            // ERC-721 clears an approval by approving the zero address
            Allowance::NonFungible { token, owner, serial, .. } => Allowance::NonFungible {
                token: *token,
                owner: *owner,
                spender: Address::zero(),
                serial: *serial,
            },
        }
    }
}

impl fmt::Display for Allowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allowance::Native {
                owner,
                spender,
                amount,
            } => write!(f, "{} of {:?} to {:?}", amount, owner, spender),
            Allowance::Fungible {
                token,
                owner,
                spender,
                amount,
            } => write!(
                f,
                "{} units of {:?} from {:?} to {:?}",
                amount, token, owner, spender
            ),
            Allowance::NonFungible {
                token,
                owner,
                spender,
                serial,
            } => write!(
                f,
                "serial #{} of {:?} from {:?} to {:?}",
                serial, token, owner, spender
            ),
        }
    }
}

impl fmt::Display for AllowanceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowanceValue::Amount(amount) => write!(f, "{}", amount),
            AllowanceValue::Approved(address) => write!(f, "{:?}", address),
        }
    }
}
