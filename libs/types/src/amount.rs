//! HBAR amounts
//!
//! The ledger counts HBAR in tinybars (10^-8 HBAR) and calldata carries
//! tinybars. The JSON-RPC relay instead reports balances and accepts
//! transaction `value` in weibars, 18-decimal units where one tinybar is
//! 10^10 weibars.

use crate::errors::TransferError;
use ethers_core::types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TINYBARS_PER_HBAR: i64 = 100_000_000;
pub const WEIBARS_PER_TINYBAR: u64 = 10_000_000_000;

/// Signed HBAR amount held as tinybars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hbar {
    tinybars: i64,
}

impl Hbar {
    pub const ZERO: Hbar = Hbar::from_tinybars(0);
    pub const ONE: Hbar = Hbar::from_tinybars(TINYBARS_PER_HBAR);

    pub const fn from_tinybars(tinybars: i64) -> Self {
        Self { tinybars }
    }

    /// Whole HBAR, checked against int64 overflow
    pub fn from_hbar(hbar: i64) -> Result<Self, TransferError> {
        hbar.checked_mul(TINYBARS_PER_HBAR)
            .map(Self::from_tinybars)
            .ok_or_else(|| TransferError::AmountOverflow {
                context: format!("{} HBAR in tinybars", hbar),
            })
    }

    pub const fn to_tinybars(&self) -> i64 {
        self.tinybars
    }

    /// Same magnitude, opposite sign (the debit side of a leg)
    pub fn negated(&self) -> Result<Self, TransferError> {
        self.tinybars
            .checked_neg()
            .map(Self::from_tinybars)
            .ok_or_else(|| TransferError::AmountOverflow {
                context: format!("negating {} tinybars", self.tinybars),
            })
    }

    pub const fn is_negative(&self) -> bool {
        self.tinybars < 0
    }

    /// Magnitude in weibars, the unit of relay balances and `msg.value`
    pub fn to_weibars(&self) -> U256 {
        U256::from(self.tinybars.unsigned_abs()) * U256::from(WEIBARS_PER_TINYBAR)
    }

    /// Weibars truncated to whole tinybars
    pub fn from_weibars(weibars: U256) -> Result<Self, TransferError> {
        let tinybars = weibars / U256::from(WEIBARS_PER_TINYBAR);
        if tinybars > U256::from(i64::MAX as u64) {
            return Err(TransferError::AmountOverflow {
                context: format!("{} weibars in tinybars", weibars),
            });
        }
        Ok(Self::from_tinybars(tinybars.as_u64() as i64))
    }
}

impl fmt::Display for Hbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.tinybars < 0 { "-" } else { "" };
        let magnitude = self.tinybars.unsigned_abs();
        let whole = magnitude / TINYBARS_PER_HBAR as u64;
        let fraction = magnitude % TINYBARS_PER_HBAR as u64;
        if fraction == 0 {
            write!(f, "{}{} ℏ", sign, whole)
        } else {
            let digits = format!("{:08}", fraction);
            write!(f, "{}{}.{} ℏ", sign, whole, digits.trim_end_matches('0'))
        }
    }
}
