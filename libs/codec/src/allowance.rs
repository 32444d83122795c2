//! Calldata for the allowance lifecycle of every asset class
//!
//! HBAR calls target the owner's account address. Token calls target the
//! token address; the signer supplies `msg.sender`.

use crate::error::CodecError;
use crate::{erc20, erc721, hrc632, CallData, Query};
use types::{Allowance, AllowanceValue, U256};

/// Result of reading an allowance back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowanceReading {
    pub value: AllowanceValue,
    /// Only the HBAR facade reports a response code
    pub response_code: Option<i64>,
}

/// The approval transaction the owner signs
pub fn approve_call(allowance: &Allowance) -> Result<CallData, CodecError> {
    match allowance {
        Allowance::Native {
            owner,
            spender,
            amount,
        } => Ok(CallData {
            to: *owner,
            data: hrc632::hbar_approve(*spender, *amount)?,
        }),
        Allowance::Fungible {
            token,
            spender,
            amount,
            ..
        } => Ok(CallData {
            to: *token,
            data: erc20::approve(*spender, U256::from(*amount))?,
        }),
        Allowance::NonFungible {
            token,
            spender,
            serial,
            ..
        } => Ok(CallData {
            to: *token,
            data: erc721::approve(*spender, *serial)?,
        }),
    }
}

/// The read that observes the allowance
pub fn allowance_query(allowance: &Allowance) -> Result<Query, CodecError> {
    match allowance {
        Allowance::Native { owner, spender, .. } => Ok(Query {
            to: *owner,
            from: Some(*owner),
            data: hrc632::hbar_allowance(*spender)?,
        }),
        Allowance::Fungible {
            token,
            owner,
            spender,
            ..
        } => Ok(Query {
            to: *token,
            from: None,
            data: erc20::allowance(*owner, *spender)?,
        }),
        Allowance::NonFungible { token, serial, .. } => Ok(Query {
            to: *token,
            from: None,
            data: erc721::get_approved(*serial)?,
        }),
    }
}

pub fn decode_allowance(
    allowance: &Allowance,
    output: &[u8],
) -> Result<AllowanceReading, CodecError> {
    match allowance {
        Allowance::Native { .. } => {
            let (code, amount) = hrc632::decode_hbar_allowance(output)?;
            Ok(AllowanceReading {
                value: AllowanceValue::Amount(amount),
                response_code: Some(code),
            })
        }
        Allowance::Fungible { .. } => Ok(AllowanceReading {
            value: AllowanceValue::Amount(erc20::decode_allowance(output)?),
            response_code: None,
        }),
        Allowance::NonFungible { .. } => Ok(AllowanceReading {
            value: AllowanceValue::Approved(erc721::decode_get_approved(output)?),
            response_code: None,
        }),
    }
}
