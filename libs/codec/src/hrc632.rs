//! HRC-632 HBAR allowances
//!
//! Both functions are called on the *owner's* account address, which the
//! ledger exposes as a contract facade.

use crate::abi::{decode_call, decode_output, encode_call, HBAR_ALLOWANCE, HBAR_APPROVE};
use crate::error::CodecError;
use crate::words::{int_token, word_to_i64, TokenReader};
use ethabi::Token;
use types::{Address, Hbar, U256};

pub fn hbar_approve(spender: Address, amount: Hbar) -> Result<Vec<u8>, CodecError> {
    encode_call(
        &HBAR_APPROVE,
        &[Token::Address(spender), int_token(amount.to_tinybars())],
    )
}

pub fn decode_hbar_approve(data: &[u8]) -> Result<(Address, Hbar), CodecError> {
    let mut reader = TokenReader::new(&HBAR_APPROVE.name, decode_call(&HBAR_APPROVE, data)?);
    let spender = reader.address()?;
    let tinybars = word_to_i64(&HBAR_APPROVE.name, reader.int_word()?)?;
    Ok((spender, Hbar::from_tinybars(tinybars)))
}

pub fn hbar_allowance(spender: Address) -> Result<Vec<u8>, CodecError> {
    encode_call(&HBAR_ALLOWANCE, &[Token::Address(spender)])
}

pub fn decode_hbar_allowance_input(data: &[u8]) -> Result<Address, CodecError> {
    TokenReader::new(&HBAR_ALLOWANCE.name, decode_call(&HBAR_ALLOWANCE, data)?).address()
}

/// `(responseCode, amount)` as the facade returns it
pub fn encode_hbar_allowance_output(response_code: i64, amount: Hbar) -> Vec<u8> {
    ethabi::encode(&[int_token(response_code), int_token(amount.to_tinybars())])
}

/// Response code and the raw int256 tinybar amount
pub fn decode_hbar_allowance(data: &[u8]) -> Result<(i64, U256), CodecError> {
    let mut reader = TokenReader::new(&HBAR_ALLOWANCE.name, decode_output(&HBAR_ALLOWANCE, data)?);
    let response_code = reader.int64()?;
    let amount = reader.int_word()?;
    Ok((response_code, amount))
}
