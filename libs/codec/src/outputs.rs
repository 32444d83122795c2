//! Single-value outputs, shared by several view functions
//!
//! Encoders produce return data the way a contract would, which is what the
//! in-memory ledger answers reads with.

use crate::abi::decode_output;
use crate::error::CodecError;
use crate::words::TokenReader;
use ethabi::{Function, Token};
use types::{Address, U256};

pub fn encode_uint(value: U256) -> Vec<u8> {
    ethabi::encode(&[Token::Uint(value)])
}

pub fn encode_address(value: Address) -> Vec<u8> {
    ethabi::encode(&[Token::Address(value)])
}

pub fn encode_bool(value: bool) -> Vec<u8> {
    ethabi::encode(&[Token::Bool(value)])
}

pub fn decode_uint(function: &Function, data: &[u8]) -> Result<U256, CodecError> {
    TokenReader::new(&function.name, decode_output(function, data)?).uint()
}

pub fn decode_address(function: &Function, data: &[u8]) -> Result<Address, CodecError> {
    TokenReader::new(&function.name, decode_output(function, data)?).address()
}

pub fn decode_bool(function: &Function, data: &[u8]) -> Result<bool, CodecError> {
    TokenReader::new(&function.name, decode_output(function, data)?).boolean()
}
