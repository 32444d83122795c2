//! ERC-20 facade of fungible tokens

use crate::abi::{
    decode_call, encode_call, ERC20_ALLOWANCE, ERC20_APPROVE, ERC20_BALANCE_OF, ERC20_TOTAL_SUPPLY,
};
use crate::error::CodecError;
use crate::outputs;
use crate::words::TokenReader;
use ethabi::Token;
use types::{Address, U256};

pub fn allowance(owner: Address, spender: Address) -> Result<Vec<u8>, CodecError> {
    encode_call(&ERC20_ALLOWANCE, &[Token::Address(owner), Token::Address(spender)])
}

pub fn decode_allowance_input(data: &[u8]) -> Result<(Address, Address), CodecError> {
    let mut reader = TokenReader::new(&ERC20_ALLOWANCE.name, decode_call(&ERC20_ALLOWANCE, data)?);
    Ok((reader.address()?, reader.address()?))
}

pub fn decode_allowance(data: &[u8]) -> Result<U256, CodecError> {
    outputs::decode_uint(&ERC20_ALLOWANCE, data)
}

pub fn approve(spender: Address, amount: U256) -> Result<Vec<u8>, CodecError> {
    encode_call(&ERC20_APPROVE, &[Token::Address(spender), Token::Uint(amount)])
}

pub fn decode_approve(data: &[u8]) -> Result<(Address, U256), CodecError> {
    let mut reader = TokenReader::new(&ERC20_APPROVE.name, decode_call(&ERC20_APPROVE, data)?);
    Ok((reader.address()?, reader.uint()?))
}

pub fn balance_of(account: Address) -> Result<Vec<u8>, CodecError> {
    encode_call(&ERC20_BALANCE_OF, &[Token::Address(account)])
}

pub fn decode_balance_of_input(data: &[u8]) -> Result<Address, CodecError> {
    TokenReader::new(&ERC20_BALANCE_OF.name, decode_call(&ERC20_BALANCE_OF, data)?).address()
}

pub fn decode_balance(data: &[u8]) -> Result<U256, CodecError> {
    outputs::decode_uint(&ERC20_BALANCE_OF, data)
}

pub fn total_supply() -> Result<Vec<u8>, CodecError> {
    encode_call(&ERC20_TOTAL_SUPPLY, &[])
}

pub fn decode_total_supply(data: &[u8]) -> Result<U256, CodecError> {
    outputs::decode_uint(&ERC20_TOTAL_SUPPLY, data)
}
