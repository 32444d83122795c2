//! ERC-721 facade of NFT collections
//!
//! `tokenId` in these functions is the ledger's serial number.

use crate::abi::{decode_call, encode_call, ERC721_APPROVE, ERC721_GET_APPROVED, ERC721_OWNER_OF};
use crate::error::CodecError;
use crate::outputs;
use crate::words::TokenReader;
use ethabi::Token;
use types::{Address, U256};

fn serial_token(function: &str, serial: i64) -> Result<Token, CodecError> {
    u64::try_from(serial)
        .map(|value| Token::Uint(value.into()))
        .map_err(|_| CodecError::OutOfRange {
            function: function.to_string(),
            detail: format!("serial {} is negative", serial),
        })
}

fn read_serial(reader: &mut TokenReader, function: &str) -> Result<i64, CodecError> {
    let word = reader.uint()?;
    if word > U256::from(i64::MAX as u64) {
        return Err(CodecError::OutOfRange {
            function: function.to_string(),
            detail: format!("serial {} exceeds int64", word),
        });
    }
    Ok(word.as_u64() as i64)
}

pub fn approve(to: Address, serial: i64) -> Result<Vec<u8>, CodecError> {
    let serial = serial_token(&ERC721_APPROVE.name, serial)?;
    encode_call(&ERC721_APPROVE, &[Token::Address(to), serial])
}

pub fn decode_approve(data: &[u8]) -> Result<(Address, i64), CodecError> {
    let mut reader = TokenReader::new(&ERC721_APPROVE.name, decode_call(&ERC721_APPROVE, data)?);
    let to = reader.address()?;
    Ok((to, read_serial(&mut reader, &ERC721_APPROVE.name)?))
}

pub fn get_approved(serial: i64) -> Result<Vec<u8>, CodecError> {
    let serial = serial_token(&ERC721_GET_APPROVED.name, serial)?;
    encode_call(&ERC721_GET_APPROVED, &[serial])
}

pub fn decode_get_approved_input(data: &[u8]) -> Result<i64, CodecError> {
    let mut reader = TokenReader::new(
        &ERC721_GET_APPROVED.name,
        decode_call(&ERC721_GET_APPROVED, data)?,
    );
    read_serial(&mut reader, &ERC721_GET_APPROVED.name)
}

pub fn decode_get_approved(data: &[u8]) -> Result<Address, CodecError> {
    outputs::decode_address(&ERC721_GET_APPROVED, data)
}

pub fn owner_of(serial: i64) -> Result<Vec<u8>, CodecError> {
    let serial = serial_token(&ERC721_OWNER_OF.name, serial)?;
    encode_call(&ERC721_OWNER_OF, &[serial])
}

pub fn decode_owner_of_input(data: &[u8]) -> Result<i64, CodecError> {
    let mut reader = TokenReader::new(&ERC721_OWNER_OF.name, decode_call(&ERC721_OWNER_OF, data)?);
    read_serial(&mut reader, &ERC721_OWNER_OF.name)
}

pub fn decode_owner_of(data: &[u8]) -> Result<Address, CodecError> {
    outputs::decode_address(&ERC721_OWNER_OF, data)
}
