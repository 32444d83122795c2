//! HRC-719 token association, called on the token address

use crate::abi::{encode_call, is_call, HRC719_ASSOCIATE, HRC719_IS_ASSOCIATED};
use crate::error::CodecError;
use crate::outputs;
use ethabi::Token;

pub fn associate() -> Result<Vec<u8>, CodecError> {
    encode_call(&HRC719_ASSOCIATE, &[])
}

pub fn is_associate_call(data: &[u8]) -> bool {
    is_call(&HRC719_ASSOCIATE, data)
}

/// Response code returned by `associate()`
pub fn encode_associate_output(response_code: u64) -> Vec<u8> {
    ethabi::encode(&[Token::Uint(response_code.into())])
}

/// `isAssociated()` answers for `msg.sender`
pub fn is_associated() -> Result<Vec<u8>, CodecError> {
    encode_call(&HRC719_IS_ASSOCIATED, &[])
}

pub fn is_is_associated_call(data: &[u8]) -> bool {
    is_call(&HRC719_IS_ASSOCIATED, data)
}

pub fn decode_is_associated(data: &[u8]) -> Result<bool, CodecError> {
    outputs::decode_bool(&HRC719_IS_ASSOCIATED, data)
}
