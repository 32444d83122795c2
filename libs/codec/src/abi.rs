//! System-contract function definitions, built from the interface signatures

use crate::error::CodecError;
use ethabi::{Function, Param, ParamType, StateMutability, Token};
use lazy_static::lazy_static;

fn param(name: &str, kind: ParamType) -> Param {
    Param {
        name: name.to_string(),
        kind,
        internal_type: None,
    }
}

#[allow(deprecated)]
fn function(
    name: &str,
    inputs: Vec<Param>,
    outputs: Vec<Param>,
    state_mutability: StateMutability,
) -> Function {
    Function {
        name: name.to_string(),
        inputs,
        outputs,
        constant: None,
        state_mutability,
    }
}

fn array(kind: ParamType) -> ParamType {
    ParamType::Array(Box::new(kind))
}

/// `AccountAmount(address accountID, int64 amount, bool isApproval)`
pub fn account_amount_type() -> ParamType {
    ParamType::Tuple(vec![ParamType::Address, ParamType::Int(64), ParamType::Bool])
}

/// `NftTransfer(address senderAccountID, address receiverAccountID, int64 serialNumber, bool isApproval)`
pub fn nft_transfer_type() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::Address,
        ParamType::Address,
        ParamType::Int(64),
        ParamType::Bool,
    ])
}

/// `TransferList(AccountAmount[] transfers)`
pub fn transfer_list_type() -> ParamType {
    ParamType::Tuple(vec![array(account_amount_type())])
}

/// `TokenTransferList(address token, AccountAmount[] transfers, NftTransfer[] nftTransfers)`
pub fn token_transfer_list_type() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::Address,
        array(account_amount_type()),
        array(nft_transfer_type()),
    ])
}

/// `KeyValue(bool inheritAccountKey, address contractId, bytes ed25519, bytes ECDSA_secp256k1, address delegatableContractId)`
pub fn key_value_type() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::Bool,
        ParamType::Address,
        ParamType::Bytes,
        ParamType::Bytes,
        ParamType::Address,
    ])
}

/// `TokenKey(uint256 keyType, KeyValue key)`
pub fn token_key_type() -> ParamType {
    ParamType::Tuple(vec![ParamType::Uint(256), key_value_type()])
}

/// `Expiry(int64 second, address autoRenewAccount, int64 autoRenewPeriod)`
pub fn expiry_type() -> ParamType {
    ParamType::Tuple(vec![ParamType::Int(64), ParamType::Address, ParamType::Int(64)])
}

/// `HederaToken(name, symbol, treasury, memo, tokenSupplyType, maxSupply, freezeDefault, tokenKeys, expiry)`
pub fn hedera_token_type() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::String,
        ParamType::String,
        ParamType::Address,
        ParamType::String,
        ParamType::Bool,
        ParamType::Int(64),
        ParamType::Bool,
        array(token_key_type()),
        expiry_type(),
    ])
}

lazy_static! {
    // HRC-632, called on the owner's account address
    pub static ref HBAR_APPROVE: Function = function(
        "hbarApprove",
        vec![param("spender", ParamType::Address), param("amount", ParamType::Int(256))],
        vec![param("responseCode", ParamType::Int(64))],
        StateMutability::NonPayable,
    );
    pub static ref HBAR_ALLOWANCE: Function = function(
        "hbarAllowance",
        vec![param("spender", ParamType::Address)],
        vec![param("responseCode", ParamType::Int(64)), param("amount", ParamType::Int(256))],
        StateMutability::View,
    );

    // ERC-20 facade of a fungible token
    pub static ref ERC20_ALLOWANCE: Function = function(
        "allowance",
        vec![param("owner", ParamType::Address), param("spender", ParamType::Address)],
        vec![param("", ParamType::Uint(256))],
        StateMutability::View,
    );
    pub static ref ERC20_APPROVE: Function = function(
        "approve",
        vec![param("spender", ParamType::Address), param("amount", ParamType::Uint(256))],
        vec![param("", ParamType::Bool)],
        StateMutability::NonPayable,
    );
    pub static ref ERC20_BALANCE_OF: Function = function(
        "balanceOf",
        vec![param("account", ParamType::Address)],
        vec![param("", ParamType::Uint(256))],
        StateMutability::View,
    );
    pub static ref ERC20_TOTAL_SUPPLY: Function = function(
        "totalSupply",
        vec![],
        vec![param("", ParamType::Uint(256))],
        StateMutability::View,
    );

    // ERC-721 facade of an NFT collection
    pub static ref ERC721_APPROVE: Function = function(
        "approve",
        vec![param("to", ParamType::Address), param("tokenId", ParamType::Uint(256))],
        vec![],
        StateMutability::NonPayable,
    );
    pub static ref ERC721_GET_APPROVED: Function = function(
        "getApproved",
        vec![param("tokenId", ParamType::Uint(256))],
        vec![param("", ParamType::Address)],
        StateMutability::View,
    );
    pub static ref ERC721_OWNER_OF: Function = function(
        "ownerOf",
        vec![param("tokenId", ParamType::Uint(256))],
        vec![param("", ParamType::Address)],
        StateMutability::View,
    );

    // HRC-719, called on the token address by the associating account
    pub static ref HRC719_ASSOCIATE: Function = function(
        "associate",
        vec![],
        vec![param("responseCode", ParamType::Uint(256))],
        StateMutability::NonPayable,
    );
    pub static ref HRC719_IS_ASSOCIATED: Function = function(
        "isAssociated",
        vec![],
        vec![param("associated", ParamType::Bool)],
        StateMutability::View,
    );

    // Token service system contract
    pub static ref CRYPTO_TRANSFER: Function = function(
        "cryptoTransfer",
        vec![
            param("transferList", transfer_list_type()),
            param("tokenTransfers", array(token_transfer_list_type())),
        ],
        vec![param("responseCode", ParamType::Int(64))],
        StateMutability::NonPayable,
    );
    pub static ref CREATE_FUNGIBLE_TOKEN: Function = function(
        "createFungibleToken",
        vec![
            param("token", hedera_token_type()),
            param("initialTotalSupply", ParamType::Int(64)),
            param("decimals", ParamType::Int(32)),
        ],
        vec![param("responseCode", ParamType::Int(64)), param("tokenAddress", ParamType::Address)],
        StateMutability::Payable,
    );
    pub static ref CREATE_NON_FUNGIBLE_TOKEN: Function = function(
        "createNonFungibleToken",
        vec![param("token", hedera_token_type())],
        vec![param("responseCode", ParamType::Int(64)), param("tokenAddress", ParamType::Address)],
        StateMutability::Payable,
    );
    pub static ref MINT_TOKEN: Function = function(
        "mintToken",
        vec![
            param("token", ParamType::Address),
            param("amount", ParamType::Int(64)),
            param("metadata", array(ParamType::Bytes)),
        ],
        vec![
            param("responseCode", ParamType::Int(64)),
            param("newTotalSupply", ParamType::Int(64)),
            param("serialNumbers", array(ParamType::Int(64))),
        ],
        StateMutability::NonPayable,
    );
}

/// Selector plus ABI-encoded arguments
pub fn encode_call(function: &Function, tokens: &[Token]) -> Result<Vec<u8>, CodecError> {
    function
        .encode_input(tokens)
        .map_err(|e| CodecError::Encode {
            function: function.name.clone(),
            reason: e.to_string(),
        })
}

/// True when `data` starts with the function's selector
pub fn is_call(function: &Function, data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == function.short_signature()
}

/// Checks the selector and decodes the arguments
pub fn decode_call(function: &Function, data: &[u8]) -> Result<Vec<Token>, CodecError> {
    if data.len() < 4 {
        return Err(CodecError::Truncated { len: data.len() });
    }
    if !is_call(function, data) {
        return Err(CodecError::SelectorMismatch {
            function: function.name.clone(),
            expected: hex::encode(function.short_signature()),
            actual: hex::encode(&data[..4]),
        });
    }
    function
        .decode_input(&data[4..])
        .map_err(|e| CodecError::Decode {
            function: function.name.clone(),
            reason: e.to_string(),
        })
}

pub fn decode_output(function: &Function, data: &[u8]) -> Result<Vec<Token>, CodecError> {
    function.decode_output(data).map_err(|e| CodecError::Decode {
        function: function.name.clone(),
        reason: e.to_string(),
    })
}
