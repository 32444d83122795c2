//! Token service system contract (`0x167`)
//!
//! `cryptoTransfer` is the composite transfer entry point. Token creation
//! and minting are used by the provisioning step.

use crate::abi::{
    decode_call, decode_output, encode_call, CREATE_FUNGIBLE_TOKEN, CREATE_NON_FUNGIBLE_TOKEN,
    CRYPTO_TRANSFER, MINT_TOKEN,
};
use crate::error::CodecError;
use crate::words::{int_token, TokenReader};
use ethabi::Token;
use types::{AccountAmount, Address, CompositeTransfer, NftTransfer, TokenTransferList, TransferList};

/// Key type bits of `TokenKey.keyType`
pub mod key_type {
    pub const ADMIN: u64 = 1;
    pub const KYC: u64 = 2;
    pub const FREEZE: u64 = 4;
    pub const WIPE: u64 = 8;
    pub const SUPPLY: u64 = 16;
    pub const FEE_SCHEDULE: u64 = 32;
    pub const PAUSE: u64 = 64;
}

fn account_amount_token(leg: &AccountAmount) -> Token {
    Token::Tuple(vec![
        Token::Address(leg.account),
        int_token(leg.amount),
        Token::Bool(leg.is_approval),
    ])
}

fn nft_transfer_token(leg: &NftTransfer) -> Token {
    Token::Tuple(vec![
        Token::Address(leg.sender),
        Token::Address(leg.receiver),
        int_token(leg.serial),
        Token::Bool(leg.is_approval),
    ])
}

pub fn crypto_transfer(transfer: &CompositeTransfer) -> Result<Vec<u8>, CodecError> {
    let crypto = Token::Tuple(vec![Token::Array(
        transfer.crypto.transfers.iter().map(account_amount_token).collect(),
    )]);
    let tokens = Token::Array(
        transfer
            .tokens
            .iter()
            .map(|list| {
                Token::Tuple(vec![
                    Token::Address(list.token),
                    Token::Array(list.transfers.iter().map(account_amount_token).collect()),
                    Token::Array(list.nft_transfers.iter().map(nft_transfer_token).collect()),
                ])
            })
            .collect(),
    );
    encode_call(&CRYPTO_TRANSFER, &[crypto, tokens])
}

fn read_account_amounts(
    reader: &mut TokenReader,
) -> Result<Vec<AccountAmount>, CodecError> {
    reader
        .array()?
        .into_iter()
        .map(|token| {
            let mut fields = reader.element(token)?;
            Ok(AccountAmount {
                account: fields.address()?,
                amount: fields.int64()?,
                is_approval: fields.boolean()?,
            })
        })
        .collect()
}

/// Calldata back into the instruction it was built from
pub fn decode_crypto_transfer(data: &[u8]) -> Result<CompositeTransfer, CodecError> {
    let mut reader = TokenReader::new(&CRYPTO_TRANSFER.name, decode_call(&CRYPTO_TRANSFER, data)?);

    let mut crypto_reader = reader.tuple()?;
    let crypto = TransferList {
        transfers: read_account_amounts(&mut crypto_reader)?,
    };

    let mut tokens = Vec::new();
    for list_token in reader.array()? {
        let mut list = reader.element(list_token)?;
        let token = list.address()?;
        let transfers = read_account_amounts(&mut list)?;
        let nft_transfers = list
            .array()?
            .into_iter()
            .map(|nft_token| {
                let mut fields = list.element(nft_token)?;
                Ok(NftTransfer {
                    sender: fields.address()?,
                    receiver: fields.address()?,
                    serial: fields.int64()?,
                    is_approval: fields.boolean()?,
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        tokens.push(TokenTransferList {
            token,
            transfers,
            nft_transfers,
        });
    }

    Ok(CompositeTransfer { crypto, tokens })
}

/// One `TokenKey` bound to a secp256k1 public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenKeySpec {
    /// Bitwise OR of [`key_type`] bits
    pub key_type: u64,
    /// 33-byte compressed public key
    pub ecdsa_secp256k1: Vec<u8>,
}

/// `HederaToken` argument of the create functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HederaTokenSpec {
    pub name: String,
    pub symbol: String,
    pub treasury: Address,
    pub memo: String,
    /// `tokenSupplyType`: true for a finite maximum supply
    pub finite_supply: bool,
    pub max_supply: i64,
    pub freeze_default: bool,
    pub keys: Vec<TokenKeySpec>,
    pub auto_renew_account: Address,
    pub auto_renew_period_secs: i64,
}

impl HederaTokenSpec {
    fn to_token(&self) -> Token {
        let keys = self
            .keys
            .iter()
            .map(|key| {
                Token::Tuple(vec![
                    Token::Uint(key.key_type.into()),
                    Token::Tuple(vec![
                        Token::Bool(false),
                        Token::Address(Address::zero()),
                        Token::Bytes(Vec::new()),
                        Token::Bytes(key.ecdsa_secp256k1.clone()),
                        Token::Address(Address::zero()),
                    ]),
                ])
            })
            .collect();

        Token::Tuple(vec![
            Token::String(self.name.clone()),
            Token::String(self.symbol.clone()),
            Token::Address(self.treasury),
            Token::String(self.memo.clone()),
            Token::Bool(self.finite_supply),
            int_token(self.max_supply),
            Token::Bool(self.freeze_default),
            Token::Array(keys),
            Token::Tuple(vec![
                int_token(0),
                Token::Address(self.auto_renew_account),
                int_token(self.auto_renew_period_secs),
            ]),
        ])
    }
}

impl HederaTokenSpec {
    fn read(reader: &mut TokenReader) -> Result<Self, CodecError> {
        let mut fields = reader.tuple()?;
        let name = fields.string()?;
        let symbol = fields.string()?;
        let treasury = fields.address()?;
        let memo = fields.string()?;
        let finite_supply = fields.boolean()?;
        let max_supply = fields.int64()?;
        let freeze_default = fields.boolean()?;

        let keys = fields
            .array()?
            .into_iter()
            .map(|token| {
                let mut key = fields.element(token)?;
                let key_type = key.uint()?;
                let mut value = key.tuple()?;
                let _inherit_account_key = value.boolean()?;
                let _contract_id = value.address()?;
                let _ed25519 = value.bytes()?;
                let ecdsa_secp256k1 = value.bytes()?;
                Ok(TokenKeySpec {
                    key_type: key_type.low_u64(),
                    ecdsa_secp256k1,
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;

        let mut expiry = fields.tuple()?;
        let _second = expiry.int64()?;
        let auto_renew_account = expiry.address()?;
        let auto_renew_period_secs = expiry.int64()?;

        Ok(Self {
            name,
            symbol,
            treasury,
            memo,
            finite_supply,
            max_supply,
            freeze_default,
            keys,
            auto_renew_account,
            auto_renew_period_secs,
        })
    }
}

pub fn create_fungible_token(
    token: &HederaTokenSpec,
    initial_supply: i64,
    decimals: i32,
) -> Result<Vec<u8>, CodecError> {
    encode_call(
        &CREATE_FUNGIBLE_TOKEN,
        &[token.to_token(), int_token(initial_supply), int_token(decimals as i64)],
    )
}

pub fn create_non_fungible_token(token: &HederaTokenSpec) -> Result<Vec<u8>, CodecError> {
    encode_call(&CREATE_NON_FUNGIBLE_TOKEN, &[token.to_token()])
}

/// `(token, initialTotalSupply, decimals)`
pub fn decode_create_fungible_token(
    data: &[u8],
) -> Result<(HederaTokenSpec, i64, i32), CodecError> {
    let function = &*CREATE_FUNGIBLE_TOKEN;
    let mut reader = TokenReader::new(&function.name, decode_call(function, data)?);
    let token = HederaTokenSpec::read(&mut reader)?;
    let initial_supply = reader.int64()?;
    let decimals = i32::try_from(reader.int64()?).map_err(|_| CodecError::OutOfRange {
        function: function.name.clone(),
        detail: "decimals exceed int32".to_string(),
    })?;
    Ok((token, initial_supply, decimals))
}

pub fn decode_create_non_fungible_token(data: &[u8]) -> Result<HederaTokenSpec, CodecError> {
    let function = &*CREATE_NON_FUNGIBLE_TOKEN;
    let mut reader = TokenReader::new(&function.name, decode_call(function, data)?);
    HederaTokenSpec::read(&mut reader)
}

/// `(responseCode, tokenAddress)` of either create function
pub fn decode_create_result(fungible: bool, data: &[u8]) -> Result<(i64, Address), CodecError> {
    let function = if fungible {
        &*CREATE_FUNGIBLE_TOKEN
    } else {
        &*CREATE_NON_FUNGIBLE_TOKEN
    };
    let mut reader = TokenReader::new(&function.name, decode_output(function, data)?);
    Ok((reader.int64()?, reader.address()?))
}

pub fn encode_create_output(response_code: i64, token: Address) -> Vec<u8> {
    ethabi::encode(&[int_token(response_code), Token::Address(token)])
}

/// NFT mint: `amount` stays zero, one metadata entry per serial
pub fn mint_nfts(token: Address, metadata: Vec<Vec<u8>>) -> Result<Vec<u8>, CodecError> {
    encode_call(
        &MINT_TOKEN,
        &[
            Token::Address(token),
            int_token(0),
            Token::Array(metadata.into_iter().map(Token::Bytes).collect()),
        ],
    )
}

/// `(token, amount, metadata)`
pub fn decode_mint_token(data: &[u8]) -> Result<(Address, i64, Vec<Vec<u8>>), CodecError> {
    let mut reader = TokenReader::new(&MINT_TOKEN.name, decode_call(&MINT_TOKEN, data)?);
    let token = reader.address()?;
    let amount = reader.int64()?;
    let metadata = reader
        .array()?
        .into_iter()
        .map(|entry| TokenReader::new(&MINT_TOKEN.name, vec![entry]).bytes())
        .collect::<Result<Vec<_>, CodecError>>()?;
    Ok((token, amount, metadata))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintResult {
    pub response_code: i64,
    pub new_total_supply: i64,
    pub serials: Vec<i64>,
}

pub fn decode_mint_result(data: &[u8]) -> Result<MintResult, CodecError> {
    let mut reader = TokenReader::new(&MINT_TOKEN.name, decode_output(&MINT_TOKEN, data)?);
    let response_code = reader.int64()?;
    let new_total_supply = reader.int64()?;
    let serials = reader
        .array()?
        .into_iter()
        .map(|token| {
            let mut single = TokenReader::new(&MINT_TOKEN.name, vec![token]);
            single.int64()
        })
        .collect::<Result<Vec<_>, CodecError>>()?;
    Ok(MintResult {
        response_code,
        new_total_supply,
        serials,
    })
}

pub fn encode_mint_output(result: &MintResult) -> Vec<u8> {
    ethabi::encode(&[
        int_token(result.response_code),
        int_token(result.new_total_supply),
        Token::Array(result.serials.iter().map(|serial| int_token(*serial)).collect()),
    ])
}
