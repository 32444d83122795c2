//! Composite (atomic) transfer instructions
//!
//! Mirrors the token service's `cryptoTransfer` arguments: one HBAR transfer
//! list plus one transfer list per token, each token list holding fungible
//! legs and NFT legs. Every leg carries an `is_approval` flag telling the
//! ledger to debit through a pre-granted allowance instead of the owner's own
//! signature.
//!
//! ## Invariants
//!
//! - HBAR amounts across the crypto list sum to zero
//! - fungible amounts sum to zero within each token list
//! - no leg moves a zero amount
//! - NFT serials are positive and never sent back to their sender
//! - a token appears in at most one token list

use crate::amount::Hbar;
use crate::errors::TransferError;
use ethers_core::types::Address;
use serde::{Deserialize, Serialize};

/// Signed amount credited to (positive) or debited from (negative) an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAmount {
    #[serde(rename = "accountID")]
    pub account: Address,
    pub amount: i64,
    #[serde(rename = "isApproval")]
    pub is_approval: bool,
}

impl AccountAmount {
    pub fn new(account: Address, amount: i64, is_approval: bool) -> Self {
        Self {
            account,
            amount,
            is_approval,
        }
    }
}

/// Movement of a single NFT serial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftTransfer {
    #[serde(rename = "senderAccountID")]
    pub sender: Address,
    #[serde(rename = "receiverAccountID")]
    pub receiver: Address,
    #[serde(rename = "serialNumber")]
    pub serial: i64,
    #[serde(rename = "isApproval")]
    pub is_approval: bool,
}

/// HBAR legs of a composite transfer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferList {
    pub transfers: Vec<AccountAmount>,
}

/// Legs of one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransferList {
    pub token: Address,
    pub transfers: Vec<AccountAmount>,
    #[serde(rename = "nftTransfers")]
    pub nft_transfers: Vec<NftTransfer>,
}

impl TokenTransferList {
    pub fn new(token: Address) -> Self {
        Self {
            token,
            transfers: Vec::new(),
            nft_transfers: Vec::new(),
        }
    }

    /// Net of the fungible legs, zero when balanced
    pub fn net_amount(&self) -> i128 {
        net(&self.transfers)
    }
}

/// One all-or-nothing transfer across HBAR and tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeTransfer {
    pub crypto: TransferList,
    pub tokens: Vec<TokenTransferList>,
}

impl CompositeTransfer {
    pub fn builder() -> CompositeTransferBuilder {
        CompositeTransferBuilder::default()
    }

    /// Net of the HBAR legs in tinybars, zero when balanced
    pub fn net_hbar(&self) -> i128 {
        net(&self.crypto.transfers)
    }

    pub fn token_list(&self, token: Address) -> Option<&TokenTransferList> {
        self.tokens.iter().find(|list| list.token == token)
    }

    pub fn leg_count(&self) -> usize {
        self.crypto.transfers.len()
            + self
                .tokens
                .iter()
                .map(|list| list.transfers.len() + list.nft_transfers.len())
                .sum::<usize>()
    }

    /// Check every invariant listed in the module docs
    pub fn validate(&self) -> Result<(), TransferError> {
        if self.leg_count() == 0 {
            return Err(TransferError::Empty);
        }

        check_amounts("HBAR", &self.crypto.transfers)?;

        for (index, list) in self.tokens.iter().enumerate() {
            if self.tokens[..index].iter().any(|seen| seen.token == list.token) {
                return Err(TransferError::DuplicateToken { token: list.token });
            }
            if list.transfers.is_empty() && list.nft_transfers.is_empty() {
                return Err(TransferError::EmptyTokenList { token: list.token });
            }

            check_amounts(&format!("token {:?}", list.token), &list.transfers)?;

            for nft in &list.nft_transfers {
                if nft.serial <= 0 {
                    return Err(TransferError::InvalidSerial {
                        token: list.token,
                        serial: nft.serial,
                    });
                }
                if nft.sender == nft.receiver {
                    return Err(TransferError::SelfTransfer {
                        token: list.token,
                        serial: nft.serial,
                        account: nft.sender,
                    });
                }
            }
        }

        Ok(())
    }
}

fn net(transfers: &[AccountAmount]) -> i128 {
    transfers.iter().map(|leg| leg.amount as i128).sum()
}

fn check_amounts(asset: &str, transfers: &[AccountAmount]) -> Result<(), TransferError> {
    if let Some(leg) = transfers.iter().find(|leg| leg.amount == 0) {
        return Err(TransferError::ZeroAmount {
            asset: asset.to_string(),
            account: leg.account,
        });
    }

    let net = net(transfers);
    if net != 0 {
        return Err(TransferError::Unbalanced {
            asset: asset.to_string(),
            net,
        });
    }

    Ok(())
}

/// Builds balanced instructions one movement at a time
///
/// Each HBAR or fungible movement adds exactly one debit and one credit leg.
/// The debit carries the caller's `is_approval` flag; the credit is always a
/// direct credit.
#[derive(Debug, Default)]
pub struct CompositeTransferBuilder {
    transfer: CompositeTransfer,
}

impl CompositeTransferBuilder {
    pub fn hbar(
        mut self,
        from: Address,
        to: Address,
        amount: Hbar,
        is_approval: bool,
    ) -> Result<Self, TransferError> {
        let debit = amount.negated()?;
        self.transfer.crypto.transfers.push(AccountAmount::new(
            from,
            debit.to_tinybars(),
            is_approval,
        ));
        self.transfer
            .crypto
            .transfers
            .push(AccountAmount::new(to, amount.to_tinybars(), false));
        Ok(self)
    }

    pub fn fungible(
        mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: u64,
        is_approval: bool,
    ) -> Result<Self, TransferError> {
        let credit = i64::try_from(amount).map_err(|_| TransferError::AmountOverflow {
            context: format!("{} units of {:?}", amount, token),
        })?;
        let list = self.list_for(token);
        list.transfers
            .push(AccountAmount::new(from, -credit, is_approval));
        list.transfers.push(AccountAmount::new(to, credit, false));
        Ok(self)
    }

    pub fn nft(
        mut self,
        token: Address,
        from: Address,
        to: Address,
        serial: i64,
        is_approval: bool,
    ) -> Self {
        self.list_for(token).nft_transfers.push(NftTransfer {
            sender: from,
            receiver: to,
            serial,
            is_approval,
        });
        self
    }

    pub fn build(self) -> Result<CompositeTransfer, TransferError> {
        self.transfer.validate()?;
        Ok(self.transfer)
    }

    fn list_for(&mut self, token: Address) -> &mut TokenTransferList {
        let tokens = &mut self.transfer.tokens;
        match tokens.iter().position(|list| list.token == token) {
            Some(index) => &mut tokens[index],
            None => {
                tokens.push(TokenTransferList::new(token));
                let last = tokens.len() - 1;
                &mut tokens[last]
            }
        }
    }
}
