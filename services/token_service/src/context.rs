//! Everything a step needs, constructed once per scenario run

use crate::error::{Result, StepError};
use codec::{erc20, erc721, Query};
use network::{ContractCall, Identity, Ledger, Participants, ReadCall, Receipt};
use std::sync::Arc;
use tracing::{debug, info, warn};
use types::{Address, Hbar, U256};

/// `0x…0167`
pub fn system_contract_address() -> Address {
    Address::from_low_u64_be(0x167)
}

#[derive(Clone)]
pub struct ScenarioContext {
    pub ledger: Arc<dyn Ledger>,
    pub participants: Participants,
    pub system_contract: Address,
    pub gas_limit: u64,
}

impl ScenarioContext {
    pub fn new(ledger: Arc<dyn Ledger>, participants: Participants, gas_limit: u64) -> Self {
        Self {
            ledger,
            participants,
            system_contract: system_contract_address(),
            gas_limit,
        }
    }

    /// Call with the context's gas ceiling and no value
    pub fn call(&self, to: Address, data: Vec<u8>) -> ContractCall {
        ContractCall::new(to, data, self.gas_limit)
    }

    /// Submit and require a successful receipt
    pub async fn submit(&self, step: &str, signer: &Identity, call: ContractCall) -> Result<Receipt> {
        debug!(
            "{} calldata to {:?}: 0x{}",
            step,
            call.to,
            hex_prefix(&call.data)
        );

        let receipt = self
            .ledger
            .send(signer, call)
            .await
            .map_err(|source| StepError::Submission {
                step: step.to_string(),
                source,
            })?;

        if !receipt.is_success() {
            warn!(
                "⛔ {} reverted: 0x{:x} {}",
                step,
                receipt.tx_hash,
                receipt.revert_reason.as_deref().unwrap_or("")
            );
            return Err(StepError::Reverted {
                step: step.to_string(),
                tx_hash: receipt.tx_hash,
                reason: receipt.revert_reason,
            });
        }

        info!("🔗 {} transaction hash: 0x{:x}", step, receipt.tx_hash);
        Ok(receipt)
    }

    pub async fn read(&self, step: &str, query: Query) -> Result<Vec<u8>> {
        self.ledger
            .call(ReadCall {
                to: query.to,
                from: query.from,
                data: query.data,
            })
            .await
            .map_err(|source| StepError::Query {
                step: step.to_string(),
                source,
            })
    }

    /// Native balance, truncated to tinybars
    pub async fn hbar_balance(&self, account: Address) -> Result<Hbar> {
        let weibars = self
            .ledger
            .balance(account)
            .await
            .map_err(|source| StepError::Query {
                step: "hbar balance".to_string(),
                source,
            })?;
        Ok(Hbar::from_weibars(weibars)?)
    }

    pub async fn token_balance(&self, token: Address, account: Address) -> Result<U256> {
        let output = self
            .read(
                "balanceOf",
                Query {
                    to: token,
                    from: None,
                    data: erc20::balance_of(account)?,
                },
            )
            .await?;
        Ok(erc20::decode_balance(&output)?)
    }

    pub async fn total_supply(&self, token: Address) -> Result<U256> {
        let output = self
            .read(
                "totalSupply",
                Query {
                    to: token,
                    from: None,
                    data: erc20::total_supply()?,
                },
            )
            .await?;
        Ok(erc20::decode_total_supply(&output)?)
    }

    pub async fn nft_owner(&self, token: Address, serial: i64) -> Result<Address> {
        let output = self
            .read(
                "ownerOf",
                Query {
                    to: token,
                    from: None,
                    data: erc721::owner_of(serial)?,
                },
            )
            .await?;
        Ok(erc721::decode_owner_of(&output)?)
    }

    /// "Alice" for known participants, the address otherwise
    pub fn label(&self, address: Address) -> String {
        match self.participants.role_of(address) {
            Some(role) => role.to_string(),
            None => format!("{:?}", address),
        }
    }
}

fn hex_prefix(data: &[u8]) -> String {
    const SHOWN: usize = 36;
    let shown = &data[..data.len().min(SHOWN)];
    let mut out: String = shown.iter().map(|b| format!("{:02x}", b)).collect();
    if data.len() > SHOWN {
        out.push_str(&format!("… ({} bytes)", data.len()));
    }
    out
}
