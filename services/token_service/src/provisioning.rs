//! Token Provisioning
//!
//! Creates the scenario's fungible token and NFT collection with Treasury as
//! treasury, admin and supply key holder. The system-contract provisioner
//! drives `createFungibleToken`, `createNonFungibleToken` and `mintToken` on
//! `0x167` and reads their return values back through
//! [`Ledger::call_result`](network::Ledger::call_result).

use crate::context::ScenarioContext;
use crate::error::{Result, StepError};
use async_trait::async_trait;
use codec::hts::{self, key_type, HederaTokenSpec, TokenKeySpec};
use config::constants::{response_codes, tokens, HTS_SUCCESS};
use network::{ContractCall, Identity};
use tracing::{debug, info};
use types::{
    Address, FungibleTokenRef, FungibleTokenRequest, Hbar, H256, NftCollectionRequest,
    NonFungibleTokenRef, TokenId,
};

#[async_trait]
pub trait TokenProvisioner: Send + Sync {
    async fn create_fungible(
        &self,
        ctx: &ScenarioContext,
        request: &FungibleTokenRequest,
    ) -> Result<FungibleTokenRef>;

    /// Create the collection and mint `request.mint_count` serials
    async fn create_non_fungible(
        &self,
        ctx: &ScenarioContext,
        request: &NftCollectionRequest,
    ) -> Result<NonFungibleTokenRef>;
}

#[derive(Debug, Clone)]
pub struct SystemContractProvisioner {
    /// Sent as `value` with each create call
    pub create_fee: Hbar,
    pub create_gas_limit: u64,
}

impl SystemContractProvisioner {
    pub fn new(create_fee: Hbar, create_gas_limit: u64) -> Self {
        Self {
            create_fee,
            create_gas_limit,
        }
    }

    fn token_spec(treasury: &Identity, name: &str, symbol: &str, max_supply: i64) -> HederaTokenSpec {
        HederaTokenSpec {
            name: name.to_string(),
            symbol: symbol.to_string(),
            treasury: treasury.address(),
            memo: String::new(),
            finite_supply: max_supply > 0,
            max_supply,
            freeze_default: false,
            keys: vec![TokenKeySpec {
                key_type: key_type::ADMIN | key_type::SUPPLY,
                ecdsa_secp256k1: treasury.compressed_public_key(),
            }],
            auto_renew_account: treasury.address(),
            auto_renew_period_secs: tokens::AUTO_RENEW_PERIOD_SECS,
        }
    }

    async fn create(
        &self,
        ctx: &ScenarioContext,
        step: &str,
        fungible: bool,
        data: Vec<u8>,
    ) -> Result<(TokenId, Address)> {
        let call = ContractCall::new(ctx.system_contract, data, self.create_gas_limit)
            .with_value(self.create_fee.to_weibars());

        let receipt = ctx.submit(step, &ctx.participants.treasury, call).await?;
        let output = call_result(ctx, step, receipt.tx_hash).await?;
        let (code, address) = hts::decode_create_result(fungible, &output)?;
        require_success(step, code)?;

        let id = TokenId::from_solidity_address(address)?;
        Ok((id, address))
    }
}

#[async_trait]
impl TokenProvisioner for SystemContractProvisioner {
    async fn create_fungible(
        &self,
        ctx: &ScenarioContext,
        request: &FungibleTokenRequest,
    ) -> Result<FungibleTokenRef> {
        info!("🪙 Creating fungible token {} ({})", request.name, request.symbol);

        let initial_supply = i64::try_from(request.initial_supply).map_err(|_| {
            StepError::Invalid {
                reason: format!("initial supply {} exceeds int64", request.initial_supply),
            }
        })?;
        let decimals = i32::try_from(request.decimals).map_err(|_| StepError::Invalid {
            reason: format!("decimals {} exceed int32", request.decimals),
        })?;

        let spec = Self::token_spec(&ctx.participants.treasury, &request.name, &request.symbol, 0);
        let data = hts::create_fungible_token(&spec, initial_supply, decimals)?;
        let (id, address) = self.create(ctx, "createFungibleToken", true, data).await?;

        let supply = ctx.total_supply(address).await?;
        info!("- Fungible token ID: {}", id);
        info!("- Fungible token address: {:?}", address);
        info!("- Initial fungible token supply: {}", supply);

        Ok(FungibleTokenRef {
            id,
            address,
            total_supply: supply.low_u64(),
            decimals: request.decimals,
        })
    }

    async fn create_non_fungible(
        &self,
        ctx: &ScenarioContext,
        request: &NftCollectionRequest,
    ) -> Result<NonFungibleTokenRef> {
        info!("🖼️ Creating NFT collection {} ({})", request.name, request.symbol);

        let max_supply = i64::try_from(request.max_supply).map_err(|_| StepError::Invalid {
            reason: format!("max supply {} exceeds int64", request.max_supply),
        })?;
        if max_supply > 0 && request.mint_count as u64 > request.max_supply {
            return Err(StepError::Invalid {
                reason: format!(
                    "minting {} serials exceeds max supply {}",
                    request.mint_count, request.max_supply
                ),
            });
        }

        let spec = Self::token_spec(
            &ctx.participants.treasury,
            &request.name,
            &request.symbol,
            max_supply,
        );
        let data = hts::create_non_fungible_token(&spec)?;
        let (id, address) = self
            .create(ctx, "createNonFungibleToken", false, data)
            .await?;

        let metadata: Vec<Vec<u8>> = (0..request.mint_count)
            .map(|index| request.metadata_for(index))
            .collect();

        let mut serials = Vec::with_capacity(request.mint_count);
        for batch in metadata.chunks(tokens::MAX_NFT_MINT_BATCH) {
            let step = format!("mintToken ({} serials)", batch.len());
            let data = hts::mint_nfts(address, batch.to_vec())?;
            let receipt = ctx
                .submit(&step, &ctx.participants.treasury, ctx.call(ctx.system_contract, data))
                .await?;

            let result = hts::decode_mint_result(&call_result(ctx, &step, receipt.tx_hash).await?)?;
            require_success(&step, result.response_code)?;
            debug!("Minted serials {:?}, supply now {}", result.serials, result.new_total_supply);

            if result.serials.len() != batch.len() {
                return Err(StepError::Provisioning(format!(
                    "{} returned {} serials",
                    step,
                    result.serials.len()
                )));
            }
            serials.extend(result.serials);
        }

        info!("- NFT Collection ID: {}", id);
        info!("- NFT Collection address: {:?}", address);
        info!("- NFT Collection supply: {}", serials.len());

        Ok(NonFungibleTokenRef {
            id,
            address,
            serials,
        })
    }
}

async fn call_result(ctx: &ScenarioContext, step: &str, tx_hash: H256) -> Result<Vec<u8>> {
    ctx.ledger
        .call_result(tx_hash)
        .await
        .map_err(|source| StepError::Query {
            step: format!("{} result", step),
            source,
        })
}

fn require_success(step: &str, code: i64) -> Result<()> {
    if code == HTS_SUCCESS {
        return Ok(());
    }
    let name = response_codes::name(code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("response code {}", code));
    Err(StepError::Provisioning(format!("{} returned {}", step, name)))
}
