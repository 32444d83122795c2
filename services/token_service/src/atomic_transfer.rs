//! Atomic Transfer Orchestrator
//!
//! Moves HBAR, fungible units and one NFT serial from Treasury to Bob in a
//! single `cryptoTransfer`, submitted by Alice. Every debit goes through an
//! allowance (`isApproval = true`); credits never do. The ledger applies
//! all legs or none of them.

use crate::context::ScenarioContext;
use crate::error::Result;
use crate::verification::{expect_changed, expect_eq, Check, StepOutcome};
use codec::hts;
use network::{Identity, Receipt};
use serde::Serialize;
use tracing::info;
use types::{
    Address, CompositeTransfer, FungibleTokenRef, Hbar, NonFungibleTokenRef, TokenTransferList,
    TransferList, U256,
};

const STEP: &str = "atomic cryptoTransfer";

/// What moves in one atomic transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicTransferPlan {
    pub hbar: Hbar,
    pub fungible_token: Address,
    pub ft_amount: u64,
    pub nft_token: Address,
    pub serial: i64,
}

impl AtomicTransferPlan {
    pub fn new(
        hbar: Hbar,
        fungible: &FungibleTokenRef,
        ft_amount: u64,
        collection: &NonFungibleTokenRef,
        serial: i64,
    ) -> Self {
        Self {
            hbar,
            fungible_token: fungible.address,
            ft_amount,
            nft_token: collection.address,
            serial,
        }
    }

    /// Fresh instruction: `sender` debited through allowances, `receiver` credited
    pub fn build_instruction(&self, sender: Address, receiver: Address) -> Result<CompositeTransfer> {
        Ok(CompositeTransfer::builder()
            .hbar(sender, receiver, self.hbar, true)?
            .fungible(self.fungible_token, sender, receiver, self.ft_amount, true)?
            .nft(self.nft_token, sender, receiver, self.serial, true)
            .build()?)
    }
}

/// Holdings of one account in the assets a plan moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceSnapshot {
    pub hbar: Hbar,
    pub fungible: U256,
    pub nft_owner: Address,
}

pub async fn snapshot(
    ctx: &ScenarioContext,
    plan: &AtomicTransferPlan,
    account: Address,
) -> Result<BalanceSnapshot> {
    Ok(BalanceSnapshot {
        hbar: ctx.hbar_balance(account).await?,
        fungible: ctx.token_balance(plan.fungible_token, account).await?,
        nft_owner: ctx.nft_owner(plan.nft_token, plan.serial).await?,
    })
}

/// Validate, encode and submit one composite transfer
pub async fn execute_atomic_transfer(
    ctx: &ScenarioContext,
    submitter: &Identity,
    system_contract: Address,
    crypto: &TransferList,
    tokens: &[TokenTransferList],
) -> Result<Receipt> {
    let instruction = CompositeTransfer {
        crypto: crypto.clone(),
        tokens: tokens.to_vec(),
    };
    instruction.validate()?;

    info!(
        "⚛️ {} submits cryptoTransfer with {} legs across {} token lists",
        submitter.role(),
        instruction.leg_count(),
        instruction.tokens.len()
    );

    let data = hts::crypto_transfer(&instruction)?;
    ctx.submit(STEP, submitter, ctx.call(system_contract, data)).await
}

/// Full step: snapshot Bob, transfer as Alice, verify Bob's holdings
pub async fn transfer_and_verify(
    ctx: &ScenarioContext,
    plan: &AtomicTransferPlan,
) -> Result<StepOutcome> {
    let treasury = ctx.participants.treasury.address();
    let bob = ctx.participants.bob.address();

    let before = snapshot(ctx, plan, bob).await?;
    info!(
        "📊 Bob before: {} | {} FT | serial #{} owned by {}",
        before.hbar,
        before.fungible,
        plan.serial,
        ctx.label(before.nft_owner)
    );

    let instruction = plan.build_instruction(treasury, bob)?;
    let receipt = execute_atomic_transfer(
        ctx,
        &ctx.participants.alice,
        ctx.system_contract,
        &instruction.crypto,
        &instruction.tokens,
    )
    .await?;

    let after = snapshot(ctx, plan, bob).await?;
    info!(
        "📊 Bob after: {} | {} FT | serial #{} owned by {}",
        after.hbar,
        after.fungible,
        plan.serial,
        ctx.label(after.nft_owner)
    );

    let mut outcome = StepOutcome::new(STEP).with_tx(receipt.tx_hash);
    outcome.push(expect_changed("Bob HBAR balance changed", before.hbar, after.hbar)?);
    outcome.push(expect_eq(
        "Bob FT balance",
        U256::from(plan.ft_amount),
        after.fungible,
    )?);
    outcome.push(expect_eq(
        &format!("owner of NFT serial #{}", plan.serial),
        format!("{:?}", bob),
        format!("{:?}", after.nft_owner),
    )?);

    info!("✅ Atomic transfer settled in 0x{:x}", receipt.tx_hash);
    Ok(outcome)
}

/// Every holding in `after` equals `before`
pub fn expect_unchanged(
    account: &str,
    before: &BalanceSnapshot,
    after: &BalanceSnapshot,
) -> Result<Vec<Check>> {
    Ok(vec![
        expect_eq(&format!("{} HBAR balance unchanged", account), before.hbar, after.hbar)?,
        expect_eq(
            &format!("{} FT balance unchanged", account),
            before.fungible,
            after.fungible,
        )?,
        expect_eq(
            &format!("{} NFT ownership unchanged", account),
            format!("{:?}", before.nft_owner),
            format!("{:?}", after.nft_owner),
        )?,
    ])
}
