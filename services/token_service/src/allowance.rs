//! Allowance Manager
//!
//! One procedure for all three asset classes: read the allowance and expect
//! it unset, submit the owner's approval, read it again and expect exactly
//! the granted value.

use crate::context::ScenarioContext;
use crate::error::{Result, StepError};
use crate::verification::{expect_eq, StepOutcome};
use codec::allowance::{allowance_query, approve_call, decode_allowance, AllowanceReading};
use config::constants::HTS_SUCCESS;
use network::Identity;
use tracing::{debug, info};
use types::Allowance;

pub async fn approve(
    ctx: &ScenarioContext,
    owner: &Identity,
    allowance: &Allowance,
) -> Result<StepOutcome> {
    let class = allowance.asset_class();
    let step = format!("{} approval", class);

    if owner.address() != allowance.owner() {
        return Err(StepError::Invalid {
            reason: format!(
                "{} is signed by {:?} but owned by {:?}",
                step,
                owner.address(),
                allowance.owner()
            ),
        });
    }

    info!(
        "📝 {} approves {} to spend {}",
        owner.role(),
        ctx.label(allowance.spender()),
        allowance
    );

    let mut outcome = StepOutcome::new(&step);

    let before = read_allowance(ctx, allowance).await?;
    outcome.push(expect_eq(
        &format!("{} allowance before approval", class),
        allowance.unset_value(),
        before.value,
    )?);

    let call = approve_call(allowance)?;
    let receipt = ctx
        .submit(&step, owner, ctx.call(call.to, call.data))
        .await?;
    outcome = outcome.with_tx(receipt.tx_hash);

    let after = read_allowance(ctx, allowance).await?;
    outcome.push(expect_eq(
        &format!("{} allowance after approval", class),
        allowance.granted_value(),
        after.value,
    )?);

    info!("✅ {} allowance granted: {}", class, after.value);
    Ok(outcome)
}

/// Clear an allowance the owner granted earlier
///
/// Returns `None` without submitting anything when the allowance already
/// reads unset, e.g. after a transfer consumed it.
pub async fn revoke(
    ctx: &ScenarioContext,
    owner: &Identity,
    allowance: &Allowance,
) -> Result<Option<StepOutcome>> {
    let class = allowance.asset_class();
    let step = format!("{} revocation", class);

    let current = read_allowance(ctx, allowance).await?;
    if current.value == allowance.unset_value() {
        debug!("{} allowance already unset, nothing to revoke", class);
        return Ok(None);
    }

    info!(
        "🧹 {} revokes {} allowance of {} ({} remaining)",
        owner.role(),
        class,
        ctx.label(allowance.spender()),
        current.value
    );

    let revoked = allowance.revoked();
    let call = approve_call(&revoked)?;
    let receipt = ctx
        .submit(&step, owner, ctx.call(call.to, call.data))
        .await?;
    let mut outcome = StepOutcome::new(&step).with_tx(receipt.tx_hash);

    let after = read_allowance(ctx, allowance).await?;
    outcome.push(expect_eq(
        &format!("{} allowance after revocation", class),
        allowance.unset_value(),
        after.value,
    )?);
    Ok(Some(outcome))
}

async fn read_allowance(ctx: &ScenarioContext, allowance: &Allowance) -> Result<AllowanceReading> {
    let output = ctx
        .read(
            &format!("{} allowance", allowance.asset_class()),
            allowance_query(allowance)?,
        )
        .await?;
    let reading = decode_allowance(allowance, &output)?;

    if let Some(code) = reading.response_code {
        expect_eq("hbarAllowance response code", HTS_SUCCESS, code)?;
    }
    Ok(reading)
}
