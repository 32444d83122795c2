//! Association Manager
//!
//! HRC-719 `associate()` is called on the token itself and signed by the
//! account opting in; `isAssociated()` answers for `msg.sender`.

use crate::context::ScenarioContext;
use crate::error::Result;
use crate::verification::{expect_eq, StepOutcome};
use codec::{hrc719, Query};
use network::Identity;
use tracing::info;
use types::Address;

pub async fn associate(
    ctx: &ScenarioContext,
    account: &Identity,
    token: Address,
) -> Result<StepOutcome> {
    let step = format!("associate {} with {:?}", account.role(), token);
    info!("🤝 Associating {} with token {:?}", account.role(), token);

    let mut outcome = StepOutcome::new(&step);

    outcome.push(expect_eq(
        &format!("{} associated before", account.role()),
        false,
        is_associated(ctx, account, token).await?,
    )?);

    let receipt = ctx
        .submit(&step, account, ctx.call(token, hrc719::associate()?))
        .await?;
    outcome.push(expect_eq(
        "association transaction hash present",
        true,
        !receipt.tx_hash.is_zero(),
    )?);
    outcome = outcome.with_tx(receipt.tx_hash);

    outcome.push(expect_eq(
        &format!("{} associated after", account.role()),
        true,
        is_associated(ctx, account, token).await?,
    )?);

    info!("✅ {} associated with {:?}", account.role(), token);
    Ok(outcome)
}

pub async fn is_associated(ctx: &ScenarioContext, account: &Identity, token: Address) -> Result<bool> {
    let output = ctx
        .read(
            "isAssociated",
            Query {
                to: token,
                from: Some(account.address()),
                data: hrc719::is_associated()?,
            },
        )
        .await?;
    Ok(hrc719::decode_is_associated(&output)?)
}
