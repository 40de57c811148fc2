//! # Operator-Facing Administration
//!
//! The operations behind the `ofs sub` subcommands. Each narrates what it
//! is doing at info level and returns the updated subscription so the CLI
//! can render balances in LINK.

use ofs_core::SubscriptionId;

use crate::error::BillingError;
use crate::juels::Juels;
use crate::router::FunctionsRouter;
use crate::subscription::SubscriptionInfo;

/// Accept a proposed ownership transfer as `accepter`.
pub fn accept(
    router: &dyn FunctionsRouter,
    id: SubscriptionId,
    accepter: &str,
) -> Result<SubscriptionInfo, BillingError> {
    let current = router.get_subscription(id)?;
    tracing::info!(
        id = %id,
        from = %current.owner,
        to = %accepter,
        "accepting ownership of subscription"
    );
    let updated = router.accept_transfer(id, accepter)?;
    tracing::info!(id = %id, owner = %updated.owner, "ownership transfer complete");
    Ok(updated)
}

/// Credit `amount` to the subscription balance.
pub fn fund(
    router: &dyn FunctionsRouter,
    id: SubscriptionId,
    amount: Juels,
) -> Result<SubscriptionInfo, BillingError> {
    tracing::info!(id = %id, amount = %amount.format_link(), "funding subscription");
    router.fund(id, amount)
}

/// Fetch the subscription's current state.
pub fn info(
    router: &dyn FunctionsRouter,
    id: SubscriptionId,
) -> Result<SubscriptionInfo, BillingError> {
    router.get_subscription(id)
}

/// Release blocked balance held for timed-out requests.
pub fn timeout(
    router: &dyn FunctionsRouter,
    id: SubscriptionId,
) -> Result<SubscriptionInfo, BillingError> {
    let before = router.get_subscription(id)?;
    tracing::info!(
        id = %id,
        blocked = %before.blocked_balance.format_link(),
        "releasing blocked balance for timed-out requests"
    );
    router.timeout_requests(id)
}
