//! # Functions Router Seam
//!
//! The `FunctionsRouter` trait is where the on-chain subscription
//! contract attaches in production. Locally, `InMemoryRouter` provides
//! the same operations over a mutex-held table so the CLI and tests can
//! drive the full administration flow without a chain.

use std::collections::BTreeMap;
use std::sync::Mutex;

use ofs_core::SubscriptionId;

use crate::error::BillingError;
use crate::juels::Juels;
use crate::subscription::SubscriptionInfo;

/// Subscription operations the router contract exposes.
pub trait FunctionsRouter: Send + Sync {
    /// Fetch a subscription's current state.
    fn get_subscription(&self, id: SubscriptionId) -> Result<SubscriptionInfo, BillingError>;

    /// Propose transferring a subscription to a new owner.
    fn propose_transfer(
        &self,
        id: SubscriptionId,
        new_owner: &str,
    ) -> Result<SubscriptionInfo, BillingError>;

    /// Accept a proposed transfer as `caller`.
    fn accept_transfer(
        &self,
        id: SubscriptionId,
        caller: &str,
    ) -> Result<SubscriptionInfo, BillingError>;

    /// Credit the subscription balance.
    fn fund(&self, id: SubscriptionId, amount: Juels) -> Result<SubscriptionInfo, BillingError>;

    /// Release the blocked balance held for timed-out requests back into
    /// the spendable balance.
    fn timeout_requests(&self, id: SubscriptionId) -> Result<SubscriptionInfo, BillingError>;
}

/// Local, table-backed router.
#[derive(Debug, Default)]
pub struct InMemoryRouter {
    subscriptions: Mutex<BTreeMap<SubscriptionId, SubscriptionInfo>>,
}

impl InMemoryRouter {
    /// Empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Router pre-populated with the given subscriptions.
    pub fn from_subscriptions(subs: impl IntoIterator<Item = SubscriptionInfo>) -> Self {
        let table = subs.into_iter().map(|s| (s.id, s)).collect();
        Self {
            subscriptions: Mutex::new(table),
        }
    }

    /// Snapshot of every subscription, in id order.
    pub fn snapshot(&self) -> Vec<SubscriptionInfo> {
        self.subscriptions
            .lock()
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default()
    }

    fn update<T>(
        &self,
        id: SubscriptionId,
        f: impl FnOnce(&mut SubscriptionInfo) -> Result<T, BillingError>,
    ) -> Result<SubscriptionInfo, BillingError> {
        let mut table = self
            .subscriptions
            .lock()
            .map_err(|_| BillingError::UnknownSubscription(id))?;
        let sub = table
            .get_mut(&id)
            .ok_or(BillingError::UnknownSubscription(id))?;
        f(sub)?;
        Ok(sub.clone())
    }
}

impl FunctionsRouter for InMemoryRouter {
    fn get_subscription(&self, id: SubscriptionId) -> Result<SubscriptionInfo, BillingError> {
        self.update(id, |_| Ok(()))
    }

    fn propose_transfer(
        &self,
        id: SubscriptionId,
        new_owner: &str,
    ) -> Result<SubscriptionInfo, BillingError> {
        self.update(id, |sub| {
            sub.propose_transfer(new_owner);
            Ok(())
        })
    }

    fn accept_transfer(
        &self,
        id: SubscriptionId,
        caller: &str,
    ) -> Result<SubscriptionInfo, BillingError> {
        self.update(id, |sub| sub.accept_transfer(caller))
    }

    fn fund(&self, id: SubscriptionId, amount: Juels) -> Result<SubscriptionInfo, BillingError> {
        self.update(id, |sub| {
            sub.balance = sub.balance.saturating_add(amount);
            Ok(())
        })
    }

    fn timeout_requests(&self, id: SubscriptionId) -> Result<SubscriptionInfo, BillingError> {
        self.update(id, |sub| {
            sub.balance = sub.balance.saturating_add(sub.blocked_balance);
            sub.blocked_balance = Juels::ZERO;
            Ok(())
        })
    }
}
