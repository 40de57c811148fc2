//! # Subscription Records and Transfer Lifecycle
//!
//! A subscription funds hosted function executions. Ownership moves in
//! two steps: the current owner proposes a new owner, and the proposal
//! takes effect only when the proposed owner accepts it.
//!
//! ## States
//!
//! ```text
//! Idle ──▶ Proposed ──▶ Idle (accepted: owner replaced)
//!              │
//!              └──▶ Proposed (re-proposed: target replaced)
//! ```

use serde::{Deserialize, Serialize};

use ofs_core::SubscriptionId;

use crate::error::BillingError;
use crate::juels::Juels;

/// Ownership-transfer state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferState {
    /// No transfer pending.
    Idle,
    /// A new owner has been proposed and has not yet accepted.
    Proposed,
}

/// A billing subscription as the router reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    /// Subscription identifier.
    pub id: SubscriptionId,
    /// Current owner address.
    pub owner: String,
    /// Proposed new owner, when a transfer is pending.
    pub proposed_owner: Option<String>,
    /// Spendable balance in juels.
    pub balance: Juels,
    /// Balance reserved for in-flight requests, in juels.
    pub blocked_balance: Juels,
    /// Consumer contract addresses authorized to spend from this
    /// subscription.
    pub consumers: Vec<String>,
}

impl SubscriptionInfo {
    /// A fresh subscription with no balance and no consumers.
    pub fn new(id: SubscriptionId, owner: impl Into<String>) -> Self {
        Self {
            id,
            owner: owner.into(),
            proposed_owner: None,
            balance: Juels::ZERO,
            blocked_balance: Juels::ZERO,
            consumers: Vec::new(),
        }
    }

    /// Current transfer state.
    pub fn transfer_state(&self) -> TransferState {
        if self.proposed_owner.is_some() {
            TransferState::Proposed
        } else {
            TransferState::Idle
        }
    }

    /// Propose a new owner. Re-proposing replaces the pending target.
    pub fn propose_transfer(&mut self, new_owner: impl Into<String>) {
        let new_owner = new_owner.into();
        if let Some(previous) = &self.proposed_owner {
            tracing::warn!(
                id = %self.id,
                previous = %previous,
                replacement = %new_owner,
                "replacing pending transfer proposal"
            );
        }
        self.proposed_owner = Some(new_owner);
    }

    /// Accept a pending transfer as `caller`.
    ///
    /// Succeeds only when `caller` is the proposed owner; on success the
    /// proposal is consumed and `caller` becomes the owner.
    pub fn accept_transfer(&mut self, caller: &str) -> Result<(), BillingError> {
        match self.proposed_owner.as_deref() {
            None => Err(BillingError::NoTransferProposed(self.id)),
            Some(proposed) if proposed != caller => Err(BillingError::NotProposedOwner {
                id: self.id,
                caller: caller.to_string(),
            }),
            Some(_) => {
                self.owner = caller.to_string();
                self.proposed_owner = None;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub() -> SubscriptionInfo {
        SubscriptionInfo::new(SubscriptionId(7), "0xOwner")
    }

    #[test]
    fn fresh_subscription_is_idle() {
        let s = sub();
        assert_eq!(s.transfer_state(), TransferState::Idle);
        assert_eq!(s.balance, Juels::ZERO);
    }

    #[test]
    fn propose_then_accept_replaces_owner() {
        let mut s = sub();
        s.propose_transfer("0xNewOwner");
        assert_eq!(s.transfer_state(), TransferState::Proposed);

        s.accept_transfer("0xNewOwner").unwrap();
        assert_eq!(s.owner, "0xNewOwner");
        assert_eq!(s.transfer_state(), TransferState::Idle);
    }

    #[test]
    fn only_the_proposed_owner_can_accept() {
        let mut s = sub();
        s.propose_transfer("0xNewOwner");

        let err = s.accept_transfer("0xInterloper").unwrap_err();
        assert!(matches!(err, BillingError::NotProposedOwner { .. }));
        assert_eq!(s.owner, "0xOwner");
    }

    #[test]
    fn accept_without_proposal_fails() {
        let mut s = sub();
        assert_eq!(
            s.accept_transfer("0xAnyone"),
            Err(BillingError::NoTransferProposed(SubscriptionId(7)))
        );
    }

    #[test]
    fn re_propose_replaces_target() {
        let mut s = sub();
        s.propose_transfer("0xFirst");
        s.propose_transfer("0xSecond");

        assert!(s.accept_transfer("0xFirst").is_err());
        s.accept_transfer("0xSecond").unwrap();
        assert_eq!(s.owner, "0xSecond");
    }

    #[test]
    fn yaml_round_trip() {
        let mut s = sub();
        s.balance = Juels::from_link(5);
        s.consumers.push("0xConsumer".into());

        let yaml = serde_yaml::to_string(&s).unwrap();
        let back: SubscriptionInfo = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, s);
    }
}
