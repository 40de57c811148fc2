//! # Billing Error Types

use ofs_core::SubscriptionId;
use thiserror::Error;

/// Errors from subscription administration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// The subscription does not exist on the router.
    #[error("subscription {0} not found")]
    UnknownSubscription(SubscriptionId),

    /// The caller is not the proposed owner of the subscription.
    #[error("{caller} is not the proposed owner of subscription {id}")]
    NotProposedOwner {
        /// The subscription in question.
        id: SubscriptionId,
        /// The address that attempted to accept.
        caller: String,
    },

    /// No transfer has been proposed for the subscription.
    #[error("no ownership transfer proposed for subscription {0}")]
    NoTransferProposed(SubscriptionId),
}
