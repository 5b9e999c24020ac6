//! Identity resolution: mapping a quote/order id back to the client and
//! session the analytics provider issued during browsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storepulse_core::CorrelationId;

/// Client/session pair captured client-side earlier in the buyer's session
/// and persisted keyed by quote/order id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub client_id: String,
    pub session_id: String,
}

impl IdentityRecord {
    /// Both halves must be present; a half-written record cannot be
    /// attributed and counts as not found.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.session_id.is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityStoreError {
    /// The backing store could not be queried. This is a hard failure for
    /// the caller, never a silent suppression.
    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

/// Backing store for captured identities.
///
/// The store matches the correlation id against **either** its quote-id or
/// order-id column and returns the first hit, if any.
pub trait IdentityStore: Send + Sync {
    fn find(&self, correlation: CorrelationId) -> Result<Option<IdentityRecord>, IdentityStoreError>;
}

impl<S> IdentityStore for std::sync::Arc<S>
where
    S: IdentityStore + ?Sized,
{
    fn find(&self, correlation: CorrelationId) -> Result<Option<IdentityRecord>, IdentityStoreError> {
        (**self).find(correlation)
    }
}

/// Outcome of an identity lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(IdentityRecord),
    /// No record, or a record missing one of its halves. A valid terminal
    /// state: the buyer may never have had a tracked session, or the
    /// capture write may not have landed yet.
    NotFound,
}

/// Resolve the identity for `correlation`.
///
/// Store errors propagate; only a genuinely missing or incomplete record
/// maps to [`Resolution::NotFound`].
pub fn resolve<S>(store: &S, correlation: CorrelationId) -> Result<Resolution, IdentityStoreError>
where
    S: IdentityStore + ?Sized,
{
    match store.find(correlation)? {
        Some(record) if record.is_complete() => Ok(Resolution::Resolved(record)),
        _ => Ok(Resolution::NotFound),
    }
}
