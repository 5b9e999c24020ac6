//! Strongly-typed identifiers used across the domain.
//!
//! Host-platform entity ids are opaque positive integers; the newtypes keep
//! order ids, quote ids, store scopes and line-item ids from being mixed up
//! at call sites.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a finalized order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

/// Identifier of a quote (pre-order cart).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(u64);

/// Identifier of a store scope (per-store configuration boundary).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(u64);

/// Identifier of an invoice line item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(u64);

macro_rules! impl_entity_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = u64::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(id))
            }
        }
    };
}

impl_entity_id!(OrderId, "OrderId");
impl_entity_id!(QuoteId, "QuoteId");
impl_entity_id!(StoreId, "StoreId");
impl_entity_id!(LineItemId, "LineItemId");

/// Correlation key for identity lookups.
///
/// A single value that may have been stored against either the quote id or
/// the order id; the identity store queries both columns with it and the
/// caller never needs to know which one matched.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(u64);

impl CorrelationId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<OrderId> for CorrelationId {
    fn from(value: OrderId) -> Self {
        Self(value.value())
    }
}

impl From<QuoteId> for CorrelationId {
    fn from(value: QuoteId) -> Self {
        Self(value.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_parses_from_string() {
        let id: OrderId = "1001".parse().unwrap();
        assert_eq!(id, OrderId::new(1001));
    }

    #[test]
    fn invalid_entity_id_reports_type_name() {
        let err = "not-a-number".parse::<QuoteId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.contains("QuoteId")),
            _ => panic!("Expected InvalidId error"),
        }
    }

    #[test]
    fn correlation_id_from_either_key() {
        assert_eq!(
            CorrelationId::from(OrderId::new(7)),
            CorrelationId::from(QuoteId::new(7))
        );
    }
}
