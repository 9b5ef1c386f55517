use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Identifier of a physical table, assigned by whoever stores tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(u64);

impl TableId {
    pub fn new(raw: i64) -> Result<Self, DomainError> {
        non_negative("table id", raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TableId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an order, unique within the table that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(raw: i64) -> Result<Self, DomainError> {
        non_negative("order id", raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for OrderId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative amount in the smallest monetary unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn new(raw: i64) -> Result<Self, DomainError> {
        non_negative("amount", raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Money) -> Result<Money, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::InvalidArgument(format!("{} + {} overflows", self, other)))
    }
}

impl From<u64> for Money {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn non_negative(what: &str, raw: i64) -> Result<u64, DomainError> {
    u64::try_from(raw)
        .map_err(|_| DomainError::InvalidArgument(format!("{what} must be non-negative, got {raw}")))
}
