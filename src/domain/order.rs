use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::values::{Money, OrderId};

/// A customer order placed at a table.
///
/// Orders start empty and get their value filled in later; the table only
/// cares about the identifier, the value and when the order was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    value: Money,
    created_at: DateTime<Utc>,
}

impl Order {
    pub fn empty(id: OrderId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            value: Money::ZERO,
            created_at,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time elapsed since creation. Negative if `now` is before `created_at`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    pub(crate) fn set_value(&mut self, value: Money) {
        self.value = value;
    }
}
