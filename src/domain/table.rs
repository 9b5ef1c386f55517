use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::order::Order;
use super::values::{Money, OrderId, TableId};

/// Owned copy of a table's state, as handed to and loaded from a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub id: TableId,
    pub daily_sales_total: Money,
    pub next_order_id: OrderId,
    pub active_orders: Vec<Order>,
}

impl TableSnapshot {
    pub fn bill_total(&self) -> Result<Money, DomainError> {
        sum_values(&self.active_orders)
    }
}

/// A restaurant table and the orders it has not paid for yet.
///
/// Everything billed during the day ends up in `daily_sales_total`; the
/// active orders are the current, still open bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    id: TableId,
    daily_sales_total: Money,
    next_order_id: OrderId,
    active_orders: Vec<Order>,
}

impl Table {
    pub fn new(id: i64, starting_sales_total: i64) -> Result<Self, DomainError> {
        Ok(Self::with_values(
            TableId::new(id)?,
            Money::new(starting_sales_total)?,
        ))
    }

    /// Builds a table from values that were already validated, e.g. loaded
    /// from storage.
    pub fn with_values(id: TableId, daily_sales_total: Money) -> Self {
        Self {
            id,
            daily_sales_total,
            next_order_id: OrderId::from(1),
            active_orders: Vec::new(),
        }
    }

    /// Rebuilds a table including its open orders.
    ///
    /// Rejects snapshots with duplicated order ids or with an id sequence
    /// that would hand out an id already in use.
    pub fn restore(snapshot: TableSnapshot) -> Result<Self, DomainError> {
        let mut seen = std::collections::HashSet::new();
        for order in &snapshot.active_orders {
            if !seen.insert(order.id()) {
                return Err(DomainError::InvalidArgument(format!(
                    "table {} has order {} twice",
                    snapshot.id,
                    order.id()
                )));
            }
            if order.id() >= snapshot.next_order_id {
                return Err(DomainError::InvalidArgument(format!(
                    "table {} next order id {} is not past order {}",
                    snapshot.id,
                    snapshot.next_order_id,
                    order.id()
                )));
            }
        }

        Ok(Self {
            id: snapshot.id,
            daily_sales_total: snapshot.daily_sales_total,
            next_order_id: snapshot.next_order_id,
            active_orders: snapshot.active_orders,
        })
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn daily_sales_total(&self) -> Money {
        self.daily_sales_total
    }

    pub fn add_sale_amount(&mut self, amount: i64) -> Result<(), DomainError> {
        let amount = Money::new(amount)?;
        self.daily_sales_total = self.daily_sales_total.checked_add(amount)?;
        Ok(())
    }

    pub fn active_orders(&self) -> &[Order] {
        &self.active_orders
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            id: self.id,
            daily_sales_total: self.daily_sales_total,
            next_order_id: self.next_order_id,
            active_orders: self.active_orders.clone(),
        }
    }

    pub fn find_order(&self, order_id: OrderId) -> Result<&Order, DomainError> {
        self.active_orders
            .iter()
            .find(|o| o.id() == order_id)
            .ok_or(DomainError::OrderNotFound(order_id))
    }

    /// Opens a new, empty order and returns its id.
    ///
    /// Fails once the id sequence is exhausted rather than wrapping around.
    pub fn add_order(&mut self, now: DateTime<Utc>) -> Result<OrderId, DomainError> {
        let id = self.next_order_id;
        let next = id.next().ok_or_else(|| {
            DomainError::InvalidArgument(format!("table {} has no order ids left", self.id))
        })?;
        self.next_order_id = next;
        self.active_orders.push(Order::empty(id, now));
        Ok(id)
    }

    /// Removes the order from the open bill.
    ///
    /// Whether the order is still young enough to be removed is up to the
    /// caller; see [`crate::domain::policy`].
    pub fn remove_order(&mut self, order_id: OrderId) -> Result<Order, DomainError> {
        let pos = self.position(order_id)?;
        Ok(self.active_orders.remove(pos))
    }

    pub fn set_order_value(&mut self, order_id: OrderId, amount: i64) -> Result<(), DomainError> {
        let value = Money::new(amount)?;
        let pos = self.position(order_id)?;
        self.active_orders[pos].set_value(value);
        Ok(())
    }

    pub fn bill_total(&self) -> Result<Money, DomainError> {
        sum_values(&self.active_orders)
    }

    /// Bills out every open order into the daily sales total and clears the
    /// bill. Returns the amount that was archived.
    pub fn reset(&mut self) -> Result<Money, DomainError> {
        let bill = self.bill_total()?;
        let total = self.daily_sales_total.checked_add(bill)?;
        self.daily_sales_total = total;
        self.active_orders.clear();
        Ok(bill)
    }

    fn position(&self, order_id: OrderId) -> Result<usize, DomainError> {
        self.active_orders
            .iter()
            .position(|o| o.id() == order_id)
            .ok_or(DomainError::OrderNotFound(order_id))
    }
}

fn sum_values(orders: &[Order]) -> Result<Money, DomainError> {
    orders
        .iter()
        .try_fold(Money::ZERO, |acc, o| acc.checked_add(o.value()))
}
