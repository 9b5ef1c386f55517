use std::sync::{RwLock, RwLockReadGuard};

use log::{debug, error, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::policy::RemovalPolicy;
use crate::domain::ports::{Clock, TableRepository};
use crate::domain::table::{Table, TableSnapshot};
use crate::domain::values::{Money, OrderId, TableId};

/// One table shared between callers.
///
/// Reads run under a shared lock. Every mutation holds the exclusive lock
/// for its whole duration, works on a copy of the table, saves that copy and
/// only then makes it visible, so a failed save changes nothing and a reset
/// is never seen half done.
pub struct TableService<R, C> {
    repo: R,
    clock: C,
    policy: Box<dyn RemovalPolicy>,
    table: RwLock<Table>,
}

impl<R: TableRepository, C: Clock> TableService<R, C> {
    /// Loads table `id` from the repository, or creates and saves it with
    /// `starting_sales_total` if the repository has never seen it.
    pub fn open(
        repo: R,
        clock: C,
        policy: Box<dyn RemovalPolicy>,
        id: TableId,
        starting_sales_total: Money,
    ) -> Result<Self, DomainError> {
        let table = match repo.load(id)? {
            Some(snapshot) => {
                let table = Table::restore(snapshot)?;
                info!(
                    "Loaded table {} (sales total {}, {} open orders)",
                    id,
                    table.daily_sales_total(),
                    table.active_orders().len()
                );
                table
            }
            None => {
                let table = Table::with_values(id, starting_sales_total);
                repo.save(&table.snapshot())?;
                info!("Created table {} with sales total {}", id, starting_sales_total);
                table
            }
        };

        Ok(Self {
            repo,
            clock,
            policy,
            table: RwLock::new(table),
        })
    }

    pub fn id(&self) -> Result<TableId, DomainError> {
        Ok(self.read()?.id())
    }

    pub fn daily_sales_total(&self) -> Result<Money, DomainError> {
        Ok(self.read()?.daily_sales_total())
    }

    /// Copy of the open orders in the order they were placed.
    pub fn active_orders(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.read()?.active_orders().to_vec())
    }

    pub fn snapshot(&self) -> Result<TableSnapshot, DomainError> {
        Ok(self.read()?.snapshot())
    }

    pub fn find_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        let table = self.read()?;
        debug!("Looking up order {} on table {}", order_id, table.id());
        table.find_order(order_id).cloned()
    }

    pub fn bill_total(&self) -> Result<Money, DomainError> {
        self.read()?.bill_total()
    }

    pub fn add_order(&self) -> Result<OrderId, DomainError> {
        let now = self.clock.now();
        let order_id = self.commit("add order", |table| table.add_order(now))?;
        info!("Opened order {}", order_id);
        Ok(order_id)
    }

    /// Removes an order if the removal policy still allows it.
    pub fn remove_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        let now = self.clock.now();
        let removed = self.commit("remove order", |table| {
            let order = table.find_order(order_id)?;
            if let Err(e) = self.policy.check(order, now) {
                warn!("Refused to remove order {}: {}", order_id, e);
                return Err(e);
            }
            table.remove_order(order_id)
        })?;
        info!("Removed order {} worth {}", order_id, removed.value());
        Ok(removed)
    }

    /// Sets the order's value and returns the order as it now stands.
    pub fn set_order_value(&self, order_id: OrderId, amount: i64) -> Result<Order, DomainError> {
        let order = self.commit("set order value", |table| {
            table.set_order_value(order_id, amount)?;
            table.find_order(order_id).cloned()
        })?;
        info!("Order {} now worth {}", order_id, order.value());
        Ok(order)
    }

    pub fn add_sale_amount(&self, amount: i64) -> Result<(), DomainError> {
        self.commit("add sale amount", |table| table.add_sale_amount(amount))?;
        info!("Recorded sale of {}", amount);
        Ok(())
    }

    /// Bills out all open orders. Returns the amount added to the sales total.
    pub fn reset(&self) -> Result<Money, DomainError> {
        let billed = self.commit("reset", Table::reset)?;
        info!("Table reset, {} added to daily sales", billed);
        Ok(billed)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, DomainError> {
        Ok(self.table.read()?)
    }

    fn commit<T>(
        &self,
        operation: &str,
        apply: impl FnOnce(&mut Table) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut current = self.table.write()?;
        let mut working = current.clone();
        let out = apply(&mut working)?;

        if let Err(e) = self.repo.save(&working.snapshot()) {
            error!("Failed to save table {} after {}: {}", working.id(), operation, e);
            return Err(e);
        }

        *current = working;
        Ok(out)
    }
}
