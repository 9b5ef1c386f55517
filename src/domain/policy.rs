//! Rules about which orders may still be taken off a bill.
//!
//! The table itself never checks these; callers that remove orders run the
//! policy first with the current time.

use chrono::{DateTime, Duration, Utc};

use super::errors::DomainError;
use super::order::Order;

pub const DEFAULT_REMOVAL_WINDOW_SECS: i64 = 5 * 60;

pub trait RemovalPolicy: Send + Sync + 'static {
    fn check(&self, order: &Order, now: DateTime<Utc>) -> Result<(), DomainError>;
}

/// Orders may be removed until they are older than `max_age`.
#[derive(Debug, Clone, Copy)]
pub struct RemovalWindow {
    max_age: Duration,
}

impl RemovalWindow {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }
}

impl Default for RemovalWindow {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_REMOVAL_WINDOW_SECS))
    }
}

impl RemovalPolicy for RemovalWindow {
    fn check(&self, order: &Order, now: DateTime<Utc>) -> Result<(), DomainError> {
        let age = order.age(now);
        if age > self.max_age {
            return Err(DomainError::RemovalWindowElapsed {
                order_id: order.id(),
                age_secs: age.num_seconds(),
            });
        }
        Ok(())
    }
}

/// Lets every order be removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl RemovalPolicy for Unrestricted {
    fn check(&self, _order: &Order, _now: DateTime<Utc>) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::OrderId;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn order() -> Order {
        Order::empty(OrderId::from(1), created())
    }

    #[test]
    fn young_order_may_be_removed() {
        let policy = RemovalWindow::default();
        assert!(policy
            .check(&order(), created() + Duration::seconds(120))
            .is_ok());
    }

    #[test]
    fn exactly_five_minutes_is_still_allowed() {
        let policy = RemovalWindow::default();
        assert!(policy
            .check(&order(), created() + Duration::seconds(300))
            .is_ok());
    }

    #[test]
    fn older_order_is_rejected_with_its_age() {
        let policy = RemovalWindow::default();
        assert_eq!(
            policy.check(&order(), created() + Duration::seconds(301)),
            Err(DomainError::RemovalWindowElapsed {
                order_id: OrderId::from(1),
                age_secs: 301,
            })
        );
    }

    #[test]
    fn custom_window() {
        let policy = RemovalWindow::new(Duration::seconds(30));
        assert!(policy
            .check(&order(), created() + Duration::seconds(31))
            .is_err());
    }

    #[test]
    fn unrestricted_accepts_old_orders() {
        let boxed: Box<dyn RemovalPolicy> = Box::new(Unrestricted);
        assert!(boxed
            .check(&order(), created() + Duration::days(2))
            .is_ok());
    }
}
