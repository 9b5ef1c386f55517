use thiserror::Error;

use super::values::OrderId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("Order {order_id} is {age_secs}s old and can no longer be removed")]
    RemovalWindowElapsed { order_id: OrderId, age_secs: i64 },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl<T> From<std::sync::PoisonError<T>> for DomainError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DomainError::Internal(e.to_string())
    }
}
