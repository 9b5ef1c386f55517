use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::application::table_service::TableService;
use crate::domain::order::Order;
use crate::domain::ports::{Clock, TableRepository};
use crate::domain::values::{Money, OrderId, TableId};
use crate::errors::AppError;

// ── Commands ─────────────────────────────────────────────────────────────────

pub const HELP: &[&str] = &[
    "show                    table state with open orders",
    "total                   daily sales total",
    "bill                    current bill total",
    "add                     open a new empty order",
    "find <order>            look up an open order",
    "value <order> <amount>  set what an order is worth",
    "remove <order>          take an order off the bill",
    "sale <amount>           add a sale to the daily total",
    "reset                   bill out all orders and clear the table",
    "help                    this list",
    "quit                    end the session",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Total,
    Bill,
    Add,
    Find(i64),
    Value(i64, i64),
    Remove(i64),
    Sale(i64),
    Reset,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let bad = || AppError::BadCommand(line.trim().to_string());
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(bad)?.to_ascii_lowercase();
        let args: Vec<i64> = words
            .map(|w| w.parse::<i64>().map_err(|_| bad()))
            .collect::<Result<_, _>>()?;

        let command = match (name.as_str(), args.as_slice()) {
            ("show", []) => Command::Show,
            ("total", []) => Command::Total,
            ("bill", []) => Command::Bill,
            ("add", []) => Command::Add,
            ("find", [id]) => Command::Find(*id),
            ("value", [id, amount]) => Command::Value(*id, *amount),
            ("remove", [id]) => Command::Remove(*id),
            ("sale", [amount]) => Command::Sale(*amount),
            ("reset", []) => Command::Reset,
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => return Err(bad()),
        };
        Ok(command)
    }
}

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub value: Money,
    pub created_at: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            value: order.value(),
            created_at: order.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub id: TableId,
    pub daily_sales_total: Money,
    pub bill_total: Money,
    pub active_orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub billed: Money,
    pub daily_sales_total: Money,
}

// ── Handler ──────────────────────────────────────────────────────────────────

/// Runs one command against the table and renders the JSON response.
///
/// `Quit` is a session concern and renders as an empty object.
pub fn handle<R: TableRepository, C: Clock>(
    service: &TableService<R, C>,
    command: Command,
) -> Result<Value, AppError> {
    let body = match command {
        Command::Show => {
            let snapshot = service.snapshot()?;
            let bill_total = snapshot.bill_total()?;
            serde_json::to_value(TableResponse {
                id: snapshot.id,
                daily_sales_total: snapshot.daily_sales_total,
                bill_total,
                active_orders: snapshot.active_orders.iter().map(OrderResponse::from).collect(),
            })
        }
        Command::Total => Ok(json!({ "daily_sales_total": service.daily_sales_total()? })),
        Command::Bill => Ok(json!({ "bill_total": service.bill_total()? })),
        Command::Add => Ok(json!({ "order_id": service.add_order()? })),
        Command::Find(id) => {
            let order = service.find_order(OrderId::new(id)?)?;
            serde_json::to_value(OrderResponse::from(&order))
        }
        Command::Value(id, amount) => {
            let order = service.set_order_value(OrderId::new(id)?, amount)?;
            serde_json::to_value(OrderResponse::from(&order))
        }
        Command::Remove(id) => {
            let removed = service.remove_order(OrderId::new(id)?)?;
            Ok(json!({ "removed": OrderResponse::from(&removed) }))
        }
        Command::Sale(amount) => {
            service.add_sale_amount(amount)?;
            Ok(json!({ "daily_sales_total": service.daily_sales_total()? }))
        }
        Command::Reset => {
            let billed = service.reset()?;
            serde_json::to_value(ResetResponse {
                billed,
                daily_sales_total: service.daily_sales_total()?,
            })
        }
        Command::Help => Ok(json!({ "commands": HELP })),
        Command::Quit => Ok(json!({})),
    };

    body.map_err(|e| AppError::Internal(e.to_string()))
}
