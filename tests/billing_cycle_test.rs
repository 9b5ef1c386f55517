//! Billing-cycle tests through the public API and the line-oriented session.
//!
//! Run with:
//!
//!   cargo test --test billing_cycle_test

use std::io::Cursor;
use std::sync::Arc;

use serde_json::Value;
use table_service::domain::errors::DomainError;
use table_service::domain::ports::TableRepository;
use table_service::domain::values::{Money, OrderId, TableId};
use table_service::infrastructure::memory_repo::InMemoryTableRepository;
use table_service::{build_service, run_session, Settings};

fn settings(table_id: u64, starting: u64) -> Settings {
    Settings {
        table_id: TableId::from(table_id),
        starting_sales_total: Money::from(starting),
        removal_window: None,
    }
}

/// Feed `script` to a fresh session and return one parsed JSON value per
/// response line.
fn session(repo: Arc<InMemoryTableRepository>, settings: &Settings, script: &str) -> Vec<Value> {
    let service = build_service(settings, repo).expect("service should open");
    let mut out = Vec::new();
    run_session(&service, Cursor::new(script), &mut out).expect("session failed");

    String::from_utf8(out)
        .expect("utf-8 output")
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect()
}

#[test]
fn full_billing_cycle_through_the_api() {
    let repo = Arc::new(InMemoryTableRepository::new());
    let svc = build_service(&settings(1, 0), repo).unwrap();

    let a = svc.add_order().unwrap();
    let b = svc.add_order().unwrap();
    svc.set_order_value(a, 1500).unwrap();
    svc.set_order_value(b, 2300).unwrap();
    assert_eq!(svc.bill_total().unwrap(), Money::from(3800));

    svc.remove_order(a).unwrap();
    let open = svc.active_orders().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id(), b);
    assert_eq!(svc.bill_total().unwrap(), Money::from(2300));

    svc.reset().unwrap();
    assert_eq!(svc.daily_sales_total().unwrap(), Money::from(2300));
    assert!(svc.active_orders().unwrap().is_empty());
}

#[test]
fn find_on_empty_table_is_not_found() {
    let svc = build_service(&settings(2, 0), Arc::new(InMemoryTableRepository::new())).unwrap();
    for raw in [0, 1, 99] {
        let id = OrderId::from(raw);
        assert_eq!(svc.find_order(id), Err(DomainError::OrderNotFound(id)));
    }
}

#[test]
fn reset_on_empty_table_keeps_total() {
    let svc = build_service(&settings(3, 5000), Arc::new(InMemoryTableRepository::new())).unwrap();
    assert_eq!(svc.reset().unwrap(), Money::ZERO);
    assert_eq!(svc.reset().unwrap(), Money::ZERO);
    assert_eq!(svc.daily_sales_total().unwrap(), Money::from(5000));
}

#[test]
fn session_runs_the_billing_cycle() {
    let responses = session(
        Arc::new(InMemoryTableRepository::new()),
        &settings(1, 0),
        "add\nadd\nvalue 1 1500\nvalue 2 2300\nbill\nremove 1\nbill\nreset\nshow\n",
    );

    assert_eq!(responses.len(), 9);
    assert_eq!(responses[0]["order_id"], 1);
    assert_eq!(responses[1]["order_id"], 2);
    assert_eq!(responses[4]["bill_total"], 3800);
    assert_eq!(responses[5]["removed"]["id"], 1);
    assert_eq!(responses[6]["bill_total"], 2300);
    assert_eq!(responses[7]["billed"], 2300);
    assert_eq!(responses[7]["daily_sales_total"], 2300);

    let table = &responses[8];
    assert_eq!(table["daily_sales_total"], 2300);
    assert_eq!(table["bill_total"], 0);
    assert!(table["active_orders"].as_array().unwrap().is_empty());
}

#[test]
fn session_reports_caller_mistakes_and_continues() {
    let responses = session(
        Arc::new(InMemoryTableRepository::new()),
        &settings(1, 0),
        "find 4\nsale -20\nfly away\n\nsale 20\nquit\ntotal\n",
    );

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["error"], "Not found: Order 4 not found");
    assert!(responses[1]["error"]
        .as_str()
        .unwrap()
        .starts_with("Rejected: Invalid argument"));
    assert_eq!(responses[2]["error"], "Unknown command: fly away");
    assert_eq!(responses[3]["daily_sales_total"], 20);
}

#[test]
fn state_survives_across_sessions_on_the_same_repository() {
    let repo = Arc::new(InMemoryTableRepository::new());
    session(repo.clone(), &settings(7, 100), "add\nvalue 1 900\n");

    let stored = repo
        .load(TableId::from(7))
        .unwrap()
        .expect("table saved");
    assert_eq!(stored.active_orders.len(), 1);

    let responses = session(repo, &settings(7, 0), "reset\n");
    assert_eq!(responses[0]["billed"], 900);
    assert_eq!(responses[0]["daily_sales_total"], 1000);
}
