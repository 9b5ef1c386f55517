pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use std::io::{BufRead, Write};
use std::sync::Arc;

use log::warn;
use serde_json::json;

pub use application::table_service::TableService;
pub use config::Settings;
pub use errors::AppError;

use domain::policy::{RemovalPolicy, RemovalWindow, Unrestricted};
use domain::ports::{Clock, TableRepository};
use handlers::table::Command;
use infrastructure::clock::SystemClock;
use infrastructure::memory_repo::InMemoryTableRepository;

/// Open the configured table on top of `repo`, using the wall clock.
pub fn build_service(
    settings: &Settings,
    repo: Arc<InMemoryTableRepository>,
) -> Result<TableService<Arc<InMemoryTableRepository>, SystemClock>, AppError> {
    let policy: Box<dyn RemovalPolicy> = match settings.removal_window {
        Some(window) => Box::new(RemovalWindow::new(window)),
        None => Box::new(Unrestricted),
    };

    Ok(TableService::open(
        repo,
        SystemClock,
        policy,
        settings.table_id,
        settings.starting_sales_total,
    )?)
}

/// Read commands from `input` one per line and write one JSON response per
/// line to `output`, until `quit` or end of input.
///
/// Caller mistakes (unknown orders, bad amounts, typos) are answered with an
/// `{"error": ...}` line; anything else ends the session with the error.
pub fn run_session<R: TableRepository, C: Clock>(
    service: &TableService<R, C>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<(), AppError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => handlers::table::handle(service, command),
            Err(e) => Err(e),
        };

        let body = match response {
            Ok(body) => body,
            Err(e) if e.is_recoverable() => {
                warn!("{}", e);
                json!({ "error": e.to_string() })
            }
            Err(e) => return Err(e),
        };
        writeln!(output, "{}", body)?;
    }

    output.flush()?;
    Ok(())
}
