use std::io;
use std::process;
use std::sync::Arc;

use table_service::infrastructure::memory_repo::InMemoryTableRepository;
use table_service::{build_service, run_session, AppError, Settings};

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run() {
        log::error!("{}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    let repo = Arc::new(InMemoryTableRepository::new());
    let service = build_service(&settings, repo)?;

    log::info!(
        "Serving table {} (removal window: {})",
        settings.table_id,
        settings
            .removal_window
            .map(|w| format!("{}s", w.num_seconds()))
            .unwrap_or_else(|| "none".to_string())
    );

    let stdin = io::stdin();
    run_session(&service, stdin.lock(), io::stdout().lock())
}
