//! Supplink headless client shell.

#![forbid(unsafe_code)]

mod command;
mod config;
mod driver;
mod seed;

use serde::Serialize;
use supplink_core::{AppError, AppResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::ShellCommand;
use crate::config::ShellConfig;
use crate::driver::{Shell, Step};
use crate::seed::SeedDocument;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ShellConfig::load()?;
    let seed = match &config.seed_path {
        Some(path) => SeedDocument::read(path).await?,
        None => SeedDocument::default(),
    };
    let mut shell = Shell::bootstrap(&config, seed).await?;

    info!(
        approval_policy = %config.approval_policy.as_str(),
        fetch_timeout_ms = config.fetch_timeout.as_millis(),
        seed_path = ?config.seed_path,
        "supplink-shell started"
    );

    let mut auth = shell.subscribe_auth();
    auth.mark_unchanged();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.map_err(|error| {
                    AppError::Internal(format!("failed to read input: {error}"))
                })?;
                let Some(line) = line else {
                    break;
                };

                match ShellCommand::parse(line.as_str()) {
                    Ok(None) => {}
                    Ok(Some(command)) => match shell.execute(command).await {
                        Step::Reply(envelope) => emit(&envelope)?,
                        Step::Quit => break,
                    },
                    Err(error) => {
                        warn!(error = %error, "rejected input line");
                        emit(&supplink_core::ResultEnvelope::<()>::failure(error.user_message()))?;
                    }
                }
            }
            changed = auth.changed() => {
                if changed.is_err() {
                    warn!("identity provider closed its notification channel");
                    break;
                }
                let principal = auth.borrow_and_update().clone();
                if let Some(envelope) = shell.apply_auth_change(principal).await {
                    emit(&envelope)?;
                }
            }
        }
    }

    info!("supplink-shell stopped");
    Ok(())
}

fn emit<T: Serialize>(value: &T) -> AppResult<()> {
    let line = serde_json::to_string(value)
        .map_err(|error| AppError::Internal(format!("failed to encode output: {error}")))?;
    println!("{line}");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
