mod cli;

use crate::cli::{Cli, Command, SessionArgs, ValidateAssetsArgs};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use clientstore::app::context::{file_storage, AppContext};
use clientstore::assets::validate_assets;
use clientstore::config::{self, AppConfig};
use clientstore::logging::init_logging;
use clientstore::slices::auth::AuthAction;
use clientstore::theme::Theme;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let cfg = config::load_config(cli.config.as_deref())?;
    init_logging(&cfg.logging, cli.log_level.as_deref())?;

    match cli.command {
        Command::Session(args) => session(&cfg, args).await,
        Command::Purge => purge(&cfg).await,
        Command::Theme => print_json(&Theme::tokens()),
        Command::ValidateAssets(args) => validate(&cfg, args),
    }
}

async fn open_context(cfg: &AppConfig) -> Result<AppContext> {
    let storage = file_storage(&cfg.persist);
    info!(dir = %storage.root().display(), "using file storage");
    let mut ctx = AppContext::new(cfg, Arc::new(storage))?;
    if let Err(e) = ctx.start().await {
        // The store is usable with defaults; report and carry on.
        warn!(error = %e, "could not restore persisted session");
    }
    Ok(ctx)
}

async fn session(cfg: &AppConfig, args: SessionArgs) -> Result<ExitCode> {
    let mut ctx = open_context(cfg).await?;

    if (args.login.is_some() || args.logout) && !ctx.store.persist_status().write_back {
        // An explicit login or logout replaces whatever the store could not read.
        ctx.resume()?;
    }

    if let Some(user_id) = args.login {
        let login = AuthAction::Login {
            user_id,
            display_name: args.name,
            company_id: args.company,
            access_token: None,
            refresh_token: None,
            at: Utc::now(),
        };
        ctx.dispatch(login).context("Login rejected")?;
    } else if args.logout {
        ctx.dispatch(AuthAction::Logout).context("Logout rejected")?;
    }

    let state = ctx
        .shutdown()
        .await
        .context("Failed to write session back to storage")?;
    print_json(&state)
}

async fn purge(cfg: &AppConfig) -> Result<ExitCode> {
    let mut ctx = open_context(cfg).await?;
    ctx.purge().await.context("Failed to purge persisted session")?;
    ctx.shutdown().await?;
    println!("Persisted session cleared.");
    Ok(ExitCode::SUCCESS)
}

fn validate(cfg: &AppConfig, args: ValidateAssetsArgs) -> Result<ExitCode> {
    let root = args.root.unwrap_or_else(|| cfg.assets.root.clone());
    let report = validate_assets(&root, cfg.assets.required.as_slice());

    for path in &report.present {
        println!("ok       {}", path);
    }
    for issue in &report.issues {
        println!("{:<8} {}", format!("{:?}", issue.problem).to_lowercase(), issue.path);
    }

    if report.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{} of {} required assets failed validation under {}",
            report.issues.len(),
            cfg.assets.required.len(),
            root.display()
        );
        Ok(ExitCode::FAILURE)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<ExitCode> {
    let json = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}
