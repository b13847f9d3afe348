//! `verdure-admin` entry point: wires settings, the Diesel pool, repositories
//! and domain services, then runs one subcommand and prints its JSON result.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use verdure_admin::cli::{self, AdminPorts, CliArgs, Command, EntityCommand};
use verdure_admin::config::AdminSettings;
use verdure_admin::domain::{AuditService, FixitService, VocabService};
use verdure_admin::outbound::persistence::{
    DbPool, DieselAuditRepository, DieselFixitRepository, DieselVocabRepository,
    run_pending_migrations,
};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = AdminSettings::load_from_iter([OsString::from("verdure-admin")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(async_main(args.command, settings))
}

async fn async_main(command: Command, settings: AdminSettings) -> Result<()> {
    match command {
        Command::Migrate => migrate(&settings).await,
        Command::Entity(command) => run_entity(command, &settings).await,
    }
}

async fn migrate(settings: &AdminSettings) -> Result<()> {
    let database_url = settings.database_url()?.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .wrap_err("migration task panicked")??;
    info!(count = applied.len(), "migrations applied");
    for version in applied {
        println!("{version}");
    }
    Ok(())
}

async fn run_entity(command: EntityCommand, settings: &AdminSettings) -> Result<()> {
    let pool = DbPool::new(settings.pool_config()?)
        .await
        .wrap_err("failed to connect to the database")?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let actor = settings.audit_actor();

    let audits = AuditService::new(
        Arc::new(DieselAuditRepository::new(pool.clone())),
        clock.clone(),
    );
    let vocabs = VocabService::new(
        Arc::new(DieselVocabRepository::new(pool.clone())),
        audits.clone(),
        actor,
    );
    let fixits = FixitService::new(
        Arc::new(DieselFixitRepository::new(pool)),
        audits.clone(),
        actor,
        clock,
    );

    let ports = AdminPorts {
        vocab_command: &vocabs,
        vocab_query: &vocabs,
        fixit_command: &fixits,
        fixit_query: &fixits,
        audit_query: &audits,
        actor,
    };
    let output = cli::execute(command, &ports).await?;
    let rendered = serde_json::to_string_pretty(&output).wrap_err("failed to render output")?;
    println!("{rendered}");
    Ok(())
}
