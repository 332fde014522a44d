//! Subcommand execution

use crate::cli::{Cli, Invocation};
use crate::render;
use anyhow::{Context, Result};
use futures::FutureExt;
use signup_form::{FormConfig, FormSession, RefreshOutcome, SubmitOutcome};
use signup_schema::{Candidate, Field};
use signup_store::{fake_records, server, HttpRecordStore, MemoryRecordStore, RecordStore};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

/// Load config from `--config`, or defaults
///
/// # Errors
/// Fails if the file cannot be read or is invalid.
pub async fn load_config(cli: &Cli) -> Result<FormConfig> {
    match &cli.config {
        Some(path) => FormConfig::load(path)
            .await
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(FormConfig::default()),
    }
}

/// Run the parsed command line
///
/// # Errors
/// Config, bind, transport and decode failures. Validation failures and
/// refused submissions are reported on stdout with a failing exit code.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli).await?;

    match cli.invocation {
        Invocation::Serve {
            addr,
            seed,
            rng_seed,
        } => {
            serve(addr, seed, rng_seed).await?;
            Ok(ExitCode::SUCCESS)
        }
        Invocation::List { url } => list(&with_url(config, url)).await,
        Invocation::Submit { candidate, url } => submit(&with_url(config, url), candidate).await,
        Invocation::Validate { candidate, json } => validate(&config, &candidate, json),
    }
}

fn with_url(config: FormConfig, url: Option<String>) -> FormConfig {
    match url {
        Some(url) => config.with_store_url(url),
        None => config,
    }
}

fn http_store(config: &FormConfig) -> Result<HttpRecordStore> {
    HttpRecordStore::with_timeout(&config.store_url, config.request_timeout())
        .with_context(|| format!("invalid store url {}", config.store_url))
}

/// In-memory store wiped and filled with `count` fake records
#[must_use]
pub fn seeded_store(count: usize, rng_seed: u64) -> Arc<MemoryRecordStore> {
    let store = Arc::new(MemoryRecordStore::new());
    let seeded = store.replace_all(fake_records(count, rng_seed));
    tracing::debug!(count = seeded.len(), rng_seed, "seeded in-memory store");
    store
}

/// Serve `/customers` until Ctrl-C
///
/// # Errors
/// Binding failures.
pub async fn serve(addr: SocketAddr, seed: usize, rng_seed: u64) -> Result<()> {
    let store = seeded_store(seed, rng_seed);
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    let (bound, serving) = server::bind(store.clone(), addr, shutdown)?;

    tracing::info!(seeded = store.len(), "listening on http://{}", bound);
    println!("listening on http://{bound}");
    serving.await;
    tracing::info!("server stopped");
    Ok(())
}

/// Print the remote listing
///
/// # Errors
/// Transport, status or decode failures.
pub async fn list(config: &FormConfig) -> Result<ExitCode> {
    let store = http_store(config)?;
    let records = store
        .list()
        .await
        .with_context(|| format!("listing {}", store.endpoint()))?;
    print!("{}", render::listing_table(&records));
    Ok(ExitCode::SUCCESS)
}

/// Fill a form session with `candidate`, submit it and print the result
///
/// # Errors
/// Only for an unusable store URL; every store failure is reported as an
/// outcome.
pub async fn submit(config: &FormConfig, candidate: Candidate) -> Result<ExitCode> {
    let store = http_store(config)?;
    let mut session = FormSession::new(store, config);

    if let RefreshOutcome::Failed(message) = session.mount().await {
        tracing::warn!("initial listing unavailable: {}", message);
    }
    for field in Field::ALL {
        session.on_field_change(field, candidate.get(field));
    }

    let code = match session.on_submit().await {
        SubmitOutcome::Accepted { record, .. } => {
            println!("saved record #{}: {}", record.id, record.record);
            ExitCode::SUCCESS
        }
        SubmitOutcome::Blocked(errors) => {
            println!("not submitted:");
            print!("{}", render::field_errors(&errors));
            ExitCode::FAILURE
        }
        SubmitOutcome::Failed(failure) => {
            print!("{}", render::failure(&failure));
            ExitCode::FAILURE
        }
        SubmitOutcome::AlreadyPending | SubmitOutcome::Discarded => ExitCode::FAILURE,
    };

    if let Some(notice) = render::listing_notice(session.listing().status()) {
        println!("{notice}");
    }
    print!("{}", render::listing_table(session.listing().records()));
    session.close();
    Ok(code)
}

/// Evaluate `candidate` against the configured schema
///
/// # Errors
/// JSON serialization failure.
pub fn validate(config: &FormConfig, candidate: &Candidate, json: bool) -> Result<ExitCode> {
    let errors = config.build_schema().evaluate(candidate);

    if json {
        println!("{}", serde_json::to_string_pretty(&errors)?);
    } else if errors.is_empty() {
        println!("ok");
    } else {
        print!("{}", render::field_errors(&errors));
    }

    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
