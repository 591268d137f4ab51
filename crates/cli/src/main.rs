//! Lattice CLI
//!
//! Authenticates against the configured token endpoint with the resource
//! owner password grant, then lists all CI identifiers from the inventory
//! API. The flow is strictly linear: acquire token, call once, terminate.
//!
//! Exit status is 1 when configuration or token acquisition fails. An API
//! call failure is reported on stderr with the raw response metadata, the
//! (then empty) response is still written to stdout, and the process exits
//! 0.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use lattice_client::{ApiClient, ApiError, AuthClient, CachedTokenSource};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // Best-effort: running without a .env file is the normal case.
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(_) => debug!("no .env file loaded"),
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = settings::load().context("loading settings from environment")?;

    let auth = AuthClient::new(settings.config.clone(), settings.credentials);
    let tokens = auth.password_grant().await.context("authentication failed")?;

    let source = Arc::new(CachedTokenSource::new(auth, tokens));
    let client = ApiClient::new(settings.config, source);

    emit_result(client.list_all_ci_ids(&settings.api_version).await);
    Ok(())
}

/// Write the request result to the process's two sinks.
///
/// Error reporting does not suppress the response line: a failed call puts
/// the error and the raw response metadata on stderr, and the response
/// (empty on failure) still goes to stdout.
fn emit_result(result: Result<Vec<String>, ApiError>) {
    let ids = match result {
        Ok(ids) => ids,
        Err(err) => {
            eprintln!("error calling ci-ids endpoint: {err}");
            if let Some(meta) = err.meta() {
                eprintln!("full response: {meta}");
            }
            Vec::new()
        }
    };
    println!("{}", render_response(&ids));
}

fn render_response(ids: &[String]) -> String {
    format!("response: [{}]", ids.join(", "))
}

fn init_tracing() {
    // stdout is reserved for the response payload; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
