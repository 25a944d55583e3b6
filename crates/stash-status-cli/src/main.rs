//! stash-status `out` step
//!
//! Reads the step request from stdin, resolves the commit of the working copy
//! named by `params.repository` under the directory given as the only
//! argument, and reports the build status to the Stash host.
//!
//! - stdout: the response document (`version` + `metadata`)
//! - stderr: log lines, and the failure message on a fatal error
//! - exit 1 when the commit cannot be resolved or every attempt failed

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use stash_client::{StashClient, StashConfig};
use stash_status_core::{BuildEnv, PublishRequest, Request, StatusPublisher};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "out")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Publish a build status to a Stash host", long_about = None)]
struct Cli {
    /// Directory that `params.repository` is resolved against
    base_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Wait between attempts at the host, in milliseconds
    #[arg(long, default_value_t = 1000, hide = true)]
    retry_delay_ms: u64,
}

fn read_request<R: Read>(reader: R) -> Result<PublishRequest> {
    let wire = Request::from_reader(reader).context("Failed to read request from stdin")?;
    PublishRequest::try_from(wire).context("Invalid request")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    stash_status_core::init_tracing(cli.json, level);

    let request = read_request(std::io::stdin().lock())?;
    let build_env = BuildEnv::from_env();

    let client =
        StashClient::new(StashConfig::from(&request)).context("Failed to create Stash client")?;
    info!(host = %client.config().host, "Publishing build status");

    let publisher = StatusPublisher::new(Arc::new(client), build_env)
        .with_retry_delay(Duration::from_millis(cli.retry_delay_ms));
    let outcome = publisher
        .publish_to(&cli.base_dir, &request, std::io::stdout())
        .await;
    drop(publisher);

    match outcome {
        Ok(_) => Ok(()),
        Err(err) if err.is_fatal() => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        Err(err) => Err(err).context("Failed to report the published status"),
    }
}
