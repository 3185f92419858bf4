mod cli;
mod credentials;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::credentials::CredentialStore;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("polr=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let store = CredentialStore::default_location();
    if store.is_none() {
        tracing::warn!("no user config directory; saved credentials are unavailable");
    }
    cli::run(&args, store.as_ref(), &mut std::io::stdout().lock())
}
