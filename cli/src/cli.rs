//! Command-line arguments and the shorten/lookup commands of `polr`.
//!
//! Flags take precedence over saved credentials; the credential store is
//! optional and only consulted when the flags leave something unset.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Parser;
use polr_core::{Lookup, PolrApi, PolrClient, Transport, UreqTransport, DEFAULT_API_ROOT};

use crate::credentials::{CredentialStore, Credentials};

#[derive(Parser, Debug)]
#[command(
    name = "polr",
    version,
    about = "Shorten and look up links on a Polr server"
)]
pub struct Args {
    /// URL to shorten, or short URL / ending to look up
    pub url: Option<String>,

    /// Polr server URL, e.g. https://ti.ny
    #[arg(long)]
    pub server: Option<String>,

    /// API key of your Polr user
    #[arg(long)]
    pub key: Option<String>,

    /// API root path on the server
    #[arg(long)]
    pub api_root: Option<String>,

    /// Custom ending for the short URL
    #[arg(long, short, conflicts_with = "lookup")]
    pub custom: Option<String>,

    /// Create a secret short URL
    #[arg(long, short, conflicts_with = "lookup")]
    pub secret: bool,

    /// Look up the given short URL instead of shortening
    #[arg(long, short)]
    pub lookup: bool,

    /// Access key of a secret short URL (with --lookup)
    #[arg(long, requires = "lookup")]
    pub url_key: Option<String>,

    /// Save server, key and API root for later runs
    #[arg(long)]
    pub save: bool,

    /// Delete saved credentials
    #[arg(long)]
    pub clear: bool,
}

/// Combine command-line flags with stored credentials. Flags win.
pub fn resolve(args: &Args, stored: Option<Credentials>) -> Option<Credentials> {
    let server = args
        .server
        .clone()
        .or_else(|| stored.as_ref().map(|c| c.server.clone()))?;
    let key = args
        .key
        .clone()
        .or_else(|| stored.as_ref().map(|c| c.key.clone()))?;
    let root = args
        .api_root
        .clone()
        .or_else(|| stored.map(|c| c.root))
        .unwrap_or_else(|| DEFAULT_API_ROOT.to_string());
    Some(Credentials { server, key, root })
}

fn require_store(store: Option<&CredentialStore>) -> Result<&CredentialStore> {
    store.context("could not determine the user config directory for saved credentials")
}

/// Credentials for this run. The store is only read when a flag is missing,
/// so a full set of flags works without a config directory.
pub fn credentials_for(
    args: &Args,
    store: Option<&CredentialStore>,
) -> Result<Option<Credentials>> {
    let flags_complete = args.server.is_some() && args.key.is_some() && args.api_root.is_some();
    let stored = match store {
        Some(store) if !flags_complete => store.load()?,
        _ => None,
    };
    Ok(resolve(args, stored))
}

pub fn run(args: &Args, store: Option<&CredentialStore>, out: &mut impl Write) -> Result<()> {
    if args.clear {
        if require_store(store)?.clear()? {
            writeln!(out, "Removed saved credentials.")?;
        } else {
            writeln!(out, "No saved credentials to remove.")?;
        }
    }

    let credentials = credentials_for(args, store)?;

    if args.save {
        let store = require_store(store)?;
        let Some(credentials) = &credentials else {
            bail!("--save needs both --server and --key");
        };
        store.save(credentials)?;
        writeln!(out, "Saved credentials to {}", store.path().display())?;
    }

    let Some(url) = &args.url else {
        if args.clear || args.save {
            return Ok(());
        }
        bail!("nothing to do: pass a URL to shorten or look up (see --help)");
    };
    let Some(credentials) = credentials else {
        bail!("no server and key given and none saved: pass --server and --key");
    };

    let client = PolrClient::new(&credentials.server, &credentials.key, &credentials.root);
    let api = PolrApi::with_transport(client, UreqTransport::new());
    execute(&api, args, url, out)
}

/// Perform the shorten or lookup call and print its outcome.
///
/// API errors are printed like any other outcome; only a failed write is
/// returned as an error.
pub fn execute<T: Transport>(
    api: &PolrApi<T>,
    args: &Args,
    url: &str,
    out: &mut impl Write,
) -> Result<()> {
    if args.lookup {
        match api.lookup(url, args.url_key.as_deref()) {
            Ok(Lookup::Found(info)) => {
                writeln!(out, "{}", info.long_url)?;
                if let Some(clicks) = info.clicks {
                    writeln!(out, "clicks: {clicks}")?;
                }
            }
            Ok(Lookup::NotFound) => writeln!(out, "No short URL found for {url}")?,
            Err(err) => writeln!(out, "{err}")?,
        }
    } else {
        match api.shorten(url, args.custom.as_deref(), args.secret) {
            Ok(short_url) => writeln!(out, "{short_url}")?,
            Err(err) => writeln!(out, "{err}")?,
        }
    }
    Ok(())
}
