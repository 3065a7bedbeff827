//! Initialize the node: peers, keys, alias registration.

use std::io::Write;

use tracing::{debug, info};

use colour_chain::MiningListener;
use colour_client::Registration;
use colour_core::BlockHash;

use crate::cli::Cli;
use crate::context::build_client;
use crate::error::CliResult;

/// Mining progress reported through the log rather than the terminal;
/// init stays quiet unless asked to be verbose.
struct LogListener;

impl MiningListener for LogListener {
    fn on_attempt(&self, nonce: u64) {
        debug!(nonce, "mining");
    }

    fn on_mined(&self, hash: &BlockHash, nonce: u64) {
        info!(block = %hash, nonce, "mined");
    }
}

/// Execute the init command.
pub fn run<W: Write>(cli: &Cli, w: &mut W) -> CliResult<()> {
    let mut client = build_client(cli)?;
    let registration = client.init(&LogListener)?;

    let identity = client
        .identity()
        .ok_or_else(|| crate::error::CliError::User("init did not produce an identity".into()))?;
    writeln!(w, "alias: {}", identity.alias)?;
    writeln!(w, "public key: {}", identity.public_key().to_base64())?;
    match registration {
        Registration::AlreadyRegistered => writeln!(w, "alias already registered")?,
        Registration::Remote => writeln!(w, "alias registered with node")?,
        Registration::MinedLocally => writeln!(w, "alias mined locally; will sync with peers")?,
    }
    Ok(())
}
