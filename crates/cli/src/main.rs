//! Command-line interface for OpenPGP smartcards
//!
//! Thin operator frontend over [`opgp_card`]: pick a reader, wait for a
//! card, run one sign or decipher session, print the result as hex.

use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use opgp_apdu_transport_pcsc::{PcscDeviceManager, PcscTransport};
use opgp_card::{CardSession, HashAlgorithm, Pin};

#[derive(Parser)]
#[command(name = "opgp-card", version, about = "Sign and decrypt with an OpenPGP smartcard")]
struct Cli {
    /// Reader to use; defaults to the first reader with a card, waiting
    /// for one if necessary
    #[arg(long, global = true)]
    reader: Option<String>,

    /// How long to wait for a card to be presented, in seconds
    #[arg(long, global = true, default_value_t = 30)]
    wait: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List attached readers and whether they hold a card
    Readers,

    /// Compute an RSA signature over a precomputed digest
    Sign {
        /// Hash algorithm the digest was computed with
        #[arg(long, value_enum)]
        algorithm: HashAlgorithm,

        /// The digest, hex-encoded, length matching the algorithm
        #[arg(long)]
        digest: String,
    },

    /// Decrypt an RSA-encrypted session key
    Decipher {
        /// The encrypted session key, hex-encoded, including the
        /// leading padding-indicator byte
        #[arg(long)]
        ciphertext: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let manager = PcscDeviceManager::new().context("PC/SC is not available")?;

    match cli.command {
        Commands::Readers => list_readers(&manager),
        Commands::Sign { algorithm, digest } => {
            let digest = hex::decode(&digest).context("digest is not valid hex")?;
            if digest.len() != algorithm.digest_len() {
                bail!(
                    "digest must be {} bytes for {:?}, got {}",
                    algorithm.digest_len(),
                    algorithm,
                    digest.len()
                );
            }

            let transport = open_transport(&manager, &cli.reader, cli.wait)?;
            let pin = read_pin()?;
            let signature = CardSession::sign_digest(transport, &pin, algorithm, &digest)
                .context("signing session failed")?;
            println!("{}", hex::encode(signature));
            Ok(())
        }
        Commands::Decipher { ciphertext } => {
            let ciphertext = hex::decode(&ciphertext).context("ciphertext is not valid hex")?;
            if ciphertext.len() < 2 {
                bail!("ciphertext is too short");
            }

            let transport = open_transport(&manager, &cli.reader, cli.wait)?;
            let pin = read_pin()?;
            let session_key = CardSession::decrypt_session_key(transport, &pin, &ciphertext)
                .context("decryption session failed")?;
            println!("{}", hex::encode(session_key));
            Ok(())
        }
    }
}

fn list_readers(manager: &PcscDeviceManager) -> anyhow::Result<()> {
    let readers = manager.list_readers().context("could not list readers")?;
    if readers.is_empty() {
        println!("no readers attached");
        return Ok(());
    }

    for reader in readers {
        let state = if reader.has_card() { "card present" } else { "empty" };
        println!("{} ({})", reader.name(), state);
    }
    Ok(())
}

fn open_transport(
    manager: &PcscDeviceManager,
    reader: &Option<String>,
    wait_secs: u64,
) -> anyhow::Result<PcscTransport> {
    let name = match reader {
        Some(name) => name.clone(),
        None => {
            println!("waiting for a card...");
            let reader = manager
                .wait_for_card(Duration::from_secs(wait_secs))
                .context("no card was presented")?;
            reader.name().to_string()
        }
    };

    debug!(reader = %name, "opening transport");
    manager
        .open_reader(&name)
        .with_context(|| format!("could not connect to reader {name}"))
}

fn read_pin() -> anyhow::Result<Pin> {
    let pin = rpassword::prompt_password("PIN: ").context("could not read PIN")?;
    Ok(pin.parse()?)
}
