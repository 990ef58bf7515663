//! Walkthrough of the Thor transaction lifecycle.
//!
//! Builds a body, signs it plainly, then runs the two-party fee-delegation
//! flow and decodes the result the way a node would. The output uses ANSI
//! escape codes for colored terminal rendering.
//!
//! Run with:
//!   RUST_LOG=thor_tx_core=debug cargo run --example demo [-- --json]

use std::time::Instant;

use alloy_primitives::{Address, U256};
use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use thor_tx_core::crypto::{blake2b256, verify, SecretKey};
use thor_tx_core::transaction::{self, Clause, Transaction, TransactionBodyBuilder};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]==============================={RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: impl std::fmt::Display) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}  [{label}: {ms:.2} ms]{RESET}");
}

/// Log output format. `--json` on the command line selects JSON lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

/// Logs go to stderr so the walkthrough on stdout stays readable.
fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    let format = if std::env::args().any(|arg| arg == "--json") {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_logging(format);

    // Demo keys derived from fixed seeds. Never do this with real funds.
    let sender_key = blake2b256(b"demo sender");
    let gas_payer_key = blake2b256(b"demo gas payer");
    let sender = SecretKey::from_slice(sender_key.as_slice())
        .context("sender key")?
        .address();
    let gas_payer = SecretKey::from_slice(gas_payer_key.as_slice())
        .context("gas payer key")?
        .address();

    section(1, "Build a body");
    let body = TransactionBodyBuilder::new(0x27)
        .clause(Clause::transfer(
            Address::repeat_byte(0x7e),
            U256::from(10u64).pow(U256::from(18)),
        ))
        .expiration(720)
        .nonce(0x1234)
        .build();
    info("sender", sender);
    info("intrinsic gas", body.gas);

    section(2, "Plain signing");
    let t = Instant::now();
    let tx = transaction::sign(&body, sender_key.as_slice())?;
    timing("sign", t.elapsed());
    info("encoded", alloy_primitives::hex::encode_prefixed(tx.encoded()));
    info("id", tx.id()?);
    anyhow::ensure!(tx.origin()? == sender, "origin mismatch");
    success("origin recovers to the sender");

    section(3, "Fee delegation, two parties");
    let delegated = TransactionBodyBuilder::new(0x27)
        .clauses(body.clauses.clone())
        .nonce(0x1235)
        .delegated(true)
        .build();

    // The sender signs and hands over body + signature.
    let partial = transaction::sign_for_delegator(&delegated, sender_key.as_slice())?;
    let handed_over = partial.signature().cloned().context("sender signature")?;
    info("sender half", alloy_primitives::hex::encode_prefixed(&handed_over));

    // The gas payer rebuilds the transaction and countersigns.
    let received = Transaction::with_signature(partial.body().clone(), handed_over)?;
    let claimed_sender = received.origin()?;
    let t = Instant::now();
    let full =
        transaction::sign_as_delegator(&received, &claimed_sender, gas_payer_key.as_slice())?;
    timing("countersign", t.elapsed());

    let sig = full.signature().context("full signature")?;
    anyhow::ensure!(
        verify(&full.signature_hash(Some(&claimed_sender)), &sig[65..], &gas_payer),
        "gas payer signature does not verify"
    );
    success("gas payer signed the sender-bound hash");

    section(4, "Decode like a node");
    let decoded = transaction::decode(full.encoded(), true)?;
    info("origin", decoded.origin()?);
    info("delegator", decoded.delegator()?);
    info("id", decoded.id()?);
    anyhow::ensure!(decoded == full, "round trip mismatch");
    success("decoded transaction matches what was signed");

    println!();
    Ok(())
}
