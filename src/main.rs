use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use miden_para::account::{account_seed_from_str, AccountConfig};
use miden_para::ffi::{account_id_for, adapted_signature_for, commitment_for};
use miden_para::utils::logging;
use miden_para::{AccountStorageMode, AccountType, BridgeConfig, BridgeError, ErrorReport};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Offline tooling for the Para / Miden bridge
#[derive(Debug, Parser)]
#[command(name = "miden-para", version, about)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Derive the account commitment for an uncompressed EVM public key
    Commitment {
        /// `0x04` + 128 hex chars
        public_key: String,
    },
    /// Serialize a hex signature into the ledger's auth signature format
    AdaptSignature { signature: String },
    /// Show the 32-byte seed buffer derived from a seed string
    AccountSeed { seed: Option<String> },
    /// Compute the id of the account bridged to a public key
    AccountId {
        #[arg(long)]
        public_key: String,
        #[arg(long, default_value = "public")]
        storage_mode: AccountStorageMode,
        #[arg(long, default_value = "RegularAccountImmutableCode")]
        account_type: AccountType,
        #[arg(long)]
        account_seed: Option<String>,
    },
    /// Validate a JSON bridge configuration and print it with defaults applied
    Config { file: PathBuf },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedOutput {
    account_seed: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        logging::enable_debug();
    }

    match run(cli.command) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", error_json(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<String> {
    let json = match command {
        Command::Commitment { public_key } => to_json(&commitment_for(&public_key)?)?,
        Command::AdaptSignature { signature } => to_json(&adapted_signature_for(&signature)?)?,
        Command::AccountSeed { seed } => {
            let seed = account_seed_from_str(seed.as_deref());
            to_json(&SeedOutput {
                account_seed: seed.map(|s| format!("0x{}", hex::encode(s.as_bytes()))),
            })?
        }
        Command::AccountId {
            public_key,
            storage_mode,
            account_type,
            account_seed,
        } => {
            let config = AccountConfig {
                account_type,
                storage_mode,
                account_seed,
            };
            to_json(&account_id_for(&public_key, &config)?)?
        }
        Command::Config { file } => {
            let mut config = BridgeConfig::from_file(&file)?;
            config.validate()?;
            config.note_transport_url = Some(config.note_transport_url().to_string());
            to_json(&config)?
        }
    };
    Ok(json)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

/// `{code, message}` for bridge errors, a generic report for anything else
fn error_json(err: &anyhow::Error) -> String {
    let report = match err.downcast_ref::<BridgeError>() {
        Some(bridge_err) => serde_json::to_value(ErrorReport::from(bridge_err)),
        None => Ok(serde_json::json!({ "code": "internal", "message": format!("{:#}", err) })),
    };
    report
        .map(|v| v.to_string())
        .unwrap_or_else(|_| format!("{{\"code\":\"internal\",\"message\":\"{}\"}}", err))
}
