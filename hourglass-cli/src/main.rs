#![forbid(unsafe_code)]

//! Hourglass command line tool.
//!
//! Wraps the byte-level verifier interface: big-number add/sub, challenge
//! derivation and proof verification from flags or JSON proof files.
//!
//! Exit status: 0 accepted (or computed), 1 rejected, 2 malformed input or
//! configuration error.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hourglass_core::{decode_hex, encode_hex};
use hourglass_core::VerifierConfig;
use hourglass_vdf::{
    big_add, big_sub, verify_batch_detailed, BigUint, Proof, ProofFile, VdfVerifier,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add two big-endian hex integers
    Add { a: String, b: String },
    /// Subtract two big-endian hex integers (a - b)
    Sub { a: String, b: String },
    /// Derive the challenge prime for (g, y), or check a candidate
    HashPrime {
        g: String,
        y: String,
        /// Candidate prime to compare against
        #[arg(long)]
        check: Option<String>,
    },
    /// Verify a single proof
    Verify {
        /// JSON proof file with hex fields g, y, pi, l and integer t
        #[arg(long, conflicts_with_all = ["g", "y", "pi", "t", "l"])]
        proof: Option<PathBuf>,
        #[arg(long, required_unless_present = "proof")]
        g: Option<String>,
        #[arg(long, required_unless_present = "proof")]
        y: Option<String>,
        #[arg(long, required_unless_present = "proof")]
        pi: Option<String>,
        #[arg(long, required_unless_present = "proof")]
        t: Option<u64>,
        #[arg(long, required_unless_present = "proof")]
        l: Option<String>,
    },
    /// Verify a JSON array of proofs in parallel
    Batch { file: PathBuf },
}

/// Result of a command before it is mapped to an exit status.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Value(String),
    Accepted,
    Rejected(String),
    BatchDone { accepted: usize, total: usize },
}

impl Outcome {
    fn status(&self) -> u8 {
        match self {
            Outcome::Value(_) | Outcome::Accepted => 0,
            Outcome::BatchDone { accepted, total } if accepted == total => 0,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match load_config(cli.config.as_deref()) {
        Ok(cfg) => {
            init_tracing(cfg.log_level.as_deref());
            match run(&cli, &cfg) {
                Ok(outcome) => {
                    render(&outcome, cli.json);
                    ExitCode::from(outcome.status())
                }
                Err(e) => fail(&e),
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &anyhow::Error) -> ExitCode {
    eprintln!("{} {e:#}", style("error:").red().bold());
    ExitCode::from(2)
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<VerifierConfig> {
    match path {
        Some(p) => {
            VerifierConfig::load(p).with_context(|| format!("loading config {}", p.display()))
        }
        None => Ok(VerifierConfig::default()),
    }
}

fn run(cli: &Cli, cfg: &VerifierConfig) -> Result<Outcome> {
    match &cli.command {
        Commands::Add { a, b } => {
            let sum = big_add(&decode_hex(a)?, &decode_hex(b)?).context("add")?;
            Ok(Outcome::Value(encode_hex(&sum)))
        }
        Commands::Sub { a, b } => {
            let diff = big_sub(&decode_hex(a)?, &decode_hex(b)?).context("sub")?;
            Ok(Outcome::Value(encode_hex(&diff)))
        }
        Commands::HashPrime { g, y, check } => {
            let verifier = VdfVerifier::new(cfg)?;
            let g = BigUint::from_hex(g).context("parsing g")?;
            let y = BigUint::from_hex(y).context("parsing y")?;
            match check {
                Some(l) => {
                    let l = BigUint::from_hex(l).context("parsing l")?;
                    if verifier.check_hash_to_prime(&g, &y, &l) {
                        Ok(Outcome::Accepted)
                    } else {
                        Ok(Outcome::Rejected("challenge mismatch".into()))
                    }
                }
                None => Ok(Outcome::Value(verifier.derive_challenge(&g, &y)?.to_hex())),
            }
        }
        Commands::Verify { proof, g, y, pi, t, l } => {
            let verifier = VdfVerifier::new(cfg)?;
            let proof = match proof {
                Some(path) => read_proof_file(path)?,
                None => ProofFile {
                    g: g.clone().unwrap_or_default(),
                    y: y.clone().unwrap_or_default(),
                    pi: pi.clone().unwrap_or_default(),
                    t: t.unwrap_or_default(),
                    l: l.clone().unwrap_or_default(),
                }
                .to_proof()?,
            };
            let verdict = verifier.verify_detailed(&proof);
            info!(verdict = verdict.as_str(), "verification finished");
            if verdict.is_accepted() {
                Ok(Outcome::Accepted)
            } else {
                Ok(Outcome::Rejected(verdict.as_str().to_string()))
            }
        }
        Commands::Batch { file } => {
            let verifier = VdfVerifier::new(cfg)?;
            let proofs = read_batch_file(file)?;
            let verdicts = verify_batch_detailed(&verifier, &proofs);
            for (i, verdict) in verdicts.iter().enumerate() {
                info!(index = i, verdict = verdict.as_str(), "batch entry");
            }
            let accepted = verdicts.iter().filter(|v| v.is_accepted()).count();
            Ok(Outcome::BatchDone { accepted, total: verdicts.len() })
        }
    }
}

fn read_proof_file(path: &Path) -> Result<Proof> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: ProofFile = serde_json::from_str(&text).context("parsing proof JSON")?;
    Ok(file.to_proof()?)
}

fn read_batch_file(path: &Path) -> Result<Vec<Proof>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let files: Vec<ProofFile> = serde_json::from_str(&text).context("parsing batch JSON")?;
    files
        .iter()
        .enumerate()
        .map(|(i, f)| f.to_proof().with_context(|| format!("proof #{i}")))
        .collect()
}

fn render(outcome: &Outcome, as_json: bool) {
    if as_json {
        let value = match outcome {
            Outcome::Value(v) => json!({ "value": v }),
            Outcome::Accepted => json!({ "accepted": true }),
            Outcome::Rejected(reason) => json!({ "accepted": false, "reason": reason }),
            Outcome::BatchDone { accepted, total } => {
                json!({ "accepted": accepted, "total": total })
            }
        };
        println!("{value}");
        return;
    }
    match outcome {
        Outcome::Value(v) => println!("{v}"),
        Outcome::Accepted => println!("{}", style("accepted").green().bold()),
        Outcome::Rejected(reason) => println!("{} ({reason})", style("rejected").red().bold()),
        Outcome::BatchDone { accepted, total } => {
            let line = format!("{accepted}/{total} proofs accepted");
            if accepted == total {
                println!("{}", style(line).green());
            } else {
                println!("{}", style(line).yellow());
            }
        }
    }
}
