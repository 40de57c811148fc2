//! # Simulate Subcommand
//!
//! Runs a script file through the local sandbox exactly as the hosted
//! environment would gate it: the expected digest rides in argument
//! position 0, the source text travels in the designated secret field,
//! and the report is printed section by section.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use ofs_core::{ScriptDigest, ScriptSource, Secrets, SRC_KEY};
use ofs_sandbox::{CannedTransport, SandboxLimits, SimulationRequest, Simulator};

use crate::scripts;

/// Arguments for the `ofs simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Path to the script source to simulate.
    #[arg(long)]
    pub script: PathBuf,

    /// Expected digest commitment (`0x` + 64 hex chars). When omitted the
    /// digest is computed from the file itself and printed, which
    /// verifies the dispatch path but not an external commitment.
    #[arg(long)]
    pub expect: Option<String>,

    /// YAML file overriding the default sandbox limits.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Script argument (repeatable); appended after the digest argument.
    #[arg(long = "arg")]
    pub args: Vec<String>,
}

/// Execute the simulate subcommand.
pub fn run_simulate(args: &SimulateArgs) -> Result<u8> {
    let source = ScriptSource::read_from(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;

    let expected: ScriptDigest = match &args.expect {
        Some(hex) => hex.parse().context("bad --expect digest")?,
        None => {
            let digest = ScriptDigest::of_source(&source);
            println!("Pinning to locally computed digest: {digest}");
            digest
        }
    };

    let limits = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_yaml::from_str::<SandboxLimits>(&text).context("bad sandbox config")?
        }
        None => SandboxLimits::default(),
    };

    let mut secrets = Secrets::from_env_prefix("OFS_SECRET_");
    secrets.insert(SRC_KEY, source.as_str());

    let mut script_args = vec![expected.to_string()];
    script_args.extend(args.args.iter().cloned());

    let transport = CannedTransport::new(&limits)
        .with_default_responses()
        .with_response("eth_getBalance", serde_json::json!("0x2386f26fc10000"));
    let simulator = Simulator::new(Arc::new(scripts::default_engine()), Arc::new(transport));

    println!("Simulating script: {}", args.script.display());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let report = runtime.block_on(simulator.simulate(SimulationRequest {
        source,
        expected_digest: expected,
        args: script_args,
        secrets,
        limits,
    }));

    if let Some(error) = &report.error_string {
        println!("CAPTURED ERROR:");
        println!("{error}");
    }
    if !report.captured_terminal_output.is_empty() {
        println!("CAPTURED TERMINAL OUTPUT:");
        println!("{}", report.captured_terminal_output);
    }
    if let Some(hex) = &report.response_bytes_hex {
        println!("RESPONSE BYTES HEXSTRING:");
        println!("{hex}");
    }

    Ok(if report.error_string.is_some() { 1 } else { 0 })
}
