use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "interlock workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test suite once per back-end and feature combination
    Test {
        /// Also run the loom model tests (slow)
        #[arg(long, default_value_t = false)]
        loom: bool,
    },
}

/// Feature sets the suite runs under. `lock-fallback` forces the global-lock
/// back-end on hosts that have native atomics.
const FEATURE_SETS: &[&[&str]] = &[
    &[],
    &["tracing"],
    &["lock-fallback"],
    &["lock-fallback", "tracing"],
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test { loom } => {
            for features in FEATURE_SETS {
                run_tests(features)?;
            }
            if loom {
                run_loom()?;
            }
        }
    }

    Ok(())
}

fn run_tests(features: &[&str]) -> Result<()> {
    let label = if features.is_empty() {
        "default".to_string()
    } else {
        features.join(",")
    };
    println!("\n>>> cargo test ({label})");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.args(["test", "--package", "interlock"]);
    if !features.is_empty() {
        cmd.arg("--features").arg(features.join(","));
    }

    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn cargo test ({label})"))?;
    if !status.success() {
        anyhow::bail!("tests failed with features: {label}");
    }
    println!("<<< {label} passed in {:.2?}", start.elapsed());
    Ok(())
}

fn run_loom() -> Result<()> {
    println!("\n>>> loom model tests");
    // The global-lock back-end cannot be modelled, so loom runs never enable it.
    let status = Command::new("cargo")
        .env("RUSTFLAGS", "--cfg loom")
        .args(["test", "--package", "interlock", "--lib", "--release", "model"])
        .status()
        .context("failed to spawn cargo test under loom")?;
    if !status.success() {
        anyhow::bail!("loom model tests failed");
    }
    Ok(())
}
