//! PrizeForge Build Tasks
//!
//! Usage:
//!   cargo xtask test            - Run all tests
//!   cargo xtask bench           - Run benchmarks
//!   cargo xtask docs            - Generate documentation
//!   cargo xtask check           - Clippy and format check
//!   cargo xtask release         - Release build of the CLI
//!   cargo xtask demo            - Run a preset estimate through the CLI

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "PrizeForge build tasks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all tests
    Test {
        /// Run only the pf-lab tests
        #[arg(long)]
        lab: bool,
    },
    /// Run benchmarks
    Bench {
        /// Only run benchmarks whose name contains this filter
        filter: Option<String>,
    },
    /// Generate documentation
    Docs {
        /// Open in browser
        #[arg(short, long)]
        open: bool,
    },
    /// Release build of the prizeforge binary
    Release {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Check code quality
    Check,
    /// Print a preset and list all presets through the CLI
    Demo {
        /// Preset id
        #[arg(default_value = "simple_banner")]
        preset: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_root = project_root()?;

    match cli.command {
        Commands::Test { lab } => run_tests(&project_root, lab),
        Commands::Bench { filter } => run_benchmarks(&project_root, filter),
        Commands::Docs { open } => generate_docs(&project_root, open),
        Commands::Release { target } => build_release(&project_root, target),
        Commands::Check => check_quality(&project_root),
        Commands::Demo { preset } => run_demo(&project_root, &preset),
    }
}

fn project_root() -> Result<PathBuf> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .context("CARGO_MANIFEST_DIR not set")?;

    Ok(Path::new(&manifest_dir)
        .parent()
        .context("Failed to get parent directory")?
        .to_path_buf())
}

/// Run cargo in the project root, failing with `failure` on a non-zero exit
fn cargo(root: &Path, args: &[&str], failure: &str) -> Result<()> {
    let status = Command::new("cargo")
        .current_dir(root)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if !status.success() {
        bail!("{}", failure);
    }
    Ok(())
}

fn run_tests(root: &Path, lab_only: bool) -> Result<()> {
    println!("🧪 Running tests...\n");

    let mut args = vec!["test"];
    if lab_only {
        args.extend(["--package", "pf-lab"]);
    } else {
        args.push("--workspace");
    }
    cargo(root, &args, "Tests failed")?;

    println!("\n✅ All tests passed!");
    Ok(())
}

fn run_benchmarks(root: &Path, filter: Option<String>) -> Result<()> {
    println!("⏱️  Running benchmarks...\n");

    let mut args = vec!["bench", "--package", "pf-bench"];
    if let Some(ref filter) = filter {
        args.extend(["--", filter.as_str()]);
    }
    cargo(root, &args, "Benchmarks failed")
}

fn generate_docs(root: &Path, open: bool) -> Result<()> {
    println!("📚 Generating documentation...\n");

    let mut args = vec!["doc", "--workspace", "--no-deps"];
    if open {
        args.push("--open");
    }
    cargo(root, &args, "Documentation generation failed")?;

    println!("\n✅ Documentation generated!");
    Ok(())
}

fn build_release(root: &Path, target: Option<String>) -> Result<()> {
    println!("🚀 Building release...\n");

    let mut args = vec!["build", "--release", "--package", "pf-cli"];
    if let Some(ref t) = target {
        args.extend(["--target", t.as_str()]);
    }
    cargo(root, &args, "Release build failed")?;

    println!("\n✅ Release build complete!");
    Ok(())
}

fn check_quality(root: &Path) -> Result<()> {
    println!("🔍 Checking code quality...\n");

    println!("Running clippy...");
    cargo(
        root,
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        "Clippy found issues",
    )?;

    println!("\nChecking formatting...");
    if cargo(root, &["fmt", "--all", "--check"], "Formatting issues found").is_err() {
        println!("⚠️  Formatting issues found. Run 'cargo fmt' to fix.");
    }

    println!("\n✅ Code quality check complete!");
    Ok(())
}

fn run_demo(root: &Path, preset: &str) -> Result<()> {
    println!("🎲 Preset '{}'\n", preset);

    let list = ["run", "--quiet", "--package", "pf-cli", "--", "--format", "text", "preset"];
    let mut show = list.to_vec();
    show.push(preset);
    cargo(root, &show, "Preset demo failed")?;

    println!("\n📋 Available presets\n");
    cargo(root, &list, "Preset listing failed")
}
