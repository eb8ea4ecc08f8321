//! PrizeForge command line
//!
//! Usage:
//!   prizeforge category --name A --share 1.0 --count 4
//!   prizeforge table specs.json
//!   prizeforge validate table.json
//!   prizeforge select domains.json --repetitions 10
//!   prizeforge chance request.json
//!   prizeforge until request.json
//!   prizeforge preset simple_banner
//!
//! Inputs are JSON files; `-` reads standard input.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use commands::Session;

#[derive(Parser)]
#[command(name = "prizeforge", version, about = "Weighted prize selection and success estimation")]
struct Cli {
    /// Seed for reproducible runs (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Lab configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one prize category spec
    Category {
        /// Category name
        #[arg(long)]
        name: String,
        /// Probability share of the category (0..=1)
        #[arg(long)]
        share: f64,
        /// Number of prizes, named automatically
        #[arg(long, conflicts_with = "names", required_unless_present = "names")]
        count: Option<u32>,
        /// Comma separated prize names
        #[arg(long, value_delimiter = ',')]
        names: Option<Vec<String>>,
    },
    /// Build a probability table from category specs
    Table {
        /// Category specs JSON (`-` for stdin)
        input: String,
    },
    /// Check that a probability table is well formed
    Validate {
        /// Probability table JSON (`-` for stdin)
        input: String,
    },
    /// Run selection operations over selection domains
    Select {
        /// Selection domains JSON (`-` for stdin)
        input: String,
        /// Number of selection operations to add up
        #[arg(short, long, default_value_t = 1)]
        repetitions: u32,
    },
    /// Estimate the chance of meeting success criteria
    Chance {
        /// Success request JSON (`-` for stdin)
        input: String,
    },
    /// Estimate how many selections it takes to meet success criteria
    Until {
        /// Success request JSON (`-` for stdin)
        input: String,
    },
    /// Print a built-in preset's selection domains, or list presets
    Preset {
        /// Preset id; omit to list all presets
        id: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let session = Session::open(cli.config.as_deref(), cli.seed, cli.format)?;

    let output = match cli.command {
        Commands::Category {
            name,
            share,
            count,
            names,
        } => session.category(&name, share, count, names),
        Commands::Table { input } => session.table(&input),
        Commands::Validate { input } => session.validate(&input),
        Commands::Select { input, repetitions } => session.select(&input, repetitions),
        Commands::Chance { input } => session.chance(&input),
        Commands::Until { input } => session.until(&input),
        Commands::Preset { id } => session.preset(id.as_deref()),
    }?;

    println!("{}", output);
    Ok(())
}
