//! # reportgen-cli
//!
//! Command-line tool for turning report definitions into BeanShell
//! expression evaluators.
//!
//! ## Commands
//!
//! - `rgen init` - Create a reportgen.toml
//! - `rgen list <definition>` - List the compilation units of a report
//! - `rgen generate <definition>` - Generate evaluator scripts
//! - `rgen expression <definition> --unit U --id N` - Preview one compiled expression
//!
//! See `rgen --help` for the full command reference.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use reportgen_generator::EvaluationPhase;
use std::io;
use std::process;

mod commands;
mod config;
mod logging;
mod ui;

#[derive(Parser)]
#[command(name = "rgen")]
#[command(about = "ReportGen CLI - Generate expression evaluators for report definitions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to reportgen.toml configuration file
    #[arg(short, long, global = true, default_value = "reportgen.toml")]
    config: String,

    /// Output as JSON (machine-readable format)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    verbose: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a reportgen.toml with default settings
    Init {
        /// Project name (defaults to the current directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List the compilation units of a report definition
    List {
        /// Path to the report definition JSON
        definition: String,
    },

    /// Generate evaluator scripts for a report definition
    Generate {
        /// Path to the report definition JSON
        definition: String,

        /// Only generate this unit (all units if not specified)
        #[arg(short, long)]
        unit: Option<String>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<String>,

        /// Print scripts to stdout instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Leave the generation time out of the banner
        #[arg(long)]
        no_timestamp: bool,
    },

    /// Print the compiled source of a single expression
    Expression {
        /// Path to the report definition JSON
        definition: String,

        /// Unit containing the expression
        #[arg(short, long)]
        unit: String,

        /// Expression id
        #[arg(long)]
        id: u32,

        /// Evaluation phase: current, old or estimated
        #[arg(short, long, default_value = "current")]
        phase: EvaluationPhase,
    },

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Validate the configuration file
    Validate,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "rgen", &mut io::stdout());
        return;
    }

    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init { name } => commands::config::init(&cli.config, name),
        Commands::List { definition } => commands::list::list(&definition, cli.json),
        Commands::Generate {
            definition,
            unit,
            output,
            stdout,
            no_timestamp,
        } => commands::generate::generate(
            &cli.config,
            &definition,
            commands::generate::GenerateOptions {
                unit,
                output,
                stdout,
                timestamp: !no_timestamp,
                json: cli.json,
            },
        ),
        Commands::Expression {
            definition,
            unit,
            id,
            phase,
        } => commands::expression::show(&definition, &unit, id, phase, cli.json),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Validate => commands::config::validate(&cli.config),
        },
    }
}
