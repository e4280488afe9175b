//! snipcheck CLI
//!
//! Runs annotated example snippets and reports whether their output matches
//! the expectations written beside each print statement.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use snipcheck_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "snipcheck")]
#[command(about = "snipcheck - check example snippets against their annotated output", long_about = None)]
struct Cli {
    /// Configuration file (default: ./snipcheck.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List snippet ids under a directory
    List(commands::list::ListArgs),
    /// Print the expected output parsed from one snippet
    Expect(commands::expect::ExpectArgs),
    /// Run snippets and compare their output
    Run(commands::run::RunArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::List(args) => commands::list::execute(args, config),
        Commands::Expect(args) => commands::expect::execute(args, config),
        Commands::Run(args) => commands::run::execute(args, config),
    };

    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
