//! Run command
//!
//! Usage: snipcheck run <DIR> [IDS...] [--interpreter PROG] [--arg ARG]...
//!        [--format text|json] [--output FILE]

use clap::{Args, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use snipcheck_core::core_types::RunId;
use snipcheck_core::report::{render_json, render_text, BatchSummary};
use snipcheck_core::Runner;

use super::{load_registry, CommandResult, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Snippet root directory
    pub dir: PathBuf,

    /// Snippet ids to run (default: all, in id order)
    pub ids: Vec<String>,

    /// Interpreter program, overriding the configuration
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Extra interpreter argument (repeatable); replaces configured args
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute run command
pub fn execute(args: RunArgs, config: Option<&Path>) -> CommandResult {
    let (mut config, registry) = load_registry(&args.dir, config)?;

    if let Some(program) = args.interpreter {
        config.interpreter.program = program;
    }
    if !args.args.is_empty() {
        config.interpreter.args = args.args;
    }
    config.validate()?;

    let runner = Runner::new(&registry, config.command_executor());
    let run_id = RunId::new();
    let results = if args.ids.is_empty() {
        runner.run_batch(&run_id, registry.list())?
    } else {
        runner.run_batch(&run_id, &args.ids)?
    };

    let report = match args.format {
        ReportFormat::Text => render_text(&results),
        ReportFormat::Json => render_json(&run_id, &results)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, report)?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", report),
    }

    if BatchSummary::from_results(&results).all_passed() {
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::Failures)
    }
}
