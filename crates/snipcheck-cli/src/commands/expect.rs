//! Expect command
//!
//! Usage: snipcheck expect <DIR> <ID>

use clap::Args;
use std::path::{Path, PathBuf};

use super::{load_registry, CommandResult, Outcome};

#[derive(Debug, Args)]
pub struct ExpectArgs {
    /// Snippet root directory
    pub dir: PathBuf,

    /// Snippet id, e.g. `01_basics/04_comparision`
    pub id: String,
}

/// Print the expected transcript of one snippet, one line per expectation
pub fn execute(args: ExpectArgs, config: Option<&Path>) -> CommandResult {
    let (_, registry) = load_registry(&args.dir, config)?;
    let snippet = registry.get(&args.id)?;

    for line in snippet.expected_lines() {
        println!("{}", line);
    }

    Ok(Outcome::Success)
}
