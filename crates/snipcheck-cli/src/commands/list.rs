//! List command
//!
//! Usage: snipcheck list <DIR>

use clap::Args;
use std::path::{Path, PathBuf};

use super::{load_registry, CommandResult, Outcome};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Snippet root directory
    pub dir: PathBuf,

    /// Also print the number of expected lines per snippet
    #[arg(long)]
    pub counts: bool,
}

/// Execute list command
pub fn execute(args: ListArgs, config: Option<&Path>) -> CommandResult {
    let (_, registry) = load_registry(&args.dir, config)?;

    for snippet in registry.iter() {
        if args.counts {
            println!("{}\t{}", snippet.id(), snippet.expected_lines().len());
        } else {
            println!("{}", snippet.id());
        }
    }

    Ok(Outcome::Success)
}
