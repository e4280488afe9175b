//! Subcommand implementations

pub mod expect;
pub mod list;
pub mod run;

use std::path::Path;
use std::process::ExitCode;

use snipcheck_core::{SnipConfig, SnippetRegistry};

pub type CommandResult = Result<Outcome, Box<dyn std::error::Error>>;

/// How a successfully executed command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// At least one snippet failed its check
    Failures,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failures => ExitCode::from(1),
        }
    }
}

/// Load the configuration, then the registry rooted at `dir`
pub fn load_registry(
    dir: &Path,
    config_path: Option<&Path>,
) -> Result<(SnipConfig, SnippetRegistry), Box<dyn std::error::Error>> {
    let config = SnipConfig::discover(config_path)?;
    let registry = SnippetRegistry::load_dir(dir, &config.registry_options())?;
    Ok((config, registry))
}
