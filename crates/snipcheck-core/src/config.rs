//! `snipcheck.toml` configuration
//!
//! Every field is optional; missing fields fall back to the JavaScript
//! defaults (`.js` files, `//` comments, `console.log`, `node` on stdin).
//!
//! ```toml
//! extensions = ["js", "mjs"]
//!
//! [syntax]
//! note_separator = "--"
//!
//! [interpreter]
//! program = "node"
//! args = ["--no-warnings"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnipError};
use crate::executor::{CommandExecutor, SourceInput};
use crate::expectation::ExpectationSyntax;
use crate::registry::RegistryOptions;

/// File name looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "snipcheck.toml";

/// External interpreter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterConfig {
    pub program: String,
    pub args: Vec<String>,
    pub input: SourceInput,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            program: "node".to_string(),
            args: Vec::new(),
            input: SourceInput::Stdin,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnipConfig {
    pub extensions: Vec<String>,
    pub syntax: ExpectationSyntax,
    pub interpreter: InterpreterConfig,
}

impl Default for SnipConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string()],
            syntax: ExpectationSyntax::javascript(),
            interpreter: InterpreterConfig::default(),
        }
    }
}

impl SnipConfig {
    /// Parse and validate a configuration document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for malformed TOML, unknown keys, or values
    /// that cannot work (empty markers, no extensions, empty program).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SnipConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SnipError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `explicit` if given, else `./snipcheck.toml` if it exists, else
    /// defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    tracing::debug!(path = %default_path.display(), "using config file");
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| SnipError::InvalidConfig { reason };

        if self.extensions.is_empty() {
            return Err(invalid("extensions must list at least one".to_string()));
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(invalid(format!(
                "extension '{}' must be non-empty and written without a dot",
                ext
            )));
        }
        if self.interpreter.program.trim().is_empty() {
            return Err(invalid("interpreter.program must not be empty".to_string()));
        }
        self.syntax.validate().map_err(invalid)
    }

    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            extensions: self.extensions.clone(),
            syntax: self.syntax.clone(),
        }
    }

    pub fn command_executor(&self) -> CommandExecutor {
        CommandExecutor::new(self.interpreter.program.clone())
            .with_args(self.interpreter.args.iter().cloned())
            .with_input(self.interpreter.input)
    }
}
