use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::expectation::ExpectationParser;

/// One self-contained example: source text plus its expected transcript
///
/// Built by the registry at load time and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    id: String,
    source_text: String,
    expected_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

impl Snippet {
    /// Create a snippet, parsing its expectations with `parser`
    pub fn new(id: impl Into<String>, source_text: impl Into<String>, parser: &ExpectationParser) -> Self {
        let source_text = source_text.into();
        let expected_lines = parser.parse(&source_text);
        Self {
            id: id.into(),
            source_text,
            expected_lines,
            path: None,
        }
    }

    /// Record the file this snippet was loaded from
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn expected_lines(&self) -> &[String] {
        &self.expected_lines
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
