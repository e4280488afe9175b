use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SnipError
pub type Result<T> = std::result::Result<T, SnipError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log events, reports and
/// tests. Codes never change once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Registry
    Load,
    NotFound,

    // Capture
    ReentrantCapture,

    // Configuration/IO
    InvalidConfig,
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Load => "ERR_LOAD",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ReentrantCapture => "ERR_REENTRANT_CAPTURE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus optional context. Produced from
/// [`SnipError`] at logging and reporting boundaries.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    snippet_id: Option<String>,
    path: Option<PathBuf>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            snippet_id: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add snippet id context
    pub fn with_snippet_id(mut self, id: impl Into<String>) -> Self {
        self.snippet_id = Some(id.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn snippet_id(&self) -> Option<&str> {
        self.snippet_id.as_deref()
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(id) = &self.snippet_id {
            write!(f, " (snippet_id: {})", id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for snipcheck operations
#[derive(Error, Debug)]
pub enum SnipError {
    /// A snippet file (or the snippet root) could not be loaded, or two
    /// files resolve to the same id
    #[error("Failed to load snippet from {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// Requested snippet id is not registered
    #[error("Snippet not found: {snippet_id}")]
    NotFound { snippet_id: String },

    /// A capture was requested while another is active on this thread
    #[error("Output capture is already active; nested capture is not permitted")]
    ReentrantCapture,

    /// Configuration file or flags are invalid
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl SnipError {
    /// Get the canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            SnipError::Load { .. } => ExErrorKind::Load,
            SnipError::NotFound { .. } => ExErrorKind::NotFound,
            SnipError::ReentrantCapture => ExErrorKind::ReentrantCapture,
            SnipError::InvalidConfig { .. } => ExErrorKind::InvalidConfig,
            SnipError::Io(_) => ExErrorKind::Io,
            SnipError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }

    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SnipError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<&SnipError> for ExError {
    fn from(err: &SnipError) -> Self {
        let ex = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            SnipError::Load { path, .. } => ex.with_op("load_registry").with_path(path.clone()),
            SnipError::NotFound { snippet_id } => {
                ex.with_op("get_snippet").with_snippet_id(snippet_id.clone())
            }
            SnipError::ReentrantCapture => ex.with_op("with_capture"),
            SnipError::InvalidConfig { .. } => ex.with_op("load_config"),
            SnipError::Io(_) | SnipError::Serialization { .. } => ex,
        }
    }
}

impl From<SnipError> for ExError {
    fn from(err: SnipError) -> Self {
        ExError::from(&err)
    }
}

impl From<serde_json::Error> for SnipError {
    fn from(err: serde_json::Error) -> Self {
        SnipError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SnipError {
    fn from(err: toml::de::Error) -> Self {
        SnipError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
