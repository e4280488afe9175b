//! Snippet registry
//!
//! Loads every snippet file under a root directory once and serves them by
//! id. Ids are the file path relative to the root, `/`-separated, without
//! the extension: `05_iterations/03_for_of`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core_types::schema::OP_LOAD_REGISTRY;
use crate::errors::{Result, SnipError};
use crate::expectation::{ExpectationParser, ExpectationSyntax};
use crate::snippet::Snippet;
use crate::{log_op_end, log_op_error, log_op_start};

/// What to load and how to read expectations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// File extensions (without the dot) that count as snippets
    pub extensions: Vec<String>,
    pub syntax: ExpectationSyntax,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string()],
            syntax: ExpectationSyntax::javascript(),
        }
    }
}

/// Immutable, id-ordered set of snippets
#[derive(Debug, Clone, Default)]
pub struct SnippetRegistry {
    root: Option<PathBuf>,
    snippets: BTreeMap<String, Snippet>,
}

impl SnippetRegistry {
    /// Load all snippet files under `root`
    ///
    /// Hidden entries (dot-prefixed) are skipped. Files are visited in sorted
    /// path order.
    ///
    /// # Errors
    ///
    /// Returns `Load` if `root` is not a directory, a file cannot be read as
    /// UTF-8 text, a path has no usable id, or two files map to the same id.
    pub fn load_dir(root: &Path, options: &RegistryOptions) -> Result<Self> {
        let started = Instant::now();
        log_op_start!(OP_LOAD_REGISTRY, path = %root.display());

        match Self::load_dir_inner(root, options) {
            Ok(registry) => {
                log_op_end!(
                    OP_LOAD_REGISTRY,
                    duration_ms = started.elapsed().as_millis() as u64,
                    snippet_count = registry.len()
                );
                Ok(registry)
            }
            Err(err) => {
                log_op_error!(
                    OP_LOAD_REGISTRY,
                    &err,
                    duration_ms = started.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn load_dir_inner(root: &Path, options: &RegistryOptions) -> Result<Self> {
        if !root.is_dir() {
            return Err(SnipError::load(root, "snippet root is not a directory"));
        }

        let mut files = Vec::new();
        collect_files(root, &options.extensions, &mut files)?;
        files.sort();

        let parser = ExpectationParser::new(options.syntax.clone());
        let mut snippets: BTreeMap<String, Snippet> = BTreeMap::new();

        for path in files {
            let id = snippet_id(root, &path)?;
            let source = fs::read_to_string(&path)
                .map_err(|e| SnipError::load(&path, format!("unreadable: {}", e)))?;

            if let Some(existing) = snippets.get(&id) {
                let first = existing
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                return Err(SnipError::load(
                    &path,
                    format!("duplicate snippet id '{}' (also defined by {})", id, first),
                ));
            }

            tracing::debug!(snippet_id = %id, path = %path.display(), "registered snippet");
            let snippet = Snippet::new(id.clone(), source, &parser).with_path(path);
            snippets.insert(id, snippet);
        }

        Ok(Self {
            root: Some(root.to_path_buf()),
            snippets,
        })
    }

    /// Build a registry from in-memory `(id, source)` pairs
    ///
    /// # Errors
    ///
    /// Returns `Load` for an empty or duplicate id.
    pub fn from_sources<I, K, S>(sources: I, syntax: &ExpectationSyntax) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        let parser = ExpectationParser::new(syntax.clone());
        let mut snippets = BTreeMap::new();

        for (id, source) in sources {
            let id = id.into();
            if id.is_empty() {
                return Err(SnipError::load("<memory>", "empty snippet id"));
            }
            if snippets.contains_key(&id) {
                return Err(SnipError::load(
                    "<memory>",
                    format!("duplicate snippet id '{}'", id),
                ));
            }
            snippets.insert(id.clone(), Snippet::new(id, source, &parser));
        }

        Ok(Self {
            root: None,
            snippets,
        })
    }

    /// Snippet ids in sorted order
    pub fn list(&self) -> Vec<&str> {
        self.snippets.keys().map(String::as_str).collect()
    }

    /// Look up a snippet by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no snippet has this id.
    pub fn get(&self, id: &str) -> Result<&Snippet> {
        self.snippets.get(id).ok_or_else(|| SnipError::NotFound {
            snippet_id: id.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snippet> {
        self.snippets.values()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Directory this registry was loaded from, if any
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

fn collect_files(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).map_err(|e| SnipError::load(dir, format!("unreadable directory: {}", e)))?;

    for entry in entries {
        let entry = entry.map_err(|e| SnipError::load(dir, e.to_string()))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| SnipError::load(&path, e.to_string()))?;

        if file_type.is_dir() {
            collect_files(&path, extensions, out)?;
        } else if path.is_file() && has_extension(&path, extensions) {
            out.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e == ext))
        .unwrap_or(false)
}

fn snippet_id(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| SnipError::load(path, "file is outside the snippet root"))?;
    let without_ext = relative.with_extension("");

    let mut parts = Vec::new();
    for component in without_ext.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| SnipError::load(path, "file name is not valid UTF-8"))?;
        parts.push(part);
    }

    if parts.last().map(|p| p.is_empty()).unwrap_or(true) {
        return Err(SnipError::load(path, "file name has no stem to use as id"));
    }
    Ok(parts.join("/"))
}
