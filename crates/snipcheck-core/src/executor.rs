//! Snippet executors
//!
//! An [`Executor`] runs a snippet body and prints through
//! [`capture::emit`](crate::capture::emit). The runner wraps every call in a
//! capture, so executors never touch the capture buffer directly.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};

use crate::capture::emit;
use crate::snippet::Snippet;

/// Error raised by a snippet body
pub type BodyError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of executing a snippet body
pub type BodyResult = std::result::Result<(), BodyError>;

/// Executes snippet bodies
pub trait Executor {
    /// Run `snippet` once. Output goes through `capture::emit`; an `Err`
    /// means the body raised.
    fn execute(&self, snippet: &Snippet) -> BodyResult;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, snippet: &Snippet) -> BodyResult {
        (**self).execute(snippet)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&self, snippet: &Snippet) -> BodyResult {
        (**self).execute(snippet)
    }
}

type Body = Box<dyn Fn() -> BodyResult>;

/// Executes Rust closures registered per snippet id
///
/// A snippet without a registered body runs as an empty body.
#[derive(Default)]
pub struct InlineExecutor {
    bodies: HashMap<String, Body>,
}

impl InlineExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body for snippet `id`, replacing any previous one
    pub fn with_body<F>(mut self, id: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> BodyResult + 'static,
    {
        self.bodies.insert(id.into(), Box::new(body));
        self
    }
}

impl std::fmt::Debug for InlineExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.bodies.keys().collect();
        ids.sort();
        f.debug_struct("InlineExecutor").field("bodies", &ids).finish()
    }
}

impl Executor for InlineExecutor {
    fn execute(&self, snippet: &Snippet) -> BodyResult {
        match self.bodies.get(snippet.id()) {
            Some(body) => body(),
            None => Ok(()),
        }
    }
}

/// How the interpreter receives the snippet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceInput {
    /// Source text is written to the interpreter's stdin
    #[default]
    Stdin,
    /// The snippet's file path is appended to the arguments
    PathArgument,
}

/// Executes snippets with an external interpreter such as `node`
///
/// Each stdout line of the child is emitted in order. A spawn failure or a
/// non-zero exit status is a body error carrying the child's stderr.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    program: String,
    args: Vec<String>,
    input: SourceInput,
}

impl CommandExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            input: SourceInput::Stdin,
        }
    }

    /// `node`, reading the snippet from stdin
    pub fn node() -> Self {
        Self::new("node")
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_input(mut self, input: SourceInput) -> Self {
        self.input = input;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, snippet: &Snippet) -> std::result::Result<Command, BodyError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        match self.input {
            SourceInput::Stdin => {
                cmd.stdin(Stdio::piped());
            }
            SourceInput::PathArgument => {
                let path = snippet.path().ok_or_else(|| {
                    format!("snippet '{}' has no file to pass to {}", snippet.id(), self.program)
                })?;
                cmd.arg(path).stdin(Stdio::null());
            }
        }

        Ok(cmd)
    }
}

impl Executor for CommandExecutor {
    fn execute(&self, snippet: &Snippet) -> BodyResult {
        let mut child = self
            .command(snippet)?
            .spawn()
            .map_err(|e| format!("failed to start '{}': {}", self.program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            let source = snippet.source_text().to_string();
            // Fed from a thread so a chatty child cannot deadlock on a full pipe.
            thread::spawn(move || {
                let _ = stdin.write_all(source.as_bytes());
            });
        }

        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        // Raw lines: output that is not UTF-8 is still output.
        let mut read_error = None;
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).split(b'\n') {
                match line {
                    Ok(bytes) => emit(String::from_utf8_lossy(&bytes)),
                    Err(e) => {
                        read_error = Some(e);
                        break;
                    }
                }
            }
        }

        // Always reap the child, even when reading its output failed.
        let status = child.wait()?;
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if let Some(e) = read_error {
            return Err(format!("failed to read output of '{}': {}", self.program, e).into());
        }
        if status.success() {
            return Ok(());
        }

        let detail = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
            .trim()
            .to_string();
        Err(format!("{} exited with {}: {}", self.program, status, detail).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::with_capture;
    use crate::expectation::ExpectationParser;

    fn snippet(id: &str, source: &str) -> Snippet {
        Snippet::new(id, source, &ExpectationParser::default())
    }

    #[test]
    fn test_inline_body_emits_through_sink() {
        let executor = InlineExecutor::new().with_body("two", || {
            emit("a");
            emit("b");
            Ok(())
        });
        let captured = with_capture(|| executor.execute(&snippet("two", ""))).unwrap();
        assert!(captured.value.is_ok());
        assert_eq!(captured.lines, vec!["a", "b"]);
    }

    #[test]
    fn test_inline_unknown_id_is_empty_body() {
        let executor = InlineExecutor::new();
        let captured = with_capture(|| executor.execute(&snippet("none", ""))).unwrap();
        assert!(captured.value.is_ok());
        assert!(captured.lines.is_empty());
    }

    #[test]
    fn test_inline_body_error() {
        let executor = InlineExecutor::new().with_body("boom", || Err("TypeError: boom".into()));
        let err = executor.execute(&snippet("boom", "")).unwrap_err();
        assert_eq!(err.to_string(), "TypeError: boom");
    }

    #[test]
    fn test_path_argument_requires_file() {
        let executor = CommandExecutor::node().with_input(SourceInput::PathArgument);
        let err = executor.execute(&snippet("mem", "")).unwrap_err();
        assert!(err.to_string().contains("has no file"));
    }

    #[test]
    fn test_missing_program_is_body_error() {
        let executor = CommandExecutor::new("snipcheck-no-such-interpreter-xyz");
        let err = executor.execute(&snippet("a", "")).unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_child_output_is_emitted_in_order() {
        let executor = CommandExecutor::new("sh");
        let captured =
            with_capture(|| executor.execute(&snippet("sh", "echo one\necho two\n"))).unwrap();
        assert!(captured.value.is_ok());
        assert_eq!(captured.lines, vec!["one", "two"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_non_utf8_output_is_kept_lossily() {
        let executor = CommandExecutor::new("sh");
        let source = "echo ok\nprintf 'caf\\351\\n'\necho after\n";
        let captured = with_capture(|| executor.execute(&snippet("sh", source))).unwrap();
        assert!(captured.value.is_ok());
        assert_eq!(captured.lines, vec!["ok", "caf\u{FFFD}", "after"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_non_zero_exit_carries_stderr() {
        let executor = CommandExecutor::new("sh");
        let source = "echo partial\necho 'bad thing' >&2\nexit 3\n";
        let captured = with_capture(|| executor.execute(&snippet("sh", source))).unwrap();
        let err = captured.value.unwrap_err();
        assert!(err.to_string().contains("bad thing"));
        assert_eq!(captured.lines, vec!["partial"]);
    }
}
