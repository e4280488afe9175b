//! Expected-output annotations
//!
//! A snippet records its expected transcript as trailing comments on print
//! statements:
//!
//! ```text
//! console.log(2 >  1);     // true
//! console.log(null >= 0);  // true
//! ```
//!
//! The parser walks the source once, tracking string literals, regex
//! literals and block comments, and collects the trailing comment of every
//! print statement in source order. Annotations are raw text; nothing is
//! evaluated.
//!
//! A `/` starts a regex literal only at the start of a line or after one of
//! `( , = : [ ! & | ? { } ; +` (ignoring whitespace). A regex after a keyword
//! such as `return /x/` is read as division.

use serde::{Deserialize, Serialize};

/// Comment and print-call conventions of a snippet language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectationSyntax {
    /// Line comment marker, e.g. `//`
    pub line_comment: String,
    /// Block comment delimiters, e.g. `("/*", "*/")`
    pub block_comment: Option<(String, String)>,
    /// Substrings that make a line an execution statement
    pub print_markers: Vec<String>,
    /// When set, text after this separator inside an annotation is dropped
    pub note_separator: Option<String>,
    /// Treat `/.../` after an operator or opening bracket as a regex literal
    pub regex_literals: bool,
}

impl ExpectationSyntax {
    /// `//` and `/* */` comments, `console.log` statements
    pub fn javascript() -> Self {
        Self {
            line_comment: "//".to_string(),
            block_comment: Some(("/*".to_string(), "*/".to_string())),
            print_markers: vec!["console.log".to_string()],
            note_separator: None,
            regex_literals: true,
        }
    }

    /// `#` comments, `echo` statements
    pub fn shell() -> Self {
        Self {
            line_comment: "#".to_string(),
            block_comment: None,
            print_markers: vec!["echo".to_string()],
            note_separator: None,
            regex_literals: false,
        }
    }

    pub fn with_note_separator(mut self, separator: impl Into<String>) -> Self {
        self.note_separator = Some(separator.into());
        self
    }

    /// Check that the markers can actually match something
    pub fn validate(&self) -> Result<(), String> {
        if self.line_comment.is_empty() {
            return Err("line_comment must not be empty".to_string());
        }
        if self.print_markers.iter().any(|m| m.is_empty()) {
            return Err("print_markers must not contain empty markers".to_string());
        }
        if let Some((open, close)) = &self.block_comment {
            if open.is_empty() || close.is_empty() {
                return Err("block_comment delimiters must not be empty".to_string());
            }
        }
        if matches!(&self.note_separator, Some(sep) if sep.is_empty()) {
            return Err("note_separator must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExpectationSyntax {
    fn default() -> Self {
        Self::javascript()
    }
}

/// One expected output line and where it was authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// 1-based line of the statement that carries the annotation
    pub line: usize,
    pub text: String,
}

/// Extracts expected output lines from snippet source
#[derive(Debug, Clone, Default)]
pub struct ExpectationParser {
    syntax: ExpectationSyntax,
}

impl ExpectationParser {
    pub fn new(syntax: ExpectationSyntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &ExpectationSyntax {
        &self.syntax
    }

    /// Expected output lines in authored order
    pub fn parse(&self, source_text: &str) -> Vec<String> {
        self.parse_annotated(source_text)
            .into_iter()
            .map(|e| e.text)
            .collect()
    }

    /// Expected output lines with the statement line they belong to
    pub fn parse_annotated(&self, source_text: &str) -> Vec<Expectation> {
        let mut scanner = LineScanner::new(&self.syntax);
        let mut out = Vec::new();
        let mut open: Option<OpenStatement> = None;

        for (idx, line) in source_text.lines().enumerate() {
            let scanned = scanner.scan(line);
            let annotation = scanned
                .comment
                .as_deref()
                .and_then(|c| self.annotation_text(c));

            if open.is_none() {
                if !self.is_statement(&scanned.code) {
                    continue;
                }
                open = Some(OpenStatement {
                    line: idx + 1,
                    depth: 0,
                    parts: Vec::new(),
                });
            }
            let Some(stmt) = open.as_mut() else {
                continue;
            };

            stmt.depth += paren_delta(&scanned.code);
            if let Some(text) = annotation {
                stmt.parts.push(text);
            }
            if stmt.depth <= 0 {
                if let Some(done) = open.take() {
                    done.finish_into(&mut out);
                }
            }
        }

        // Unbalanced statement at end of input still keeps its annotations.
        if let Some(done) = open.take() {
            done.finish_into(&mut out);
        }
        out
    }

    fn is_statement(&self, code: &str) -> bool {
        self.syntax
            .print_markers
            .iter()
            .any(|marker| code.contains(marker.as_str()))
    }

    fn annotation_text(&self, comment: &str) -> Option<String> {
        let mut text = comment.trim();
        if let Some(sep) = self.syntax.note_separator.as_deref() {
            if let Some(pos) = text.find(sep) {
                text = text[..pos].trim_end();
            }
        }
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Parse with the default (JavaScript) syntax
pub fn parse(source_text: &str) -> Vec<String> {
    ExpectationParser::default().parse(source_text)
}

struct OpenStatement {
    line: usize,
    depth: i32,
    parts: Vec<String>,
}

impl OpenStatement {
    fn finish_into(self, out: &mut Vec<Expectation>) {
        if !self.parts.is_empty() {
            out.push(Expectation {
                line: self.line,
                text: self.parts.join(" "),
            });
        }
    }
}

fn paren_delta(code: &str) -> i32 {
    code.chars().fold(0, |acc, c| match c {
        '(' => acc + 1,
        ')' => acc - 1,
        _ => acc,
    })
}

/// Result of scanning one source line
struct ScannedLine {
    /// Code outside comments, with string literal contents blanked
    code: String,
    /// Text after the line comment marker
    comment: Option<String>,
}

/// Splits lines into code and trailing comment, carrying block comment and
/// template literal state across lines.
struct LineScanner<'s> {
    syntax: &'s ExpectationSyntax,
    in_block: bool,
    in_template: bool,
}

impl<'s> LineScanner<'s> {
    fn new(syntax: &'s ExpectationSyntax) -> Self {
        Self {
            syntax,
            in_block: false,
            in_template: false,
        }
    }

    fn scan(&mut self, line: &str) -> ScannedLine {
        let line_comment = self.syntax.line_comment.as_str();
        let block = self
            .syntax
            .block_comment
            .as_ref()
            .map(|(open, close)| (open.as_str(), close.as_str()));

        let mut code = String::with_capacity(line.len());
        let mut comment = None;
        let mut quote = self.in_template.then_some('`');
        let mut regex = RegexState::Outside;
        let mut escaped = false;
        let mut i = 0;

        while i < line.len() {
            let rest = &line[i..];
            let Some(c) = rest.chars().next() else {
                break;
            };

            if self.in_block {
                match block {
                    Some((_, close)) if rest.starts_with(close) => {
                        self.in_block = false;
                        i += close.len();
                    }
                    _ => i += c.len_utf8(),
                }
                continue;
            }

            if regex != RegexState::Outside {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '[' {
                    regex = RegexState::Class;
                } else if c == ']' && regex == RegexState::Class {
                    regex = RegexState::Body;
                } else if c == '/' && regex == RegexState::Body {
                    regex = RegexState::Outside;
                    code.push(c);
                    i += c.len_utf8();
                    continue;
                }
                code.push(' ');
                i += c.len_utf8();
                continue;
            }

            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                    code.push(c);
                    i += c.len_utf8();
                    continue;
                }
                code.push(' ');
                i += c.len_utf8();
                continue;
            }

            if !line_comment.is_empty() && rest.starts_with(line_comment) {
                comment = Some(rest[line_comment.len()..].to_string());
                break;
            }
            if let Some((open, _)) = block {
                if !open.is_empty() && rest.starts_with(open) {
                    self.in_block = true;
                    i += open.len();
                    continue;
                }
            }
            if c == '/' && self.syntax.regex_literals && regex_may_start(&code) {
                regex = RegexState::Body;
            } else if matches!(c, '"' | '\'' | '`') {
                quote = Some(c);
            }
            code.push(c);
            i += c.len_utf8();
        }

        // Only template literals may continue onto the next line.
        self.in_template = quote == Some('`');
        ScannedLine { code, comment }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegexState {
    Outside,
    Body,
    /// Inside `[...]`, where `/` does not close the literal
    Class,
}

fn regex_may_start(code_before: &str) -> bool {
    match code_before.trim_end().chars().last() {
        None => true,
        Some(prev) => "(,=:[!&|?{};+".contains(prev),
    }
}
