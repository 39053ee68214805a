//! Line-buffer builder and shell quoting for the generated artifact.

use once_cell::sync::Lazy;
use regex::Regex;

const INDENT_WIDTH: usize = 2;

/// Accumulates generated script text line by line with explicit indentation
/// tracking, so emitters never hand-count literal whitespace.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    buf: String,
    depth: usize,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth * INDENT_WIDTH {
                self.buf.push(' ');
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    /// Appends an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        debug_assert!(self.depth > 0, "dedent below zero");
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Emits an indented block: `open`, the body one level deeper, `close`.
    pub fn block(
        &mut self,
        open: impl AsRef<str>,
        close: impl AsRef<str>,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(open);
        self.indent();
        body(self);
        self.dedent();
        self.line(close)
    }

    pub fn into_text(self) -> String {
        self.buf
    }
}

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w@%+=:,./-]").unwrap());

/// POSIX single-quote escaping. Strings made only of safe characters pass
/// through untouched; everything else is wrapped in single quotes with
/// embedded quotes rendered as `'"'"'`.
pub fn quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if !UNSAFE_CHARS.is_match(s) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}

/// Escapes one documentation line for embedding inside a single-quoted
/// string literal the emitter already provides. The outer quotes that
/// [`quote`] adds are stripped; the escaped interior cannot break out of
/// the surrounding literal.
pub fn escape_line(s: &str) -> String {
    let quoted = quote(s);
    if quoted.len() >= 2 && quoted.starts_with('\'') && quoted.ends_with('\'') {
        quoted[1..quoted.len() - 1].to_string()
    } else {
        quoted
    }
}

/// Escapes a whole documentation block.
pub fn escape_comment(lines: &[String]) -> Vec<String> {
    lines.iter().map(|l| escape_line(l)).collect()
}
