//! Line-oriented scanner for one bash source file.
//!
//! Recognizes the two function declaration syntaxes bash supports, alias
//! declarations, and comment blocks, and assembles them into a [`Module`].
//! Nothing here executes or validates shell syntax beyond these patterns.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::types::{Argument, Function, Module, Token};
use crate::usage::parse_usage;

// Type A: fname () compound-command [ redirections ]
// Type B: function fname [()] compound-command [ redirections ]
static FNAME_TYPE_A: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([\w-]+)\s*\(\)\s").unwrap());
static FNAME_TYPE_B: Lazy<Regex> = Lazy::new(|| Regex::new(r"^function\s+([\w-]+)[\s(]").unwrap());
static USAGE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Usage: (.+)").unwrap());

/// Returns the declared function name and its byte-column span, if the line
/// opens a function.
fn accept_fname(line: &str) -> Option<(&str, (usize, usize))> {
    FNAME_TYPE_A
        .captures(line)
        .or_else(|| FNAME_TYPE_B.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| (m.as_str(), (m.start(), m.end())))
}

/// Recognizes `alias NAME=VALUE`, both sides trimmed. The VALUE is kept
/// verbatim; no attempt is made to parse it as an invocation.
fn accept_alias(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("alias ")?;
    let (name, value) = rest.split_once('=')?;
    Some((name.trim(), value.trim()))
}

/// Strips the comment marker and surrounding whitespace, if the line is a
/// comment.
fn accept_comment(line: &str) -> Option<&str> {
    line.strip_prefix('#').map(str::trim)
}

/// Extracts the usage annotation out of a function's raw documentation.
///
/// Returns the usage string, the parsed arguments, and the documentation
/// with the usage line removed and blank edges trimmed. Without an
/// annotation the function gets the permissive default `[ARG...]` and no
/// declared arguments.
fn parse_func_comment(comment: Vec<String>) -> Result<(String, Vec<Argument>, Vec<String>)> {
    let mut usage = String::from("[ARG...]");
    let mut args = Vec::new();
    let mut filtered: Vec<String> = Vec::new();

    for line in comment {
        if let Some(caps) = USAGE_LINE.captures(&line) {
            let grammar = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let (parsed_usage, parsed_args) = parse_usage(grammar)?;
            usage = parsed_usage;
            args = parsed_args;
        } else {
            filtered.push(line);
        }
    }

    while filtered.last().is_some_and(|l| l.is_empty()) {
        filtered.pop();
    }
    while filtered.first().is_some_and(|l| l.is_empty()) {
        filtered.remove(0);
    }
    Ok((usage, args, filtered))
}

/// Parses the ordered lines of one source file into a [`Module`].
///
/// Single forward pass. A comment block ending on the line directly above a
/// function declaration becomes that function's documentation. The second
/// completed comment block in the file becomes the module comment, unless a
/// function claims it first.
pub fn parse_module<'a>(lines: impl IntoIterator<Item = &'a str>, package: &str) -> Result<Module> {
    let mut module = Module::new(package);
    let mut comment_block: Vec<String> = Vec::new();
    let mut last_comment_line: Option<usize> = None;
    // Counts completed blocks; a block completes when anything other than a
    // contiguous comment line follows it.
    let mut comment_no = 0usize;

    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        if let Some((fname, span)) = accept_fname(line) {
            // Functions are emitted right away, taking the comment block
            // ending on the previous line as their documentation.
            let comment = if last_comment_line == Some(line_no - 1) {
                std::mem::take(&mut comment_block)
            } else {
                Vec::new()
            };
            let (usage, args, comment) = parse_func_comment(comment)?;
            module.functions.push(Function {
                name: Token::new(fname, line_no, span),
                package: package.to_string(),
                comment,
                usage,
                args,
            });
            comment_block.clear();
            comment_no += 1;
        } else if let Some((name, value)) = accept_alias(line) {
            comment_block.clear();
            comment_no += 1;
            module
                .func_to_alias
                .entry(value.to_string())
                .or_default()
                .push(name.to_string());
        } else if let Some(text) = accept_comment(line) {
            if last_comment_line == Some(line_no - 1) {
                comment_block.push(text.to_string());
            } else {
                comment_block = vec![text.to_string()];
                comment_no += 1;
            }
            last_comment_line = Some(line_no);
        } else if comment_no == 2 && !comment_block.is_empty() {
            module.comment = std::mem::take(&mut comment_block);
        }
    }

    Ok(module)
}
