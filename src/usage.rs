//! Parser for the `Usage: ...` argument-grammar annotation.
//!
//! Grammar: `NAME TERM*` where `TERM := WORD | '[' TERM+ ']' | WORD '...'`.
//! A WORD is one or more of letters, digits, `_`, `-`, `|`; a `|` inside a
//! WORD separates the primary name from its aliases.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify;
use crate::error::{Error, GrammarViolation, Result};
use crate::types::Argument;

static LBRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[").unwrap());
static RBRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\]").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([A-Za-z0-9_|-]+)").unwrap());
static ELLIPSIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\.\.\.").unwrap());
static TRAILER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s.]*$").unwrap());

/// What the scan most recently consumed. Transitions that are illegal for a
/// given predecessor (a stray `...`, a nested `[`) are rejected with the
/// offset of the offending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Begin,
    Exe,
    Arg,
    LBracket,
    RBracket,
    Repeated,
}

/// Parses one usage annotation into the original string plus the finalized
/// argument list. The first WORD is the command name and never becomes an
/// argument.
pub fn parse_usage(usage: &str) -> Result<(String, Vec<Argument>)> {
    let mut args: Vec<Argument> = Vec::new();
    let mut rest = usage;
    let mut offset = 0usize;
    // While set, arguments parse as optional. Toggled by '[' and ']'.
    let mut optional = false;
    let mut prev = Prev::Begin;

    let fail = |offset: usize, reason: GrammarViolation| Error::Grammar {
        input: usage.to_string(),
        offset,
        reason,
    };

    while !rest.is_empty() {
        if let Some(m) = LBRACKET.find(rest) {
            if optional {
                return Err(fail(offset, GrammarViolation::UnexpectedLBracket));
            }
            optional = true;
            rest = &rest[m.end()..];
            offset += m.end();
            prev = Prev::LBracket;
        } else if let Some(m) = RBRACKET.find(rest) {
            if !optional {
                return Err(fail(offset, GrammarViolation::UnexpectedRBracket));
            }
            optional = false;
            rest = &rest[m.end()..];
            offset += m.end();
            prev = Prev::RBracket;
        } else if let Some(caps) = WORD.captures(rest) {
            let whole = caps.get(0).expect("regex match");
            let word = caps.get(1).expect("regex group");
            let name = word.as_str().to_string();
            rest = &rest[whole.end()..];
            offset += whole.end();
            if prev == Prev::Begin {
                prev = Prev::Exe;
                continue;
            }
            prev = Prev::Arg;
            args.push(Argument::raw(name, !optional));
        } else if let Some(m) = ELLIPSIS.find(rest) {
            if !matches!(prev, Prev::Arg | Prev::RBracket) || args.is_empty() {
                return Err(fail(offset, GrammarViolation::UnexpectedEllipsis));
            }
            // Only the most recently produced argument can become variadic.
            args.last_mut().expect("args checked non-empty").repeated = true;
            rest = &rest[m.end()..];
            offset += m.end();
            prev = Prev::Repeated;
        } else if TRAILER.is_match(rest) {
            break;
        } else {
            let c = rest.chars().next().expect("rest checked non-empty");
            return Err(fail(offset, GrammarViolation::UnexpectedCharacter(c)));
        }
    }

    if optional {
        return Err(fail(offset, GrammarViolation::UnterminatedBracket));
    }

    Ok((usage.to_string(), classify::finalize(args)))
}
