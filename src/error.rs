use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything here is fatal: generation is deterministic, so the remedy is
/// always to fix the offending annotation and re-run. No error is retried
/// and no partial artifact is ever written.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed usage annotation. Carries the full input string and the
    /// byte offset of the offending character.
    #[error("{reason} at offset {offset}: {input}")]
    Grammar {
        input: String,
        offset: usize,
        reason: GrammarViolation,
    },

    /// A module name wider than the help column budget cannot be laid out.
    #[error("module name {module} is too long for the help output (budget {budget} columns)")]
    ModuleNameTooWide { module: String, budget: usize },

    /// `help` and `dump` are routed ahead of real modules; a module using
    /// either name would be unreachable.
    #[error("module name {module} collides with the reserved {module} command")]
    ReservedModuleName { module: String },

    /// Two source files mapped to the same module namespace.
    #[error("duplicate module name {module}")]
    DuplicateModuleName { module: String },

    #[error("cannot read {}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Adds the source file to any error raised while parsing it.
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarViolation {
    UnexpectedLBracket,
    UnexpectedRBracket,
    UnexpectedEllipsis,
    UnterminatedBracket,
    UnexpectedCharacter(char),
}

impl std::fmt::Display for GrammarViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarViolation::UnexpectedLBracket => write!(f, "unexpected '['"),
            GrammarViolation::UnexpectedRBracket => write!(f, "unexpected ']'"),
            GrammarViolation::UnexpectedEllipsis => write!(f, "unexpected '...'"),
            GrammarViolation::UnterminatedBracket => write!(f, "unterminated '['"),
            GrammarViolation::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
        }
    }
}

impl Error {
    /// Wraps an error with the path of the file being parsed.
    pub fn in_file(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::InFile {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
