use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A recognized identifier with its source text and (line, column) span.
///
/// Spans are byte columns on a single line, kept for introspection and
/// diagnostics; nothing downstream mutates a token once it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub start: SourcePos,
    pub end: SourcePos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(value: impl Into<String>, line: usize, span: (usize, usize)) -> Self {
        Self {
            value: value.into(),
            start: SourcePos {
                line,
                column: span.0,
            },
            end: SourcePos {
                line,
                column: span.1,
            },
        }
    }
}

/// Semantic category of one declared argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgumentType {
    Default,
    Switch,
    File,
    Directory,
    String,
    User,
    Group,
    Hostname,
}

impl ArgumentType {
    /// Uppercase spelling used in the generated completion tables.
    pub fn label(self) -> &'static str {
        match self {
            ArgumentType::Default => "DEFAULT",
            ArgumentType::Switch => "SWITCH",
            ArgumentType::File => "FILE",
            ArgumentType::Directory => "DIRECTORY",
            ArgumentType::String => "STRING",
            ArgumentType::User => "USER",
            ArgumentType::Group => "GROUP",
            ArgumentType::Hostname => "HOSTNAME",
        }
    }
}

/// One argument from a usage grammar.
///
/// The grammar parser produces these as raw shells (name + required flag
/// only); the classifier fills in the type, type name, position, and
/// aliases. After classification the value is treated as immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub arg_type: ArgumentType,
    /// Literal placeholder word from the grammar (e.g. "PATH" in
    /// `--path PATH`). Empty for switches and untyped positionals.
    pub type_name: String,
    pub default: String,
    pub required: bool,
    pub repeated: bool,
    /// 1-based index among positional arguments only; None for switches
    /// and keyword arguments.
    pub position: Option<usize>,
    pub aliases: Vec<String>,
}

impl Argument {
    /// A raw, untyped argument as produced by the grammar parser.
    pub fn raw(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            arg_type: ArgumentType::Default,
            type_name: String::new(),
            default: String::new(),
            required,
            repeated: false,
            position: None,
            aliases: Vec::new(),
        }
    }

    /// True for `--flag`-shaped names (switches and keyword arguments).
    pub fn is_dashed(&self) -> bool {
        self.name.starts_with('-')
    }
}

/// One documented, dispatchable unit within a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: Token,
    /// Owning module identifier.
    pub package: String,
    /// Documentation lines with the usage annotation stripped out.
    pub comment: Vec<String>,
    /// Original grammar string as written in the source.
    pub usage: String,
    pub args: Vec<Argument>,
}

impl Function {
    /// Underscore-prefixed functions are private: kept in the module but
    /// excluded from dispatch, help, and completion.
    pub fn is_private(&self) -> bool {
        self.name.value.starts_with('_')
    }

    /// The module-local short name: the full name with the `<module>_`
    /// prefix stripped, provided the remainder is non-empty.
    pub fn local_name<'a>(&'a self, module: &str) -> &'a str {
        local_name(&self.name.value, module)
    }
}

pub fn local_name<'a>(func: &'a str, module: &str) -> &'a str {
    match func.strip_prefix(module).and_then(|s| s.strip_prefix('_')) {
        Some(rest) if !rest.is_empty() => rest,
        _ => func,
    }
}

/// The function registry derived from one source file, namespaced by the
/// file's path relative to its scan root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    /// Declaration order.
    pub functions: Vec<Function>,
    /// Function full name -> alias names, in discovery order. The key is
    /// the verbatim right-hand side of `alias NAME=VALUE`; a multi-word
    /// value never matches a function and is simply never looked up.
    pub func_to_alias: HashMap<String, Vec<String>>,
    /// Module-level description lines.
    pub comment: Vec<String>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Public functions in declaration order.
    pub fn public_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(|f| !f.is_private())
    }

    /// Declared alias names for a function, if any.
    pub fn aliases_for(&self, func: &str) -> &[String] {
        self.func_to_alias
            .get(func)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
