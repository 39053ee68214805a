//! Emits the help renderer: a module index and a per-module function
//! index, colorized by a fixed palette keyed on argument type.

use crate::config::GenConfig;
use crate::emit::{escape_comment, ScriptBuilder};
use crate::error::{Error, Result};
use crate::types::{ArgumentType, Function, Module};

// Escape sequences are written for `echo -ne` inside single quotes.
pub(crate) const BOLD: &str = r"\033[1m";
pub(crate) const RESET: &str = r"\033[0m";
const ALIAS_ACCENT: &str = r"\033[36m"; // cyan

/// Accent for a typed placeholder, None for untyped arguments.
fn accent(arg_type: ArgumentType) -> Option<&'static str> {
    match arg_type {
        ArgumentType::File => Some(r"\033[91m"),      // bright red
        ArgumentType::Directory => Some(r"\033[31m"), // red
        ArgumentType::User => Some(r"\033[92m"),      // bright green
        ArgumentType::Group => Some(r"\033[32m"),     // green
        ArgumentType::Hostname => Some(r"\033[34m"),  // blue
        ArgumentType::Default | ArgumentType::Switch | ArgumentType::String => None,
    }
}

/// One fragment of a rendered usage line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UsagePiece {
    Text(String),
    Accent(&'static str),
}

/// Re-renders a function's argument list in usage-grammar shape, with
/// accent markers in front of typed placeholders. Only the uppercase
/// placeholder is highlighted on `--flag TYPE` arguments, never the flag
/// itself.
pub(crate) fn usage_pieces(function: &Function) -> Vec<UsagePiece> {
    let mut pieces = Vec::new();
    for arg in &function.args {
        if !arg.required {
            pieces.push(UsagePiece::Text("[".to_string()));
        }
        let color = accent(arg.arg_type);
        if arg.type_name.is_empty() {
            if let Some(code) = color {
                pieces.push(UsagePiece::Accent(code));
            }
        }
        let mut names = vec![arg.name.clone()];
        names.extend(arg.aliases.iter().cloned());
        pieces.push(UsagePiece::Text(names.join("|")));
        if !arg.type_name.is_empty() {
            if let Some(code) = color {
                pieces.push(UsagePiece::Accent(code));
            }
            pieces.push(UsagePiece::Text(arg.type_name.clone()));
        }
        if arg.repeated {
            pieces.push(UsagePiece::Text("...".to_string()));
        }
        if !arg.required {
            pieces.push(UsagePiece::Text("]".to_string()));
        }
    }
    pieces
}

pub fn emit_help(out: &mut ScriptBuilder, modules: &[Module], cfg: &GenConfig) -> Result<()> {
    let prefix = cfg.prefix();
    let command = &cfg.command;
    let column = cfg.help_column;

    out.line(format!("function {prefix}_help() {{"));
    out.indent();

    // Module index.
    out.line("if [ \"$#\" -eq 0 ]; then");
    out.indent();
    out.line(format!("echo \"{command} - shell function registry\""));
    out.line(format!(
        "echo \"Usage: {command} [-h|--help] MODULE FUNCTION [ARG...]\""
    ));
    out.line(format!(
        "echo \"Run {command} help MODULE for more information on a module.\""
    ));
    out.line("echo");
    out.line("echo \"Available modules:\"");
    for module in modules {
        if module.functions.is_empty() {
            continue;
        }
        let doc = if module.comment.is_empty() {
            vec!["(no description)".to_string()]
        } else {
            escape_comment(&module.comment)
        };
        let pad = column
            .checked_sub(module.name.len() + 2)
            .ok_or_else(|| Error::ModuleNameTooWide {
                module: module.name.clone(),
                budget: column,
            })?;
        out.line(format!("echo -ne '{BOLD}'"));
        out.line(format!("echo -n '  {}'", module.name));
        out.line(format!("echo -ne '{RESET}'"));
        out.line(format!("echo '{}{}'", " ".repeat(pad), doc[0]));
        for line in &doc[1..] {
            out.line(format!("echo '{}{}'", " ".repeat(column), line));
        }
    }
    out.line("return 0");
    out.dedent();
    out.line("fi");

    // Function index for one selected module.
    out.line("if [ \"$#\" -eq 1 ]; then");
    out.indent();
    out.line("case \"$1\" in");
    out.indent();
    for module in modules {
        emit_module_help(out, module, command);
    }
    out.line("*)");
    out.indent();
    out.line("echo \"Unknown module $1\"");
    out.line("return 1");
    out.line(";;");
    out.dedent();
    out.dedent();
    out.line("esac");
    out.dedent();
    out.line("fi");

    out.dedent();
    out.line("}");
    Ok(())
}

fn emit_module_help(out: &mut ScriptBuilder, module: &Module, command: &str) {
    out.line(format!("{})", module.name));
    out.indent();
    out.line(format!(
        "echo \"Usage: {command} {} FUNCTION [ARG...]\"",
        module.name
    ));
    for line in escape_comment(&module.comment) {
        out.line(format!("echo '{line}'"));
    }
    out.line("echo");
    out.line("echo \"Available functions:\"");
    for function in module.public_functions() {
        let local = function.local_name(&module.name);

        // Usage line: bold name, then each fragment with its accent; the
        // reset+bold pair after every fragment keeps names bold between
        // colored placeholders.
        out.line(format!("echo -ne '{BOLD}'"));
        out.line(format!("echo -n '  {local}'"));
        for piece in usage_pieces(function) {
            match piece {
                UsagePiece::Accent(code) => {
                    out.line(format!("echo -ne '{code}'"));
                }
                UsagePiece::Text(text) => {
                    out.line(format!("echo -n ' {text}'"));
                    out.line(format!("echo -ne '{RESET}'"));
                    out.line(format!("echo -ne '{BOLD}'"));
                }
            }
        }
        out.line("echo");
        out.line(format!("echo -ne '{RESET}'"));

        // Aliases.
        out.line(format!("echo -ne '{ALIAS_ACCENT}'"));
        for alias in module.aliases_for(&function.name.value) {
            out.line(format!(
                "echo \"    alias {alias}='{command} {} {local}'\"",
                module.name
            ));
        }
        out.line(format!("echo -ne '{RESET}'"));

        // Description.
        for line in escape_comment(&function.comment) {
            out.line(format!("echo '    {line}'"));
        }
    }
    out.line(";;");
    out.dedent();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_module;
    use crate::usage::parse_usage;
    use crate::types::Token;

    fn function_with_usage(usage: &str) -> Function {
        let (usage, args) = parse_usage(usage).unwrap();
        Function {
            name: Token::new("m_fn", 1, (0, 4)),
            package: "m".into(),
            comment: vec![],
            usage,
            args,
        }
    }

    fn piece_text(pieces: &[UsagePiece]) -> Vec<String> {
        pieces
            .iter()
            .filter_map(|p| match p {
                UsagePiece::Text(t) => Some(t.clone()),
                UsagePiece::Accent(_) => None,
            })
            .collect()
    }

    #[test]
    fn usage_pieces_round_trip_grammar_structure() {
        // Rendering the derived arguments reproduces the bracket and
        // ellipsis structure of the accepted grammar, in order.
        let func = function_with_usage("cmd [--count NUM] src... [dst]");
        assert_eq!(
            piece_text(&usage_pieces(&func)),
            vec!["[", "--count", "NUM", "]", "src", "...", "[", "dst", "]"]
        );
    }

    #[test]
    fn flag_itself_is_never_accented() {
        let func = function_with_usage("cmd --path PATH");
        let pieces = usage_pieces(&func);
        // Accent goes between the flag and its placeholder.
        assert_eq!(pieces[0], UsagePiece::Text("--path".to_string()));
        assert!(matches!(pieces[1], UsagePiece::Accent(_)));
        assert_eq!(pieces[2], UsagePiece::Text("PATH".to_string()));
    }

    #[test]
    fn untyped_positional_has_no_accent() {
        let func = function_with_usage("cmd name");
        let pieces = usage_pieces(&func);
        assert!(pieces.iter().all(|p| matches!(p, UsagePiece::Text(_))));
    }

    #[test]
    fn typed_positional_accented_directly() {
        let func = function_with_usage("cmd SRC_FILE");
        let pieces = usage_pieces(&func);
        assert!(matches!(pieces[0], UsagePiece::Accent(_)));
        assert_eq!(pieces[1], UsagePiece::Text("SRC_FILE".to_string()));
    }

    fn render(modules: &[Module]) -> String {
        let mut out = ScriptBuilder::new();
        emit_help(&mut out, modules, &GenConfig::default()).unwrap();
        out.into_text()
    }

    #[test]
    fn module_index_pads_to_column() {
        let module = parse_module(
            "# header\n\n# Module things.\n\nfiles_list() {\n}\n".lines(),
            "files",
        )
        .unwrap();
        let text = render(&[module]);
        // name "files" + 2 leading spaces leaves 13 pad columns before the
        // description at column 20.
        assert!(text.contains(&format!("echo '{}Module things.'", " ".repeat(13))));
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let module = parse_module("files_list() {\n}\n".lines(), "files").unwrap();
        let text = render(&[module]);
        assert!(text.contains("(no description)"));
    }

    #[test]
    fn over_wide_module_name_is_a_config_error() {
        let module =
            parse_module("x() {\n}\n".lines(), "a-module-name-beyond-the-budget").unwrap();
        let mut out = ScriptBuilder::new();
        let err = emit_help(&mut out, &[module], &GenConfig::default()).unwrap_err();
        assert!(matches!(err, Error::ModuleNameTooWide { .. }));
    }

    #[test]
    fn documentation_is_escaped_for_single_quotes() {
        let module = parse_module(
            "# Don't touch; uses $(pwd)\nfiles_list() {\n}\n".lines(),
            "files",
        )
        .unwrap();
        let text = render(&[module]);
        assert!(text.contains(r#"Don'"'"'t touch; uses $(pwd)"#));
    }

    #[test]
    fn private_functions_absent_from_help() {
        let module = parse_module("_files_hidden() {\n}\n".lines(), "files").unwrap();
        let text = render(&[module]);
        assert!(!text.contains("_files_hidden"));
    }

    #[test]
    fn aliases_render_in_alias_accent() {
        let module = parse_module(
            "alias ll=files_list\nfiles_list() {\n}\n".lines(),
            "files",
        )
        .unwrap();
        let text = render(&[module]);
        assert!(text.contains("alias ll='q files list'"));
        assert!(text.contains(ALIAS_ACCENT));
    }
}
