//! Emits the command router.
//!
//! Routing: the first word selects a module, with `help` and `dump`
//! reserved ahead of any real module; the second selects a function by its
//! full name, any declared alias, or its module-local short name; the rest
//! is forwarded untouched. Unknown selectors print a diagnostic and return
//! non-zero inside the artifact, which is a runtime condition, never a
//! generation failure.

use crate::config::GenConfig;
use crate::emit::ScriptBuilder;
use crate::types::{Function, Module};

/// All names the router accepts for one function, in match order: full
/// name, short name, declared aliases.
pub(crate) fn routing_names(module: &Module, function: &Function) -> Vec<String> {
    let full = function.name.value.clone();
    let mut names = vec![full.clone()];
    let local = function.local_name(&module.name);
    if local != full {
        names.push(local.to_string());
    }
    for alias in module.aliases_for(&full) {
        if !names.iter().any(|n| n == alias) {
            names.push(alias.clone());
        }
    }
    names
}

pub fn emit_dispatch(out: &mut ScriptBuilder, modules: &[Module], cfg: &GenConfig) {
    let prefix = cfg.prefix();
    out.block(format!("function {prefix}() {{"), "}", |out| {
        out.block("if [ \"$#\" -eq 0 ]; then", "fi", |out| {
            out.line(format!("{prefix}_help"));
            out.line("return 0");
        });
        out.block("case \"$1\" in", "esac", |out| {
            out.line("help|-h|--help|?)");
            out.indent();
            out.line("shift");
            out.line(format!("{prefix}_help \"$@\""));
            out.line(";;");
            out.dedent();
            out.line("dump)");
            out.indent();
            out.line("shift");
            out.line(format!("{prefix}_dump \"$@\""));
            out.line(";;");
            out.dedent();
            for module in modules {
                emit_module_arm(out, module, &prefix);
            }
            out.line("*)");
            out.indent();
            out.line("echo \"Unknown module $1\"");
            out.line("return 1");
            out.line(";;");
            out.dedent();
        });
    });
}

fn emit_module_arm(out: &mut ScriptBuilder, module: &Module, prefix: &str) {
    out.line(format!("{})", module.name));
    out.indent();
    out.line("shift");
    out.block("case \"$1\" in", "esac", |out| {
        out.line("help|-h|--help|?)");
        out.indent();
        out.line("shift");
        out.line(format!("{prefix}_help \"{}\" \"$@\"", module.name));
        out.line(";;");
        out.dedent();
        for function in module.public_functions() {
            out.line(format!("{})", routing_names(module, function).join("|")));
            out.indent();
            out.line("shift");
            out.line(format!("{} \"$@\"", function.name.value));
            out.line(";;");
            out.dedent();
        }
        out.line("*)");
        out.indent();
        out.block("if [ -n \"$1\" ]; then", "fi", |out| {
            out.line(format!(
                "echo \"Module {} has no function $1\"",
                module.name
            ));
        });
        out.line(format!("{prefix}_help {}", module.name));
        out.line("return 1");
        out.line(";;");
        out.dedent();
    });
    out.line(";;");
    out.dedent();
}
