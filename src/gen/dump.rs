//! Emits the dump routine: echoes the literal source of a selected
//! function by delegating to the shell's own `type` builtin. Private
//! functions stay reachable here even though dispatch and help hide them.

use crate::config::GenConfig;
use crate::emit::ScriptBuilder;
use crate::types::Module;

pub fn emit_dump(out: &mut ScriptBuilder, modules: &[Module], cfg: &GenConfig) {
    let prefix = cfg.prefix();
    out.block(format!("function {prefix}_dump() {{"), "}", |out| {
        out.block("if [[ ! \"$#\" -eq 2 ]]; then", "fi", |out| {
            out.line(format!("echo \"Usage: {} dump MODULE FUNCTION\"", cfg.command));
            out.line("return 1");
        });
        out.block("case \"$1\" in", "esac", |out| {
            for module in modules {
                out.line(format!("{})", module.name));
                out.indent();
                out.block("case \"$2\" in", "esac", |out| {
                    for function in &module.functions {
                        out.line(format!("{})", function.local_name(&module.name)));
                        out.indent();
                        out.line(format!("type {}", function.name.value));
                        out.line(";;");
                        out.dedent();
                    }
                    out.line("*)");
                    out.indent();
                    out.line("echo \"Unknown function $2\"");
                    out.line("return 1");
                    out.line(";;");
                    out.dedent();
                });
                out.line(";;");
                out.dedent();
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
