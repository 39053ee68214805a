//! End-to-end generation: load, sort, validate, render, write.
//!
//! The whole artifact is rendered in memory and written in one step, so a
//! failing run never leaves a partial output file behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::GenConfig;
use crate::emit::ScriptBuilder;
use crate::error::{Error, Result};
use crate::gen::{complete, dispatch, dump, help};
use crate::scanner::load_modules;
use crate::types::Module;

/// Names resolved ahead of any real module by the dispatcher.
pub const RESERVED_MODULES: [&str; 2] = ["help", "dump"];

/// Loads every module under the given roots and sorts them by name, which
/// fixes the artifact's layout regardless of filesystem iteration order.
pub fn collect_modules(roots: &[PathBuf], cfg: &GenConfig) -> Result<Vec<Module>> {
    let mut modules = Vec::new();
    for root in roots {
        modules.extend(load_modules(root, cfg)?);
    }
    modules.sort_by(|a, b| a.name.cmp(&b.name));
    validate(&modules)?;
    Ok(modules)
}

fn validate(modules: &[Module]) -> Result<()> {
    for pair in modules.windows(2) {
        if pair[0].name == pair[1].name {
            return Err(Error::DuplicateModuleName {
                module: pair[0].name.clone(),
            });
        }
    }
    for module in modules {
        if RESERVED_MODULES.contains(&module.name.as_str()) {
            return Err(Error::ReservedModuleName {
                module: module.name.clone(),
            });
        }
    }
    Ok(())
}

/// Renders the complete artifact: header, idempotency guard, dispatcher,
/// help, dump, and completion engine.
pub fn render(modules: &[Module], cfg: &GenConfig) -> Result<String> {
    let mut out = ScriptBuilder::new();
    out.line("# This file is generated by quickreg. Do not edit.");
    out.line(format!(
        "# Run quickreg against your {} sources to regenerate.",
        cfg.extension
    ));
    out.blank();
    // Re-sourcing is a no-op unless a reload is explicitly requested. The
    // guard is a load-time toggle for the consuming shell, not generator
    // state.
    out.line(format!(
        "if [[ -z \"${{{guard}}}\" || -n \"${{{reload}}}\" ]]; then",
        guard = cfg.guard_var,
        reload = cfg.reload_var
    ));
    out.line(format!("{}=1", cfg.guard_var));
    dispatch::emit_dispatch(&mut out, modules, cfg);
    out.blank();
    help::emit_help(&mut out, modules, cfg)?;
    dump::emit_dump(&mut out, modules, cfg);
    out.blank();
    complete::emit_complete(&mut out, modules, cfg);
    out.blank();
    out.line("fi");
    Ok(out.into_text())
}

/// Runs the full pipeline and writes the artifact. Returns the number of
/// modules that went into it.
pub fn generate(roots: &[PathBuf], output: &Path, cfg: &GenConfig) -> Result<usize> {
    let modules = collect_modules(roots, cfg)?;
    let text = render(&modules, cfg)?;
    fs::write(output, text).map_err(|source| Error::WriteFile {
        path: output.to_path_buf(),
        source,
    })?;
    info!(output = %output.display(), modules = modules.len(), "generated");
    Ok(modules.len())
}
