//! End-to-end tests through the public API: scan a temp tree of bash
//! sources, generate the artifact, and check its observable behavior.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use quickreg::{collect_modules, generate, render, GenConfig};

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

const FILES_BASH: &str = "\
#!/usr/bin/env bash

# files - helpers for moving files around.

# Lists interesting files.
# Usage: files_list [--all] [--path PATH] target...
files_list() {
  true
}

# Internal bookkeeping.
_files_bookkeep() {
  true
}

alias fl=files_list
";

const NET_BASH: &str = "\
#!/usr/bin/env bash

# net - network helpers.

# Serves files over the network.
# Usage: net_files_serve --host HOST DIR
net_files_serve() {
  true
}
";

fn roots(dir: &TempDir) -> Vec<PathBuf> {
    vec![dir.path().to_path_buf()]
}

#[test]
fn generation_reports_module_count_and_writes_artifact() {
    let dir = TempDir::new().unwrap();
    write(&dir, "files.bash", FILES_BASH);
    write(&dir, "net.bash", NET_BASH);
    let output = dir.path().join("quick.gen.bash");

    let count = generate(&roots(&dir), &output, &GenConfig::default()).unwrap();
    assert_eq!(count, 2);
    assert!(output.exists());
}

#[test]
fn regeneration_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    write(&dir, "files.bash", FILES_BASH);
    write(&dir, "net.bash", NET_BASH);
    let output = dir.path().join("quick.gen.bash");

    generate(&roots(&dir), &output, &GenConfig::default()).unwrap();
    let first = fs::read(&output).unwrap();
    generate(&roots(&dir), &output, &GenConfig::default()).unwrap();
    let second = fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn modules_sort_by_name_regardless_of_discovery_order() {
    let dir = TempDir::new().unwrap();
    write(&dir, "zeta.bash", "zeta_fn() {\n}\n");
    write(&dir, "alpha.bash", "alpha_fn() {\n}\n");

    let modules = collect_modules(&roots(&dir), &GenConfig::default()).unwrap();
    let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[test]
fn artifact_routes_short_names_within_their_module_only() {
    let dir = TempDir::new().unwrap();
    write(&dir, "files.bash", FILES_BASH);
    write(&dir, "net.bash", NET_BASH);

    let modules = collect_modules(&roots(&dir), &GenConfig::default()).unwrap();
    let text = render(&modules, &GenConfig::default()).unwrap();

    // files list -> files_list; the declared alias routes too.
    assert!(text.contains("files_list|list|fl)"));
    // serve is only reachable through the net arm; the files arm falls
    // through to a diagnostic naming the module.
    assert!(text.contains("net_files_serve|files_serve)"));
    assert!(text.contains("echo \"Module files has no function $1\""));
}

#[test]
fn artifact_hides_private_functions_except_from_dump() {
    let dir = TempDir::new().unwrap();
    write(&dir, "files.bash", FILES_BASH);

    let modules = collect_modules(&roots(&dir), &GenConfig::default()).unwrap();
    let text = render(&modules, &GenConfig::default()).unwrap();

    assert!(!text.contains("_files_bookkeep \"$@\""));
    assert!(text.contains("type _files_bookkeep"));
}

#[test]
fn artifact_completion_tables_carry_types() {
    let dir = TempDir::new().unwrap();
    write(&dir, "files.bash", FILES_BASH);

    let modules = collect_modules(&roots(&dir), &GenConfig::default()).unwrap();
    let text = render(&modules, &GenConfig::default()).unwrap();

    assert!(text.contains("__q_complete_func \"--all\" \"--path\" \"--path:FILE\" \"STRING\""));
}

#[test]
fn generated_files_are_not_reingested() {
    let dir = TempDir::new().unwrap();
    write(&dir, "files.bash", FILES_BASH);
    write(&dir, "quick.gen.bash", "leftover_fn() {\n}\n");

    let modules = collect_modules(&roots(&dir), &GenConfig::default()).unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].name, "files");
}

#[test]
fn bad_grammar_aborts_without_writing_output() {
    let dir = TempDir::new().unwrap();
    write(&dir, "files.bash", FILES_BASH);
    write(&dir, "bad.bash", "# Usage: bad_fn [a b\nbad_fn() {\n}\n");
    let output = dir.path().join("quick.gen.bash");

    let err = generate(&roots(&dir), &output, &GenConfig::default()).unwrap_err();
    assert!(err.to_string().contains("bad.bash"));
    assert!(!output.exists());
}

#[test]
fn reserved_module_name_aborts_generation() {
    let dir = TempDir::new().unwrap();
    write(&dir, "dump.bash", "dump_fn() {\n}\n");
    let output = dir.path().join("quick.gen.bash");

    let err = generate(&roots(&dir), &output, &GenConfig::default()).unwrap_err();
    assert!(err.to_string().contains("reserved"));
    assert!(!output.exists());
}

#[test]
fn multiple_roots_merge_into_one_registry() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write(&first, "files.bash", FILES_BASH);
    write(&second, "net.bash", NET_BASH);

    let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
    let modules = collect_modules(&roots, &GenConfig::default()).unwrap();
    assert_eq!(modules.len(), 2);
}

#[test]
fn custom_command_renames_artifact_surface() {
    let dir = TempDir::new().unwrap();
    write(&dir, "files.bash", FILES_BASH);

    let cfg = GenConfig::default().with_command("r");
    let modules = collect_modules(&roots(&dir), &cfg).unwrap();
    let text = render(&modules, &cfg).unwrap();

    assert!(text.contains("function __r() {"));
    assert!(text.contains("complete -F __r_compgen r"));
}
