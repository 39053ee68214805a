//! Walks scan roots and parses every eligible source file into a module.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::config::GenConfig;
use crate::error::{Error, Result};
use crate::parser::parse_module;
use crate::types::Module;

/// Derives the module namespace from a file's path relative to its scan
/// root: prefix and extension stripped, separators normalized to `/`.
pub fn path_to_package(path: &Path, root: &Path, extension: &str) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let name = relative.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/");
    let suffix = format!(".{extension}");
    name.strip_suffix(&suffix).unwrap_or(&name).to_string()
}

fn is_eligible(path: &Path, cfg: &GenConfig) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // Never re-ingest generated output.
    file_name.ends_with(&format!(".{}", cfg.extension)) && !file_name.contains(&cfg.skip_marker)
}

/// Loads every eligible file under one root, each scanned to completion
/// before the next begins. An unreadable file is an error, not a skip:
/// silently dropping it could hide real commands from the artifact.
pub fn load_modules(root: &Path, cfg: &GenConfig) -> Result<Vec<Module>> {
    let mut modules = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            match e.into_io_error() {
                Some(source) => Error::ReadFile { path, source },
                None => Error::ReadFile {
                    path,
                    source: std::io::Error::new(std::io::ErrorKind::Other, "walk failed"),
                },
            }
        })?;
        if !entry.file_type().is_file() || !is_eligible(entry.path(), cfg) {
            continue;
        }
        modules.push(load_file(entry.path(), root, cfg)?);
    }
    Ok(modules)
}

fn load_file(path: &Path, root: &Path, cfg: &GenConfig) -> Result<Module> {
    info!(path = %path.display(), "loading");
    let content = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let package = path_to_package(path, root, &cfg.extension);
    parse_module(content.lines(), &package)
        .map_err(|source| Error::in_file(PathBuf::from(path), source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_only_matching_extension() {
        let dir = TempDir::new().unwrap();
        write(&dir, "files.bash", "files_list() {\n}\n");
        write(&dir, "notes.txt", "not a module\n");
        let modules = load_modules(dir.path(), &GenConfig::default()).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "files");
    }

    #[test]
    fn skips_generated_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "quick.gen.bash", "q() {\n}\n");
        write(&dir, "real.bash", "real_fn() {\n}\n");
        let modules = load_modules(dir.path(), &GenConfig::default()).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "real");
    }

    #[test]
    fn nested_files_namespace_by_relative_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, "net/ssh.bash", "ssh_connect() {\n}\n");
        let modules = load_modules(dir.path(), &GenConfig::default()).unwrap();
        assert_eq!(modules[0].name, "net/ssh");
    }

    #[test]
    fn parse_error_carries_file_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.bash", "# Usage: broken [a b\nbroken() {\n}\n");
        let err = load_modules(dir.path(), &GenConfig::default()).unwrap_err();
        assert!(err.to_string().contains("bad.bash"));
    }

    #[test]
    fn package_name_strips_extension_and_root() {
        let name = path_to_package(
            Path::new("/src/tools/git.bash"),
            Path::new("/src"),
            "bash",
        );
        assert_eq!(name, "tools/git");
    }
}
