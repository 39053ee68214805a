use std::path::Path;

use serde::{Deserialize, Serialize};

/// Generator settings. Defaults match the `q` registry the tool was built
/// around; a TOML file can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Shell command the generated registry dispatches under.
    pub command: String,
    /// Extension of eligible source files.
    pub extension: String,
    /// File-name fragment marking machine-generated files to skip.
    pub skip_marker: String,
    /// Column where module descriptions start in the help index.
    pub help_column: usize,
    /// Artifact-level idempotency guard variable.
    pub guard_var: String,
    /// Setting this variable forces the artifact to re-load.
    pub reload_var: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            command: "q".to_string(),
            extension: "bash".to_string(),
            skip_marker: ".gen.".to_string(),
            help_column: 20,
            guard_var: "_QUICKREG_GENERATED".to_string(),
            reload_var: "_QUICKREG_RELOAD".to_string(),
        }
    }
}

impl GenConfig {
    /// Prefix for the artifact's internal helper functions.
    pub fn prefix(&self) -> String {
        format!("__{}", self.command)
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Loads overrides from a TOML file; unspecified keys keep defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_q_registry() {
        let cfg = GenConfig::default();
        assert_eq!(cfg.command, "q");
        assert_eq!(cfg.prefix(), "__q");
        assert_eq!(cfg.help_column, 20);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: GenConfig = toml::from_str("command = \"x\"").unwrap();
        assert_eq!(cfg.command, "x");
        assert_eq!(cfg.extension, "bash");
    }
}
