use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;

use crate::config::GenConfig;
use crate::generate;

#[derive(Debug, Parser)]
#[command(
    name = "quickreg",
    version,
    about = "Generates a shell command registry from annotated bash functions"
)]
pub struct Cli {
    /// Root directories to scan for source files
    #[arg(required = true)]
    pub roots: Vec<PathBuf>,

    /// Where to write the generated registry script
    #[arg(short, long)]
    pub output: PathBuf,

    /// Shell command name the registry dispatches under
    #[arg(long, default_value = "q")]
    pub command: String,

    /// Optional TOML file overriding generator settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the parsed module list as JSON instead of generating
    #[arg(long)]
    pub dump_modules: bool,

    /// Enable verbose logging
    #[arg(short, long, env = "QUICKREG_VERBOSE")]
    pub verbose: bool,
}

impl Cli {
    fn gen_config(&self) -> Result<GenConfig> {
        let mut cfg = match &self.config {
            Some(path) => GenConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => GenConfig::default(),
        };
        if self.command != "q" {
            cfg = cfg.with_command(self.command.clone());
        }
        Ok(cfg)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let cfg = cli.gen_config()?;

    for root in &cli.roots {
        if !root.is_dir() {
            anyhow::bail!("search root {} is not a directory", root.display());
        }
    }

    if cli.dump_modules {
        let modules = generate::collect_modules(&cli.roots, &cfg)?;
        let json = serde_json::to_string_pretty(&modules)
            .context("failed to serialize modules to JSON")?;
        println!("{json}");
        return Ok(());
    }

    info!(roots = ?cli.roots, output = %cli.output.display(), "building registry");
    let count = generate::generate(&cli.roots, &cli.output, &cfg)?;
    eprintln!(
        "{} {} with {} modules",
        "Generated".green().bold(),
        cli.output.display(),
        count
    );
    Ok(())
}
