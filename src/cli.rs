use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::{DuplicatePolicy, Language, ResolverConfig};
use crate::engine::AmbiguityPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "scopebind")]
#[command(about = "Bind every variable and member reference to its declaration", long_about = None)]
pub struct Args {
    /// Syntax-tree document or directory of documents (*.json)
    #[arg(long, value_name = "PATH")]
    pub path: PathBuf,

    /// Resolver config file (json or yaml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Source language of the units; sets the qualified-name separator
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Abort a unit on the first duplicate declaration
    #[arg(long)]
    pub fail_on_duplicate: bool,

    /// What to bind when a lookup yields several declarations
    #[arg(long, value_name = "POLICY")]
    pub ambiguity: Option<AmbiguityPolicy>,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short = 'f', long, default_value = "json")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        validate_path(&self.path)?;
        if let Some(ref config_path) = self.config {
            if !config_path.exists() {
                anyhow::bail!("Config file does not exist: {}", config_path.display());
            }
        }
        Ok(())
    }

    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolver_config(&self) -> Result<ResolverConfig> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::load(path)
                .with_context(|| format!("Cannot load config: {}", path.display()))?,
            None => ResolverConfig::default(),
        };
        if let Some(language) = self.language {
            config.language = language;
        }
        if self.fail_on_duplicate {
            config.duplicate_policy = DuplicatePolicy::Fatal;
        }
        if let Some(ambiguity) = self.ambiguity {
            config.ambiguity_policy = ambiguity;
        }
        Ok(config)
    }
}

pub fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    } else if path.is_dir() {
        std::fs::metadata(path)
            .with_context(|| format!("Cannot read directory: {}", path.display()))?;
    } else {
        anyhow::bail!("Path is neither a file nor a directory: {}", path.display());
    }

    Ok(())
}
