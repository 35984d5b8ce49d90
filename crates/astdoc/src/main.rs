//! AstDoc - Solidity AST Documentation Extractor
//!
//! Reads the standard-JSON input and output of a solc run and writes a per-file
//! documentation model as JSON.

use std::path::PathBuf;

use astdoc_common::{logging, Config};
use clap::Parser;
use eyre::Result;

mod cmd;

/// Command-line interface for AstDoc
#[derive(Debug, Parser)]
#[command(name = "astdoc")]
#[command(about = "AstDoc - Extracts a documentation model from Solidity compiler artifacts")]
#[command(version)]
pub struct Cli {
    /// Directory holding solc-input.json and solc-output.json
    #[arg(long, env = "ASTDOC_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Directory the document is written to
    #[arg(long, env = "ASTDOC_DIR")]
    pub ast_doc_dir: Option<PathBuf>,

    /// File name of the written document
    #[arg(long)]
    pub output_name: Option<String>,

    /// Config file (default: ./astdoc.toml, then ~/.astdoc.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only log to the console
    #[arg(long)]
    pub no_file_log: bool,
}

impl Cli {
    /// Loads the configuration and applies the command-line overrides.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(cache_dir) = &self.cache_dir {
            config.paths.cache = cache_dir.clone();
        }
        if let Some(dir) = &self.ast_doc_dir {
            config.output.dir = dir.clone();
        }
        if let Some(name) = &self.output_name {
            config.output.file = name.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    logging::init_logging("astdoc", !cli.no_file_log)?;

    let config = cli.resolve_config()?;
    tracing::debug!(?config, "Resolved configuration");

    let (location, stats) = cmd::build_docs(&config)?;
    tracing::info!(
        files = stats.files,
        contracts = stats.contracts,
        interfaces = stats.interfaces,
        libraries = stats.libraries,
        "Documentation written to {}",
        location.full_path().display()
    );

    Ok(())
}
