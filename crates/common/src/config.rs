// AstDoc - Solidity AST Documentation Extractor
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Configuration for the AstDoc command line
//!
//! Settings live in a TOML file looked up, in order, at an explicit path, `./astdoc.toml`
//! and `~/.astdoc.toml`. Missing keys take their defaults, so a file may set only what it
//! changes.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "astdoc.toml";
/// File name looked up in the home directory.
pub const USER_CONFIG_FILE: &str = ".astdoc.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the compiler artifacts are read from
    pub paths: PathsConfig,
    /// Where and how the document is written
    pub output: OutputConfig,
}

/// Locations of the compiler artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding both artifacts
    pub cache: PathBuf,
    /// Standard-JSON input file name inside `cache`
    pub input_file: String,
    /// Standard-JSON output file name inside `cache`
    pub output_file: String,
}

/// Document output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the document is written to, created if missing
    pub dir: PathBuf,
    /// File name of the document inside `dir`
    pub file: String,
    /// Indentation width of the written JSON
    pub indent: usize,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cache: PathBuf::from("cache"),
            input_file: "solc-input.json".to_string(),
            output_file: "solc-output.json".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("ast-docs"), file: "ast-docs.json".to_string(), indent: 4 }
    }
}

impl PathsConfig {
    /// Full path of the compiler input artifact
    pub fn input_path(&self) -> PathBuf {
        self.cache.join(&self.input_file)
    }

    /// Full path of the compiler output artifact
    pub fn output_path(&self) -> PathBuf {
        self.cache.join(&self.output_file)
    }
}

impl OutputConfig {
    /// Full path of the written document
    pub fn document_path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

impl Config {
    /// Get the per-user config file path (~/.astdoc.toml)
    pub fn user_config_path() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| eyre::eyre!("Unable to determine home directory"))?;
        Ok(home.join(USER_CONFIG_FILE))
    }

    /// Resolve which config file applies, if any
    ///
    /// An explicit path must exist. Otherwise the first existing file among `./astdoc.toml`
    /// and `~/.astdoc.toml` is used.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                eyre::bail!("Config file not found: {}", path.display());
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Ok(Some(local));
        }

        // No home directory is not an error here, there is just nothing to load.
        Ok(Self::user_config_path().ok().filter(|path| path.exists()))
    }

    /// Load configuration, falling back to defaults when no file applies
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit)? {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as TOML: {:?}", path))?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config to TOML")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        debug!("Saved configuration to {:?}", path);
        Ok(())
    }
}
