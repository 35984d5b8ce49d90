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

//! Builds the documentation model from the compiler artifacts on disk and writes it out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use astdoc_common::Config;
use astdoc_engine::{build_document_from_json, render_document, DocumentStats};
use eyre::{Result, WrapErr};
use tracing::{debug, info};

/// Where a document was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLocation {
    /// Directory holding the document
    pub path: PathBuf,
    /// File name inside `path`
    pub file: String,
}

impl DocLocation {
    /// Full path of the written file
    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.file)
    }
}

fn read_artifact(path: &Path) -> Result<String> {
    if !path.exists() {
        eyre::bail!("Compiler artifact not found: {}", path.display());
    }
    fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

/// Reads both artifacts, builds the document and writes it to the configured location.
pub fn build_docs(config: &Config) -> Result<(DocLocation, DocumentStats)> {
    let input_path = config.paths.input_path();
    let output_path = config.paths.output_path();
    debug!(input = %input_path.display(), output = %output_path.display(), "Reading artifacts");

    let input = read_artifact(&input_path)?;
    let output = read_artifact(&output_path)?;

    let document = build_document_from_json(&input, &output).wrap_err_with(|| {
        format!("Failed to process artifacts in {}", config.paths.cache.display())
    })?;
    let rendered =
        render_document(&document, config.output.indent).wrap_err("Failed to serialize document")?;

    let location =
        DocLocation { path: config.output.dir.clone(), file: config.output.file.clone() };
    fs::create_dir_all(&location.path)
        .wrap_err_with(|| format!("Failed to create {}", location.path.display()))?;
    let target = location.full_path();
    fs::write(&target, rendered).wrap_err_with(|| format!("Failed to write {}", target.display()))?;

    info!(path = %location.path.display(), file = %location.file, "Wrote documentation model");
    Ok((location, document.stats()))
}
