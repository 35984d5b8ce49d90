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

//! End-to-end assembly of a [`Document`] from the two compiler artifacts.

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    aggregate, ast::ContractKind, ArtifactError, ContractCollection, Document, KindDocument,
    SolcInput, SolcOutput, SourceSet,
};

/// Collects, extracts and groups every declaration of one kind.
pub fn extract_kind(sources: &SourceSet<'_>, kind: ContractKind) -> KindDocument {
    let contracts = ContractCollection::collect(sources, kind);
    let kind_doc = KindDocument::build(&contracts, aggregate(&contracts));
    debug!(%kind, documented = kind_doc.len(), collected = contracts.len(), "extracted kind");
    kind_doc
}

/// Builds the documentation model of one compilation.
///
/// Fails only when either artifact lacks its `sources` map; all per-file gaps degrade to
/// empty entries.
pub fn build_document(input: &SolcInput, output: &SolcOutput) -> Result<Document, ArtifactError> {
    let sources = SourceSet::new(input, output)?;

    let document = ContractKind::ALL
        .into_iter()
        .map(|kind| extract_kind(&sources, kind))
        .fold(Document::skeleton(&sources), Document::with_kind)
        .with_imports(&sources);

    let stats = document.stats();
    info!(
        files = stats.files,
        contracts = stats.contracts,
        interfaces = stats.interfaces,
        libraries = stats.libraries,
        "built documentation model"
    );
    Ok(document)
}

/// Parses both artifacts from JSON text and builds the model.
pub fn build_document_from_json(input: &str, output: &str) -> Result<Document, ArtifactError> {
    let input = SolcInput::from_json(input)?;
    let output = SolcOutput::from_json(output)?;
    build_document(&input, &output)
}

/// Pretty-prints `document` as JSON indented by `indent` spaces.
pub fn render_document(document: &Document, indent: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::collector::tests::{artifacts, contract};

    #[test]
    fn test_build_is_deterministic() {
        let (input, output) = artifacts(&[
            (
                "b.sol",
                json!([contract("B", "interface", json!([
                    { "nodeType": "FunctionDefinition", "name": "f", "kind": "function" },
                ]))]),
            ),
            (
                "a.sol",
                json!([contract("A", "contract", json!([
                    { "nodeType": "EventDefinition", "name": "E" },
                ]))]),
            ),
        ]);
        let first = build_document(&input, &output).unwrap();
        let second = build_document(&input, &output).unwrap();
        assert_eq!(first, second);
        assert_eq!(render_document(&first, 4).unwrap(), render_document(&second, 4).unwrap());
        // input order, not lexical order
        assert_eq!(first.0.keys().collect::<Vec<_>>(), ["b.sol", "a.sol"]);
    }

    #[test]
    fn test_missing_sources_is_fatal() {
        let err = build_document_from_json(r#"{"language": "Solidity"}"#, r#"{"sources": {}}"#)
            .unwrap_err();
        assert!(matches!(err, ArtifactError::MissingSources { .. }));

        let err = build_document_from_json("not json", r#"{"sources": {}}"#).unwrap_err();
        assert!(matches!(err, ArtifactError::Malformed { .. }));
    }

    #[test]
    fn test_render_uses_requested_indent() {
        let (input, output) = artifacts(&[("a.sol", json!([]))]);
        let document = build_document(&input, &output).unwrap();

        let rendered = render_document(&document, 4).unwrap();
        assert!(rendered.starts_with("{\n    \"a.sol\": {\n        \"imports\": []"));

        let two = render_document(&document, 2).unwrap();
        assert!(two.contains("\n  \"a.sol\""));
        let reparsed: Value = serde_json::from_str(&two).unwrap();
        assert_eq!(reparsed, serde_json::to_value(&document).unwrap());
    }
}
