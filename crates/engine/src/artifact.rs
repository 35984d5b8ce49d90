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

//! The two compiler artifacts the pipeline reads: the standard-JSON input and output.

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{ast::SourceUnit, LineIndex};

/// Errors raised while loading compiler artifacts.
///
/// These are the only failures the pipeline surfaces; everything below the top-level shape
/// degrades to empty data.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact is not JSON of the expected shape
    #[error("malformed {artifact}: {source}")]
    Malformed {
        /// Which artifact failed to parse
        artifact: &'static str,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The artifact has no top-level `sources` object
    #[error("{artifact} has no `sources` object; was it produced by a compatible solc version?")]
    MissingSources {
        /// Which artifact is missing the field
        artifact: &'static str,
    },
}

/// Parses one artifact without a nesting limit.
///
/// The AST nodes are internally tagged, so serde buffers whole subtrees, including expression
/// chains no extractor reads. Machine-generated code nests those far beyond serde_json's
/// default depth of 128; the stack grows on the heap instead.
fn parse_artifact<T: DeserializeOwned>(
    json: &str,
    artifact: &'static str,
) -> Result<T, ArtifactError> {
    let malformed = |source: serde_json::Error| ArtifactError::Malformed { artifact, source };
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let parsed = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(malformed)?;
    deserializer.end().map_err(malformed)?;
    Ok(parsed)
}

/// A source entry of the compiler input.
///
/// Compilers before 0.5 take the text directly; later ones wrap it in an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceText {
    /// `"path": "contract A {}"`
    Legacy(String),
    /// `"path": { "content": "contract A {}" }`
    Content {
        /// The file text. Absent when the entry only lists `urls`.
        #[serde(default)]
        content: Option<String>,
    },
}

impl SourceText {
    /// The text of the file, if the entry carries it.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Legacy(text) => Some(text),
            Self::Content { content } => content.as_deref(),
        }
    }
}

/// The standard-JSON compiler input (`solc-input.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolcInput {
    /// Source entries keyed by path, in input order.
    #[serde(default)]
    pub sources: Option<IndexMap<String, SourceText>>,
}

impl SolcInput {
    /// Parses the input artifact, rejecting documents without `sources`.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let input: Self = parse_artifact(json, "solc input")?;
        input.validate()?;
        Ok(input)
    }

    /// Checks the top-level shape.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self.sources {
            Some(_) => Ok(()),
            None => Err(ArtifactError::MissingSources { artifact: "solc input" }),
        }
    }
}

/// One entry of the output's `sources` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSource {
    /// The source index used as `fileIndex` in `src` descriptors.
    pub id: Option<u32>,
    /// Absent unless the AST was requested in the output selection.
    pub ast: Option<SourceUnit>,
}

/// The standard-JSON compiler output (`solc-output.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolcOutput {
    /// Per-file output keyed by path.
    #[serde(default)]
    pub sources: Option<IndexMap<String, OutputSource>>,
}

impl SolcOutput {
    /// Parses the output artifact, rejecting documents without `sources`.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let output: Self = parse_artifact(json, "solc output")?;
        output.validate()?;
        Ok(output)
    }

    /// Checks the top-level shape.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self.sources {
            Some(_) => Ok(()),
            None => Err(ArtifactError::MissingSources { artifact: "solc output" }),
        }
    }
}

/// One source file with both sides of the compilation joined by path.
#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    /// The compiler's key for the file.
    pub path: &'a str,
    /// Newline index of the file text.
    pub lines: LineIndex,
    /// The file's AST, when the output carries one.
    pub ast: Option<&'a SourceUnit>,
}

/// All files of one compilation, in compiler-input order.
///
/// The input's `sources` keys decide which files exist. Files that only appear in the output
/// are skipped.
#[derive(Debug, Clone)]
pub struct SourceSet<'a> {
    files: IndexMap<&'a str, SourceFile<'a>>,
}

impl<'a> SourceSet<'a> {
    /// Joins the input and output artifacts by path.
    pub fn new(input: &'a SolcInput, output: &'a SolcOutput) -> Result<Self, ArtifactError> {
        let input_sources =
            input.sources.as_ref().ok_or(ArtifactError::MissingSources { artifact: "solc input" })?;
        let output_sources = output
            .sources
            .as_ref()
            .ok_or(ArtifactError::MissingSources { artifact: "solc output" })?;

        let mut files = IndexMap::with_capacity(input_sources.len());
        for (path, entry) in input_sources {
            let text = entry.text().unwrap_or_else(|| {
                warn!(path, "compiler input carries no text for source, lines resolve to 1");
                ""
            });
            let ast = output_sources.get(path).and_then(|source| source.ast.as_ref());
            if ast.is_none() {
                warn!(path, "compiler output has no AST for source");
            }
            files.insert(path.as_str(), SourceFile { path, lines: LineIndex::new(text), ast });
        }

        for path in output_sources.keys().filter(|path| !files.contains_key(path.as_str())) {
            debug!(path, "skipping source listed only in the compiler output");
        }

        Ok(Self { files })
    }

    /// Iterates the files in order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceFile<'a>> {
        self.files.values()
    }

    /// Looks up a file by path.
    pub fn get(&self, path: &str) -> Option<&SourceFile<'a>> {
        self.files.get(path)
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the compilation has no files at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_text_shapes() {
        let input: SolcInput = serde_json::from_value(json!({
            "language": "Solidity",
            "sources": {
                "legacy.sol": "contract A {}\n",
                "current.sol": { "content": "contract B {}\n" },
                "remote.sol": { "urls": ["bzz-raw://..."] }
            }
        }))
        .unwrap();
        let sources = input.sources.unwrap();
        assert_eq!(sources["legacy.sol"].text(), Some("contract A {}\n"));
        assert_eq!(sources["current.sol"].text(), Some("contract B {}\n"));
        assert_eq!(sources["remote.sol"].text(), None);
    }

    #[test]
    fn test_missing_sources_is_rejected() {
        let err = SolcInput::from_json(r#"{ "language": "Solidity" }"#).unwrap_err();
        assert!(matches!(err, ArtifactError::MissingSources { artifact: "solc input" }));

        let err = SolcOutput::from_json(r#"{ "contracts": {} }"#).unwrap_err();
        assert!(matches!(err, ArtifactError::MissingSources { artifact: "solc output" }));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = SolcOutput::from_json("not json").unwrap_err();
        assert!(matches!(err, ArtifactError::Malformed { artifact: "solc output", .. }));
        assert!(err.to_string().starts_with("malformed solc output"));
    }

    #[test]
    fn test_source_set_keeps_input_order_and_skips_output_only_files() {
        let input = SolcInput::from_json(
            r#"{ "sources": { "b.sol": { "content": "x" }, "a.sol": { "content": "y\nz" } } }"#,
        )
        .unwrap();
        let output = SolcOutput::from_json(
            r#"{ "sources": {
                "a.sol": { "id": 1, "ast": { "nodeType": "SourceUnit", "nodes": [] } },
                "c.sol": { "id": 2, "ast": { "nodeType": "SourceUnit", "nodes": [] } }
            } }"#,
        )
        .unwrap();

        let set = SourceSet::new(&input, &output).unwrap();
        let paths: Vec<_> = set.iter().map(|file| file.path).collect();
        assert_eq!(paths, ["b.sol", "a.sol"]);
        assert!(set.get("c.sol").is_none());
        assert!(set.get("b.sol").unwrap().ast.is_none());
        assert!(set.get("a.sol").unwrap().ast.is_some());
        assert_eq!(set.get("a.sol").unwrap().lines.line_at(2), 2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_deeply_nested_expression_is_accepted() {
        let mut expression = json!({ "nodeType": "Identifier", "name": "x" });
        for _ in 0..120 {
            expression = json!({
                "nodeType": "UnaryOperation",
                "operator": "-",
                "subExpression": expression,
            });
        }
        let function = json!({
            "nodeType": "FunctionDefinition",
            "name": "f",
            "kind": "function",
            "src": "18:15:0",
            "body": { "statements": [
                { "nodeType": "ExpressionStatement", "expression": expression },
            ] },
        });
        let output = json!({ "sources": { "a.sol": { "id": 0, "ast": {
            "nodeType": "SourceUnit",
            "nodes": [{
                "nodeType": "ContractDefinition",
                "name": "Deep",
                "contractKind": "contract",
                "nodes": [function],
            }],
        } } } });

        let output = SolcOutput::from_json(&output.to_string()).unwrap();
        let input = SolcInput::from_json(
            r#"{ "sources": { "a.sol": { "content": "contract Deep {\n  function f() {}\n}" } } }"#,
        )
        .unwrap();
        let document = crate::build_document(&input, &output).unwrap();
        let deep = &document.file("a.sol").unwrap().contracts["Deep"];
        assert_eq!(deep.functions.len(), 1);
        assert_eq!(deep.functions[0].name, "f");
        assert_eq!(deep.functions[0].line_number, 2);
    }

    #[test]
    fn test_trailing_characters_are_malformed() {
        let err = SolcInput::from_json(r#"{ "sources": {} } extra"#).unwrap_err();
        assert!(matches!(err, ArtifactError::Malformed { artifact: "solc input", .. }));
    }
}
