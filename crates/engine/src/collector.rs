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

//! Contract collection: finds the contract-like declarations of one kind across all files.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{
    ast::{ContractDefinition, ContractKind},
    extract::Extract,
    LineIndex, SourceSet,
};

/// A contract-like declaration found at the top level of a file.
#[derive(Debug, Clone, Copy)]
pub struct CollectedContract<'a> {
    /// Path of the declaring file.
    pub file: &'a str,
    /// The declared name.
    pub name: &'a str,
    /// The full definition node.
    pub definition: &'a ContractDefinition,
    /// Newline index of the declaring file.
    pub lines: &'a LineIndex,
}

impl<'a> CollectedContract<'a> {
    /// The members of this contract selected by extractor `D`, in declaration order.
    pub fn members<D: Extract + 'a>(&self) -> impl Iterator<Item = &'a D> + 'a {
        self.definition.nodes.iter().filter_map(D::select)
    }
}

/// All contract-like declarations of one kind, in file order then declaration order.
///
/// Within a file a name is unique per kind: when two declarations share one, the later
/// definition replaces the earlier one in place.
#[derive(Debug, Clone)]
pub struct ContractCollection<'a> {
    kind: ContractKind,
    contracts: IndexMap<(&'a str, &'a str), CollectedContract<'a>>,
}

impl<'a> ContractCollection<'a> {
    /// Scans the top-level nodes of every file for contract definitions of `kind`.
    pub fn collect(sources: &'a SourceSet<'a>, kind: ContractKind) -> Self {
        let mut contracts = IndexMap::new();
        for file in sources.iter() {
            let Some(ast) = file.ast else { continue };
            for definition in ast.contracts().filter(|c| c.contract_kind == Some(kind)) {
                let collected = CollectedContract {
                    file: file.path,
                    name: &definition.name,
                    definition,
                    lines: &file.lines,
                };
                if contracts.insert((file.path, definition.name.as_str()), collected).is_some() {
                    warn!(
                        file = file.path,
                        name = %definition.name,
                        %kind,
                        "duplicate declaration, the later one wins"
                    );
                }
            }
        }
        debug!(%kind, count = contracts.len(), "collected contract-like declarations");
        Self { kind, contracts }
    }

    /// The kind this collection was filtered by.
    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// Iterates the collected declarations.
    pub fn iter(&self) -> impl Iterator<Item = &CollectedContract<'a>> {
        self.contracts.values()
    }

    /// Iterates the collected declarations of one file.
    pub fn in_file<'s>(
        &'s self,
        file: &'s str,
    ) -> impl Iterator<Item = &'s CollectedContract<'a>> {
        self.iter().filter(move |contract| contract.file == file)
    }

    /// Looks up a declaration by file and name.
    pub fn get(&self, file: &str, name: &str) -> Option<&CollectedContract<'a>> {
        self.iter().find(|contract| contract.file == file && contract.name == name)
    }

    /// Number of collected declarations.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether nothing of this kind was declared.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::{ast::FunctionDefinition, OutputSource, SolcInput, SolcOutput, SourceText};

    pub(crate) fn contract(name: &str, kind: &str, nodes: Value) -> Value {
        json!({
            "nodeType": "ContractDefinition",
            "name": name,
            "contractKind": kind,
            "baseContracts": [],
            "nodes": nodes,
        })
    }

    pub(crate) fn artifacts(files: &[(&str, Value)]) -> (SolcInput, SolcOutput) {
        let input = files
            .iter()
            .map(|(path, _)| {
                (path.to_string(), SourceText::Content { content: Some(String::new()) })
            })
            .collect();
        let output = files
            .iter()
            .map(|(path, nodes)| {
                let ast =
                    serde_json::from_value(json!({ "nodeType": "SourceUnit", "nodes": nodes }))
                        .unwrap();
                (path.to_string(), OutputSource { id: None, ast: Some(ast) })
            })
            .collect();
        (SolcInput { sources: Some(input) }, SolcOutput { sources: Some(output) })
    }

    #[test]
    fn test_collect_filters_by_kind() {
        let (input, output) = artifacts(&[
            (
                "a.sol",
                json!([
                    { "nodeType": "PragmaDirective", "literals": ["solidity"] },
                    contract("A", "contract", json!([])),
                    contract("IA", "interface", json!([])),
                    contract("LA", "library", json!([])),
                ]),
            ),
            ("b.sol", json!([contract("B", "contract", json!([]))])),
        ]);
        let sources = SourceSet::new(&input, &output).unwrap();

        let contracts = ContractCollection::collect(&sources, ContractKind::Contract);
        let names: Vec<_> = contracts.iter().map(|c| (c.file, c.name)).collect();
        assert_eq!(names, [("a.sol", "A"), ("b.sol", "B")]);

        let interfaces = ContractCollection::collect(&sources, ContractKind::Interface);
        assert_eq!(interfaces.len(), 1);
        assert!(interfaces.get("a.sol", "IA").is_some());
        assert!(interfaces.get("b.sol", "IA").is_none());

        let libraries = ContractCollection::collect(&sources, ContractKind::Library);
        assert_eq!(libraries.in_file("a.sol").count(), 1);
        assert_eq!(libraries.in_file("b.sol").count(), 0);
    }

    #[test]
    fn test_unknown_contract_kind_is_never_collected() {
        let (input, output) =
            artifacts(&[("a.sol", json!([contract("Weird", "something", json!([]))]))]);
        let sources = SourceSet::new(&input, &output).unwrap();
        for kind in ContractKind::ALL {
            assert!(ContractCollection::collect(&sources, kind).is_empty());
        }
    }

    #[test]
    fn test_duplicate_name_later_wins() {
        let first = json!([{ "nodeType": "FunctionDefinition", "name": "first" }]);
        let second = json!([{ "nodeType": "FunctionDefinition", "name": "second" }]);
        let (input, output) = artifacts(&[(
            "a.sol",
            json!([contract("A", "contract", first), contract("A", "contract", second)]),
        )]);
        let sources = SourceSet::new(&input, &output).unwrap();
        let contracts = ContractCollection::collect(&sources, ContractKind::Contract);

        assert_eq!(contracts.len(), 1);
        let functions: Vec<_> = contracts
            .get("a.sol", "A")
            .unwrap()
            .members::<FunctionDefinition>()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(functions, ["second"]);
    }
}
