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

use serde::{Deserialize, Serialize};

use super::{Block, NamePath, StateMutability, TypeDescriptions, Visibility};

/// The root `ast` object of one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceUnit {
    /// The absolute path solc assigned to this unit.
    pub absolute_path: Option<String>,
    /// Top-level nodes in declaration order.
    pub nodes: Vec<SourceUnitNode>,
}

impl SourceUnit {
    /// Iterates the contract definitions declared at the top level of this unit.
    pub fn contracts(&self) -> impl Iterator<Item = &ContractDefinition> {
        self.nodes.iter().filter_map(|node| match node {
            SourceUnitNode::ContractDefinition(contract) => Some(contract),
            _ => None,
        })
    }

    /// Iterates the import directives declared at the top level of this unit.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDirective> {
        self.nodes.iter().filter_map(|node| match node {
            SourceUnitNode::ImportDirective(import) => Some(import),
            _ => None,
        })
    }
}

/// A top-level node of a source unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "nodeType")]
pub enum SourceUnitNode {
    ContractDefinition(ContractDefinition),
    ImportDirective(ImportDirective),
    /// Pragmas, free functions, top-level structs and anything else.
    #[serde(other)]
    Other,
}

/// `contract`, `interface` or `library`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    Contract,
    Interface,
    Library,
}

impl ContractKind {
    /// All kinds, in the order their partitions appear in a file entry.
    pub const ALL: [Self; 3] = [Self::Contract, Self::Interface, Self::Library];

    /// The keyword used in source and in the compiler's `contractKind` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Interface => "interface",
            Self::Library => "library",
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractDefinition {
    pub name: String,
    /// `None` when the compiler emitted a kind this crate does not know.
    #[serde(deserialize_with = "lenient_contract_kind")]
    pub contract_kind: Option<ContractKind>,
    pub base_contracts: Vec<InheritanceSpecifier>,
    pub nodes: Vec<ContractMember>,
    pub src: Option<String>,
}

impl ContractDefinition {
    /// Names of the directly inherited base types, in declaration order.
    pub fn base_names(&self) -> Vec<String> {
        self.base_contracts.iter().filter_map(|base| base.base_name.name.clone()).collect()
    }
}

fn lenient_contract_kind<'de, D>(deserializer: D) -> Result<Option<ContractKind>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|kind| match kind.as_str() {
        "contract" => Some(ContractKind::Contract),
        "interface" => Some(ContractKind::Interface),
        "library" => Some(ContractKind::Library),
        _ => None,
    }))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InheritanceSpecifier {
    pub base_name: NamePath,
}

/// A member declared directly inside a contract-like definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "nodeType")]
pub enum ContractMember {
    FunctionDefinition(FunctionDefinition),
    EventDefinition(EventDefinition),
    VariableDeclaration(VariableDeclaration),
    ModifierDefinition(ModifierDefinition),
    StructDefinition(StructDefinition),
    /// Enums, errors, using-for directives and anything else.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionDefinition {
    /// Empty for constructors, fallback and receive functions.
    pub name: String,
    /// `function`, `constructor`, `fallback`, `receive` or `freeFunction`. Absent before 0.5.
    pub kind: Option<String>,
    /// Pre-0.5 marker for constructors.
    pub is_constructor: Option<bool>,
    pub parameters: ParameterList,
    pub return_parameters: ParameterList,
    pub modifiers: Vec<ModifierInvocation>,
    pub visibility: Option<Visibility>,
    /// Pre-0.5 payability flag, superseded by `stateMutability`.
    pub payable: Option<bool>,
    pub state_mutability: Option<StateMutability>,
    /// `None` for unimplemented functions.
    pub body: Option<Block>,
    pub src: Option<String>,
}

impl FunctionDefinition {
    /// The label used in place of an empty name.
    pub fn kind_label(&self) -> String {
        match &self.kind {
            Some(kind) => kind.clone(),
            None if self.is_constructor.unwrap_or(false) => "constructor".to_string(),
            None => "fallback".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterList {
    pub parameters: Vec<VariableDeclaration>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModifierInvocation {
    pub modifier_name: NamePath,
    pub src: Option<String>,
}

/// A variable declaration: state variable, parameter or struct member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariableDeclaration {
    pub name: String,
    pub constant: Option<bool>,
    pub state_variable: Option<bool>,
    pub visibility: Option<Visibility>,
    pub type_name: Option<TypeName>,
    pub type_descriptions: TypeDescriptions,
    pub src: Option<String>,
}

impl VariableDeclaration {
    /// The declared type string, preferring the type node's description.
    pub fn type_string(&self) -> Option<&str> {
        self.type_name
            .as_ref()
            .and_then(|type_name| type_name.type_descriptions.type_string.as_deref())
            .or(self.type_descriptions.type_string.as_deref())
    }
}

/// Any of the type name node categories. Only the resolved description is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeName {
    pub node_type: Option<String>,
    pub type_descriptions: TypeDescriptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDefinition {
    pub name: String,
    pub parameters: ParameterList,
    pub src: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModifierDefinition {
    pub name: String,
    pub parameters: ParameterList,
    pub visibility: Option<Visibility>,
    pub src: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructDefinition {
    pub name: String,
    pub members: Vec<VariableDeclaration>,
    pub src: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportDirective {
    /// The path as written in the import statement.
    pub file: Option<String>,
    /// The path resolved by the compiler, which is also the key of the imported source.
    pub absolute_path: Option<String>,
    pub src: Option<String>,
}
