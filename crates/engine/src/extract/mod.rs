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

//! Declaration extractors.
//!
//! Each declaration category implements [`Extract`]: it knows how to pick its nodes out of a
//! contract's member list and how to turn one node into a flat documentation record. All
//! extractors are pure functions of the node and the line index of the file declaring it.

mod event;
pub use event::*;

mod function;
pub use function::*;

mod modifier;
pub use modifier::*;

mod structure;
pub use structure::*;

mod variable;
pub use variable::*;

use serde::{Deserialize, Serialize};

use crate::{
    ast::{ContractMember, VariableDeclaration},
    LineIndex,
};

/// The five declaration categories documented per contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Functions,
    Events,
    Variables,
    Modifiers,
    Structs,
}

impl Category {
    /// Every category, in the order their lists appear in a contract entry.
    pub const ALL: [Self; 5] =
        [Self::Functions, Self::Events, Self::Variables, Self::Modifiers, Self::Structs];

    /// The key of this category in a contract entry.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Functions => "functions",
            Self::Events => "events",
            Self::Variables => "variables",
            Self::Modifiers => "modifiers",
            Self::Structs => "structs",
        }
    }
}

/// A record produced by any extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclarationRecord {
    Function(FunctionDoc),
    Event(EventDoc),
    Variable(VariableDoc),
    Modifier(ModifierDoc),
    Struct(StructDoc),
}

impl DeclarationRecord {
    /// The category this record is grouped under.
    pub fn category(&self) -> Category {
        match self {
            Self::Function(_) => Category::Functions,
            Self::Event(_) => Category::Events,
            Self::Variable(_) => Category::Variables,
            Self::Modifier(_) => Category::Modifiers,
            Self::Struct(_) => Category::Structs,
        }
    }
}

/// A declaration node that can be documented.
pub trait Extract {
    /// The category records of this node land in.
    const CATEGORY: Category;

    /// Returns the node if `member` is of this category.
    fn select(member: &ContractMember) -> Option<&Self>;

    /// Maps the node into its documentation record.
    fn extract(&self, lines: &LineIndex) -> DeclarationRecord;
}

/// Renders a parameter as `type name`. An unnamed one keeps the separating space.
pub(crate) fn render_parameter(parameter: &VariableDeclaration) -> String {
    format!("{} {}", parameter_type(parameter), parameter.name)
}

/// Renders a parameter list as `(type1 name1, type2 name2)`.
pub(crate) fn render_parameters(parameters: &[VariableDeclaration]) -> String {
    format!("({})", parameters.iter().map(render_parameter).collect::<Vec<_>>().join(", "))
}

/// The type string of a parameter or member; the declaration's own description wins.
pub(crate) fn parameter_type(parameter: &VariableDeclaration) -> &str {
    parameter
        .type_descriptions
        .type_string
        .as_deref()
        .or_else(|| parameter.type_string())
        .unwrap_or_default()
}
