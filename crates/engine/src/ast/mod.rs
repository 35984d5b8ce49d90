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

//! Typed view of the solc JSON AST.
//!
//! Only the node categories and fields the documentation pipeline reads are modeled. Every
//! category is a variant of an enum tagged by the compiler's `nodeType` field, and every field
//! that older or newer compilers may omit is an `Option` (or defaults to empty), so a node with
//! an unexpected shape degrades to missing data instead of failing the whole artifact.

mod decl;
pub use decl::*;

mod stmt;
pub use stmt::*;

use serde::{Deserialize, Serialize};

/// The `typeDescriptions` object solc attaches to typed nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeDescriptions {
    /// Human readable type, e.g. `uint256` or `literal_string "ok"`.
    pub type_string: Option<String>,
    /// Machine oriented type identifier, e.g. `t_uint256`.
    pub type_identifier: Option<String>,
}

/// A (possibly qualified) name reference such as `IdentifierPath` or a legacy
/// `UserDefinedTypeName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamePath {
    /// The referenced name as written in source.
    pub name: Option<String>,
    /// The raw `src` descriptor of the reference.
    pub src: Option<String>,
}

/// Function and variable visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
    Private,
    External,
    /// Emitted by some compilers for declarations without explicit visibility.
    Default,
}

impl Visibility {
    /// Returns the Solidity keyword for this visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Private => "private",
            Self::External => "external",
            Self::Default => "default",
        }
    }
}

/// Function state mutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    Payable,
    Nonpayable,
    /// Pre-0.5 alias of `view`.
    Constant,
}

impl StateMutability {
    /// Returns the Solidity keyword for this mutability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::View => "view",
            Self::Payable => "payable",
            Self::Nonpayable => "nonpayable",
            Self::Constant => "constant",
        }
    }
}
