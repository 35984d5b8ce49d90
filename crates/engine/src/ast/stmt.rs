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

use super::TypeDescriptions;

/// A `{ ... }` block. Only its top-level statements are inspected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub src: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "nodeType")]
pub enum Statement {
    ExpressionStatement(ExpressionStatement),
    EmitStatement(EmitStatement),
    /// A call node sitting directly in a statement list.
    FunctionCall(Expression),
    #[serde(other)]
    Other,
}

impl Statement {
    /// The call expression a `require`-like site would be made of.
    ///
    /// For an expression statement this is the wrapped expression; for a bare call node it is
    /// the node's own `expression` field.
    pub fn call_candidate(&self) -> Option<&Expression> {
        match self {
            Self::ExpressionStatement(stmt) => stmt.expression.as_ref(),
            Self::FunctionCall(call) => call.expression.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpressionStatement {
    pub expression: Option<Expression>,
    pub src: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitStatement {
    pub event_call: Option<Expression>,
    pub src: Option<String>,
}

impl EmitStatement {
    /// Name of the emitted event. Qualified events (`emit Lib.Event()`) yield the member name.
    pub fn event_name(&self) -> Option<&str> {
        self.event_call.as_ref()?.callee()?.referenced_name()
    }
}

/// Any expression node.
///
/// Expressions are too varied to model one variant each; this struct keeps the handful of
/// fields that identifiers, member accesses and calls carry, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expression {
    pub node_type: Option<String>,
    /// Set on `Identifier` nodes.
    pub name: Option<String>,
    /// Set on `MemberAccess` nodes.
    pub member_name: Option<String>,
    /// The callee of a `FunctionCall`, the base of a `MemberAccess`.
    pub expression: Option<Box<Expression>>,
    /// Set on callee identifiers: the types of the call arguments.
    pub argument_types: Option<Vec<TypeDescriptions>>,
    pub type_descriptions: TypeDescriptions,
    pub src: Option<String>,
}

impl Expression {
    /// The callee of this call expression.
    pub fn callee(&self) -> Option<&Self> {
        self.expression.as_deref()
    }

    /// The identifier name, or the member name of a member access.
    pub fn referenced_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.member_name.as_deref())
    }

    /// The type string of the last call argument, as recorded on this callee.
    pub fn last_argument_type(&self) -> Option<&str> {
        self.argument_types.as_ref()?.last()?.type_string.as_deref()
    }
}
