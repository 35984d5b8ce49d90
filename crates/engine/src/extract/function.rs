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
use tracing::trace;

use crate::{
    ast::{
        Block, ContractMember, Expression, FunctionDefinition, StateMutability, Statement,
        Visibility,
    },
    extract::{parameter_type, render_parameter, Category, DeclarationRecord, Extract},
    LineIndex,
};

/// Documentation record of a function, constructor, fallback or receive function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDoc {
    /// Source name, or the function kind (`constructor`, `fallback`, `receive`) when unnamed.
    pub name: String,
    /// `name(type1 p1, type2 p2)` with the raw source name.
    pub signature: String,
    /// `(t1, t2)`.
    pub returns: String,
    /// Events emitted by top-level statements of the body.
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
    /// Applied modifiers, in order.
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<StateMutability>,
    /// `require`-like guards found in top-level statements of the body.
    pub requires: Vec<RequireSite>,
    pub line_number: usize,
}

/// A call to a revert-guarding helper inside a function body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequireSite {
    pub line_number: usize,
    /// `require(..., <message>)` for the builtin, the callee name for anything else.
    pub name: String,
}

impl Extract for FunctionDefinition {
    const CATEGORY: Category = Category::Functions;

    fn select(member: &ContractMember) -> Option<&Self> {
        match member {
            ContractMember::FunctionDefinition(function) => Some(function),
            _ => None,
        }
    }

    fn extract(&self, lines: &LineIndex) -> DeclarationRecord {
        let parameters =
            self.parameters.parameters.iter().map(render_parameter).collect::<Vec<_>>();
        let returns =
            self.return_parameters.parameters.iter().map(parameter_type).collect::<Vec<_>>();
        let modifiers = self
            .modifiers
            .iter()
            .filter_map(|invocation| invocation.modifier_name.name.clone())
            .collect();

        let name = if self.name.is_empty() { self.kind_label() } else { self.name.clone() };

        DeclarationRecord::Function(FunctionDoc {
            name,
            signature: format!("{}({})", self.name, parameters.join(", ")),
            returns: format!("({})", returns.join(", ")),
            events: self.body.as_ref().map(emitted_events).unwrap_or_default(),
            payable: self.payable,
            modifiers,
            visibility: self.visibility,
            state_mutability: self.state_mutability,
            requires: self.body.as_ref().map(|body| require_sites(body, lines)).unwrap_or_default(),
            line_number: lines.line_of(self.src.as_deref()),
        })
    }
}

/// Names of the events emitted by the top-level statements of `body`.
pub fn emitted_events(body: &Block) -> Vec<String> {
    body.statements
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::EmitStatement(emit) => emit.event_name().map(str::to_string),
            _ => None,
        })
        .collect()
}

/// The `require`-like call sites among the top-level statements of `body`.
pub fn require_sites(body: &Block, lines: &LineIndex) -> Vec<RequireSite> {
    body.statements
        .iter()
        .filter_map(|stmt| stmt.call_candidate())
        .filter(|call| is_require_like(call))
        .filter_map(|call| {
            let site = require_site(call, lines);
            if site.is_none() {
                trace!(src = ?call.src, "dropping require site without a recoverable message");
            }
            site
        })
        .collect()
}

fn callee_name(call: &Expression) -> Option<&str> {
    call.callee()?.name.as_deref()
}

fn is_require_like(call: &Expression) -> bool {
    callee_name(call).is_some_and(|name| name.to_lowercase().contains("require"))
}

fn require_site(call: &Expression, lines: &LineIndex) -> Option<RequireSite> {
    let callee = callee_name(call)?;
    let line_number = lines.line_of(call.src.as_deref());

    if callee != "require" {
        return Some(RequireSite { line_number, name: callee.to_string() });
    }

    let message = literal_message(call.callee()?.last_argument_type()?);
    Some(RequireSite { line_number, name: format!("require(..., {message})") })
}

/// Recovers the message from a type string like `literal_string "not owner"`.
///
/// The first word is the type kind; the rest is the literal with its quotes removed.
fn literal_message(type_string: &str) -> String {
    let literal = type_string.split(' ').skip(1).collect::<Vec<_>>().join(" ");
    literal.replace('"', "")
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::extract::tests::param;

    const SOURCE: &str = "contract Parent {\n    function foo(uint256 a) public returns (bool) {\n        require(a > 0, \"ok\");\n        emit Foo(a);\n        return true;\n    }\n}\n";

    fn src_of(needle: &str, len: usize) -> String {
        format!("{}:{len}:0", SOURCE.find(needle).unwrap())
    }

    fn require_call(callee: &str, argument_types: Value, src: &str) -> Value {
        json!({
            "nodeType": "ExpressionStatement",
            "expression": {
                "nodeType": "FunctionCall",
                "src": src,
                "expression": {
                    "nodeType": "Identifier",
                    "name": callee,
                    "argumentTypes": argument_types,
                },
            },
        })
    }

    fn function(body: Value) -> FunctionDefinition {
        serde_json::from_value(json!({
            "nodeType": "FunctionDefinition",
            "name": "foo",
            "kind": "function",
            "src": src_of("function", 120),
            "visibility": "public",
            "stateMutability": "nonpayable",
            "parameters": { "parameters": [param("uint256", "a")] },
            "returnParameters": { "parameters": [param("bool", "")] },
            "modifiers": [{ "modifierName": { "name": "onlyOwner" } }],
            "body": body,
        }))
        .unwrap()
    }

    fn extract(function: &FunctionDefinition) -> FunctionDoc {
        match function.extract(&LineIndex::new(SOURCE)) {
            DeclarationRecord::Function(doc) => doc,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn test_function_fields() {
        let doc = extract(&function(json!({
            "statements": [
                require_call(
                    "require",
                    json!([{ "typeString": "bool" }, { "typeString": "literal_string \"ok\"" }]),
                    &src_of("require", 20),
                ),
                {
                    "nodeType": "EmitStatement",
                    "eventCall": {
                        "nodeType": "FunctionCall",
                        "expression": { "nodeType": "Identifier", "name": "Foo" },
                    },
                },
                { "nodeType": "Return" },
            ]
        })));

        assert_eq!(doc.name, "foo");
        assert_eq!(doc.signature, "foo(uint256 a)");
        assert_eq!(doc.returns, "(bool)");
        assert_eq!(doc.modifiers, ["onlyOwner"]);
        assert_eq!(doc.visibility, Some(Visibility::Public));
        assert_eq!(doc.state_mutability, Some(StateMutability::Nonpayable));
        assert_eq!(doc.payable, None);
        assert_eq!(doc.events, ["Foo"]);
        assert_eq!(doc.line_number, 2);
        assert_eq!(
            doc.requires,
            [RequireSite { line_number: 3, name: "require(..., ok)".to_string() }]
        );
    }

    #[test]
    fn test_unimplemented_function_has_no_events_or_requires() {
        let doc = extract(&function(Value::Null));
        assert!(doc.events.is_empty());
        assert!(doc.requires.is_empty());
    }

    #[test]
    fn test_custom_require_helpers_keep_callee_name() {
        let doc = extract(&function(json!({
            "statements": [
                require_call("requireOwner", json!([]), &src_of("require", 20)),
                require_call("assert", json!([{ "typeString": "bool" }]), &src_of("emit", 10)),
            ]
        })));
        assert_eq!(
            doc.requires,
            [RequireSite { line_number: 3, name: "requireOwner".to_string() }]
        );
    }

    #[test]
    fn test_require_without_argument_types_is_dropped() {
        let doc = extract(&function(json!({
            "statements": [
                require_call("require", Value::Null, &src_of("require", 20)),
                require_call("Require", json!([]), &src_of("emit", 10)),
            ]
        })));
        // the builtin is dropped, the differently cased helper is kept
        assert_eq!(doc.requires, [RequireSite { line_number: 4, name: "Require".to_string() }]);
    }

    #[test]
    fn test_require_message_with_spaces() {
        assert_eq!(literal_message("literal_string \"not the owner\""), "not the owner");
        assert_eq!(literal_message("bool"), "");
    }

    #[test]
    fn test_unnamed_functions_use_kind_label() {
        let fallback: FunctionDefinition =
            serde_json::from_value(json!({ "name": "", "kind": "fallback", "body": null }))
                .unwrap();
        let doc = extract(&fallback);
        assert_eq!(doc.name, "fallback");
        assert_eq!(doc.signature, "()");
        assert_eq!(doc.line_number, 0);

        let legacy: FunctionDefinition = serde_json::from_value(
            json!({ "name": "", "isConstructor": true, "payable": false, "body": null }),
        )
        .unwrap();
        let doc = extract(&legacy);
        assert_eq!(doc.name, "constructor");
        assert_eq!(doc.payable, Some(false));
    }

    #[test]
    fn test_optional_fields_are_omitted_from_json() {
        let fallback: FunctionDefinition =
            serde_json::from_value(json!({ "name": "", "kind": "receive" })).unwrap();
        let value = serde_json::to_value(extract(&fallback)).unwrap();
        assert!(value.get("payable").is_none());
        assert!(value.get("visibility").is_none());
        assert_eq!(value["lineNumber"], 0);
        assert_eq!(value["requires"], json!([]));
    }
}
