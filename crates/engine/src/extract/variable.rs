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

use crate::{
    ast::{ContractMember, VariableDeclaration, Visibility},
    extract::{Category, DeclarationRecord, Extract},
    LineIndex,
};

/// Documentation record of a state variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDoc {
    pub name: String,
    /// Absent when the compiler does not report constness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
    #[serde(rename = "type")]
    pub ty: String,
    pub line_number: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl Extract for VariableDeclaration {
    const CATEGORY: Category = Category::Variables;

    fn select(member: &ContractMember) -> Option<&Self> {
        match member {
            ContractMember::VariableDeclaration(variable) => Some(variable),
            _ => None,
        }
    }

    fn extract(&self, lines: &LineIndex) -> DeclarationRecord {
        DeclarationRecord::Variable(VariableDoc {
            name: self.name.clone(),
            constant: self.constant,
            ty: self.type_string().unwrap_or_default().to_string(),
            line_number: lines.line_of(self.src.as_deref()),
            visibility: self.visibility,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_variable_type_comes_from_type_node() {
        let variable: VariableDeclaration = serde_json::from_value(json!({
            "nodeType": "VariableDeclaration",
            "name": "balances",
            "constant": false,
            "stateVariable": true,
            "visibility": "public",
            "src": "20:45:0",
            "typeName": {
                "nodeType": "Mapping",
                "typeDescriptions": { "typeString": "mapping(address => uint256)" },
            },
            "typeDescriptions": { "typeString": "mapping(address => uint256)" },
        }))
        .unwrap();

        let source = "contract Token {\n\n    mapping(address => uint256) public balances;\n}";
        let record = variable.extract(&LineIndex::new(source));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({
                "name": "balances",
                "constant": false,
                "type": "mapping(address => uint256)",
                "lineNumber": 3,
                "visibility": "public",
            })
        );
    }

    #[test]
    fn test_variable_without_type_node_uses_own_description() {
        let variable: VariableDeclaration = serde_json::from_value(json!({
            "name": "owner",
            "typeDescriptions": { "typeString": "address" },
        }))
        .unwrap();
        let DeclarationRecord::Variable(doc) = variable.extract(&LineIndex::default()) else {
            panic!("expected a variable record");
        };
        assert_eq!(doc.ty, "address");
        assert_eq!(doc.constant, None);
    }
}
