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
    ast::{ContractMember, StructDefinition},
    extract::{parameter_type, Category, DeclarationRecord, Extract},
    LineIndex,
};

/// Documentation record of a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDoc {
    pub name: String,
    pub members: Vec<StructMember>,
    pub line_number: usize,
}

/// One member of a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Extract for StructDefinition {
    const CATEGORY: Category = Category::Structs;

    fn select(member: &ContractMember) -> Option<&Self> {
        match member {
            ContractMember::StructDefinition(structure) => Some(structure),
            _ => None,
        }
    }

    fn extract(&self, lines: &LineIndex) -> DeclarationRecord {
        let members = self
            .members
            .iter()
            .map(|member| StructMember {
                name: member.name.clone(),
                ty: parameter_type(member).to_string(),
            })
            .collect();

        DeclarationRecord::Struct(StructDoc {
            name: self.name.clone(),
            members,
            line_number: lines.line_of(self.src.as_deref()),
        })
    }
}
