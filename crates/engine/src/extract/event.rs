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
    ast::{ContractMember, EventDefinition},
    extract::{render_parameters, Category, DeclarationRecord, Extract},
    LineIndex,
};

/// Documentation record of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDoc {
    pub name: String,
    /// `(type1 name1, type2 name2)`.
    pub parameters: String,
    pub line_number: usize,
}

impl Extract for EventDefinition {
    const CATEGORY: Category = Category::Events;

    fn select(member: &ContractMember) -> Option<&Self> {
        match member {
            ContractMember::EventDefinition(event) => Some(event),
            _ => None,
        }
    }

    fn extract(&self, lines: &LineIndex) -> DeclarationRecord {
        DeclarationRecord::Event(EventDoc {
            name: self.name.clone(),
            parameters: render_parameters(&self.parameters.parameters),
            line_number: lines.line_of(self.src.as_deref()),
        })
    }
}
