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

//! The grouped map: declaration records keyed by file, then contract name, then category.
//!
//! Merging is union-by-key. Two maps that touch the same contract extend its category lists
//! instead of replacing the contract, so partial maps built one category at a time can be
//! combined in any order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extract::{
    Category, DeclarationRecord, EventDoc, FunctionDoc, ModifierDoc, StructDoc, VariableDoc,
};

/// The five category lists of one contract-like declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDeclarations {
    pub functions: Vec<FunctionDoc>,
    pub events: Vec<EventDoc>,
    pub variables: Vec<VariableDoc>,
    pub modifiers: Vec<ModifierDoc>,
    pub structs: Vec<StructDoc>,
}

impl ContractDeclarations {
    /// Appends a record to the list of its category.
    pub fn push(&mut self, record: DeclarationRecord) {
        match record {
            DeclarationRecord::Function(doc) => self.functions.push(doc),
            DeclarationRecord::Event(doc) => self.events.push(doc),
            DeclarationRecord::Variable(doc) => self.variables.push(doc),
            DeclarationRecord::Modifier(doc) => self.modifiers.push(doc),
            DeclarationRecord::Struct(doc) => self.structs.push(doc),
        }
    }

    /// Appends every list of `other` to the matching list of `self`.
    pub fn extend(&mut self, other: Self) {
        self.functions.extend(other.functions);
        self.events.extend(other.events);
        self.variables.extend(other.variables);
        self.modifiers.extend(other.modifiers);
        self.structs.extend(other.structs);
    }

    /// Number of records in one category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Functions => self.functions.len(),
            Category::Events => self.events.len(),
            Category::Variables => self.variables.len(),
            Category::Modifiers => self.modifiers.len(),
            Category::Structs => self.structs.len(),
        }
    }

    /// Whether every category is empty.
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|category| self.count(*category) == 0)
    }
}

/// `file -> contract -> declarations`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedMap {
    files: BTreeMap<String, BTreeMap<String, ContractDeclarations>>,
}

impl GroupedMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to the list of its category at `(file, name)`, creating the slot on
    /// first use.
    pub fn insert(&mut self, file: &str, name: &str, record: DeclarationRecord) {
        self.slot(file, name).push(record);
    }

    /// Union of two maps. Lists of a contract present in both are concatenated, `self` first.
    pub fn merge(mut self, other: Self) -> Self {
        for (file, contracts) in other.files {
            for (name, declarations) in contracts {
                self.slot(&file, &name).extend(declarations);
            }
        }
        self
    }

    /// The declarations of `(file, name)`, if any record was inserted there.
    pub fn get(&self, file: &str, name: &str) -> Option<&ContractDeclarations> {
        self.files.get(file)?.get(name)
    }

    /// The records of one category at `(file, name)`; empty when the slot was never populated.
    pub fn count(&self, file: &str, name: &str, category: Category) -> usize {
        self.get(file, name).map(|declarations| declarations.count(category)).unwrap_or(0)
    }

    /// Removes and returns the declarations of `(file, name)`.
    pub fn take(&mut self, file: &str, name: &str) -> Option<ContractDeclarations> {
        let contracts = self.files.get_mut(file)?;
        let declarations = contracts.remove(name);
        if contracts.is_empty() {
            self.files.remove(file);
        }
        declarations
    }

    /// Whether `(file, name)` holds at least one record.
    pub fn contains(&self, file: &str, name: &str) -> bool {
        self.get(file, name).is_some()
    }

    /// Number of populated contract slots across all files.
    pub fn len(&self) -> usize {
        self.files.values().map(BTreeMap::len).sum()
    }

    /// Whether no record was inserted.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn slot(&mut self, file: &str, name: &str) -> &mut ContractDeclarations {
        self.files
            .entry(file.to_string())
            .or_default()
            .entry(name.to_string())
            .or_default()
    }
}
