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

//! Aggregation of extractor output into a [`GroupedMap`].

use tracing::debug;

use crate::{
    ast::{
        EventDefinition, FunctionDefinition, ModifierDefinition, StructDefinition,
        VariableDeclaration,
    },
    extract::{Category, Extract},
    ContractCollection, GroupedMap,
};

/// Runs extractor `D` over every collected contract.
///
/// Contracts without a member of this category get no slot here; the slot (with an empty
/// list for this category) appears once another category populates it.
pub fn group<D: Extract + 'static>(contracts: &ContractCollection<'_>) -> GroupedMap {
    let mut grouped = GroupedMap::new();
    for contract in contracts.iter() {
        for member in contract.members::<D>() {
            let record = member.extract(contract.lines);
            debug_assert_eq!(record.category(), D::CATEGORY);
            grouped.insert(contract.file, contract.name, record);
        }
    }
    grouped
}

/// Runs the extractor of one category.
pub fn group_category(contracts: &ContractCollection<'_>, category: Category) -> GroupedMap {
    match category {
        Category::Functions => group::<FunctionDefinition>(contracts),
        Category::Events => group::<EventDefinition>(contracts),
        Category::Variables => group::<VariableDeclaration>(contracts),
        Category::Modifiers => group::<ModifierDefinition>(contracts),
        Category::Structs => group::<StructDefinition>(contracts),
    }
}

/// Groups all five categories of every collected contract.
pub fn aggregate(contracts: &ContractCollection<'_>) -> GroupedMap {
    let grouped = Category::ALL
        .into_iter()
        .map(|category| group_category(contracts, category))
        .fold(GroupedMap::new(), GroupedMap::merge);
    debug!(
        kind = %contracts.kind(),
        contracts = grouped.len(),
        "aggregated declarations"
    );
    grouped
}
