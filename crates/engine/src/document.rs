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

//! The document model and the stages that assemble it.
//!
//! Each stage consumes the previous value and returns a new one: declarations become a
//! [`ContractDoc`] once their inheritance list is attached, contract docs are grouped per kind
//! into a [`KindDocument`], and kind documents are folded into the per-file [`Document`]
//! together with each file's imports.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    ast::ContractKind,
    extract::{EventDoc, FunctionDoc, ModifierDoc, StructDoc, VariableDoc},
    ContractCollection, ContractDeclarations, GroupedMap, SourceSet,
};

/// The documentation entry of one contract, interface or library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDoc {
    pub functions: Vec<FunctionDoc>,
    pub events: Vec<EventDoc>,
    pub variables: Vec<VariableDoc>,
    pub modifiers: Vec<ModifierDoc>,
    pub structs: Vec<StructDoc>,
    /// Names of the direct base types, in declaration order.
    pub inherits: Vec<String>,
}

impl ContractDeclarations {
    /// Attaches the inheritance list, producing the final contract entry.
    pub fn with_inherits(self, inherits: Vec<String>) -> ContractDoc {
        ContractDoc {
            functions: self.functions,
            events: self.events,
            variables: self.variables,
            modifiers: self.modifiers,
            structs: self.structs,
            inherits,
        }
    }
}

/// All documented declarations of one kind, `file -> name -> entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDocument {
    pub kind: ContractKind,
    pub files: IndexMap<String, IndexMap<String, ContractDoc>>,
}

impl KindDocument {
    /// Joins the collected declarations with their grouped records.
    ///
    /// Entries follow the collection's order. Declarations without any record in `grouped`
    /// are left out.
    pub fn build(contracts: &ContractCollection<'_>, mut grouped: GroupedMap) -> Self {
        let mut files: IndexMap<String, IndexMap<String, ContractDoc>> = IndexMap::new();
        for contract in contracts.iter() {
            let Some(declarations) = grouped.take(contract.file, contract.name) else {
                continue;
            };
            files
                .entry(contract.file.to_string())
                .or_default()
                .insert(
                    contract.name.to_string(),
                    declarations.with_inherits(contract.definition.base_names()),
                );
        }
        Self { kind: contracts.kind(), files }
    }

    /// Number of documented entries across all files.
    pub fn len(&self) -> usize {
        self.files.values().map(IndexMap::len).sum()
    }

    /// Whether nothing of this kind was documented.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// The entry of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDoc {
    /// Resolved paths of the imported files, in declaration order.
    pub imports: Vec<String>,
    pub contracts: IndexMap<String, ContractDoc>,
    pub interfaces: IndexMap<String, ContractDoc>,
    pub libraries: IndexMap<String, ContractDoc>,
}

impl FileDoc {
    /// The partition holding entries of `kind`.
    pub fn partition(&self, kind: ContractKind) -> &IndexMap<String, ContractDoc> {
        match kind {
            ContractKind::Contract => &self.contracts,
            ContractKind::Interface => &self.interfaces,
            ContractKind::Library => &self.libraries,
        }
    }

    fn partition_mut(&mut self, kind: ContractKind) -> &mut IndexMap<String, ContractDoc> {
        match kind {
            ContractKind::Contract => &mut self.contracts,
            ContractKind::Interface => &mut self.interfaces,
            ContractKind::Library => &mut self.libraries,
        }
    }
}

/// The full documentation model, keyed by source path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub IndexMap<String, FileDoc>);

/// Entry counts of a [`Document`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub files: usize,
    pub contracts: usize,
    pub interfaces: usize,
    pub libraries: usize,
}

impl Document {
    /// One empty entry per file, in source-set order.
    pub fn skeleton(sources: &SourceSet<'_>) -> Self {
        Self(sources.iter().map(|file| (file.path.to_string(), FileDoc::default())).collect())
    }

    /// Moves the entries of `kind_doc` into their files' partitions.
    pub fn with_kind(mut self, kind_doc: KindDocument) -> Self {
        let kind = kind_doc.kind;
        for (path, entries) in kind_doc.files {
            let partition = self.0.entry(path).or_default().partition_mut(kind);
            partition.extend(entries);
        }
        self
    }

    /// Attaches the import list of every file that has an AST.
    pub fn with_imports(mut self, sources: &SourceSet<'_>) -> Self {
        for file in sources.iter() {
            let Some(ast) = file.ast else { continue };
            let imports: Vec<String> =
                ast.imports().filter_map(|import| import.absolute_path.clone()).collect();
            debug!(path = file.path, count = imports.len(), "resolved imports");
            self.0.entry(file.path.to_string()).or_default().imports = imports;
        }
        self
    }

    /// The entry of one file.
    pub fn file(&self, path: &str) -> Option<&FileDoc> {
        self.0.get(path)
    }

    /// Iterates `(path, entry)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileDoc)> {
        self.0.iter()
    }

    /// Counts files and entries per kind.
    pub fn stats(&self) -> DocumentStats {
        self.0.values().fold(
            DocumentStats { files: self.0.len(), ..Default::default() },
            |mut stats, file| {
                stats.contracts += file.contracts.len();
                stats.interfaces += file.interfaces.len();
                stats.libraries += file.libraries.len();
                stats
            },
        )
    }
}
