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

//! Documentation model extraction for Solidity compilations.
//!
//! Given the standard-JSON input handed to solc and the output it produced, this crate builds
//! a per-file [`Document`] listing the imports, contracts, interfaces and libraries of every
//! source, with the functions, events, variables, modifiers, structs and direct bases of each.

pub mod ast;

pub mod aggregate;
pub use aggregate::*;

pub mod artifact;
pub use artifact::*;

pub mod collector;
pub use collector::*;

pub mod document;
pub use document::*;

pub mod extract;
pub use extract::*;

pub mod grouped;
pub use grouped::*;

pub mod pipeline;
pub use pipeline::*;

pub mod source;
pub use source::*;
