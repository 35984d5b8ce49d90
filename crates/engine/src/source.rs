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

//! Offset to line resolution.
//!
//! solc reports positions as `"start:length:fileIndex"` byte descriptors. Documentation only
//! needs the 1-based line on which a declaration starts, which is one plus the number of
//! newlines before `start`.

use serde::{Deserialize, Serialize};

/// Extracts the `start` component of a `"start:length:fileIndex"` descriptor.
///
/// Anything that does not parse as a non-negative integer clamps to `0`.
pub fn offset_start(raw_offset: &str) -> usize {
    let start = raw_offset.split(':').next().unwrap_or_default().trim();
    start.parse::<i64>().ok().and_then(|start| usize::try_from(start).ok()).unwrap_or(0)
}

/// Resolves the line of `raw_offset` in `source` by scanning the text.
///
/// Returns `0` when the declaration carries no position. A `start` past the end of the text
/// counts every newline in the text.
///
/// # Example
///
/// ```rust
/// assert_eq!(resolve_line("a\nb\nc", Some("4:1:0")), 3);
/// assert_eq!(resolve_line("a\nb\nc", None), 0);
/// ```
pub fn resolve_line(source: &str, raw_offset: Option<&str>) -> usize {
    let Some(raw_offset) = raw_offset else {
        return 0;
    };
    let end = offset_start(raw_offset).min(source.len());
    1 + source.as_bytes()[..end].iter().filter(|byte| **byte == b'\n').count()
}

/// Newline positions of one source file, built once so each lookup is a binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIndex {
    newlines: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Indexes the newlines of `source`.
    pub fn new(source: &str) -> Self {
        let newlines = source
            .bytes()
            .enumerate()
            .filter_map(|(pos, byte)| (byte == b'\n').then_some(pos))
            .collect();
        Self { newlines, len: source.len() }
    }

    /// Same contract as [`resolve_line`].
    pub fn line_of(&self, raw_offset: Option<&str>) -> usize {
        match raw_offset {
            Some(raw_offset) => self.line_at(offset_start(raw_offset)),
            None => 0,
        }
    }

    /// 1-based line containing byte position `start`.
    pub fn line_at(&self, start: usize) -> usize {
        let end = start.min(self.len);
        1 + self.newlines.partition_point(|pos| *pos < end)
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }
}
