// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// An append-only, oldest-first sequence of assignment records.
///
/// The "current" assignment is always derived from the tail of the log, so
/// the log deliberately offers no way to reorder, remove, or edit entries.
/// The only mutation is [`AssignmentLog::append`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentLog<T> {
    entries: Vec<T>,
}

impl<T> AssignmentLog<T> {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a log from records already ordered oldest first, as delivered
    /// by the backend.
    #[must_use]
    pub const fn from_records(entries: Vec<T>) -> Self {
        Self { entries }
    }

    /// Appends a record as the newest entry.
    pub fn append(&mut self, record: T) {
        self.entries.push(record);
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.entries.last()
    }

    /// Returns the newest entry that satisfies `predicate`, scanning from the
    /// tail towards the oldest entry.
    pub fn latest_matching<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&&T) -> bool,
    {
        self.entries.iter().rev().find(predicate)
    }

    /// Iterates entries oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for AssignmentLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a AssignmentLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
