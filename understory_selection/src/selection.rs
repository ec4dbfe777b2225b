// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection store.

use core::hash::Hash;

use hashbrown::HashSet;
use smallvec::SmallVec;

/// Whether a [`Selection`] holds one entry or many.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// At most one entry; selecting replaces it.
    #[default]
    Single,
    /// Any number of entries, kept in selection order.
    Multiple,
}

/// Ordered store of selected `(key, value)` entries.
///
/// Values are snapshots taken when the entry was selected. Lookups are linear in
/// the number of selected entries, which stays small for typical pickers.
///
/// Invariants:
/// - keys are unique;
/// - in [`SelectionMode::Single`], `len() <= 1`;
/// - iteration order is selection order, most recent last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection<K, V> {
    mode: SelectionMode,
    entries: SmallVec<[(K, V); 4]>,
}

impl<K, V> Default for Selection<K, V> {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl<K, V> Selection<K, V> {
    /// Creates an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            entries: SmallVec::new(),
        }
    }

    /// Returns the selection mode.
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Returns `true` in [`SelectionMode::Multiple`].
    pub const fn is_multiple(&self) -> bool {
        matches!(self.mode, SelectionMode::Multiple)
    }

    /// Number of selected entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the selected entries in selection order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the selected keys in selection order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns the entries as a slice, in selection order.
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Returns the most recently selected entry.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.entries.last().map(|(k, v)| (k, v))
    }

    /// Returns the sole entry of a single selection.
    ///
    /// This is the label a closed single-choice picker shows. In multiple mode
    /// it returns `None`; use [`iter`](Self::iter) instead.
    pub fn single(&self) -> Option<(&K, &V)> {
        match self.mode {
            SelectionMode::Single => self.last(),
            SelectionMode::Multiple => None,
        }
    }

    /// Removes every entry.
    ///
    /// Returns `true` if the selection was not already empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.entries.is_empty();
        self.entries.clear();
        if changed {
            self.changed("clear");
        }
        changed
    }

    /// Removes and returns the most recently selected entry.
    ///
    /// Only applies in [`SelectionMode::Multiple`]; a single selection is left
    /// untouched and `None` is returned.
    pub fn remove_last(&mut self) -> Option<(K, V)> {
        if !self.is_multiple() {
            return None;
        }
        let removed = self.entries.pop();
        if removed.is_some() {
            self.changed("remove_last");
        }
        removed
    }

    #[cfg(feature = "tracing")]
    fn changed(&self, op: &'static str) {
        tracing::debug!(op, len = self.entries.len(), mode = ?self.mode, "selection changed");
    }

    #[cfg(not(feature = "tracing"))]
    #[inline(always)]
    fn changed(&self, _op: &'static str) {}
}

impl<K: PartialEq, V> Selection<K, V> {
    /// Returns `true` if `key` is selected.
    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Returns the value snapshot stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|pos| &self.entries[pos].1)
    }

    /// Returns the selection-order position of `key`.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Selects `key` with a snapshot of its `value`.
    ///
    /// If `key` is already selected nothing happens. Otherwise, a single selection
    /// is replaced and a multiple selection is appended to.
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, key: K, value: V) -> bool {
        if self.contains(&key) {
            return false;
        }
        if !self.is_multiple() {
            self.entries.clear();
        }
        self.entries.push((key, value));
        self.changed("select");
        true
    }

    /// Unselects `key`, returning its value snapshot if it was selected.
    pub fn unselect(&mut self, key: &K) -> Option<V> {
        let pos = self.position(key)?;
        let (_, value) = self.entries.remove(pos);
        self.changed("unselect");
        Some(value)
    }
}

impl<K: Eq + Hash, V> Selection<K, V> {
    /// Replaces the whole selection with `entries`, in order.
    ///
    /// Only applies in [`SelectionMode::Multiple`]; returns `false` in single mode.
    /// Repeated keys in `entries` keep their first occurrence. When the resulting
    /// keys equal the current ones, in the same order, the selection and its
    /// value snapshots are left untouched.
    ///
    /// Returns `true` if the selection changed.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> bool {
        if !self.is_multiple() {
            return false;
        }
        let mut candidates: SmallVec<[(K, V); 4]> = entries.into_iter().collect();
        let keep: SmallVec<[bool; 4]> = {
            let mut seen = HashSet::with_capacity(candidates.len());
            candidates.iter().map(|(k, _)| seen.insert(k)).collect()
        };
        if keep.contains(&false) {
            let mut keep = keep.into_iter();
            candidates.retain(|_| keep.next().unwrap_or(false));
        }
        if self.keys().eq(candidates.iter().map(|(k, _)| k)) {
            return false;
        }
        self.entries = candidates;
        self.changed("replace_all");
        true
    }
}
