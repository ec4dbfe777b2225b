// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first flattening of a dataset into an ordered key/value view.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::node::Dataset;

/// An ordered mapping from leaf key to leaf value.
///
/// Produced by [`flatten`]. The order is the depth-first, left-to-right order of
/// the leaves in the source dataset; it is the order in which a picker list is
/// navigated with the keyboard, so positions are meaningful and stable for a
/// given dataset.
#[derive(Clone, Debug)]
pub struct FlatView<K, V> {
    entries: Vec<(K, V)>,
    positions: HashMap<K, usize>,
}

impl<K, V> Default for FlatView<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for FlatView<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // Positions are derived from entries.
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for FlatView<K, V> {}

impl<K, V> FlatView<K, V> {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the view has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get(index).map(|(k, v)| (k, v))
    }

    /// Returns the key at `index`.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.entries.get(index).map(|(k, _)| k)
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the values in order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns the entries as an ordered slice.
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Consumes the view, returning its ordered entries.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K, V> FlatView<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, or overwrites the value of an existing key in place.
    ///
    /// An overwritten key keeps the position of its first insertion.
    /// Returns the previous value when the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&pos) = self.positions.get(&key) {
            return Some(core::mem::replace(&mut self.entries[pos].1, value));
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|pos| &self.entries[pos].1)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the position of `key` in flattening order.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }
}

impl<K, V> FromIterator<(K, V)> for FlatView<K, V>
where
    K: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut view = Self::new();
        for (key, value) in iter {
            view.insert(key, value);
        }
        view
    }
}

/// Flattens a dataset into its leaves, depth first and left to right.
///
/// Groups are descended into in order; every leaf contributes one `(key, value)`
/// entry. No filtering happens here and values are passed through unchanged.
///
/// Keys are expected to be unique. When two leaves share a key, the later leaf's
/// value replaces the earlier one at the earlier position.
///
/// ```rust
/// use understory_choice_tree::{Dataset, Node, flatten};
///
/// let values = Dataset::from_nodes([
///     Node::group(1_u32, [Node::leaf(2, "b"), Node::group(3, [Node::leaf(4, "d")])]),
///     Node::leaf(5, "e"),
/// ]);
/// let flat = flatten(&values);
/// assert_eq!(flat.keys().copied().collect::<Vec<_>>(), [2, 4, 5]);
/// ```
pub fn flatten<K, V>(values: &Dataset<K, V>) -> FlatView<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    let mut view = FlatView::new();
    for (key, value) in values.leaves() {
        view.insert(key.clone(), value.clone());
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(len = view.len(), "flattened dataset");
    view
}
