// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset types: nodes, the top-level dataset, and leaf search text.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::slice;

use hashbrown::HashSet;

use crate::filter::filter_by_search;
use crate::flatten::{FlatView, flatten};

/// A node of a choice dataset.
///
/// A node is either a selectable [`Leaf`](Node::Leaf) or a [`Group`](Node::Group)
/// of child nodes. Groups are never selectable themselves; they only give the
/// leaves structure (headings in a rendered list).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node<K, V> {
    /// A selectable choice.
    Leaf {
        /// Key of the choice, unique within the dataset.
        key: K,
        /// Value of the choice, typically its display label.
        value: V,
    },
    /// A labeled group of choices.
    Group {
        /// Key of the group, unique within the dataset.
        key: K,
        /// Children in display order.
        children: Vec<Node<K, V>>,
    },
}

impl<K, V> Node<K, V> {
    /// Creates a leaf node.
    pub const fn leaf(key: K, value: V) -> Self {
        Self::Leaf { key, value }
    }

    /// Creates a group node from its children, keeping their order.
    pub fn group(key: K, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Group {
            key,
            children: children.into_iter().collect(),
        }
    }

    /// Returns the key of this node.
    pub const fn key(&self) -> &K {
        match self {
            Self::Leaf { key, .. } | Self::Group { key, .. } => key,
        }
    }

    /// Returns `true` for leaves.
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Returns the value of a leaf, or `None` for groups.
    pub const fn value(&self) -> Option<&V> {
        match self {
            Self::Leaf { value, .. } => Some(value),
            Self::Group { .. } => None,
        }
    }

    /// Returns the children of a group; leaves have none.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Group { children, .. } => children,
        }
    }
}

/// A hierarchical dataset: the ordered, unkeyed top level of a choice tree.
///
/// The dataset is owned by the caller. Operations in this crate never mutate it;
/// filtering produces a new, pruned dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset<K, V> {
    nodes: Vec<Node<K, V>>,
}

impl<K, V> Default for Dataset<K, V> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<K, V> FromIterator<Node<K, V>> for Dataset<K, V> {
    fn from_iter<I: IntoIterator<Item = Node<K, V>>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<K, V> Dataset<K, V> {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dataset from its top-level nodes, keeping their order.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node<K, V>>) -> Self {
        nodes.into_iter().collect()
    }

    /// Appends a top-level node.
    pub fn push(&mut self, node: Node<K, V>) {
        self.nodes.push(node);
    }

    /// Returns the top-level nodes.
    pub fn nodes(&self) -> &[Node<K, V>] {
        &self.nodes
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the dataset has no top-level nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node (groups and leaves) in depth-first, left-to-right
    /// pre-order, together with its depth (top-level nodes have depth 0).
    pub fn depth_first(&self) -> DepthFirst<'_, K, V> {
        DepthFirst {
            stack: alloc::vec![self.nodes.iter()],
        }
    }

    /// Iterates over the leaves as `(key, value)` pairs in flattening order.
    pub fn leaves(&self) -> impl Iterator<Item = (&K, &V)> {
        self.depth_first().filter_map(|(_, node)| match node {
            Node::Leaf { key, value } => Some((key, value)),
            Node::Group { .. } => None,
        })
    }

    /// Counts leaves across all depths.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }
}

impl<K, V> Dataset<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Flattens this dataset; see [`flatten`].
    pub fn flatten(&self) -> FlatView<K, V> {
        flatten(self)
    }

    /// Prunes this dataset to the given query; see [`filter_by_search`].
    pub fn filtered(&self, query: &str) -> Self
    where
        V: SearchText,
    {
        filter_by_search(self, query)
    }

    /// Checks that every key (groups and leaves) occurs at most once.
    ///
    /// Returns the first repeated key in depth-first order.
    pub fn check_unique_keys(&self) -> Result<(), DuplicateKey<K>> {
        let mut seen: HashSet<&K> = HashSet::new();
        for (_, node) in self.depth_first() {
            if !seen.insert(node.key()) {
                return Err(DuplicateKey {
                    key: node.key().clone(),
                });
            }
        }
        Ok(())
    }
}

/// Depth-first pre-order iterator over a [`Dataset`].
///
/// Created by [`Dataset::depth_first`]. Uses an explicit stack, so deep datasets
/// do not grow the call stack.
#[derive(Clone, Debug)]
pub struct DepthFirst<'a, K, V> {
    stack: Vec<slice::Iter<'a, Node<K, V>>>,
}

impl<'a, K, V> Iterator for DepthFirst<'a, K, V> {
    type Item = (usize, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    if let Node::Group { children, .. } = node {
                        self.stack.push(children.iter());
                    }
                    return Some((depth, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Error returned by [`Dataset::check_unique_keys`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateKey<K> {
    /// The key that occurs more than once.
    pub key: K,
}

impl<K: fmt::Debug> fmt::Display for DuplicateKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key {:?} occurs more than once in the dataset", self.key)
    }
}

impl<K: fmt::Debug> core::error::Error for DuplicateKey<K> {}

/// Text a leaf value exposes to the default search filter.
///
/// Returning `None` (or an empty string) means the value has no searchable text:
/// the default filter drops it for every query, including the empty one. It is
/// still flattened and can still be selected.
pub trait SearchText {
    /// Returns the searchable text of this value, if any.
    fn search_text(&self) -> Option<&str>;
}

impl SearchText for str {
    fn search_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl SearchText for String {
    fn search_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl SearchText for Box<str> {
    fn search_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl SearchText for Cow<'_, str> {
    fn search_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: SearchText + ?Sized> SearchText for &T {
    fn search_text(&self) -> Option<&str> {
        (**self).search_text()
    }
}

impl<T: SearchText> SearchText for Option<T> {
    fn search_text(&self) -> Option<&str> {
        self.as_ref().and_then(T::search_text)
    }
}
