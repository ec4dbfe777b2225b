// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Case-insensitive search filtering over a dataset.

use alloc::string::String;
use alloc::vec::Vec;

use crate::node::{Dataset, Node, SearchText};

/// Prunes a dataset to the branches containing a case-insensitive match for `query`.
///
/// For every node, in order:
/// - a group is filtered recursively and kept only if at least one leaf survives
///   below it;
/// - a leaf is kept iff its [`SearchText`] lowercased contains the lowercased query.
///
/// Leaves without search text, or with empty text, never match, not even the
/// empty query. The empty query matches every other leaf. Groups left without
/// any leaf are dropped.
/// Sibling order is preserved and the source dataset is left untouched.
///
/// ```rust
/// use understory_choice_tree::{Dataset, Node, filter_by_search};
///
/// let values = Dataset::from_nodes([
///     Node::group("fruit", [Node::leaf("apple", "Apple"), Node::leaf("banana", "Banana")]),
///     Node::group("veg", [Node::leaf("carrot", "Carrot")]),
/// ]);
/// let filtered = filter_by_search(&values, "AN");
/// assert_eq!(
///     filtered,
///     Dataset::from_nodes([Node::group("fruit", [Node::leaf("banana", "Banana")])]),
/// );
/// ```
pub fn filter_by_search<K, V>(values: &Dataset<K, V>, query: &str) -> Dataset<K, V>
where
    K: Clone,
    V: Clone + SearchText,
{
    let query = Query::new(query);
    let filtered: Dataset<K, V> = filter_nodes(values.nodes(), &query).into_iter().collect();
    #[cfg(feature = "tracing")]
    tracing::trace!(
        query = query.needle.as_str(),
        kept = filtered.len(),
        of = values.len(),
        "filtered dataset"
    );
    filtered
}

/// A lowercased query; empty matches every leaf that has text.
struct Query {
    needle: String,
}

impl Query {
    fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// Only leaves with non-empty text take part in search at all.
    fn matches<V: SearchText + ?Sized>(&self, value: &V) -> bool {
        value.search_text().is_some_and(|text| {
            !text.is_empty() && text.to_lowercase().contains(self.needle.as_str())
        })
    }
}

fn filter_nodes<K, V>(nodes: &[Node<K, V>], query: &Query) -> Vec<Node<K, V>>
where
    K: Clone,
    V: Clone + SearchText,
{
    let mut kept = Vec::new();
    for node in nodes {
        match node {
            Node::Leaf { key, value } => {
                if query.matches(value) {
                    kept.push(Node::Leaf {
                        key: key.clone(),
                        value: value.clone(),
                    });
                }
            }
            Node::Group { key, children } => {
                let children = filter_nodes(children, query);
                if !children.is_empty() {
                    kept.push(Node::Group {
                        key: key.clone(),
                        children,
                    });
                }
            }
        }
    }
    kept
}
