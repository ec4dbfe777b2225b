// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_choice_tree --heading-base-level=0

//! Understory Choice Tree: hierarchical choice datasets for picker widgets.
//!
//! A picker presents a nested set of labeled choices: groups of groups, down to
//! selectable leaves. This crate provides the data side of such a widget:
//!
//! - [`Node`] and [`Dataset`]: a typed tree of leaves (`key → value`) and groups
//!   (`key → ordered children`). Sibling order is insertion order and is preserved
//!   by every operation in this crate.
//! - [`flatten`]: a depth-first, left-to-right projection of the leaves into a
//!   [`FlatView`], the ordered key/value list that keyboard navigation indexes into.
//! - [`filter_by_search`]: a case-insensitive substring filter that prunes the tree
//!   down to the branches containing at least one matching leaf.
//! - [`SearchText`]: how a leaf value exposes text to the filter. Values without
//!   text (numbers, "null", icons, …) never match any query, not even the
//!   empty one, but still flatten and can still be selected.
//!
//! Keys are expected to be unique across the whole tree. When they are not,
//! flattening keeps the first position and the last value for a key; use
//! [`Dataset::check_unique_keys`] to reject such datasets up front.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_choice_tree::{Dataset, Node, filter_by_search, flatten};
//!
//! let values: Dataset<&str, &str> = Dataset::from_nodes([
//!     Node::group("fruit", [Node::leaf("apple", "Apple"), Node::leaf("banana", "Banana")]),
//!     Node::group("veg", [Node::leaf("carrot", "Carrot")]),
//! ]);
//!
//! // Only the "fruit" group keeps a match for "an".
//! let filtered = filter_by_search(&values, "an");
//! assert_eq!(filtered.len(), 1);
//!
//! let flat = flatten(&filtered);
//! assert_eq!(flat.keys().copied().collect::<Vec<_>>(), ["banana"]);
//! assert_eq!(flat.get(&"banana"), Some(&"Banana"));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for flattening and filtering.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod filter;
mod flatten;
mod node;

pub use filter::filter_by_search;
pub use flatten::{FlatView, flatten};
pub use node::{Dataset, DepthFirst, DuplicateKey, Node, SearchText};
