// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_selection --heading-base-level=0

//! Understory Selection: an ordered selection store for pickers and lists.
//!
//! [`Selection`] holds the keys a user has chosen, each with a snapshot of its
//! value taken at selection time. It is deliberately independent of whatever is
//! currently visible: filtering a list or replacing its data does not touch the
//! selection, and a selected entry keeps the value it was selected with.
//!
//! Two modes are supported, see [`SelectionMode`]:
//!
//! - **Single**: at most one entry. Selecting replaces the previous entry.
//! - **Multiple**: any number of entries in selection order (most recent last).
//!   [`Selection::remove_last`] pops the most recent entry, which is what a
//!   backspace in an empty tag input usually does.
//!
//! All operations are total: they never fail and report whether anything
//! changed through their return value.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_selection::{Selection, SelectionMode};
//!
//! let mut tags: Selection<&str, &str> = Selection::new(SelectionMode::Multiple);
//! assert!(tags.select("apple", "Apple"));
//! assert!(tags.select("banana", "Banana"));
//! // Selecting twice is a no-op.
//! assert!(!tags.select("apple", "Apple"));
//!
//! assert_eq!(tags.remove_last(), Some(("banana", "Banana")));
//! assert_eq!(tags.keys().copied().collect::<Vec<_>>(), ["apple"]);
//!
//! let mut choice: Selection<&str, &str> = Selection::new(SelectionMode::Single);
//! choice.select("apple", "Apple");
//! choice.select("carrot", "Carrot");
//! assert_eq!(choice.single(), Some((&"carrot", &"Carrot")));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events when the selection changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod selection;

pub use selection::{Selection, SelectionMode};
