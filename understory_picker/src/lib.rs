// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_picker --heading-base-level=0

//! Understory Picker: the headless state core of a searchable, hierarchical picker.
//!
//! A picker (a "chosen"-style select box) shows a popup list of grouped choices,
//! filters it as the user types, lets the keyboard walk the visible items, and
//! keeps one or many chosen items. This crate owns that state and nothing else:
//! rendering, focus and real event listeners stay with the host.
//!
//! [`Picker`] combines the Understory building blocks:
//!
//! - [`understory_choice_tree`] for the dataset, its search filter and its
//!   flattened navigation order.
//! - [`understory_selection`] for the chosen items.
//! - [`understory_event_state`] for search debouncing, scroll-edge detection
//!   and listener bookkeeping.
//! - [`Pointer`] for the keyboard highlight.
//!
//! Every transition returns [`Effects`]: the provider calls and listener
//! changes the host must perform. Time is passed in as monotonic milliseconds,
//! so the whole picker is deterministic.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_choice_tree::{Dataset, Node};
//! use understory_picker::{Picker, PickerConfig, PickerEffect, PickerKey};
//! use understory_event_state::listeners::Listeners;
//!
//! let values: Dataset<&str, &str> = Dataset::from_nodes([
//!     Node::group("fruit", [Node::leaf("apple", "Apple"), Node::leaf("banana", "Banana")]),
//!     Node::group("veg", [Node::leaf("carrot", "Carrot")]),
//! ]);
//! let mut picker = Picker::with_values(PickerConfig::default(), values);
//!
//! // Arrow down on a closed picker opens it; the host attaches its listener.
//! let effects = picker.on_key(PickerKey::ArrowDown);
//! assert_eq!(effects.as_slice(), &[PickerEffect::Attach(Listeners::CLICK_OUTSIDE)]);
//!
//! // Type, walk to the only match, and confirm.
//! picker.set_search_text("an", 0);
//! picker.on_key(PickerKey::ArrowDown);
//! let effects = picker.on_key(PickerKey::Enter);
//! assert_eq!(
//!     effects.as_slice(),
//!     &[PickerEffect::SelectionChanged, PickerEffect::Detach(Listeners::CLICK_OUTSIDE)],
//! );
//! assert_eq!(picker.selection().single(), Some((&"banana", &"Banana")));
//! assert!(!picker.is_open());
//! ```
//!
//! ## External providers
//!
//! With [`PickerConfig::external_search`] the built-in filter is off: search text
//! is debounced and handed out as [`PickerEffect::Search`] from
//! [`Picker::poll`]. With [`PickerConfig::load_more`] scrolling the open list to
//! its end yields [`PickerEffect::LoadMore`]. Results come back through
//! [`Picker::set_values`].
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events from the picker and the crates it builds on.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod effect;
mod picker;
mod pointer;

pub use config::PickerConfig;
pub use effect::{Effects, PickerEffect, PickerEvent, PickerKey};
pub use picker::{Picker, PickerSnapshot};
pub use pointer::Pointer;
