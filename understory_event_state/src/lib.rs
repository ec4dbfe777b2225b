// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: small state machines that turn raw UI events into intent.
//!
//! Each module is a self-contained, deterministic state machine. None of them
//! own a clock, a timer, or an event loop: the host passes timestamps and
//! already-decoded event data in, and reads decisions back out. This keeps them
//! trivially testable and usable from any UI stack.
//!
//! - [`debounce`]: coalesce rapid changes (for example search text) into one
//!   delayed notification after a quiet period.
//! - [`scroll_edge`]: detect when a scrolled list reaches its end, to trigger
//!   incremental loading; plus a helper to center an item in a viewport.
//! - [`listeners`]: track which host listeners (click-outside, list scroll) a
//!   widget currently holds, so every acquisition has a matching release.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_event_state::debounce::Debouncer;
//!
//! let mut search: Debouncer<&str> = Debouncer::new(300);
//! search.notify("a", 1_000);
//! search.notify("ab", 1_100);
//! search.notify("abc", 1_200);
//!
//! // Nothing fires during the quiet period…
//! assert_eq!(search.poll(1_400), None);
//! // …and only the latest value fires once it elapses.
//! assert_eq!(search.poll(1_500), Some("abc"));
//! assert_eq!(search.poll(2_000), None);
//! ```
//!
//! Timestamps are monotonic milliseconds chosen by the host.
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events from the state machines.
//!
//! This crate is `no_std`.

#![no_std]

pub mod debounce;
pub mod listeners;
pub mod scroll_edge;
