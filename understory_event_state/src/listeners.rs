// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped host listeners.
//!
//! Popups and dropdowns need host-level listeners while they are open: a
//! document-wide click listener to close on outside clicks, and a scroll listener
//! on their list. Those listeners must never outlive the open state that asked
//! for them.
//!
//! [`ListenerScope`] is the bookkeeping for that: the widget *acquires* the set of
//! [`Listeners`] it needs when it opens and *releases* them on every exit path.
//! Each call returns exactly the flags whose state changed, so the host attaches
//! or detaches each listener once.
//!
//! ```
//! use understory_event_state::listeners::{ListenerScope, Listeners};
//!
//! let mut scope = ListenerScope::new();
//! assert_eq!(scope.acquire(Listeners::CLICK_OUTSIDE | Listeners::LIST_SCROLL),
//!            Listeners::CLICK_OUTSIDE | Listeners::LIST_SCROLL);
//! // Already held: nothing new to attach.
//! assert_eq!(scope.acquire(Listeners::CLICK_OUTSIDE), Listeners::empty());
//!
//! // Release everything on close.
//! assert_eq!(scope.release_all(), Listeners::CLICK_OUTSIDE | Listeners::LIST_SCROLL);
//! assert!(scope.active().is_empty());
//! ```

bitflags::bitflags! {
    /// Host listeners a widget may hold.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        /// Document-wide pointer listener that reports clicks outside the widget.
        const CLICK_OUTSIDE = 0b0000_0001;
        /// Scroll listener on the widget's list, used for incremental loading.
        const LIST_SCROLL   = 0b0000_0010;
    }
}

impl Default for Listeners {
    fn default() -> Self {
        Self::empty()
    }
}

/// Set of listeners currently held by one widget instance.
#[derive(Clone, Debug, Default)]
pub struct ListenerScope {
    active: Listeners,
}

impl ListenerScope {
    /// Create a scope holding nothing.
    pub const fn new() -> Self {
        Self {
            active: Listeners::empty(),
        }
    }

    /// Listeners currently held.
    pub const fn active(&self) -> Listeners {
        self.active
    }

    /// Check whether all of `listeners` are held.
    pub fn holds(&self, listeners: Listeners) -> bool {
        self.active.contains(listeners)
    }

    /// Acquire `listeners`.
    ///
    /// # Returns
    /// The listeners that were not held before and must now be attached.
    pub fn acquire(&mut self, listeners: Listeners) -> Listeners {
        let added = listeners.difference(self.active);
        self.active.insert(added);
        #[cfg(feature = "tracing")]
        if !added.is_empty() {
            tracing::trace!(added = ?added, active = ?self.active, "listeners acquired");
        }
        added
    }

    /// Release `listeners`.
    ///
    /// # Returns
    /// The listeners that were held and must now be detached.
    pub fn release(&mut self, listeners: Listeners) -> Listeners {
        let removed = listeners.intersection(self.active);
        self.active.remove(removed);
        #[cfg(feature = "tracing")]
        if !removed.is_empty() {
            tracing::trace!(removed = ?removed, active = ?self.active, "listeners released");
        }
        removed
    }

    /// Release every held listener.
    pub fn release_all(&mut self) -> Listeners {
        self.release(Listeners::all())
    }
}
