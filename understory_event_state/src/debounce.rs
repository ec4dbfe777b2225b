// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debouncing with host-supplied time.
//!
//! A [`Debouncer`] holds at most one pending value. Every [`notify`](Debouncer::notify)
//! cancels the pending value (if any) and schedules the new one to fire after the
//! quiet period. The host calls [`poll`](Debouncer::poll) from its event loop or
//! timer callback; once the deadline has passed, `poll` hands the value out exactly
//! once.
//!
//! ```
//! use understory_event_state::debounce::Debouncer;
//!
//! let mut d: Debouncer<u32> = Debouncer::new(100);
//! d.notify(1, 0);
//! assert_eq!(d.deadline(), Some(100));
//!
//! // A new value before the deadline replaces the pending one and restarts the wait.
//! assert_eq!(d.notify(2, 50), Some(1));
//! assert_eq!(d.poll(100), None);
//! assert_eq!(d.poll(150), Some(2));
//! ```
//!
//! ## Rules
//!
//! 1. **Single slot**: at most one value is pending; `notify` replaces it.
//! 2. **Restart**: the deadline is always `now + delay` of the latest `notify`.
//! 3. **Fire once**: `poll(now)` with `now >= deadline` returns the value and clears it.
//! 4. **Cancel**: [`cancel`](Debouncer::cancel) drops the pending value without firing.
//!
//! Timestamps are monotonic milliseconds. A timestamp earlier than a previous one
//! is not an error; it simply yields a later-than-expected deadline.

/// Default quiet period used for search-as-you-type, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Debounce state machine with a single cancellable pending value.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    /// Quiet period in milliseconds.
    delay: u64,
    pending: Option<Pending<T>>,
}

/// A scheduled value and the time it becomes due.
#[derive(Clone, Debug)]
struct Pending<T> {
    value: T,
    deadline: u64,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period in milliseconds.
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period in milliseconds.
    pub const fn delay(&self) -> u64 {
        self.delay
    }

    /// Change the quiet period.
    ///
    /// Applies to subsequent `notify` calls; a pending deadline is kept.
    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
    }

    /// Schedule `value` to fire after the quiet period, starting at `now`.
    ///
    /// Returns the previously pending value, which is cancelled.
    pub fn notify(&mut self, value: T, now: u64) -> Option<T> {
        let deadline = now.saturating_add(self.delay);
        #[cfg(feature = "tracing")]
        tracing::trace!(now, deadline, replaced = self.pending.is_some(), "debounce scheduled");
        self.pending
            .replace(Pending { value, deadline })
            .map(|p| p.value)
    }

    /// Fire the pending value if its deadline has passed.
    ///
    /// # Returns
    /// `Some(value)` exactly once per scheduled value, on the first poll at or after
    /// its deadline; `None` otherwise.
    pub fn poll(&mut self, now: u64) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(now, deadline, "debounce fired");
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Check whether a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time at which the pending value becomes due, if any.
    ///
    /// Hosts with a timer facility can arm a single timer for this instant.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// The pending value, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }
}
