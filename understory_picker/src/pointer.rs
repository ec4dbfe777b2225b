// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation pointer over a flattened list.

/// Highlighted position within a list of `len` items, or none.
///
/// Moves are saturating: a move that would leave `[0, len - 1]` is rejected and
/// the pointer stays where it was. Moving down from none lands on the first item.
///
/// ```
/// use understory_picker::Pointer;
///
/// let mut p = Pointer::new();
/// assert!(!p.move_by(-1, 3));
/// assert!(p.move_by(1, 3));
/// assert!(p.move_by(1, 3));
/// assert_eq!(p.get(), Some(1));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pointer {
    index: Option<usize>,
}

impl Pointer {
    /// Create a pointer that points at nothing.
    pub const fn new() -> Self {
        Self { index: None }
    }

    /// Current index, if any.
    pub const fn get(&self) -> Option<usize> {
        self.index
    }

    /// Whether the pointer points at an item.
    pub const fn is_set(&self) -> bool {
        self.index.is_some()
    }

    /// Point at nothing.
    ///
    /// Returns `true` if the pointer was set.
    pub fn reset(&mut self) -> bool {
        self.index.take().is_some()
    }

    /// Move by `delta` within a list of `len` items.
    ///
    /// # Returns
    /// `true` if the pointer moved. Targets outside `[0, len - 1]` are rejected.
    pub fn move_by(&mut self, delta: isize, len: usize) -> bool {
        // None behaves as -1.
        let current = self.index.map_or(-1, |i| i as isize);
        let Some(target) = current.checked_add(delta) else {
            return false;
        };
        let Ok(target) = usize::try_from(target) else {
            return false;
        };
        if target >= len || Some(target) == self.index {
            return false;
        }
        self.index = Some(target);
        true
    }

    /// Drop the index if it no longer fits a list of `len` items.
    ///
    /// Returns `true` if the pointer was reset.
    pub fn clamp_to(&mut self, len: usize) -> bool {
        match self.index {
            Some(i) if i >= len => self.reset(),
            _ => false,
        }
    }
}
