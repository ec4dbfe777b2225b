// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picker configuration.

use understory_event_state::debounce::DEFAULT_DEBOUNCE_MS;
use understory_selection::SelectionMode;

/// Behavior switches for a [`Picker`](crate::Picker).
///
/// Providers are not stored here. The flags only record whether the host has
/// them; the picker then asks the host to call them through
/// [`PickerEffect`](crate::PickerEffect)s.
///
/// ```
/// use understory_picker::PickerConfig;
///
/// let config = PickerConfig::default()
///     .with_multiple(true)
///     .with_external_search(true)
///     .with_search_debounce_ms(150);
/// assert!(config.multiple);
/// assert_eq!(config.search_debounce_ms, 150);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PickerConfig {
    /// Allow any number of selected items instead of at most one.
    pub multiple: bool,
    /// The host has a search provider.
    ///
    /// Disables the built-in filter; search text is debounced and reported
    /// through [`PickerEffect::Search`](crate::PickerEffect::Search).
    pub external_search: bool,
    /// The host has a load-more provider.
    ///
    /// Scrolling the open list to its end reports
    /// [`PickerEffect::LoadMore`](crate::PickerEffect::LoadMore).
    pub load_more: bool,
    /// Quiet period for external search, in milliseconds.
    pub search_debounce_ms: u64,
    /// Distance before the end of the list that already counts as the end.
    pub scroll_edge_threshold: f64,
    /// Also drop a pending debounced search when the popup closes.
    pub cancel_search_on_close: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            external_search: false,
            load_more: false,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            scroll_edge_threshold: 0.0,
            cancel_search_on_close: false,
        }
    }
}

impl PickerConfig {
    /// Set multiple selection.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Declare whether the host provides external search.
    pub fn with_external_search(mut self, external_search: bool) -> Self {
        self.external_search = external_search;
        self
    }

    /// Declare whether the host provides incremental loading.
    pub fn with_load_more(mut self, load_more: bool) -> Self {
        self.load_more = load_more;
        self
    }

    /// Set the external search quiet period in milliseconds.
    pub fn with_search_debounce_ms(mut self, delay: u64) -> Self {
        self.search_debounce_ms = delay;
        self
    }

    /// Set the scroll-edge tolerance.
    pub fn with_scroll_edge_threshold(mut self, threshold: f64) -> Self {
        self.scroll_edge_threshold = threshold;
        self
    }

    /// Set whether closing cancels a pending debounced search.
    pub fn with_cancel_search_on_close(mut self, cancel: bool) -> Self {
        self.cancel_search_on_close = cancel;
        self
    }

    /// Selection mode implied by [`multiple`](Self::multiple).
    pub fn selection_mode(&self) -> SelectionMode {
        if self.multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }
}
