// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The picker state machine.

use alloc::string::String;
use core::hash::Hash;

use hashbrown::HashSet;
use understory_choice_tree::{Dataset, FlatView, SearchText, filter_by_search, flatten};
use understory_event_state::debounce::Debouncer;
use understory_event_state::listeners::{ListenerScope, Listeners};
use understory_event_state::scroll_edge::{ScrollEdge, ScrollMetrics};
use understory_selection::Selection;

use crate::config::PickerConfig;
use crate::effect::{Effects, PickerEffect, PickerEvent, PickerKey};
use crate::pointer::Pointer;

/// State of one searchable, hierarchical picker.
///
/// Every entry point that changes state returns the [`Effects`] the host must
/// execute: calling providers and attaching or detaching host listeners. The
/// picker never calls out by itself.
///
/// Entry points without a `now` argument schedule timers against the latest
/// timestamp seen by [`set_search_text`](Self::set_search_text),
/// [`poll`](Self::poll) or [`handle`](Self::handle).
///
/// ## Invariants
///
/// - Host listeners are held only while the popup is open. Every path that
///   closes the popup (including [`teardown`](Self::teardown)) detaches
///   exactly the set that was attached.
/// - The pointer is reset whenever the popup opens or closes and whenever the
///   search text changes.
/// - With an external search provider, closing with a non-empty search text
///   asks the provider again with the empty text, so the host's values match
///   the cleared search box.
/// - The visible dataset and its flattened view are recomputed whenever the
///   values or the search text change.
#[derive(Clone, Debug)]
pub struct Picker<K, V> {
    config: PickerConfig,
    values: Dataset<K, V>,
    /// Filtered projection of `values`; `None` when the host searches.
    filtered: Option<Dataset<K, V>>,
    flat: FlatView<K, V>,
    open: bool,
    search_text: String,
    pointer: Pointer,
    selection: Selection<K, V>,
    search: Debouncer<String>,
    scroll_edge: ScrollEdge,
    listeners: ListenerScope,
    expanded: HashSet<K>,
    loading: bool,
    /// Latest host timestamp seen, in milliseconds.
    clock: u64,
}

/// Read-only view of a [`Picker`] for rendering.
#[derive(Debug)]
pub struct PickerSnapshot<'a, K, V> {
    /// Whether the popup is open.
    pub open: bool,
    /// The dataset to render: filtered by the search text unless the host searches.
    pub values: &'a Dataset<K, V>,
    /// Flattened leaves of [`values`](Self::values), in navigation order.
    pub flat: &'a FlatView<K, V>,
    /// Chosen items.
    pub selection: &'a Selection<K, V>,
    /// Index of the highlighted item in [`flat`](Self::flat).
    pub pointer: Option<usize>,
    /// Key of the highlighted item.
    pub pointed_key: Option<&'a K>,
    /// Current search text.
    pub search_text: &'a str,
    /// Whether the host reported that it is loading data.
    pub loading: bool,
    /// Host listeners currently attached.
    pub listeners: Listeners,
}

impl<K, V> PickerSnapshot<'_, K, V> {
    /// Whether there is nothing to show, i.e. the "no results" state.
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

impl<K, V> Default for Picker<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + SearchText,
{
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}

impl<K, V> Picker<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + SearchText,
{
    /// Create a closed picker with no values.
    pub fn new(config: PickerConfig) -> Self {
        Self::with_values(config, Dataset::new())
    }

    /// Create a closed picker over `values`.
    pub fn with_values(config: PickerConfig, values: Dataset<K, V>) -> Self {
        let mut picker = Self {
            selection: Selection::new(config.selection_mode()),
            search: Debouncer::new(config.search_debounce_ms),
            scroll_edge: ScrollEdge::with_threshold(config.scroll_edge_threshold),
            config,
            values,
            filtered: None,
            flat: FlatView::new(),
            open: false,
            search_text: String::new(),
            pointer: Pointer::new(),
            listeners: ListenerScope::new(),
            expanded: HashSet::new(),
            loading: false,
            clock: 0,
        };
        picker.refresh();
        picker
    }

    /// The configuration this picker was built with.
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Values as supplied by the host.
    pub fn values(&self) -> &Dataset<K, V> {
        &self.values
    }

    /// Values to render, after the built-in search filter if it applies.
    pub fn visible_values(&self) -> &Dataset<K, V> {
        self.filtered.as_ref().unwrap_or(&self.values)
    }

    /// Flattened visible leaves, in navigation order.
    pub fn flat(&self) -> &FlatView<K, V> {
        &self.flat
    }

    /// Chosen items.
    pub fn selection(&self) -> &Selection<K, V> {
        &self.selection
    }

    /// Whether the popup is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current search text.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Index of the highlighted item.
    pub fn pointer(&self) -> Option<usize> {
        self.pointer.get()
    }

    /// Key of the highlighted item.
    pub fn pointed_key(&self) -> Option<&K> {
        self.pointer.get().and_then(|i| self.flat.key_at(i))
    }

    /// Whether the host reported that it is loading data.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Host listeners currently attached.
    pub fn active_listeners(&self) -> Listeners {
        self.listeners.active()
    }

    /// When the pending external search becomes due, if any.
    ///
    /// Hosts with a timer facility can arm a single timer for this instant and
    /// call [`poll`](Self::poll) when it fires.
    pub fn search_deadline(&self) -> Option<u64> {
        self.search.deadline()
    }

    /// Borrow the state needed to render the widget.
    pub fn snapshot(&self) -> PickerSnapshot<'_, K, V> {
        PickerSnapshot {
            open: self.open,
            values: self.visible_values(),
            flat: &self.flat,
            selection: &self.selection,
            pointer: self.pointer.get(),
            pointed_key: self.pointed_key(),
            search_text: &self.search_text,
            loading: self.loading,
            listeners: self.listeners.active(),
        }
    }

    /// Open the popup.
    ///
    /// Attaches the click-outside listener, and the list scroll listener when
    /// incremental loading is configured.
    pub fn open(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.open {
            return effects;
        }
        self.open = true;
        self.pointer.reset();
        let mut wanted = Listeners::CLICK_OUTSIDE;
        if self.config.load_more {
            wanted |= Listeners::LIST_SCROLL;
            self.scroll_edge.rebind();
        }
        let added = self.listeners.acquire(wanted);
        if !added.is_empty() {
            effects.push(PickerEffect::Attach(added));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(listeners = ?added, "picker opened");
        effects
    }

    /// Close the popup.
    ///
    /// Detaches every listener, resets the pointer and clears the search text.
    /// An external search provider is asked again with the empty text.
    pub fn close(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.close_into(&mut effects, true);
        effects
    }

    /// Open the popup if closed, close it if open.
    pub fn toggle(&mut self) -> Effects {
        if self.open { self.close() } else { self.open() }
    }

    /// React to a click outside the widget.
    pub fn clicked_outside(&mut self) -> Effects {
        self.close()
    }

    /// Replace the search text.
    ///
    /// Unchanged text is ignored. Otherwise the pointer resets and either the
    /// built-in filter reruns or, with an external search provider, the text is
    /// scheduled for [`PickerEffect::Search`] after the debounce delay.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: u64) -> Effects {
        self.clock = now;
        let text = text.into();
        if text == self.search_text {
            return Effects::new();
        }
        self.search_text = text;
        self.pointer.reset();
        if self.open && self.config.load_more {
            self.scroll_edge.rebind();
        }
        if self.config.external_search {
            self.search.notify(self.search_text.clone(), now);
        } else {
            self.refresh();
        }
        // A zero delay fires right away.
        self.poll(now)
    }

    /// Choose the visible item with `key` and close the popup.
    ///
    /// Keys that are already chosen or not visible are ignored.
    pub fn select(&mut self, key: &K) -> Effects {
        let mut effects = Effects::new();
        if self.selection.contains(key) {
            return effects;
        }
        let Some(value) = self.flat.get(key) else {
            return effects;
        };
        self.selection.select(key.clone(), value.clone());
        effects.push(PickerEffect::SelectionChanged);
        self.close_into(&mut effects, true);
        effects
    }

    /// Remove `key` from the selection. The popup stays as it is.
    pub fn unselect(&mut self, key: &K) -> Effects {
        let mut effects = Effects::new();
        if self.selection.unselect(key).is_some() {
            effects.push(PickerEffect::SelectionChanged);
        }
        effects
    }

    /// Remove the most recently chosen item.
    ///
    /// Only applies in multiple mode and while the search text is empty.
    pub fn remove_last(&mut self) -> Effects {
        let mut effects = Effects::new();
        if !self.search_text.is_empty() {
            return effects;
        }
        if self.selection.remove_last().is_some() {
            effects.push(PickerEffect::SelectionChanged);
        }
        effects
    }

    /// Move the pointer by `delta` within the visible items.
    ///
    /// Returns `true` if it moved; moves past either end are rejected.
    pub fn move_pointer(&mut self, delta: isize) -> bool {
        self.pointer.move_by(delta, self.flat.len())
    }

    /// Choose the highlighted item. Does nothing when no item is highlighted.
    pub fn commit(&mut self) -> Effects {
        match self.pointed_key().cloned() {
            Some(key) => self.select(&key),
            None => Effects::new(),
        }
    }

    /// Choose every visible item, in navigation order, and close the popup.
    ///
    /// Multiple mode only.
    pub fn select_all_visible(&mut self) -> Effects {
        let mut effects = Effects::new();
        if !self.selection.is_multiple() {
            return effects;
        }
        let entries = self.flat.iter().map(|(k, v)| (k.clone(), v.clone()));
        if self.selection.replace_all(entries) {
            effects.push(PickerEffect::SelectionChanged);
        }
        self.close_into(&mut effects, true);
        effects
    }

    /// Empty the selection and close the popup.
    pub fn clear_selection(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.selection.clear() {
            effects.push(PickerEffect::SelectionChanged);
        }
        self.close_into(&mut effects, true);
        effects
    }

    /// Handle a navigation key.
    pub fn on_key(&mut self, key: PickerKey) -> Effects {
        match key {
            PickerKey::ArrowUp => {
                self.move_pointer(-1);
                Effects::new()
            }
            PickerKey::ArrowDown if !self.open => self.open(),
            PickerKey::ArrowDown => {
                self.move_pointer(1);
                Effects::new()
            }
            PickerKey::Enter => self.commit(),
            PickerKey::Backspace => self.remove_last(),
        }
    }

    /// Handle a scroll tick of the open list.
    ///
    /// Reports [`PickerEffect::LoadMore`] with the current search text when the
    /// list is scrolled to its end and incremental loading is configured.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Effects {
        let mut effects = Effects::new();
        if self.scroll_edge.on_scroll(metrics) {
            effects.push(PickerEffect::LoadMore(self.search_text.clone()));
        }
        effects
    }

    /// Fire the debounced external search if it is due at `now`.
    pub fn poll(&mut self, now: u64) -> Effects {
        self.clock = now;
        let mut effects = Effects::new();
        if let Some(text) = self.search.poll(now) {
            effects.push(PickerEffect::Search(text));
        }
        effects
    }

    /// Release everything before the widget goes away.
    ///
    /// Closes the popup, detaching every listener, and drops any pending search.
    pub fn teardown(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.close_into(&mut effects, false);
        self.search.cancel();
        #[cfg(feature = "tracing")]
        tracing::debug!("picker torn down");
        effects
    }

    /// Expand a collapsed group or collapse an expanded one.
    ///
    /// Returns whether the group is now explicitly expanded.
    pub fn toggle_group(&mut self, key: &K) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        }
    }

    /// Whether the group with `key` should render its children.
    ///
    /// Every group is forced open while searching or while an item is
    /// highlighted, so matches and the pointer are always visible.
    pub fn is_group_expanded(&self, key: &K) -> bool {
        !self.search_text.is_empty() || self.pointer.is_set() || self.expanded.contains(key)
    }

    /// Replace the values, for example with fresh search or load-more results.
    ///
    /// Chosen items are kept. The pointer survives if it still fits.
    pub fn set_values(&mut self, values: Dataset<K, V>) {
        self.values = values;
        self.refresh();
        self.pointer.clamp_to(self.flat.len());
    }

    /// Record whether the host is loading data.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Apply any [`PickerEvent`] and return its effects.
    pub fn handle(&mut self, event: PickerEvent<K, V>, now: u64) -> Effects {
        self.clock = now;
        match event {
            PickerEvent::Open => self.open(),
            PickerEvent::Close => self.close(),
            PickerEvent::Toggle => self.toggle(),
            PickerEvent::ClickedOutside => self.clicked_outside(),
            PickerEvent::SearchText(text) => self.set_search_text(text, now),
            PickerEvent::Select(key) => self.select(&key),
            PickerEvent::Unselect(key) => self.unselect(&key),
            PickerEvent::RemoveLast => self.remove_last(),
            PickerEvent::MovePointer(delta) => {
                self.move_pointer(delta);
                Effects::new()
            }
            PickerEvent::Commit => self.commit(),
            PickerEvent::SelectAllVisible => self.select_all_visible(),
            PickerEvent::ClearSelection => self.clear_selection(),
            PickerEvent::Key(key) => self.on_key(key),
            PickerEvent::Scroll(metrics) => self.on_scroll(metrics),
            PickerEvent::Tick => self.poll(now),
            PickerEvent::ToggleGroup(key) => {
                self.toggle_group(&key);
                Effects::new()
            }
            PickerEvent::SetValues(values) => {
                self.set_values(values);
                Effects::new()
            }
            PickerEvent::SetLoading(loading) => {
                self.set_loading(loading);
                Effects::new()
            }
            PickerEvent::Teardown => self.teardown(),
        }
    }

    /// `requery` asks an external search provider for the cleared search text.
    fn close_into(&mut self, effects: &mut Effects, requery: bool) {
        if !self.open {
            return;
        }
        self.open = false;
        self.pointer.reset();
        self.scroll_edge.unbind();
        let removed = self.listeners.release_all();
        if !removed.is_empty() {
            effects.push(PickerEffect::Detach(removed));
        }
        if self.config.cancel_search_on_close {
            self.search.cancel();
        }
        if !self.search_text.is_empty() {
            self.search_text.clear();
            if !self.config.external_search {
                self.refresh();
            } else if requery {
                if self.config.cancel_search_on_close {
                    effects.push(PickerEffect::Search(String::new()));
                } else {
                    self.search.notify(String::new(), self.clock);
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(listeners = ?removed, "picker closed");
    }

    fn refresh(&mut self) {
        if !self.config.external_search {
            self.filtered = Some(filter_by_search(&self.values, &self.search_text));
        }
        self.flat = flatten(self.visible_values());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use understory_choice_tree::Node;

    fn produce() -> Dataset<&'static str, &'static str> {
        Dataset::from_nodes([
            Node::group(
                "fruit",
                [Node::leaf("apple", "Apple"), Node::leaf("banana", "Banana")],
            ),
            Node::group("veg", [Node::leaf("carrot", "Carrot")]),
        ])
    }

    fn picker(config: PickerConfig) -> Picker<&'static str, &'static str> {
        Picker::with_values(config, produce())
    }

    fn keys(p: &Picker<&'static str, &'static str>) -> Vec<&'static str> {
        p.selection().keys().copied().collect()
    }

    #[test]
    fn search_prunes_tree_and_view() {
        let mut p = picker(PickerConfig::default());
        p.open();
        p.set_search_text("an", 0);
        assert_eq!(p.visible_values().len(), 1);
        assert_eq!(p.visible_values().nodes()[0].key(), &"fruit");
        assert_eq!(p.flat().keys().copied().collect::<Vec<_>>(), ["banana"]);
        assert_eq!(p.values().leaf_count(), 3);
    }

    #[test]
    fn pointer_walk_then_commit_selects_second_item() {
        let mut p = picker(PickerConfig::default());
        p.open();
        assert!(!p.move_pointer(-1));
        assert_eq!(p.pointer(), None);
        assert!(p.move_pointer(1));
        assert_eq!(p.pointer(), Some(0));
        assert!(p.move_pointer(1));
        assert_eq!(p.pointer(), Some(1));

        let effects = p.commit();
        assert_eq!(
            effects.as_slice(),
            &[
                PickerEffect::SelectionChanged,
                PickerEffect::Detach(Listeners::CLICK_OUTSIDE),
            ]
        );
        assert_eq!(p.selection().single(), Some((&"banana", &"Banana")));
        assert!(!p.is_open());
        assert_eq!(p.pointer(), None);
    }

    #[test]
    fn commit_without_pointer_is_noop() {
        let mut p = picker(PickerConfig::default());
        p.open();
        assert!(p.commit().is_empty());
        assert!(p.selection().is_empty());
        assert!(p.is_open());
    }

    #[test]
    fn backspace_removes_last_only_with_empty_search() {
        let mut p = picker(PickerConfig::default().with_multiple(true));
        p.select(&"apple");
        p.select(&"banana");
        assert_eq!(keys(&p), ["apple", "banana"]);

        p.open();
        p.set_search_text("a", 0);
        assert!(p.on_key(PickerKey::Backspace).is_empty());
        assert_eq!(keys(&p), ["apple", "banana"]);

        p.set_search_text("", 0);
        assert_eq!(
            p.on_key(PickerKey::Backspace).as_slice(),
            &[PickerEffect::SelectionChanged]
        );
        assert_eq!(keys(&p), ["apple"]);
    }

    #[test]
    fn single_mode_select_replaces() {
        let mut p = picker(PickerConfig::default());
        p.select(&"apple");
        p.select(&"carrot");
        assert_eq!(keys(&p), ["carrot"]);
        assert!(p.remove_last().is_empty());
        assert_eq!(keys(&p), ["carrot"]);
    }

    #[test]
    fn selecting_chosen_or_hidden_key_is_noop() {
        let mut p = picker(PickerConfig::default().with_multiple(true));
        p.select(&"apple");
        p.open();
        assert!(p.select(&"apple").is_empty());
        assert!(p.select(&"durian").is_empty());
        p.set_search_text("car", 0);
        assert!(p.select(&"banana").is_empty());
        assert!(p.is_open());
        assert_eq!(keys(&p), ["apple"]);
    }

    #[test]
    fn selection_survives_filtering() {
        let mut p = picker(PickerConfig::default().with_multiple(true));
        p.select(&"apple");
        p.open();
        p.set_search_text("carrot", 0);
        assert!(!p.flat().contains_key(&"apple"));
        assert_eq!(p.selection().get(&"apple"), Some(&"Apple"));
    }

    #[test]
    fn unselect_keeps_popup_open() {
        let mut p = picker(PickerConfig::default().with_multiple(true));
        p.select(&"apple");
        p.open();
        assert_eq!(
            p.unselect(&"apple").as_slice(),
            &[PickerEffect::SelectionChanged]
        );
        assert!(p.unselect(&"apple").is_empty());
        assert!(p.is_open());
    }

    #[test]
    fn arrow_down_opens_without_moving() {
        let mut p = picker(PickerConfig::default());
        let effects = p.on_key(PickerKey::ArrowDown);
        assert_eq!(
            effects.as_slice(),
            &[PickerEffect::Attach(Listeners::CLICK_OUTSIDE)]
        );
        assert!(p.is_open());
        assert_eq!(p.pointer(), None);

        p.on_key(PickerKey::ArrowDown);
        p.on_key(PickerKey::ArrowDown);
        p.on_key(PickerKey::ArrowUp);
        assert_eq!(p.pointer(), Some(0));
        assert_eq!(p.pointed_key(), Some(&"apple"));

        p.on_key(PickerKey::Enter);
        assert_eq!(keys(&p), ["apple"]);
    }

    #[test]
    fn close_clears_search_and_restores_view() {
        let mut p = picker(PickerConfig::default());
        p.open();
        p.set_search_text("an", 0);
        p.move_pointer(1);
        p.close();
        assert_eq!(p.search_text(), "");
        assert_eq!(p.pointer(), None);
        assert_eq!(p.flat().len(), 3);
    }

    #[test]
    fn search_change_resets_pointer() {
        let mut p = picker(PickerConfig::default());
        p.open();
        p.move_pointer(1);
        p.set_search_text("a", 0);
        assert_eq!(p.pointer(), None);
        p.move_pointer(1);
        assert!(p.set_search_text("a", 10).is_empty());
        assert_eq!(p.pointer(), Some(0));
    }

    #[test]
    fn listeners_balance_across_exit_paths() {
        let config = PickerConfig::default().with_load_more(true);
        let all = Listeners::CLICK_OUTSIDE | Listeners::LIST_SCROLL;

        let mut p = picker(config.clone());
        assert_eq!(p.open().as_slice(), &[PickerEffect::Attach(all)]);
        assert!(p.open().is_empty());
        assert_eq!(p.clicked_outside().as_slice(), &[PickerEffect::Detach(all)]);
        assert!(p.clicked_outside().is_empty());
        assert!(p.active_listeners().is_empty());

        assert_eq!(p.toggle().as_slice(), &[PickerEffect::Attach(all)]);
        assert_eq!(p.toggle().as_slice(), &[PickerEffect::Detach(all)]);

        p.open();
        assert_eq!(p.teardown().as_slice(), &[PickerEffect::Detach(all)]);
        assert!(p.teardown().is_empty());
        assert!(p.active_listeners().is_empty());
    }

    #[test]
    fn scroll_to_end_requests_more_with_search_text() {
        let mut p = picker(PickerConfig::default().with_load_more(true));
        let end = ScrollMetrics::new(300.0, 100.0, 200.0);
        assert!(p.on_scroll(end).is_empty());

        p.open();
        p.set_search_text("a", 0);
        assert!(p.on_scroll(ScrollMetrics::new(300.0, 100.0, 50.0)).is_empty());
        assert_eq!(
            p.on_scroll(end).as_slice(),
            &[PickerEffect::LoadMore("a".into())]
        );

        p.close();
        assert!(p.on_scroll(end).is_empty());
    }

    #[test]
    fn scroll_without_provider_never_loads() {
        let mut p = picker(PickerConfig::default());
        p.open();
        assert!(p.on_scroll(ScrollMetrics::new(10.0, 100.0, 0.0)).is_empty());
    }

    #[test]
    fn external_search_is_debounced() {
        let mut p = picker(PickerConfig::default().with_external_search(true));
        p.open();
        assert!(p.set_search_text("a", 1_000).is_empty());
        assert!(p.set_search_text("ab", 1_100).is_empty());
        assert!(p.set_search_text("abc", 1_200).is_empty());
        assert_eq!(p.search_deadline(), Some(1_500));

        // The host filters; the view is the values unchanged.
        assert_eq!(p.flat().len(), 3);

        assert!(p.poll(1_499).is_empty());
        assert_eq!(
            p.poll(1_500).as_slice(),
            &[PickerEffect::Search("abc".into())]
        );
        assert!(p.poll(5_000).is_empty());
    }

    #[test]
    fn zero_delay_search_fires_immediately() {
        let config = PickerConfig::default()
            .with_external_search(true)
            .with_search_debounce_ms(0);
        let mut p = picker(config);
        assert_eq!(
            p.set_search_text("x", 7).as_slice(),
            &[PickerEffect::Search("x".into())]
        );
    }

    #[test]
    fn closing_requeries_external_search_with_empty_text() {
        let mut p = picker(PickerConfig::default().with_external_search(true));
        p.open();
        p.set_search_text("an", 0);
        assert_eq!(p.poll(300).as_slice(), &[PickerEffect::Search("an".into())]);

        assert_eq!(
            p.close().as_slice(),
            &[PickerEffect::Detach(Listeners::CLICK_OUTSIDE)]
        );
        assert_eq!(p.search_text(), "");
        assert_eq!(p.search_deadline(), Some(600));
        assert!(p.poll(599).is_empty());
        assert_eq!(p.poll(600).as_slice(), &[PickerEffect::Search("".into())]);

        // Reopening does not ask again.
        p.open();
        assert!(p.poll(10_000).is_empty());
    }

    #[test]
    fn closing_replaces_pending_search() {
        let mut p = picker(PickerConfig::default().with_external_search(true));
        p.open();
        p.set_search_text("ap", 0);
        p.clicked_outside();
        assert_eq!(p.poll(300).as_slice(), &[PickerEffect::Search("".into())]);
        assert!(p.poll(1_000).is_empty());
    }

    #[test]
    fn closing_with_empty_search_does_not_requery() {
        let mut p = picker(PickerConfig::default().with_external_search(true));
        p.open();
        p.close();
        assert_eq!(p.search_deadline(), None);
    }

    #[test]
    fn cancel_on_close_requeries_immediately() {
        let config = PickerConfig::default()
            .with_external_search(true)
            .with_cancel_search_on_close(true);
        let mut p = picker(config);
        p.open();
        p.set_search_text("ap", 0);
        assert_eq!(
            p.close().as_slice(),
            &[
                PickerEffect::Detach(Listeners::CLICK_OUTSIDE),
                PickerEffect::Search("".into()),
            ]
        );
        assert_eq!(p.search_deadline(), None);
        assert!(p.poll(300).is_empty());
    }

    #[test]
    fn teardown_never_requeries() {
        let mut p = picker(PickerConfig::default().with_external_search(true));
        p.open();
        p.set_search_text("ap", 0);
        assert_eq!(
            p.teardown().as_slice(),
            &[PickerEffect::Detach(Listeners::CLICK_OUTSIDE)]
        );
        assert_eq!(p.search_deadline(), None);
    }

    #[test]
    fn teardown_cancels_pending_search() {
        let mut p = picker(PickerConfig::default().with_external_search(true));
        p.set_search_text("ap", 0);
        p.teardown();
        assert_eq!(p.search_deadline(), None);
        assert!(p.poll(1_000).is_empty());
    }

    #[test]
    fn select_all_and_clear() {
        let mut p = picker(PickerConfig::default().with_multiple(true));
        p.open();
        p.set_search_text("a", 0);
        let effects = p.select_all_visible();
        assert_eq!(effects[0], PickerEffect::SelectionChanged);
        assert_eq!(keys(&p), ["apple", "banana", "carrot"]);
        assert!(!p.is_open());

        p.open();
        p.clear_selection();
        assert!(p.selection().is_empty());
        assert!(!p.is_open());
        assert!(p.clear_selection().is_empty());
    }

    #[test]
    fn select_all_is_multiple_only() {
        let mut p = picker(PickerConfig::default());
        p.open();
        assert!(p.select_all_visible().is_empty());
        assert!(p.selection().is_empty());
        assert!(p.is_open());
    }

    #[test]
    fn set_values_keeps_fitting_pointer() {
        let mut p = picker(PickerConfig::default());
        p.open();
        p.move_pointer(1);
        p.move_pointer(1);
        p.move_pointer(1);
        assert_eq!(p.pointer(), Some(2));

        p.set_values(Dataset::from_nodes([
            Node::leaf("kiwi", "Kiwi"),
            Node::leaf("lime", "Lime"),
            Node::leaf("plum", "Plum"),
            Node::leaf("pear", "Pear"),
        ]));
        assert_eq!(p.pointed_key(), Some(&"plum"));

        p.set_values(Dataset::from_nodes([Node::leaf("kiwi", "Kiwi")]));
        assert_eq!(p.pointer(), None);
    }

    #[test]
    fn groups_expand_while_searching_or_pointing() {
        let mut p = picker(PickerConfig::default());
        p.open();
        assert!(!p.is_group_expanded(&"fruit"));
        assert!(p.toggle_group(&"fruit"));
        assert!(p.is_group_expanded(&"fruit"));
        assert!(!p.is_group_expanded(&"veg"));

        p.move_pointer(1);
        assert!(p.is_group_expanded(&"veg"));

        p.close();
        p.open();
        p.set_search_text("c", 0);
        assert!(p.is_group_expanded(&"veg"));
        assert!(!p.toggle_group(&"fruit"));
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut p = picker(PickerConfig::default());
        p.set_loading(true);
        p.open();
        p.set_search_text("zzz", 0);
        let snap = p.snapshot();
        assert!(snap.open);
        assert!(snap.loading);
        assert!(snap.is_empty());
        assert!(snap.values.is_empty());
        assert_eq!(snap.search_text, "zzz");
        assert_eq!(snap.listeners, Listeners::CLICK_OUTSIDE);
        assert_eq!(snap.pointed_key, None);
    }

    #[test]
    fn handle_dispatches_events() {
        let mut p = picker(PickerConfig::default().with_multiple(true));
        p.handle(PickerEvent::Key(PickerKey::ArrowDown), 0);
        p.handle(PickerEvent::SearchText("an".into()), 0);
        p.handle(PickerEvent::MovePointer(1), 0);
        let effects = p.handle(PickerEvent::Commit, 0);
        assert_eq!(effects[0], PickerEffect::SelectionChanged);
        assert_eq!(keys(&p), ["banana"]);

        p.handle(PickerEvent::SetLoading(true), 0);
        assert!(p.is_loading());
        p.handle(PickerEvent::ToggleGroup("veg"), 0);
        assert!(p.is_group_expanded(&"veg"));
        p.handle(PickerEvent::Unselect("banana"), 0);
        assert!(p.selection().is_empty());
    }

    #[test]
    fn non_text_values_are_hidden_by_builtin_filter() {
        let values: Dataset<u32, Option<&str>> = Dataset::from_nodes([
            Node::leaf(1, Some("one")),
            Node::leaf(2, None),
            Node::leaf(3, Some("")),
        ]);
        let mut p = Picker::with_values(PickerConfig::default(), values.clone());
        p.open();
        assert_eq!(p.flat().keys().copied().collect::<Vec<_>>(), [1]);
        p.set_search_text("o", 0);
        assert_eq!(p.flat().keys().copied().collect::<Vec<_>>(), [1]);
        assert!(p.select(&2).is_empty());

        // The host decides what is visible when it searches.
        let mut p = Picker::with_values(PickerConfig::default().with_external_search(true), values);
        p.open();
        assert_eq!(p.flat().len(), 3);
        p.select(&2);
        assert_eq!(p.selection().single(), Some((&2, &None)));
    }
}
