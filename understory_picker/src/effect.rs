// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs to and outputs from the picker reducer.

use alloc::string::String;

use smallvec::SmallVec;
use understory_choice_tree::Dataset;
use understory_event_state::listeners::Listeners;
use understory_event_state::scroll_edge::ScrollMetrics;

/// Work the host must perform after a picker transition.
///
/// Effects are returned in the order they should be executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerEffect {
    /// Call the external search provider with this text.
    Search(String),
    /// Call the load-more provider with the current search text.
    LoadMore(String),
    /// Attach these host listeners.
    Attach(Listeners),
    /// Detach these host listeners.
    Detach(Listeners),
    /// The selection changed; re-render the chosen items.
    SelectionChanged,
}

/// Effects produced by a single transition.
pub type Effects = SmallVec<[PickerEffect; 3]>;

/// Navigation keys understood by the picker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PickerKey {
    /// Move the pointer up.
    ArrowUp,
    /// Open the popup, or move the pointer down when already open.
    ArrowDown,
    /// Select the pointed item.
    Enter,
    /// Remove the most recent selection when the search text is empty.
    Backspace,
}

/// Every input the picker reacts to, for hosts that drive it as a reducer.
///
/// See [`Picker::handle`](crate::Picker::handle).
#[derive(Clone, Debug, PartialEq)]
pub enum PickerEvent<K, V> {
    /// Open the popup.
    Open,
    /// Close the popup.
    Close,
    /// Flip the popup state.
    Toggle,
    /// A click landed outside the widget.
    ClickedOutside,
    /// The search input changed.
    SearchText(String),
    /// The user chose an item.
    Select(K),
    /// The user removed a chosen item.
    Unselect(K),
    /// Remove the most recently chosen item.
    RemoveLast,
    /// Move the pointer.
    MovePointer(isize),
    /// Select the pointed item.
    Commit,
    /// Select every visible item.
    SelectAllVisible,
    /// Empty the selection.
    ClearSelection,
    /// A navigation key was pressed.
    Key(PickerKey),
    /// The list scrolled.
    Scroll(ScrollMetrics),
    /// Time passed; fire due timers.
    Tick,
    /// Expand or collapse a group.
    ToggleGroup(K),
    /// The host supplied new values.
    SetValues(Dataset<K, V>),
    /// The host started or finished loading.
    SetLoading(bool),
    /// The widget is going away.
    Teardown,
}
