// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-edge detection for incremental loading.
//!
//! Lists that load data page by page need to know when the user has scrolled to
//! the end. [`ScrollEdge`] receives the list's [`ScrollMetrics`] on every scroll
//! tick and reports whether a "load more" request should be issued.
//!
//! The detector is only active while *bound*: a widget binds it when its list
//! becomes visible and unbinds it when the list goes away, mirroring the
//! lifetime of the host's scroll listener. A bound detector reports the end on
//! every tick at which the viewport reaches it; deduplicating requests is the
//! data provider's concern.
//!
//! ```
//! use understory_event_state::scroll_edge::{ScrollEdge, ScrollMetrics};
//!
//! let mut edge = ScrollEdge::new();
//! edge.bind();
//!
//! // 200px of content in a 100px viewport.
//! assert!(!edge.on_scroll(ScrollMetrics::new(200.0, 100.0, 40.0)));
//! assert!(edge.on_scroll(ScrollMetrics::new(200.0, 100.0, 100.0)));
//!
//! // Unbound detectors never fire.
//! edge.unbind();
//! assert!(!edge.on_scroll(ScrollMetrics::new(200.0, 100.0, 100.0)));
//! ```
//!
//! All extents are in one caller-chosen 1D coordinate space (typically logical
//! pixels) and are expected to be finite and non-negative.

/// Geometry of a vertically scrolled region at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Total extent of the scrollable content.
    pub content_extent: f64,
    /// Extent of the visible viewport.
    pub viewport_extent: f64,
    /// Offset of the viewport's leading edge from the start of the content.
    pub scroll_offset: f64,
}

impl ScrollMetrics {
    /// Create metrics from content extent, viewport extent and scroll offset.
    pub const fn new(content_extent: f64, viewport_extent: f64, scroll_offset: f64) -> Self {
        Self {
            content_extent,
            viewport_extent,
            scroll_offset,
        }
    }

    /// Offset of the viewport's trailing edge.
    pub fn visible_end(&self) -> f64 {
        self.scroll_offset + self.viewport_extent
    }

    /// Content extent still hidden beyond the viewport's trailing edge.
    pub fn remaining(&self) -> f64 {
        (self.content_extent - self.visible_end()).max(0.0)
    }

    /// Whether the viewport's trailing edge is at or past the end of the content.
    pub fn is_at_end(&self) -> bool {
        self.visible_end() >= self.content_extent
    }
}

/// Detector that fires when a bound list is scrolled to its end.
#[derive(Clone, Debug, Default)]
pub struct ScrollEdge {
    /// Extra distance before the end that already counts as "at the end".
    threshold: f64,
    bound: bool,
}

impl ScrollEdge {
    /// Create an unbound detector that fires only at the exact end.
    pub const fn new() -> Self {
        Self {
            threshold: 0.0,
            bound: false,
        }
    }

    /// Create an unbound detector that fires within `threshold` of the end.
    ///
    /// Negative or non-finite thresholds are treated as zero.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: sanitize(threshold),
            bound: false,
        }
    }

    /// Distance before the end that counts as reaching it.
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start reacting to scroll ticks.
    pub fn bind(&mut self) {
        #[cfg(feature = "tracing")]
        if !self.bound {
            tracing::trace!("scroll edge bound");
        }
        self.bound = true;
    }

    /// Stop reacting to scroll ticks.
    ///
    /// Returns `true` if the detector was bound.
    pub fn unbind(&mut self) -> bool {
        core::mem::replace(&mut self.bound, false)
    }

    /// Bind for a new list content, whether or not already bound.
    ///
    /// The detector keeps no state across ticks besides the binding itself, so
    /// this is [`bind`](Self::bind) under the name used when the list content is
    /// invalidated, for example after the search text changed. The next tick at
    /// the end fires.
    pub fn rebind(&mut self) {
        self.bind();
    }

    /// Whether the detector currently reacts to scroll ticks.
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    /// Whether `metrics` is at the end, ignoring the binding.
    pub fn reached(&self, metrics: &ScrollMetrics) -> bool {
        metrics.visible_end() + self.threshold >= metrics.content_extent
    }

    /// Process a scroll tick.
    ///
    /// # Returns
    /// `true` if the detector is bound and the viewport reached the end of the
    /// content (within the threshold), meaning more data should be requested.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !self.bound {
            return false;
        }
        let reached = self.reached(&metrics);
        #[cfg(feature = "tracing")]
        if reached {
            tracing::debug!(
                content = metrics.content_extent,
                viewport = metrics.viewport_extent,
                offset = metrics.scroll_offset,
                "scroll edge reached"
            );
        }
        reached
    }
}

/// Scroll offset that centers an item in the viewport.
///
/// `item_offset` and `item_extent` locate the item within the content. The result
/// is clamped at zero so items near the start align with the top instead.
///
/// ```
/// use understory_event_state::scroll_edge::centered_offset;
///
/// // A 20px item at 300px in a 100px viewport: center at 310, offset 260.
/// assert_eq!(centered_offset(300.0, 20.0, 100.0), 260.0);
/// assert_eq!(centered_offset(10.0, 20.0, 100.0), 0.0);
/// ```
pub fn centered_offset(item_offset: f64, item_extent: f64, viewport_extent: f64) -> f64 {
    (item_offset + item_extent / 2.0 - viewport_extent / 2.0).max(0.0)
}

fn sanitize(threshold: f64) -> f64 {
    if threshold.is_finite() && threshold > 0.0 {
        threshold
    } else {
        0.0
    }
}
