// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the event state machines.
//!
//! 1. A burst of notifications inside the quiet period fires once, with the
//!    latest value, at the last deadline.
//! 2. A bound scroll-edge detector fires exactly when the viewport reaches the end.
//! 3. Listener scopes return each flag once on acquire and once on release.

use proptest::prelude::*;
use understory_event_state::debounce::Debouncer;
use understory_event_state::listeners::{ListenerScope, Listeners};
use understory_event_state::scroll_edge::{ScrollEdge, ScrollMetrics};

// ── Helpers ─────────────────────────────────────────────────────────────

fn listeners_strategy() -> impl Strategy<Value = Listeners> {
    (0_u8..4).prop_map(Listeners::from_bits_truncate)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Debounce bursts
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn burst_fires_once_with_latest(
        delay in 1_u64..1_000,
        gaps in prop::collection::vec(0_u64..1_000, 1..12),
    ) {
        let mut d: Debouncer<usize> = Debouncer::new(delay);
        let mut now = 0_u64;
        let mut last = 0;
        for (i, gap) in gaps.iter().enumerate() {
            // Keep every notification inside the previous quiet period.
            now += gap % delay;
            prop_assert_eq!(d.poll(now), None);
            d.notify(i, now);
            last = i;
        }
        let deadline = now + delay;
        prop_assert_eq!(d.deadline(), Some(deadline));
        prop_assert_eq!(d.poll(deadline - 1), None);
        prop_assert_eq!(d.poll(deadline), Some(last));
        prop_assert_eq!(d.poll(deadline + delay), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Scroll edge
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bound_edge_fires_iff_at_end(
        content in 0.0_f64..2_000.0,
        viewport in 1.0_f64..500.0,
        offset in 0.0_f64..2_000.0,
        bound in any::<bool>(),
    ) {
        let mut edge = ScrollEdge::new();
        if bound {
            edge.bind();
        }
        let m = ScrollMetrics::new(content, viewport, offset);
        prop_assert_eq!(edge.on_scroll(m), bound && m.is_at_end());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Listener scopes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scope_changes_match_replayed_host(
        ops in prop::collection::vec((any::<bool>(), listeners_strategy()), 0..20),
    ) {
        let mut scope = ListenerScope::new();
        let mut host = Listeners::empty();
        for (acquire, listeners) in ops {
            if acquire {
                let added = scope.acquire(listeners);
                prop_assert!(host.intersection(added).is_empty());
                host.insert(added);
            } else {
                let removed = scope.release(listeners);
                prop_assert!(host.contains(removed));
                host.remove(removed);
            }
            prop_assert_eq!(host, scope.active());
        }
        let removed = scope.release_all();
        prop_assert_eq!(removed, host);
        prop_assert!(scope.active().is_empty());
    }
}
