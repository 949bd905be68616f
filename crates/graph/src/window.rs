use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tagwindow_core::{Event, Timestamp};

/// Outcome of offering an event to the window.
#[derive(Debug, PartialEq)]
pub enum Admission {
    /// Event is inside the window. Carries the events that just aged out,
    /// in ascending timestamp order; the caller must remove them from the
    /// graph before inserting the admitted event.
    Accepted { evicted: Vec<Event> },
    /// Event is strictly older than the window. Hard drop: no state
    /// change, no output.
    Rejected,
}

/// Tracks the high watermark and the set of live events.
///
/// The watermark is the timestamp of the latest admitted event and never
/// moves backwards. Live events sit in a min-heap by timestamp; only the
/// minimum is ever popped, so a plain binary heap is enough.
#[derive(Debug)]
pub struct WindowTracker {
    window_ms: u64,
    /// None until the first event is admitted.
    watermark: Option<Timestamp>,
    live: BinaryHeap<Oldest>,
}

impl WindowTracker {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            watermark: None,
            live: BinaryHeap::new(),
        }
    }

    pub fn watermark(&self) -> Option<Timestamp> {
        self.watermark
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Admit or reject an event, advancing the watermark and draining
    /// newly stale events on admission.
    ///
    /// An event with `ts + window_ms <= watermark` is rejected. Otherwise
    /// the watermark advances when the event is newer than it, every live
    /// event that the new watermark ages out is drained (each exactly
    /// once, oldest first), and the event joins the live set.
    pub fn admit(&mut self, event: Event) -> Admission {
        if let Some(watermark) = self.watermark {
            if event.timestamp() + self.window_ms <= watermark {
                return Admission::Rejected;
            }
        }

        let mut evicted = Vec::new();
        let advances = match self.watermark {
            None => true,
            Some(w) => event.timestamp() > w,
        };
        if advances {
            let watermark = event.timestamp();
            self.watermark = Some(watermark);
            while let Some(oldest) = self.live.peek() {
                if oldest.0.timestamp() + self.window_ms > watermark {
                    break;
                }
                if let Some(stale) = self.live.pop() {
                    evicted.push(stale.0);
                }
            }
        }

        self.live.push(Oldest(event));
        Admission::Accepted { evicted }
    }
}

/// Heap adapter inverting the timestamp order so `BinaryHeap` pops the
/// oldest event first.
#[derive(Debug)]
struct Oldest(Event);

impl PartialEq for Oldest {
    fn eq(&self, other: &Self) -> bool {
        self.0.timestamp() == other.0.timestamp()
    }
}

impl Eq for Oldest {}

impl Ord for Oldest {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.timestamp().cmp(&self.0.timestamp())
    }
}

impl PartialOrd for Oldest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u64 = 60_000;

    fn event(ts: Timestamp, tags: &[&str]) -> Event {
        Event::new(ts, tags.iter().map(|t| t.to_string()).collect())
    }

    fn accept(tracker: &mut WindowTracker, e: Event) -> Vec<Event> {
        match tracker.admit(e) {
            Admission::Accepted { evicted } => evicted,
            Admission::Rejected => panic!("expected acceptance"),
        }
    }

    #[test]
    fn first_event_is_always_accepted() {
        let mut w = WindowTracker::new(WINDOW);
        assert!(accept(&mut w, event(0, &["a"])).is_empty());
        assert_eq!(w.watermark(), Some(0));
        assert_eq!(w.live_count(), 1);
    }

    #[test]
    fn stale_event_is_rejected_without_state_change() {
        let mut w = WindowTracker::new(WINDOW);
        accept(&mut w, event(100_000, &["a"]));
        assert_eq!(w.admit(event(40_000, &["b"])), Admission::Rejected);
        assert_eq!(w.watermark(), Some(100_000));
        assert_eq!(w.live_count(), 1);
    }

    #[test]
    fn boundary_event_exactly_window_old_is_rejected() {
        let mut w = WindowTracker::new(WINDOW);
        accept(&mut w, event(60_000, &["a"]));
        // ts + window == watermark is a drop
        assert_eq!(w.admit(event(0, &["b"])), Admission::Rejected);
        // one past the boundary is live
        assert!(accept(&mut w, event(1, &["c"])).is_empty());
    }

    #[test]
    fn out_of_order_inside_window_does_not_move_watermark() {
        let mut w = WindowTracker::new(WINDOW);
        accept(&mut w, event(50_000, &["a"]));
        accept(&mut w, event(10_000, &["b"]));
        assert_eq!(w.watermark(), Some(50_000));
        assert_eq!(w.live_count(), 2);
    }

    #[test]
    fn eviction_is_oldest_first_and_exactly_once() {
        let mut w = WindowTracker::new(WINDOW);
        accept(&mut w, event(10, &["b"]));
        accept(&mut w, event(0, &["a"]));
        accept(&mut w, event(20, &["c"]));

        let evicted = accept(&mut w, event(60_015, &["d"]));
        let stamps: Vec<_> = evicted.iter().map(|e| e.timestamp()).collect();
        assert_eq!(stamps, vec![0, 10]);
        assert_eq!(w.live_count(), 2); // c and d

        // nothing left to evict at the same watermark
        assert!(accept(&mut w, event(60_015, &["e"])).is_empty());
    }

    #[test]
    fn equal_timestamp_does_not_trigger_eviction_pass() {
        let mut w = WindowTracker::new(WINDOW);
        accept(&mut w, event(5, &["a"]));
        accept(&mut w, event(70_000, &["b"]));
        // watermark stays, no second eviction sweep
        let evicted = accept(&mut w, event(70_000, &["c"]));
        assert!(evicted.is_empty());
    }
}
