use tracing::debug;

use tagwindow_core::Event;

use crate::rolling::RollingGraph;
use crate::window::{Admission, WindowTracker};

/// Drives one event through admission, eviction, and insertion.
///
/// Strictly sequential: each event is fully settled before the next one is
/// offered. There is exactly one mutator of the tracker and the graph.
#[derive(Debug)]
pub struct Pipeline {
    tracker: WindowTracker,
    graph: RollingGraph,
}

impl Pipeline {
    pub fn new(window_ms: u64) -> Self {
        Self {
            tracker: WindowTracker::new(window_ms),
            graph: RollingGraph::new(),
        }
    }

    /// Process one event. Returns the post-insertion average degree when
    /// the event was admitted, `None` when it was too old. Evictions are
    /// applied to the graph before the new event is inserted.
    pub fn process(&mut self, event: Event) -> Option<f64> {
        match self.tracker.admit(event.clone()) {
            Admission::Rejected => {
                debug!(ts = event.timestamp(), "event older than window, dropped");
                None
            }
            Admission::Accepted { evicted } => {
                for stale in &evicted {
                    self.graph.remove(stale);
                }
                self.graph.insert(&event);
                Some(self.graph.average_degree())
            }
        }
    }

    pub fn graph(&self) -> &RollingGraph {
        &self.graph
    }

    pub fn tracker(&self) -> &WindowTracker {
        &self.tracker
    }
}

/// Truncate (not round) to two decimal places, the reporting contract for
/// the average-degree statistic.
pub fn truncate2(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}
