use std::collections::HashMap;

use serde::Serialize;
use tagwindow_core::{Event, TagPair, Timestamp};

/// The windowed tag co-occurrence graph.
///
/// Edges are keyed by canonical tag pair and carry the timestamp of the
/// most recent event that produced them (the "claim"). A later event
/// producing the same pair re-claims the edge by refreshing that
/// timestamp; eviction of the earlier claimant then leaves the edge
/// intact.
///
/// Degree counters are occurrence counts, not distinct-edge counts: every
/// pair-occurrence in an inserted event bumps both endpoints, and every
/// pair-occurrence in a removed event decrements them, whether or not the
/// edge itself was erased. The two can diverge after a re-claim (see
/// `remove`).
#[derive(Debug, Default, Serialize)]
pub struct RollingGraph {
    /// Canonical pair -> last-claim timestamp.
    edges: HashMap<TagPair, Timestamp>,
    /// Tag -> occurrence-count degree.
    degree: HashMap<String, u64>,
    edge_count: usize,
    vertex_count: usize,
}

impl RollingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every pair the event derives to the graph.
    ///
    /// New pairs are stored with the event's timestamp and counted; pairs
    /// already present with an older claim get their timestamp refreshed
    /// without touching `edge_count`. Endpoint degrees are incremented
    /// once per pair-occurrence, so a tag appearing in k pairs of this
    /// event gains k.
    pub fn insert(&mut self, event: &Event) {
        for pair in event.pairs() {
            match self.edges.get_mut(&pair) {
                None => {
                    self.edges.insert(pair.clone(), event.timestamp());
                    self.edge_count += 1;
                }
                Some(claimed) if *claimed < event.timestamp() => {
                    *claimed = event.timestamp();
                }
                Some(_) => {}
            }
            self.bump_degree(pair.first());
            self.bump_degree(pair.second());
        }
    }

    /// Undo an evicted event's contribution.
    ///
    /// A pair is erased only when its stored claim timestamp is exactly
    /// the evicted event's timestamp; a newer claimant keeps the edge
    /// alive. Endpoint degrees are decremented unconditionally, mirroring
    /// the per-occurrence increments in `insert`. A counter reaching zero
    /// drops the vertex even when a re-claimed edge still references it.
    pub fn remove(&mut self, event: &Event) {
        for pair in event.pairs() {
            if self.edges.get(&pair) == Some(&event.timestamp()) {
                self.edges.remove(&pair);
                self.edge_count -= 1;
            }
            self.drop_degree(pair.first());
            self.drop_degree(pair.second());
        }
    }

    /// `2E/V`, or 0 when the graph has no vertices.
    pub fn average_degree(&self) -> f64 {
        if self.vertex_count > 0 {
            2.0 * self.edge_count as f64 / self.vertex_count as f64
        } else {
            0.0
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Stored claim timestamp for a pair, if the edge is live.
    pub fn claim(&self, pair: &TagPair) -> Option<Timestamp> {
        self.edges.get(pair).copied()
    }

    pub fn degree_of(&self, tag: &str) -> Option<u64> {
        self.degree.get(tag).copied()
    }

    fn bump_degree(&mut self, tag: &str) {
        match self.degree.get_mut(tag) {
            Some(d) => *d += 1,
            None => {
                self.degree.insert(tag.to_string(), 1);
                self.vertex_count += 1;
            }
        }
    }

    fn drop_degree(&mut self, tag: &str) {
        if let Some(d) = self.degree.get_mut(tag) {
            *d -= 1;
            if *d == 0 {
                self.degree.remove(tag);
                self.vertex_count -= 1;
            }
        }
    }
}
