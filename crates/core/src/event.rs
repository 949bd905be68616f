use serde::{Deserialize, Serialize};

/// Logical event time, milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// An unordered pair of tags that co-occurred in one event.
///
/// Canonicalized at construction (lexicographically smaller tag first) so
/// `(a, b)` and `(b, a)` hash and compare as the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagPair {
    first: String,
    second: String,
}

impl TagPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

impl std::fmt::Display for TagPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}

/// One parsed event: a timestamp plus its deduplicated tag list.
///
/// Immutable after construction. Duplicate tags are dropped up front
/// (first occurrence wins) so pair derivation never produces self-loops
/// or double-counted pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    timestamp: Timestamp,
    tags: Vec<String>,
}

impl Event {
    pub fn new(timestamp: Timestamp, tags: Vec<String>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let tags = tags
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { timestamp, tags }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Number of distinct tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// All k*(k-1)/2 unordered tag pairs; empty when fewer than two tags.
    pub fn pairs(&self) -> Vec<TagPair> {
        if self.tags.len() < 2 {
            return Vec::new();
        }
        let mut pairs = Vec::with_capacity(self.tags.len() * (self.tags.len() - 1) / 2);
        for i in 0..self.tags.len() - 1 {
            for j in i + 1..self.tags.len() {
                pairs.push(TagPair::new(self.tags[i].clone(), self.tags[j].clone()));
            }
        }
        pairs
    }
}
