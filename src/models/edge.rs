use serde::{Deserialize, Serialize};

use super::NoteSummary;

/// A link between two notes.
///
/// `target` is the note a link is reported against when looking for
/// backlinks; `source` is the note on the other end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NoteSummary,
    pub target: NoteSummary,
}

impl Edge {
    pub fn new(source: NoteSummary, target: NoteSummary) -> Self {
        Self { source, target }
    }
}

/// All links between live notes.
pub type Graph = Vec<Edge>;
