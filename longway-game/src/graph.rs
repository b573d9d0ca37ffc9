//! Immutable route graph: runs, acts, rows and nodes.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::challenge::Challenge;

/// Edge targets into the next row. Rows are narrow, so four slots rarely spill.
pub type Edges = SmallVec<[usize; 4]>;

/// A row of nodes, ordered by column.
pub type Row = Vec<Node>;

/// Tag describing what a node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Challenge,
    Shop,
    Boss,
}

/// Node payload. Shops carry no challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeContent {
    Challenge(Challenge),
    Shop,
    Boss(Challenge),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub col: usize,
    pub content: NodeContent,
    /// Column indices into the following row; empty on the boss row.
    #[serde(default)]
    pub edges: Edges,
}

impl Node {
    #[must_use]
    pub fn new(col: usize, content: NodeContent) -> Self {
        Self {
            col,
            content,
            edges: Edges::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self.content {
            NodeContent::Challenge(_) => NodeKind::Challenge,
            NodeContent::Shop => NodeKind::Shop,
            NodeContent::Boss(_) => NodeKind::Boss,
        }
    }

    #[must_use]
    pub const fn challenge(&self) -> Option<&Challenge> {
        match &self.content {
            NodeContent::Challenge(challenge) | NodeContent::Boss(challenge) => Some(challenge),
            NodeContent::Shop => None,
        }
    }

    #[must_use]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    #[must_use]
    pub fn links_to(&self, target: usize) -> bool {
        self.edges.contains(&target)
    }
}

/// One act: a 1-based index and its rows, boss row last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Act {
    pub index: usize,
    pub rows: Vec<Row>,
}

impl Act {
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Node]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    #[must_use]
    pub fn node(&self, row: usize, col: usize) -> Option<&Node> {
        self.rows.get(row).and_then(|nodes| nodes.get(col))
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Indices of rows holding a shop node, ascending.
    #[must_use]
    pub fn shop_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, nodes)| nodes.iter().any(|n| n.kind() == NodeKind::Shop))
            .map(|(idx, _)| idx)
            .collect()
    }

    #[must_use]
    pub fn boss(&self) -> Option<&Node> {
        self.rows
            .last()
            .and_then(|nodes| nodes.iter().find(|n| n.kind() == NodeKind::Boss))
    }
}

/// A complete generated run. Fully determined by its seed and song catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub seed: u64,
    pub acts: Vec<Act>,
}

impl Run {
    #[must_use]
    pub fn act(&self, idx: usize) -> Option<&Act> {
        self.acts.get(idx)
    }

    /// XxHash64 over the canonical JSON form; equal runs hash equal.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(&canonical);
        hasher.finish()
    }

    /// Total node count across every act.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.acts
            .iter()
            .flat_map(|act| act.rows.iter())
            .map(Vec::len)
            .sum()
    }
}
