//! Layered layout for converted directory graphs.
//!
//! Nodes are ranked by their longest path from a source, kept in input order
//! within a rank, and spread along the cross axis with each rank centred on
//! the widest one. Positions are node centres.
//!
//! Every call builds its own adjacency from the input, so identical inputs
//! always produce identical coordinates.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::graph::{GraphData, Position};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid rank direction {0:?}: expected one of TB, BT, LR, RL")]
    InvalidDirection(String),
}

/// Orientation of the ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDirection {
    /// Root at the top.
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    /// Root at the bottom.
    #[serde(rename = "BT")]
    BottomToTop,
    /// Root at the left.
    #[serde(rename = "LR")]
    LeftToRight,
    /// Root at the right.
    #[serde(rename = "RL")]
    RightToLeft,
}

impl RankDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            RankDirection::TopToBottom => "TB",
            RankDirection::BottomToTop => "BT",
            RankDirection::LeftToRight => "LR",
            RankDirection::RightToLeft => "RL",
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, RankDirection::TopToBottom | RankDirection::BottomToTop)
    }

    fn is_reversed(self) -> bool {
        matches!(self, RankDirection::BottomToTop | RankDirection::RightToLeft)
    }
}

impl FromStr for RankDirection {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(RankDirection::TopToBottom),
            "BT" => Ok(RankDirection::BottomToTop),
            "LR" => Ok(RankDirection::LeftToRight),
            "RL" => Ok(RankDirection::RightToLeft),
            _ => Err(LayoutError::InvalidDirection(value.to_string())),
        }
    }
}

impl fmt::Display for RankDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub direction: RankDirection,
    pub node_width: f64,
    pub node_height: f64,
    /// Space between neighbouring nodes in the same rank.
    pub node_gap: f64,
    /// Space between consecutive ranks.
    pub rank_gap: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: RankDirection::TopToBottom,
            node_width: 180.0,
            node_height: 80.0,
            node_gap: 50.0,
            rank_gap: 100.0,
        }
    }
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: RankDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Node extent along the rank axis and across it.
    fn spans(&self) -> (f64, f64) {
        if self.direction.is_vertical() {
            (self.node_height, self.node_width)
        } else {
            (self.node_width, self.node_height)
        }
    }
}

struct LayeredGraph {
    successors: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl LayeredGraph {
    fn from_graph(graph: &GraphData) -> Self {
        let n = graph.nodes.len();
        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let mut successors = vec![Vec::new(); n];
        for edge in &graph.edges {
            if let (Some(&u), Some(&v)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) && u != v
            {
                successors[u].push(v);
            }
        }

        let mut in_degree = vec![0; n];
        for list in &mut successors {
            list.sort_unstable();
            list.dedup();
            for &v in list.iter() {
                in_degree[v] += 1;
            }
        }

        Self {
            successors,
            in_degree,
        }
    }

    /// Longest-path ranks via Kahn's algorithm. Nodes left on a cycle go one
    /// rank past the deepest ranked node.
    fn ranks(&self) -> Vec<usize> {
        let n = self.successors.len();
        let mut in_degree = self.in_degree.clone();
        let mut queue: Vec<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
        let mut ranks = vec![0usize; n];
        let mut visited = vec![false; n];

        let mut head = 0;
        while head < queue.len() {
            let u = queue[head];
            head += 1;
            visited[u] = true;
            for &v in &self.successors[u] {
                ranks[v] = ranks[v].max(ranks[u] + 1);
                in_degree[v] -= 1;
                if in_degree[v] == 0 {
                    queue.push(v);
                }
            }
        }

        if queue.len() < n {
            let overflow = ranks
                .iter()
                .zip(&visited)
                .filter(|(_, seen)| **seen)
                .map(|(rank, _)| *rank + 1)
                .max()
                .unwrap_or(0);
            for (rank, seen) in ranks.iter_mut().zip(&visited) {
                if !*seen {
                    *rank = overflow;
                }
            }
        }

        ranks
    }
}

/// Assigns a position to every node of `graph`. Incoming positions are
/// ignored and edges pointing at unknown ids are skipped.
pub fn layout(mut graph: GraphData, options: &LayoutOptions) -> GraphData {
    if graph.nodes.is_empty() {
        return graph;
    }

    let ranks = LayeredGraph::from_graph(&graph).ranks();
    let rank_count = ranks.iter().copied().max().unwrap_or(0) + 1;
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
    for (node, &rank) in ranks.iter().enumerate() {
        buckets[rank].push(node);
    }

    let (rank_span, cross_span) = options.spans();
    let rank_step = rank_span + options.rank_gap;
    let cross_step = cross_span + options.node_gap;
    let extent = |count: usize| {
        count as f64 * cross_span + count.saturating_sub(1) as f64 * options.node_gap
    };
    let widest = buckets
        .iter()
        .map(|bucket| extent(bucket.len()))
        .fold(0.0, f64::max);

    for (rank, bucket) in buckets.iter().enumerate() {
        let level = if options.direction.is_reversed() {
            rank_count - 1 - rank
        } else {
            rank
        };
        let along = level as f64 * rank_step + rank_span / 2.0;
        let shift = (widest - extent(bucket.len())) / 2.0;

        for (slot, &node) in bucket.iter().enumerate() {
            let across = shift + slot as f64 * cross_step + cross_span / 2.0;
            graph.nodes[node].position = if options.direction.is_vertical() {
                Position { x: across, y: along }
            } else {
                Position { x: along, y: across }
            };
        }
    }

    debug!(
        nodes = graph.nodes.len(),
        ranks = rank_count,
        direction = %options.direction,
        "laid out graph"
    );
    graph
}
