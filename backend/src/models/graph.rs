use serde::{Deserialize, Serialize};

pub const ARROW_CLOSED: &str = "arrowclosed";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub position: Position,
    pub kind: NodeKind,
    /// Labels from the scanned root down to this node.
    #[serde(default)]
    pub path: Vec<String>,
}

/// `Sibling` edges are decorative and carry no filesystem meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Parent,
    Sibling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub animated: bool,
    pub dashed: bool,
    pub marker_end: String,
}

impl EdgeStyle {
    pub fn for_kind(kind: EdgeKind) -> Self {
        let decorative = kind == EdgeKind::Sibling;
        Self {
            animated: decorative,
            dashed: decorative,
            marker_end: ARROW_CLOSED.into(),
        }
    }
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self::for_kind(EdgeKind::Parent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub kind: EdgeKind,
    #[serde(default)]
    pub style: EdgeStyle,
}

impl GraphEdge {
    pub fn new(kind: EdgeKind, source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{source}-{target}"),
            source,
            target,
            kind,
            style: EdgeStyle::for_kind(kind),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
