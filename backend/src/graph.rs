//! Flattens a scanned [`TreeNode`] into node and edge lists for rendering.

use tracing::debug;

use crate::models::{
    graph::{EdgeKind, GraphData, GraphEdge, GraphNode, NodeKind, Position},
    tree::TreeNode,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Adds a decorative edge from each child to the next one under the same
    /// parent. These edges only affect presentation.
    pub sibling_edges: bool,
}

/// Index of a node in the arena, in depth-first pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeHandle(usize);

impl NodeHandle {
    fn id(self) -> String {
        format!("n{}", self.0)
    }
}

struct ArenaEntry {
    label: String,
    path: Vec<String>,
}

#[derive(Default)]
struct NodeArena {
    entries: Vec<ArenaEntry>,
}

impl NodeArena {
    fn insert(&mut self, label: &str, parent: Option<NodeHandle>) -> NodeHandle {
        let mut path = parent
            .map(|handle| self.entries[handle.0].path.clone())
            .unwrap_or_default();
        path.push(label.to_string());
        self.entries.push(ArenaEntry {
            label: label.to_string(),
            path,
        });
        NodeHandle(self.entries.len() - 1)
    }
}

struct Frame<'a> {
    handle: NodeHandle,
    children: std::slice::Iter<'a, TreeNode>,
    previous: Option<NodeHandle>,
}

/// Converts `tree` into graph nodes and edges.
///
/// Ids come from arena handles rather than labels, so two entries with the
/// same name sequence never collide. The root gets [`NodeKind::Root`]; every
/// other entry, directory or file, is [`NodeKind::File`]. Children are visited
/// in scanner order, which fixes both id assignment and sibling adjacency.
pub fn convert(tree: &TreeNode, options: ConvertOptions) -> GraphData {
    let mut arena = NodeArena::default();
    let mut edges = Vec::new();

    let root = arena.insert(&tree.label, None);
    let mut stack = vec![Frame {
        handle: root,
        children: tree.children().iter(),
        previous: None,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.children.next() else {
            stack.pop();
            continue;
        };

        let parent = frame.handle;
        let handle = arena.insert(&child.label, Some(parent));
        let previous = frame.previous.replace(handle);

        edges.push(GraphEdge::new(EdgeKind::Parent, parent.id(), handle.id()));
        if options.sibling_edges
            && let Some(previous) = previous
        {
            edges.push(GraphEdge::new(EdgeKind::Sibling, previous.id(), handle.id()));
        }

        if child.is_directory() {
            stack.push(Frame {
                handle,
                children: child.children().iter(),
                previous: None,
            });
        }
    }

    let nodes: Vec<GraphNode> = arena
        .entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| GraphNode {
            id: NodeHandle(index).id(),
            label: entry.label,
            position: Position::default(),
            kind: if index == root.0 {
                NodeKind::Root
            } else {
                NodeKind::File
            },
            path: entry.path,
        })
        .collect();

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        sibling_edges = options.sibling_edges,
        "converted tree to graph"
    );
    GraphData { nodes, edges }
}
