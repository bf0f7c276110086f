use serde::{Deserialize, Serialize};

/// One filesystem entry that survived the scan filters.
///
/// Directories always carry `children` (possibly empty); files never do, and
/// the key is left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn file(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: None,
        }
    }

    pub fn directory(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children: Some(children),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::count).sum::<usize>()
    }
}
